//! Dashboard controller.
//!
//! Wires the page's three forms, the data-file selector and the navigation
//! bar to a [`DashboardApi`]. The controller owns no state of its own beyond
//! per-form in-flight flags and a teardown token; everything visible lives
//! in the injected [`Page`] elements.
//!
//! All work runs on the dispatching thread. Requests from different forms
//! are independent and each one only writes its own section of the page,
//! except for the data-file selector which is rebuilt wholesale on every
//! reload.

mod anomaly;
mod data_files;
mod generation;
mod nav;
mod prioritization;
mod submit;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::api::DashboardApi;
use crate::page::Page;

pub use anomaly::AnomalyForm;
pub use data_files::DataFileLoader;
pub use generation::GenerationForm;
pub use nav::NavHighlighter;
pub use prioritization::{DEFAULT_TEST_LIST, PrioritizationForm};

// ---------------------------------------------------------------------------
// Notifications and results
// ---------------------------------------------------------------------------

/// Blocking user-facing notification channel.
pub trait Notifier {
    fn alert(&self, message: &str);
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn alert(&self, message: &str) {
        (**self).alert(message)
    }
}

/// How a submission ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Success response rendered into the page.
    Rendered,
    /// Backend answered with a non-success status; carries its message.
    Rejected(String),
    /// Transport, decode, input or render failure.
    Failed,
    /// The form already had a request in flight; nothing was sent.
    Busy,
    /// The controller was torn down; the response, if any, was discarded.
    Abandoned,
}

impl Submission {
    pub fn is_rendered(&self) -> bool {
        matches!(self, Submission::Rendered)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormId {
    DataGeneration,
    AnomalyDetection,
    TestPrioritization,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Submit(FormId),
    /// Click on the navigation link at this position.
    NavClick(usize),
}

// ---------------------------------------------------------------------------
// Cancellation
// ---------------------------------------------------------------------------

/// Teardown signal shared between the controller and anything that outlives
/// a single call into it.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Collaborators handed to a handler for the duration of one call.
pub(crate) struct Context<'a, A, N> {
    pub(crate) api: &'a A,
    pub(crate) notifier: &'a N,
    pub(crate) cancel: &'a CancelToken,
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

pub struct DashboardController<A, N> {
    api: A,
    notifier: N,
    cancel: CancelToken,
    default_tests: Vec<String>,
    nav: NavHighlighter,
    files: DataFileLoader,
    generation: GenerationForm,
    anomaly: AnomalyForm,
    prioritization: PrioritizationForm,
}

impl<A: DashboardApi, N: Notifier> DashboardController<A, N> {
    /// Bind handlers to the elements of `page`.
    pub fn new(api: A, notifier: N, page: &Page) -> Self {
        Self {
            api,
            notifier,
            cancel: CancelToken::new(),
            default_tests: DEFAULT_TEST_LIST.iter().map(|s| s.to_string()).collect(),
            nav: NavHighlighter::new(page.nav.clone()),
            files: DataFileLoader::new(page.anomaly.data_file.clone()),
            generation: GenerationForm::new(page.generation.clone()),
            anomaly: AnomalyForm::new(page.anomaly.clone()),
            prioritization: PrioritizationForm::new(page.prioritization.clone()),
        }
    }

    /// Identifiers prefilled into an empty test list by [`initialize`](Self::initialize).
    pub fn with_default_tests(mut self, tests: Vec<String>) -> Self {
        self.default_tests = tests;
        self
    }

    /// Page-ready work: prefill the test list and load the data-file list.
    pub fn initialize(&self) {
        self.prioritization.prefill(&self.default_tests);
        self.reload_data_files();
    }

    /// Handle one page event. Returns the submission result for submit events.
    pub fn dispatch(&self, event: Event) -> Option<Submission> {
        match event {
            Event::Submit(form) => Some(self.submit(form)),
            Event::NavClick(index) => {
                self.nav.click(index);
                None
            }
        }
    }

    pub fn submit(&self, form: FormId) -> Submission {
        let ctx = self.context();
        match form {
            FormId::DataGeneration => self.generation.submit(&ctx, &self.files),
            FormId::AnomalyDetection => self.anomaly.submit(&ctx),
            FormId::TestPrioritization => self.prioritization.submit(&ctx),
        }
    }

    pub fn click_nav(&self, index: usize) -> bool {
        self.nav.click(index)
    }

    /// Refresh the data-file selector. Returns the number of files listed,
    /// or `None` if the listing failed (the selector is left as it was).
    pub fn reload_data_files(&self) -> Option<usize> {
        self.files.reload(&self.context())
    }

    /// Whether `form` currently has a request in flight.
    pub fn is_busy(&self, form: FormId) -> bool {
        match form {
            FormId::DataGeneration => self.generation.in_flight(),
            FormId::AnomalyDetection => self.anomaly.in_flight(),
            FormId::TestPrioritization => self.prioritization.in_flight(),
        }
    }

    /// Stop issuing requests and discard any response that settles later.
    pub fn teardown(&self) {
        tracing::debug!("dashboard controller torn down");
        self.cancel.cancel();
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    fn context(&self) -> Context<'_, A, N> {
        Context {
            api: &self.api,
            notifier: &self.notifier,
            cancel: &self.cancel,
        }
    }
}

impl<A, N> Drop for DashboardController<A, N> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
