/// Controller behavior against an in-process backend.
///
/// The mock API replays queued replies per endpoint and records every
/// request it receives. An optional hook runs while a request is "in
/// flight", which lets tests re-enter the controller or tear it down
/// mid-request.
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use mldash::api::{
    Anomaly, AnomalyRequest, AnomalyResult, DashboardApi, DataFileEntry, DataFileListing,
    GenerationRequest, GenerationResult, GenerationStats, GenerationVisualizations, Outcome,
    PrioritizationRequest, PrioritizationResult, TransactionAnomaly,
};
use mldash::controller::{DashboardController, Event, FormId, Notifier, Submission};
use mldash::error::{DashboardError, Result};
use mldash::page::{Button, Page, ScrollBehavior, SelectOption};

// ---------------------------------------------------------------------------
// Test doubles
// ---------------------------------------------------------------------------

type Reply<T> = Result<Outcome<T>>;

#[derive(Default)]
struct MockApi {
    generation: RefCell<VecDeque<Reply<GenerationResult>>>,
    anomaly: RefCell<VecDeque<Reply<AnomalyResult>>>,
    prioritization: RefCell<VecDeque<Reply<PrioritizationResult>>>,
    listing: RefCell<VecDeque<Reply<DataFileListing>>>,

    generation_requests: RefCell<Vec<GenerationRequest>>,
    anomaly_requests: RefCell<Vec<AnomalyRequest>>,
    prioritization_requests: RefCell<Vec<PrioritizationRequest>>,
    listing_calls: RefCell<usize>,

    hook: RefCell<Option<Box<dyn Fn()>>>,
}

impl MockApi {
    fn set_hook(&self, hook: impl Fn() + 'static) {
        *self.hook.borrow_mut() = Some(Box::new(hook));
    }

    fn run_hook(&self) {
        let hook = self.hook.borrow_mut().take();
        if let Some(hook) = hook {
            hook();
        }
    }

    fn next<T>(queue: &RefCell<VecDeque<Reply<T>>>) -> Reply<T> {
        queue
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(DashboardError::Transport("no reply queued".to_string())))
    }
}

/// Cloneable handle so tests keep access to the mock the controller owns.
#[derive(Clone)]
struct SharedApi(Rc<MockApi>);

impl DashboardApi for SharedApi {
    fn generate_data(&self, request: &GenerationRequest) -> Reply<GenerationResult> {
        self.0.generation_requests.borrow_mut().push(request.clone());
        let reply = MockApi::next(&self.0.generation);
        self.0.run_hook();
        reply
    }

    fn detect_anomalies(&self, request: &AnomalyRequest) -> Reply<AnomalyResult> {
        self.0.anomaly_requests.borrow_mut().push(request.clone());
        let reply = MockApi::next(&self.0.anomaly);
        self.0.run_hook();
        reply
    }

    fn prioritize_tests(&self, request: &PrioritizationRequest) -> Reply<PrioritizationResult> {
        self.0
            .prioritization_requests
            .borrow_mut()
            .push(request.clone());
        let reply = MockApi::next(&self.0.prioritization);
        self.0.run_hook();
        reply
    }

    fn list_data_files(&self) -> Reply<DataFileListing> {
        *self.0.listing_calls.borrow_mut() += 1;
        MockApi::next(&self.0.listing)
    }
}

#[derive(Clone, Default)]
struct Alerts(Rc<RefCell<Vec<String>>>);

impl Alerts {
    fn all(&self) -> Vec<String> {
        self.0.borrow().clone()
    }
}

impl Notifier for Alerts {
    fn alert(&self, message: &str) {
        self.0.borrow_mut().push(message.to_string());
    }
}

struct Harness {
    page: Page,
    api: Rc<MockApi>,
    alerts: Alerts,
    controller: Rc<DashboardController<SharedApi, Alerts>>,
}

fn harness() -> Harness {
    let page = Page::standard();
    let api = Rc::new(MockApi::default());
    let alerts = Alerts::default();
    let controller = Rc::new(DashboardController::new(
        SharedApi(api.clone()),
        alerts.clone(),
        &page,
    ));
    Harness {
        page,
        api,
        alerts,
        controller,
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

fn generation_result(total_value: f64) -> GenerationResult {
    GenerationResult {
        message: "Generated 4500 transactions for 100 accounts".to_string(),
        stats: GenerationStats {
            num_accounts: 100,
            num_transactions: 4500,
            num_anomalies: 45,
            total_value,
            avg_transaction: total_value / 4500.0,
            categories: vec!["groceries".to_string(), "utilities".to_string()],
        },
        filename: "banking_data_20240301_101500.json".to_string(),
        visualizations: GenerationVisualizations {
            category_amounts: "data:image/png;base64,Q0FU".to_string(),
            timeline: "data:image/png;base64,VElNRQ==".to_string(),
        },
    }
}

fn listing(files: &[(&str, u64)]) -> DataFileListing {
    DataFileListing {
        data_files: files
            .iter()
            .map(|(name, size)| DataFileEntry {
                filename: name.to_string(),
                size: *size,
                modified: None,
            })
            .collect(),
    }
}

fn response_times(values: &[f64]) -> AnomalyResult {
    AnomalyResult {
        message: format!("Detected {} anomalies in 100 response times", values.len()),
        visualization: "data:image/png;base64,UlQ=".to_string(),
        anomalies: values.iter().copied().map(Anomaly::Value).collect(),
    }
}

fn prioritized(tests: &[&str]) -> PrioritizationResult {
    PrioritizationResult {
        message: format!("Prioritized {} tests", tests.len()),
        prioritized_tests: tests.iter().map(|t| t.to_string()).collect(),
        visualization: "data:image/png;base64,RlI=".to_string(),
    }
}

fn fill_generation(page: &Page, accounts: &str, per_day: &str, days: &str) {
    page.generation.num_accounts.borrow_mut().set(accounts);
    page.generation.transactions_per_day.borrow_mut().set(per_day);
    page.generation.num_days.borrow_mut().set(days);
}

fn buttons(page: &Page) -> [Button; 3] {
    [
        page.generation.submit.get(),
        page.anomaly.submit.get(),
        page.prioritization.submit.get(),
    ]
}

fn results_visible(page: &Page) -> [bool; 3] {
    [
        page.generation.results.get().visible,
        page.anomaly.results.get().visible,
        page.prioritization.results.get().visible,
    ]
}

const ALL_FORMS: [FormId; 3] = [
    FormId::DataGeneration,
    FormId::AnomalyDetection,
    FormId::TestPrioritization,
];

// ---------------------------------------------------------------------------
// Data generation
// ---------------------------------------------------------------------------

#[test]
fn generation_success_renders_stats() {
    let h = harness();
    fill_generation(&h.page, "100", "50", "30");
    h.api
        .generation
        .borrow_mut()
        .push_back(Ok(Outcome::Success(generation_result(12345.678))));

    let outcome = h.controller.submit(FormId::DataGeneration);

    assert_eq!(outcome, Submission::Rendered);
    assert_eq!(
        h.api.generation_requests.borrow()[0],
        GenerationRequest {
            num_accounts: 100,
            transactions_per_day: 50,
            num_days: 30,
        }
    );

    let el = &h.page.generation;
    assert!(el.results.get().visible);
    assert_eq!(el.results.get().scroll, Some(ScrollBehavior::Smooth));
    assert_eq!(el.stat_value.get().value, "$12345.68");
    assert_eq!(el.stat_accounts.get().value, "100");
    assert_eq!(el.stat_transactions.get().value, "4500");
    assert_eq!(el.stat_anomalies.get().value, "45");
    assert_eq!(el.stat_categories.get().value, "groceries, utilities");
    assert_eq!(el.filename.get().value, "banking_data_20240301_101500.json");
    assert_eq!(
        el.viz_timeline.get().src.as_deref(),
        Some("data:image/png;base64,VElNRQ==")
    );
    assert!(h.alerts.all().is_empty());
}

#[test]
fn generation_success_reloads_data_files() {
    let h = harness();
    fill_generation(&h.page, "3", "5", "7");
    h.api
        .generation
        .borrow_mut()
        .push_back(Ok(Outcome::Success(generation_result(10.0))));
    h.api
        .listing
        .borrow_mut()
        .push_back(Ok(Outcome::Success(listing(&[(
            "banking_data_20240301_101500.json",
            4096,
        )]))));

    h.controller.submit(FormId::DataGeneration);

    assert_eq!(*h.api.listing_calls.borrow(), 1);
    let select = h.page.anomaly.data_file.get();
    assert_eq!(select.len(), 2);
    assert_eq!(
        select.options()[0].label,
        "banking_data_20240301_101500.json (4.0 KB)"
    );
}

#[test]
fn generation_with_unparseable_input_sends_nothing() {
    let h = harness();
    fill_generation(&h.page, "lots", "5", "30");

    let outcome = h.controller.submit(FormId::DataGeneration);

    assert_eq!(outcome, Submission::Failed);
    assert!(h.api.generation_requests.borrow().is_empty());
    assert_eq!(
        h.alerts.all(),
        vec!["An error occurred during data generation."]
    );
    assert_eq!(h.page.generation.submit.get(), Button::new("Generate Data"));
}

// ---------------------------------------------------------------------------
// Shared submit contract
// ---------------------------------------------------------------------------

#[test]
fn successful_submissions_restore_buttons() {
    let h = harness();
    fill_generation(&h.page, "100", "50", "30");
    let before = buttons(&h.page);

    h.api
        .generation
        .borrow_mut()
        .push_back(Ok(Outcome::Success(generation_result(1.0))));
    h.api
        .anomaly
        .borrow_mut()
        .push_back(Ok(Outcome::Success(response_times(&[0.9]))));
    h.api
        .prioritization
        .borrow_mut()
        .push_back(Ok(Outcome::Success(prioritized(&["a"]))));
    h.page.anomaly.data_type.borrow_mut().set("response_times");

    for form in ALL_FORMS {
        assert_eq!(h.controller.submit(form), Submission::Rendered, "{form:?}");
    }
    assert_eq!(buttons(&h.page), before);
}

#[test]
fn application_failures_alert_message_and_keep_results_hidden() {
    let h = harness();
    fill_generation(&h.page, "100", "50", "30");
    let before = buttons(&h.page);

    h.api
        .generation
        .borrow_mut()
        .push_back(Ok(Outcome::Failure("Error generating data: disk full".to_string())));
    h.api
        .anomaly
        .borrow_mut()
        .push_back(Ok(Outcome::Failure("Unsupported data type: logins".to_string())));
    h.api
        .prioritization
        .borrow_mut()
        .push_back(Ok(Outcome::Failure("No tests provided".to_string())));

    for form in ALL_FORMS {
        assert!(matches!(h.controller.submit(form), Submission::Rejected(_)));
    }

    assert_eq!(results_visible(&h.page), [false, false, false]);
    assert_eq!(buttons(&h.page), before);
    assert_eq!(
        h.alerts.all(),
        vec![
            "Error: Error generating data: disk full",
            "Error: Unsupported data type: logins",
            "Error: No tests provided",
        ]
    );
}

#[test]
fn transport_failures_show_generic_notice() {
    let h = harness();
    fill_generation(&h.page, "100", "50", "30");
    let before = buttons(&h.page);

    h.api
        .generation
        .borrow_mut()
        .push_back(Err(DashboardError::Transport("connection refused".to_string())));
    h.api
        .anomaly
        .borrow_mut()
        .push_back(Err(DashboardError::Http { status: 500 }));
    h.api
        .prioritization
        .borrow_mut()
        .push_back(Err(DashboardError::Decode("expected value at line 1".to_string())));

    for form in ALL_FORMS {
        assert_eq!(h.controller.submit(form), Submission::Failed);
    }

    assert_eq!(results_visible(&h.page), [false, false, false]);
    assert_eq!(buttons(&h.page), before);
    assert_eq!(
        h.alerts.all(),
        vec![
            "An error occurred during data generation.",
            "An error occurred during anomaly detection.",
            "An error occurred during test prioritization.",
        ]
    );
}

#[test]
fn failure_after_success_leaves_results_visible() {
    let h = harness();
    h.api
        .prioritization
        .borrow_mut()
        .push_back(Ok(Outcome::Success(prioritized(&["a", "b"]))));
    h.api
        .prioritization
        .borrow_mut()
        .push_back(Err(DashboardError::Http { status: 502 }));

    assert_eq!(
        h.controller.submit(FormId::TestPrioritization),
        Submission::Rendered
    );
    assert_eq!(
        h.controller.submit(FormId::TestPrioritization),
        Submission::Failed
    );

    let el = &h.page.prioritization;
    assert!(el.results.get().visible);
    assert_eq!(el.prioritized.get().items, vec!["a", "b"]);
}

#[test]
fn resubmission_while_in_flight_is_refused() {
    let h = harness();
    h.api
        .prioritization
        .borrow_mut()
        .push_back(Ok(Outcome::Success(prioritized(&["a"]))));

    let nested = Rc::new(RefCell::new(None));
    let seen = nested.clone();
    let weak = Rc::downgrade(&h.controller);
    h.api.set_hook(move || {
        if let Some(controller) = weak.upgrade() {
            assert!(controller.is_busy(FormId::TestPrioritization));
            *seen.borrow_mut() = Some(controller.submit(FormId::TestPrioritization));
        }
    });

    let outcome = h.controller.submit(FormId::TestPrioritization);

    assert_eq!(outcome, Submission::Rendered);
    assert_eq!(*nested.borrow(), Some(Submission::Busy));
    assert_eq!(h.api.prioritization_requests.borrow().len(), 1);
    assert!(!h.controller.is_busy(FormId::TestPrioritization));
}

#[test]
fn other_forms_are_not_blocked_by_an_in_flight_request() {
    let h = harness();
    h.api
        .prioritization
        .borrow_mut()
        .push_back(Ok(Outcome::Success(prioritized(&["a"]))));
    h.api
        .anomaly
        .borrow_mut()
        .push_back(Ok(Outcome::Success(response_times(&[0.7]))));
    h.page.anomaly.data_type.borrow_mut().set("response_times");

    let nested = Rc::new(RefCell::new(None));
    let seen = nested.clone();
    let weak = Rc::downgrade(&h.controller);
    h.api.set_hook(move || {
        if let Some(controller) = weak.upgrade() {
            *seen.borrow_mut() = Some(controller.submit(FormId::AnomalyDetection));
        }
    });

    h.controller.submit(FormId::TestPrioritization);

    assert_eq!(*nested.borrow(), Some(Submission::Rendered));
    assert!(h.page.anomaly.results.get().visible);
    assert!(h.page.prioritization.results.get().visible);
}

// ---------------------------------------------------------------------------
// Teardown
// ---------------------------------------------------------------------------

#[test]
fn response_after_teardown_is_discarded() {
    let h = harness();
    h.api
        .prioritization
        .borrow_mut()
        .push_back(Ok(Outcome::Success(prioritized(&["a"]))));
    let token = h.controller.cancel_token();
    h.api.set_hook(move || token.cancel());

    let outcome = h.controller.submit(FormId::TestPrioritization);

    assert_eq!(outcome, Submission::Abandoned);
    assert!(!h.page.prioritization.results.get().visible);
    assert!(h.alerts.all().is_empty());
    assert_eq!(
        h.page.prioritization.submit.get(),
        Button::new("Prioritize Tests")
    );
}

#[test]
fn no_requests_after_teardown() {
    let h = harness();
    h.controller.teardown();

    for form in ALL_FORMS {
        assert_eq!(h.controller.submit(form), Submission::Abandoned);
    }
    assert_eq!(h.controller.reload_data_files(), None);

    assert!(h.api.generation_requests.borrow().is_empty());
    assert!(h.api.anomaly_requests.borrow().is_empty());
    assert!(h.api.prioritization_requests.borrow().is_empty());
    assert_eq!(*h.api.listing_calls.borrow(), 0);
}

// ---------------------------------------------------------------------------
// Anomaly detection
// ---------------------------------------------------------------------------

#[test]
fn response_time_labels_use_strict_threshold() {
    let h = harness();
    h.page.anomaly.data_type.borrow_mut().set("response_times");
    h.api
        .anomaly
        .borrow_mut()
        .push_back(Ok(Outcome::Success(response_times(&[0.6, 0.3, 0.5]))));

    assert_eq!(
        h.controller.submit(FormId::AnomalyDetection),
        Submission::Rendered
    );

    let rows = h.page.anomaly.table.get().rows;
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].index, 1);
    assert_eq!(rows[0].value, "0.6000 seconds");
    assert!(rows[0].description.contains("high"));
    assert!(rows[1].description.contains("low"));
    assert!(rows[2].description.contains("low"));
    assert_eq!(rows[2].index, 3);
}

#[test]
fn transaction_rows_show_amount_and_description() {
    let h = harness();
    h.page.anomaly.data_type.borrow_mut().set("transactions");
    h.api
        .anomaly
        .borrow_mut()
        .push_back(Ok(Outcome::Success(AnomalyResult {
            message: "Detected 2 anomalies in 450 transactions".to_string(),
            visualization: "data:image/png;base64,VFg=".to_string(),
            anomalies: vec![
                Anomaly::Transaction(TransactionAnomaly {
                    amount: 9876.5,
                    description: Some("Large transfer at 3am".to_string()),
                }),
                Anomaly::Transaction(TransactionAnomaly {
                    amount: 0.129,
                    description: None,
                }),
            ],
        })));

    h.controller.submit(FormId::AnomalyDetection);

    let el = &h.page.anomaly;
    let rows = el.table.get().rows;
    assert_eq!(rows[0].value, "$9876.50");
    assert_eq!(rows[0].description, "Large transfer at 3am");
    assert_eq!(rows[1].value, "$0.13");
    assert_eq!(rows[1].description, "Unusual transaction pattern");
    assert_eq!(
        el.message.get().value,
        "Detected 2 anomalies in 450 transactions"
    );
}

#[test]
fn anomaly_table_is_rebuilt_not_appended() {
    let h = harness();
    h.page.anomaly.data_type.borrow_mut().set("response_times");
    h.api
        .anomaly
        .borrow_mut()
        .push_back(Ok(Outcome::Success(response_times(&[0.9, 0.8, 0.7]))));
    h.api
        .anomaly
        .borrow_mut()
        .push_back(Ok(Outcome::Success(response_times(&[0.1]))));

    h.controller.submit(FormId::AnomalyDetection);
    h.controller.submit(FormId::AnomalyDetection);

    let rows = h.page.anomaly.table.get().rows;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].value, "0.1000 seconds");
}

#[test]
fn mismatched_anomaly_shape_fails_without_touching_page() {
    let h = harness();
    h.page.anomaly.data_type.borrow_mut().set("transactions");
    h.api
        .anomaly
        .borrow_mut()
        .push_back(Ok(Outcome::Success(response_times(&[0.9]))));

    let outcome = h.controller.submit(FormId::AnomalyDetection);

    assert_eq!(outcome, Submission::Failed);
    let el = &h.page.anomaly;
    assert!(!el.results.get().visible);
    assert!(el.table.get().rows.is_empty());
    assert!(el.message.get().is_empty());
    assert_eq!(
        h.alerts.all(),
        vec!["An error occurred during anomaly detection."]
    );
}

#[test]
fn anomaly_request_carries_type_and_selected_file() {
    let h = harness();
    h.api
        .listing
        .borrow_mut()
        .push_back(Ok(Outcome::Success(listing(&[("a.json", 10), ("b.csv", 20)]))));
    h.controller.initialize();

    h.page.anomaly.data_type.borrow_mut().set("transactions");
    assert!(h.page.anomaly.data_file.borrow_mut().select("b.csv"));
    h.api
        .anomaly
        .borrow_mut()
        .push_back(Ok(Outcome::Failure("nothing to see".to_string())));

    h.controller.submit(FormId::AnomalyDetection);

    assert_eq!(
        h.api.anomaly_requests.borrow()[0],
        AnomalyRequest {
            data_type: "transactions".to_string(),
            data_file: "b.csv".to_string(),
        }
    );
}

#[test]
fn anomaly_request_defaults_to_placeholder_value() {
    let h = harness();
    h.page.anomaly.data_type.borrow_mut().set("response_times");
    h.api
        .anomaly
        .borrow_mut()
        .push_back(Ok(Outcome::Success(response_times(&[]))));

    h.controller.submit(FormId::AnomalyDetection);

    assert_eq!(h.api.anomaly_requests.borrow()[0].data_file, "");
}

#[test]
fn fresh_page_submits_response_times_layout() {
    let h = harness();
    h.api
        .anomaly
        .borrow_mut()
        .push_back(Ok(Outcome::Success(response_times(&[0.7]))));

    assert_eq!(h.controller.submit(FormId::AnomalyDetection), Submission::Rendered);

    assert_eq!(h.api.anomaly_requests.borrow()[0].data_type, "response_times");
    let rows = h.page.anomaly.table.get().rows;
    assert_eq!(rows[0].value, "0.7000 seconds");
    assert_eq!(rows[0].description, "Unusually high response time");
}

// ---------------------------------------------------------------------------
// Data files
// ---------------------------------------------------------------------------

#[test]
fn data_file_reload_keeps_default_entry() {
    let h = harness();
    let select = h.page.anomaly.data_file.clone();
    let default_before = select.borrow().default_entry().clone();
    let default_ptr = select.borrow().default_entry() as *const SelectOption;

    h.api
        .listing
        .borrow_mut()
        .push_back(Ok(Outcome::Success(listing(&[("small.json", 500), ("big.csv", 5_242_880)]))));
    h.api
        .listing
        .borrow_mut()
        .push_back(Ok(Outcome::Success(listing(&[("x.json", 2048), ("y.json", 1)]))));

    assert_eq!(h.controller.reload_data_files(), Some(2));
    assert_eq!(h.controller.reload_data_files(), Some(2));

    let select = select.borrow();
    assert_eq!(select.len(), 3);
    assert_eq!(*select.default_entry(), default_before);
    assert!(std::ptr::eq(select.default_entry(), default_ptr));
    let labels: Vec<_> = select.options().iter().map(|o| o.label.as_str()).collect();
    assert_eq!(labels, vec!["x.json (2.0 KB)", "y.json (1 bytes)"]);
}

#[test]
fn data_file_labels_use_binary_units() {
    let h = harness();
    h.api
        .listing
        .borrow_mut()
        .push_back(Ok(Outcome::Success(listing(&[("small.json", 500), ("big.csv", 5_242_880)]))));

    h.controller.reload_data_files();

    let select = h.page.anomaly.data_file.get();
    assert_eq!(select.options()[0].label, "small.json (500 bytes)");
    assert_eq!(select.options()[1].label, "big.csv (5.0 MB)");
}

#[test]
fn listing_failures_leave_selector_alone_and_stay_quiet() {
    let h = harness();
    h.api
        .listing
        .borrow_mut()
        .push_back(Ok(Outcome::Success(listing(&[("keep.json", 100)]))));
    h.api
        .listing
        .borrow_mut()
        .push_back(Ok(Outcome::Failure("data dir missing".to_string())));
    h.api
        .listing
        .borrow_mut()
        .push_back(Err(DashboardError::Transport("timed out".to_string())));

    assert_eq!(h.controller.reload_data_files(), Some(1));
    assert_eq!(h.controller.reload_data_files(), None);
    assert_eq!(h.controller.reload_data_files(), None);

    assert_eq!(h.page.anomaly.data_file.borrow().options()[0].value, "keep.json");
    assert!(h.alerts.all().is_empty());
}

// ---------------------------------------------------------------------------
// Test prioritization
// ---------------------------------------------------------------------------

#[test]
fn prioritized_tests_render_in_response_order() {
    let h = harness();
    h.page
        .prioritization
        .test_list
        .borrow_mut()
        .set("tests/x.py::b\ntests/x.py::a\n");
    h.api
        .prioritization
        .borrow_mut()
        .push_back(Ok(Outcome::Success(prioritized(&["a", "b"]))));

    h.controller.submit(FormId::TestPrioritization);

    assert_eq!(
        h.api.prioritization_requests.borrow()[0].tests,
        "tests/x.py::b\ntests/x.py::a\n"
    );
    let el = &h.page.prioritization;
    assert_eq!(el.prioritized.get().items, vec!["a", "b"]);
    assert_eq!(el.message.get().value, "Prioritized 2 tests");
    assert_eq!(
        el.visualization.get().src.as_deref(),
        Some("data:image/png;base64,RlI=")
    );
}

#[test]
fn initialize_prefills_empty_test_list() {
    let h = harness();
    h.controller.initialize();

    let list = h.page.prioritization.test_list.get().value;
    assert_eq!(list.lines().count(), 5);
    assert!(list.starts_with("tests/ui/test_login.py::test_valid_login"));
    assert_eq!(*h.api.listing_calls.borrow(), 1);
}

#[test]
fn initialize_keeps_user_test_list() {
    let h = harness();
    h.page
        .prioritization
        .test_list
        .borrow_mut()
        .set("tests/mine.py::only");
    h.controller.initialize();

    assert_eq!(
        h.page.prioritization.test_list.get().value,
        "tests/mine.py::only"
    );
}

#[test]
fn configured_default_tests_are_used() {
    let page = Page::standard();
    let api = Rc::new(MockApi::default());
    let controller = DashboardController::new(SharedApi(api), Alerts::default(), &page)
        .with_default_tests(vec!["a::one".to_string(), "b::two".to_string()]);

    controller.initialize();

    assert_eq!(page.prioritization.test_list.get().value, "a::one\nb::two");
}

// ---------------------------------------------------------------------------
// Navigation and dispatch
// ---------------------------------------------------------------------------

#[test]
fn nav_clicks_keep_one_active_link() {
    let h = harness();
    assert_eq!(h.controller.dispatch(Event::NavClick(1)), None);
    h.controller.dispatch(Event::NavClick(2));
    h.controller.dispatch(Event::NavClick(0));

    let nav = h.page.nav.get();
    assert_eq!(nav.active(), Some(0));
    assert_eq!(nav.links.iter().filter(|l| l.active).count(), 1);
    assert!(!h.controller.click_nav(9));
    assert_eq!(h.page.nav.get().active(), Some(0));
}

#[test]
fn dispatch_submit_routes_to_form() {
    let h = harness();
    h.api
        .prioritization
        .borrow_mut()
        .push_back(Ok(Outcome::Success(prioritized(&["z"]))));

    let outcome = h
        .controller
        .dispatch(Event::Submit(FormId::TestPrioritization));

    assert_eq!(outcome, Some(Submission::Rendered));
    assert!(h.api.generation_requests.borrow().is_empty());
}
