/// Shared submit cycle for the dashboard forms.
///
/// Every form goes through [`FormControl::run`]:
///
/// 1. Refuse if the form already has a request in flight.
/// 2. Swap the submit button to its loading label and disable it.
/// 3. Issue the request.
/// 4. Restore the button as soon as the request settles, whatever the result.
/// 5. Render on success, alert the backend's message on an application
///    failure, or log and alert a generic notice on a transport/parse failure.
///
/// The restore in step 4 lives in [`SubmitGuard`]'s `Drop`, so it also runs
/// if a request or render panics.
use std::cell::Cell;

use super::{Context, Notifier, Submission};
use crate::api::{DashboardApi, Outcome};
use crate::error::{DashboardError, Result};
use crate::page::{Button, Handle};

#[derive(Debug)]
pub(crate) struct FormControl {
    name: &'static str,
    button: Handle<Button>,
    loading_label: &'static str,
    failure_notice: &'static str,
    in_flight: Cell<bool>,
}

impl FormControl {
    pub(crate) fn new(
        name: &'static str,
        button: Handle<Button>,
        loading_label: &'static str,
        failure_notice: &'static str,
    ) -> Self {
        Self {
            name,
            button,
            loading_label,
            failure_notice,
            in_flight: Cell::new(false),
        }
    }

    pub(crate) fn in_flight(&self) -> bool {
        self.in_flight.get()
    }

    /// Run one submission.
    ///
    /// `render` must not touch the page until it can no longer fail.
    pub(crate) fn run<A, N, T>(
        &self,
        ctx: &Context<'_, A, N>,
        request: impl FnOnce() -> Result<Outcome<T>>,
        render: impl FnOnce(T) -> Result<()>,
    ) -> Submission
    where
        A: DashboardApi,
        N: Notifier,
    {
        if ctx.cancel.is_cancelled() {
            tracing::debug!(form = self.name, "submit ignored after teardown");
            return Submission::Abandoned;
        }

        let Some(guard) = SubmitGuard::engage(self) else {
            tracing::warn!(form = self.name, "submit ignored: request already in flight");
            return Submission::Busy;
        };
        let settled = request();
        drop(guard);

        if ctx.cancel.is_cancelled() {
            tracing::debug!(form = self.name, "discarding response settled after teardown");
            return Submission::Abandoned;
        }

        match settled {
            Err(err) => self.fail(ctx.notifier, &err),
            Ok(Outcome::Failure(message)) => {
                tracing::info!(form = self.name, %message, "backend rejected request");
                ctx.notifier.alert(&format!("Error: {message}"));
                Submission::Rejected(message)
            }
            Ok(Outcome::Success(payload)) => match render(payload) {
                Ok(()) => Submission::Rendered,
                Err(err) => self.fail(ctx.notifier, &err),
            },
        }
    }

    /// Transport/parse failure path: diagnostic to the log, generic notice
    /// to the user.
    pub(crate) fn fail<N: Notifier>(&self, notifier: &N, err: &DashboardError) -> Submission {
        tracing::error!(form = self.name, error = %err, "submission failed");
        notifier.alert(self.failure_notice);
        Submission::Failed
    }
}

/// Loading state of a form's submit button, reverted on drop.
pub(crate) struct SubmitGuard<'a> {
    control: &'a FormControl,
    saved: Button,
}

impl<'a> SubmitGuard<'a> {
    pub(crate) fn engage(control: &'a FormControl) -> Option<Self> {
        if control.in_flight.replace(true) {
            return None;
        }
        let saved = {
            let mut button = control.button.borrow_mut();
            let saved = button.clone();
            button.label = control.loading_label.to_string();
            button.enabled = false;
            saved
        };
        Some(Self { control, saved })
    }
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        {
            let mut button = self.control.button.borrow_mut();
            button.label = std::mem::take(&mut self.saved.label);
            button.enabled = self.saved.enabled;
        }
        self.control.in_flight.set(false);
    }
}
