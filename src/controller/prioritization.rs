use super::submit::FormControl;
use super::{Context, Notifier, Submission};
use crate::api::{DashboardApi, PrioritizationRequest};
use crate::page::{PrioritizationElements, ScrollBehavior};

const LOADING_LABEL: &str = "Prioritizing...";
const FAILURE_NOTICE: &str = "An error occurred during test prioritization.";

/// Identifiers placed in an empty test list when the page loads.
pub const DEFAULT_TEST_LIST: &[&str] = &[
    "tests/ui/test_login.py::test_valid_login",
    "tests/ui/test_login.py::test_invalid_login",
    "tests/api/test_auth.py::test_login_success",
    "tests/api/test_transactions.py::test_get_transactions",
    "tests/smoke/test_health.py::test_ui_health",
];

/// Test-prioritization form handler.
pub struct PrioritizationForm {
    elements: PrioritizationElements,
    control: FormControl,
}

impl PrioritizationForm {
    pub fn new(elements: PrioritizationElements) -> Self {
        let control = FormControl::new(
            "test-prioritization",
            elements.submit.clone(),
            LOADING_LABEL,
            FAILURE_NOTICE,
        );
        Self { elements, control }
    }

    pub(crate) fn in_flight(&self) -> bool {
        self.control.in_flight()
    }

    /// Fill the test list with `defaults` unless the user already typed one.
    pub(crate) fn prefill(&self, defaults: &[String]) {
        let mut list = self.elements.test_list.borrow_mut();
        if list.is_empty() {
            list.set(defaults.join("\n"));
        }
    }

    pub(crate) fn submit<A: DashboardApi, N: Notifier>(
        &self,
        ctx: &Context<'_, A, N>,
    ) -> Submission {
        let request = PrioritizationRequest {
            tests: self.elements.test_list.borrow().value.clone(),
        };
        tracing::debug!(tests = request.identifiers().len(), "prioritizing tests");

        self.control.run(
            ctx,
            || ctx.api.prioritize_tests(&request),
            |result| {
                let el = &self.elements;
                el.results.borrow_mut().reveal();
                el.message.borrow_mut().set(result.message);
                el.prioritized.borrow_mut().items = result.prioritized_tests;
                el.visualization.borrow_mut().src = Some(result.visualization);
                el.results
                    .borrow_mut()
                    .scroll_into_view(ScrollBehavior::Smooth);
                Ok(())
            },
        )
    }
}
