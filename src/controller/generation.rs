use super::data_files::DataFileLoader;
use super::submit::FormControl;
use super::{Context, Notifier, Submission};
use crate::api::{DashboardApi, GenerationRequest};
use crate::error::{DashboardError, Result};
use crate::page::{GenerationElements, Handle, ScrollBehavior, Text};
use crate::render::GenerationView;

const LOADING_LABEL: &str = "Generating...";
const FAILURE_NOTICE: &str = "An error occurred during data generation.";

/// Data-generation form handler.
pub struct GenerationForm {
    elements: GenerationElements,
    control: FormControl,
}

impl GenerationForm {
    pub fn new(elements: GenerationElements) -> Self {
        let control = FormControl::new(
            "data-generation",
            elements.submit.clone(),
            LOADING_LABEL,
            FAILURE_NOTICE,
        );
        Self { elements, control }
    }

    pub(crate) fn in_flight(&self) -> bool {
        self.control.in_flight()
    }

    /// Submit the form. On success the data-file list is reloaded so the
    /// new file can be picked for anomaly detection.
    pub(crate) fn submit<A: DashboardApi, N: Notifier>(
        &self,
        ctx: &Context<'_, A, N>,
        files: &DataFileLoader,
    ) -> Submission {
        self.control.run(
            ctx,
            || {
                let request = self.read_request()?;
                ctx.api.generate_data(&request)
            },
            |result| {
                let view = GenerationView::from_result(&result);
                self.apply(&view);
                files.reload(ctx);
                self.elements
                    .results
                    .borrow_mut()
                    .scroll_into_view(ScrollBehavior::Smooth);
                Ok(())
            },
        )
    }

    fn read_request(&self) -> Result<GenerationRequest> {
        Ok(GenerationRequest {
            num_accounts: parse_count(&self.elements.num_accounts, "number of accounts")?,
            transactions_per_day: parse_count(
                &self.elements.transactions_per_day,
                "transactions per day",
            )?,
            num_days: parse_count(&self.elements.num_days, "number of days")?,
        })
    }

    fn apply(&self, view: &GenerationView) {
        let el = &self.elements;
        el.results.borrow_mut().reveal();
        el.message.borrow_mut().set(view.message.as_str());
        el.stat_accounts.borrow_mut().set(view.accounts.as_str());
        el.stat_transactions.borrow_mut().set(view.transactions.as_str());
        el.stat_anomalies.borrow_mut().set(view.anomalies.as_str());
        el.stat_value.borrow_mut().set(view.total_value.as_str());
        el.stat_avg_transaction
            .borrow_mut()
            .set(view.avg_transaction.as_str());
        el.stat_categories.borrow_mut().set(view.categories.as_str());
        el.filename.borrow_mut().set(view.filename.as_str());
        el.viz_category_amounts.borrow_mut().src = Some(view.category_amounts_src.clone());
        el.viz_timeline.borrow_mut().src = Some(view.timeline_src.clone());
    }
}

fn parse_count(input: &Handle<Text>, field: &str) -> Result<u32> {
    let raw = input.borrow().value.trim().to_string();
    raw.parse().map_err(|_| {
        DashboardError::InvalidInput(format!("{field} must be a whole number, got '{raw}'"))
    })
}
