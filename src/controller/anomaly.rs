use super::submit::FormControl;
use super::{Context, Notifier, Submission};
use crate::api::{AnomalyRequest, DashboardApi};
use crate::page::{AnomalyElements, ScrollBehavior};
use crate::render::{DataType, anomaly_rows};

const LOADING_LABEL: &str = "Detecting...";
const FAILURE_NOTICE: &str = "An error occurred during anomaly detection.";

/// Anomaly-detection form handler.
///
/// The row layout follows the data type that was submitted, not whatever
/// the selector shows when the response arrives.
pub struct AnomalyForm {
    elements: AnomalyElements,
    control: FormControl,
}

impl AnomalyForm {
    pub fn new(elements: AnomalyElements) -> Self {
        let control = FormControl::new(
            "anomaly-detection",
            elements.submit.clone(),
            LOADING_LABEL,
            FAILURE_NOTICE,
        );
        Self { elements, control }
    }

    pub(crate) fn in_flight(&self) -> bool {
        self.control.in_flight()
    }

    pub(crate) fn submit<A: DashboardApi, N: Notifier>(
        &self,
        ctx: &Context<'_, A, N>,
    ) -> Submission {
        let request = self.read_request();
        let data_type = DataType::parse(&request.data_type);
        tracing::debug!(
            data_type = data_type.as_str(),
            data_file = %request.data_file,
            "detecting anomalies"
        );

        self.control.run(
            ctx,
            || ctx.api.detect_anomalies(&request),
            |result| {
                let rows = anomaly_rows(&data_type, &result.anomalies)?;

                let el = &self.elements;
                el.results.borrow_mut().reveal();
                el.message.borrow_mut().set(result.message);
                el.visualization.borrow_mut().src = Some(result.visualization);
                el.table.borrow_mut().replace(rows);
                el.results
                    .borrow_mut()
                    .scroll_into_view(ScrollBehavior::Smooth);
                Ok(())
            },
        )
    }

    fn read_request(&self) -> AnomalyRequest {
        AnomalyRequest {
            data_type: self.elements.data_type.borrow().value.clone(),
            data_file: self.elements.data_file.borrow().value().to_string(),
        }
    }
}
