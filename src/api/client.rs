/// Blocking HTTP client for the dashboard backend.
///
/// Uses a shared `ureq` agent so connections are reused across the initial
/// file listing and the submission that follows it. POST bodies are
/// `application/x-www-form-urlencoded`; every response body is decoded as
/// JSON and classified into an [`Outcome`].
///
/// HTTP error statuses and network failures are not distinguished from the
/// caller's point of view: both come back as `Err`.
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{
    ANOMALY_DETECTION_PATH, AnomalyRequest, AnomalyResult, DashboardApi, DataFileListing,
    GENERATE_DATA_PATH, GenerationRequest, GenerationResult, LIST_DATA_FILES_PATH, Outcome,
    PRIORITIZE_TESTS_PATH, PrioritizationRequest, PrioritizationResult,
};
use crate::config::schema::ServerConfig;
use crate::error::{DashboardError, Result};

#[derive(Debug)]
pub struct HttpClient {
    base_url: String,
    timeout: Duration,
    agent: ureq::Agent,
}

impl HttpClient {
    /// Build a client from the resolved `[server]` config section.
    pub fn from_config(config: &ServerConfig) -> Self {
        let timeout = Duration::from_millis(config.timeout_ms);
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout,
            agent,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        fields: &[(&'static str, String)],
    ) -> Result<Outcome<T>> {
        let url = self.url(path);
        let pairs: Vec<(&str, &str)> = fields.iter().map(|(k, v)| (*k, v.as_str())).collect();

        tracing::debug!(%url, timeout_ms = self.timeout.as_millis() as u64, "POST");
        let resp = self.agent.post(&url).send_form(&pairs)?;
        decode(resp)
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> Result<Outcome<T>> {
        let url = self.url(path);

        tracing::debug!(%url, "GET");
        let resp = self.agent.get(&url).call()?;
        decode(resp)
    }
}

fn decode<T: DeserializeOwned>(resp: ureq::Response) -> Result<Outcome<T>> {
    let body: Value = resp
        .into_json()
        .map_err(|e| DashboardError::Decode(e.to_string()))?;
    Outcome::from_value(body)
}

impl DashboardApi for HttpClient {
    fn generate_data(&self, request: &GenerationRequest) -> Result<Outcome<GenerationResult>> {
        self.post_form(GENERATE_DATA_PATH, &request.form_fields())
    }

    fn detect_anomalies(&self, request: &AnomalyRequest) -> Result<Outcome<AnomalyResult>> {
        self.post_form(ANOMALY_DETECTION_PATH, &request.form_fields())
    }

    fn prioritize_tests(
        &self,
        request: &PrioritizationRequest,
    ) -> Result<Outcome<PrioritizationResult>> {
        self.post_form(PRIORITIZE_TESTS_PATH, &request.form_fields())
    }

    fn list_data_files(&self) -> Result<Outcome<DataFileListing>> {
        self.get(LIST_DATA_FILES_PATH)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
