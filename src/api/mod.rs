//! Typed contract with the dashboard backend.
//!
//! The backend exposes four endpoints:
//!
//! | Endpoint                 | Method | Payload            |
//! |--------------------------|--------|--------------------|
//! | `/api/generate-data`     | POST   | [`GenerationResult`]     |
//! | `/api/anomaly-detection` | POST   | [`AnomalyResult`]        |
//! | `/api/prioritize-tests`  | POST   | [`PrioritizationResult`] |
//! | `/api/list-data-files`   | GET    | [`DataFileListing`]      |
//!
//! Every response is wrapped in an envelope whose `status` field decides
//! between [`Outcome::Success`] and [`Outcome::Failure`].

pub mod client;
pub mod types;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::Result;

pub use client::HttpClient;
pub use types::{
    Anomaly, AnomalyRequest, AnomalyResult, DataFileEntry, DataFileListing, GenerationRequest,
    GenerationResult, GenerationStats, GenerationVisualizations, PrioritizationRequest,
    PrioritizationResult, TransactionAnomaly,
};

pub const GENERATE_DATA_PATH: &str = "/api/generate-data";
pub const ANOMALY_DETECTION_PATH: &str = "/api/anomaly-detection";
pub const PRIORITIZE_TESTS_PATH: &str = "/api/prioritize-tests";
pub const LIST_DATA_FILES_PATH: &str = "/api/list-data-files";

/// The only `status` value treated as success.
pub const STATUS_SUCCESS: &str = "success";

/// Shown when a failure envelope carries no `message`.
const UNKNOWN_ERROR: &str = "unknown error";

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

/// Application-level result of a well-formed response.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Success(T),
    /// `status` was absent or not `"success"`; carries the backend message.
    Failure(String),
}

impl<T: DeserializeOwned> Outcome<T> {
    /// Classify a decoded JSON body.
    ///
    /// A success envelope whose payload does not match `T` is a decode
    /// error, not an application failure.
    pub fn from_value(body: Value) -> Result<Self> {
        let status = body.get("status").and_then(Value::as_str);
        if status != Some(STATUS_SUCCESS) {
            let message = match body.get("message") {
                Some(Value::String(text)) => text.clone(),
                None | Some(Value::Null) => UNKNOWN_ERROR.to_string(),
                Some(other) => other.to_string(),
            };
            return Ok(Outcome::Failure(message));
        }
        let payload = serde_json::from_value(body)?;
        Ok(Outcome::Success(payload))
    }
}

// ---------------------------------------------------------------------------
// API seam
// ---------------------------------------------------------------------------

/// Remote operations the dashboard triggers.
///
/// [`HttpClient`] talks to a live backend; tests substitute an in-process
/// implementation.
pub trait DashboardApi {
    fn generate_data(&self, request: &GenerationRequest) -> Result<Outcome<GenerationResult>>;

    fn detect_anomalies(&self, request: &AnomalyRequest) -> Result<Outcome<AnomalyResult>>;

    fn prioritize_tests(
        &self,
        request: &PrioritizationRequest,
    ) -> Result<Outcome<PrioritizationResult>>;

    fn list_data_files(&self) -> Result<Outcome<DataFileListing>>;
}

impl<A: DashboardApi + ?Sized> DashboardApi for &A {
    fn generate_data(&self, request: &GenerationRequest) -> Result<Outcome<GenerationResult>> {
        (**self).generate_data(request)
    }

    fn detect_anomalies(&self, request: &AnomalyRequest) -> Result<Outcome<AnomalyResult>> {
        (**self).detect_anomalies(request)
    }

    fn prioritize_tests(
        &self,
        request: &PrioritizationRequest,
    ) -> Result<Outcome<PrioritizationResult>> {
        (**self).prioritize_tests(request)
    }

    fn list_data_files(&self) -> Result<Outcome<DataFileListing>> {
        (**self).list_data_files()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
