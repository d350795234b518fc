/// Request and response shapes exchanged with the dashboard backend.
///
/// Requests are sent as form-encoded field lists; responses are JSON
/// envelopes carrying a top-level `status` discriminator (see
/// [`super::Outcome`]).
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Timestamp format the backend uses for `modified` in the file listing.
const MODIFIED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// `POST /api/generate-data`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationRequest {
    pub num_accounts: u32,
    pub transactions_per_day: u32,
    pub num_days: u32,
}

impl GenerationRequest {
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("num_accounts", self.num_accounts.to_string()),
            ("transactions_per_day", self.transactions_per_day.to_string()),
            ("num_days", self.num_days.to_string()),
        ]
    }
}

/// `POST /api/anomaly-detection`
///
/// `data_type` is kept as the raw selector value; the renderer decides the
/// row layout from it (see [`crate::render::DataType`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnomalyRequest {
    pub data_type: String,
    pub data_file: String,
}

impl AnomalyRequest {
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("data_type", self.data_type.clone()),
            ("data_file", self.data_file.clone()),
        ]
    }
}

/// `POST /api/prioritize-tests`
///
/// The test list travels as one newline-delimited string, exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrioritizationRequest {
    pub tests: String,
}

impl PrioritizationRequest {
    /// Join identifiers into the newline-delimited wire form.
    pub fn from_identifiers<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tests = ids
            .into_iter()
            .map(|s| s.as_ref().to_string())
            .collect::<Vec<_>>()
            .join("\n");
        Self { tests }
    }

    /// Non-blank, trimmed identifiers in submission order.
    pub fn identifiers(&self) -> Vec<&str> {
        self.tests
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect()
    }

    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![("tests", self.tests.clone())]
    }
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// Success payload of `POST /api/generate-data`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GenerationResult {
    pub message: String,
    pub stats: GenerationStats,
    pub filename: String,
    pub visualizations: GenerationVisualizations,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GenerationStats {
    pub num_accounts: u64,
    pub num_transactions: u64,
    pub num_anomalies: u64,
    pub total_value: f64,
    pub avg_transaction: f64,
    /// Distinct transaction categories present in the generated set.
    #[serde(default)]
    pub categories: Vec<String>,
}

/// Image sources, usually `data:` URLs.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GenerationVisualizations {
    pub category_amounts: String,
    pub timeline: String,
}

/// Success payload of `POST /api/anomaly-detection`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AnomalyResult {
    pub message: String,
    pub visualization: String,
    pub anomalies: Vec<Anomaly>,
}

/// A flagged data point. Response-time detection yields bare numbers,
/// transaction detection yields records.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Anomaly {
    Value(f64),
    Transaction(TransactionAnomaly),
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TransactionAnomaly {
    pub amount: f64,
    #[serde(default)]
    pub description: Option<String>,
}

/// Success payload of `POST /api/prioritize-tests`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PrioritizationResult {
    pub message: String,
    pub prioritized_tests: Vec<String>,
    pub visualization: String,
}

/// Success payload of `GET /api/list-data-files`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DataFileListing {
    pub data_files: Vec<DataFileEntry>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DataFileEntry {
    pub filename: String,
    /// Size in bytes.
    pub size: u64,
    #[serde(default)]
    pub modified: Option<String>,
}

impl DataFileEntry {
    /// Parsed modification time, if the backend sent a well-formed one.
    pub fn modified_at(&self) -> Option<NaiveDateTime> {
        let raw = self.modified.as_deref()?;
        NaiveDateTime::parse_from_str(raw, MODIFIED_FORMAT).ok()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
