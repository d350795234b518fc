//! Formatting and view models.
//!
//! Everything here is pure. Handlers compute a complete view from a
//! response first and only then write it into page elements, so a payload
//! that cannot be rendered never leaves a half-updated page behind.

use serde::Serialize;

use crate::api::{Anomaly, DataFileEntry, GenerationResult};
use crate::error::{DashboardError, Result};
use crate::page::SelectOption;

/// Response times strictly above this many seconds are labelled "high".
pub const RESPONSE_TIME_THRESHOLD: f64 = 0.5;

/// Description shown for a transaction anomaly the backend left unexplained.
pub const UNEXPLAINED_TRANSACTION: &str = "Unusual transaction pattern";

const KIB: u64 = 1024;
const MIB: u64 = 1024 * 1024;

// ---------------------------------------------------------------------------
// Scalar formatting
// ---------------------------------------------------------------------------

/// Human-readable size in binary units: bytes, KB (KiB), MB (MiB).
pub fn format_file_size(bytes: u64) -> String {
    if bytes < KIB {
        format!("{bytes} bytes")
    } else if bytes < MIB {
        format!("{} KB", to_fixed(bytes as f64 / KIB as f64, 1))
    } else {
        format!("{} MB", to_fixed(bytes as f64 / MIB as f64, 1))
    }
}

pub fn format_currency(amount: f64) -> String {
    format!("${}", to_fixed(amount, 2))
}

pub fn format_seconds(value: f64) -> String {
    format!("{} seconds", to_fixed(value, 4))
}

/// Extra fraction digits printed to tell an exact halfway value from a
/// near one.
const TIE_CHECK_DIGITS: usize = 25;

/// Fixed-point text with `digits` decimals.
///
/// `{:.N}` breaks exact ties toward the even digit; here they round away
/// from zero, so `2.125` becomes `2.13` and `1.25` becomes `1.3`.
fn to_fixed(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let exact = format!("{:.*}", digits + TIE_CHECK_DIGITS, value.abs());
    let (kept, rest) = exact.split_at(exact.len() - TIE_CHECK_DIGITS);
    let is_tie = rest.starts_with('5') && rest[1..].bytes().all(|b| b == b'0');
    if !is_tie {
        return format!("{value:.digits$}");
    }

    let rounded = increment_last_digit(kept);
    let rounded = rounded.trim_end_matches('.');
    if value.is_sign_negative() {
        format!("-{rounded}")
    } else {
        rounded.to_string()
    }
}

/// Add one unit in the last place of a non-negative decimal string.
fn increment_last_digit(decimal: &str) -> String {
    let mut digits: Vec<char> = decimal.chars().collect();
    let mut i = digits.len();
    loop {
        if i == 0 {
            digits.insert(0, '1');
            break;
        }
        i -= 1;
        match digits[i] {
            '.' => continue,
            '9' => digits[i] = '0',
            d => {
                digits[i] = (d as u8 + 1) as char;
                break;
            }
        }
    }
    digits.into_iter().collect()
}

pub fn response_time_label(value: f64) -> &'static str {
    if value > RESPONSE_TIME_THRESHOLD {
        "high"
    } else {
        "low"
    }
}

// ---------------------------------------------------------------------------
// Anomalies
// ---------------------------------------------------------------------------

/// Declared kind of data submitted for anomaly detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataType {
    ResponseTimes,
    Transactions,
    /// Any other selector value; rendered like transactions.
    Other(String),
}

impl DataType {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "response_times" => Self::ResponseTimes,
            "transactions" => Self::Transactions,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::ResponseTimes => "response_times",
            Self::Transactions => "transactions",
            Self::Other(raw) => raw,
        }
    }
}

/// One row of the anomaly table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnomalyRow {
    /// 1-based position in the backend's list.
    pub index: usize,
    pub value: String,
    pub description: String,
}

/// Build table rows for `anomalies` using the layout of `data_type`.
///
/// Fails if an anomaly's shape does not match the layout (a bare number
/// where a transaction record is expected, or the reverse).
pub fn anomaly_rows(data_type: &DataType, anomalies: &[Anomaly]) -> Result<Vec<AnomalyRow>> {
    anomalies
        .iter()
        .enumerate()
        .map(|(i, anomaly)| {
            let index = i + 1;
            match (data_type, anomaly) {
                (DataType::ResponseTimes, Anomaly::Value(v)) => Ok(AnomalyRow {
                    index,
                    value: format_seconds(*v),
                    description: format!("Unusually {} response time", response_time_label(*v)),
                }),
                (DataType::ResponseTimes, Anomaly::Transaction(_)) => Err(DashboardError::Render(
                    format!("anomaly {index} is a record, expected a response time"),
                )),
                (_, Anomaly::Transaction(t)) => Ok(AnomalyRow {
                    index,
                    value: format_currency(t.amount),
                    description: t
                        .description
                        .as_deref()
                        .filter(|d| !d.is_empty())
                        .unwrap_or(UNEXPLAINED_TRANSACTION)
                        .to_string(),
                }),
                (_, Anomaly::Value(_)) => Err(DashboardError::Render(format!(
                    "anomaly {index} is a bare value, expected a transaction record"
                ))),
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Data generation
// ---------------------------------------------------------------------------

/// Display strings for the generation stats panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationView {
    pub message: String,
    pub accounts: String,
    pub transactions: String,
    pub anomalies: String,
    pub total_value: String,
    pub avg_transaction: String,
    pub categories: String,
    pub filename: String,
    pub category_amounts_src: String,
    pub timeline_src: String,
}

impl GenerationView {
    pub fn from_result(result: &GenerationResult) -> Self {
        let stats = &result.stats;
        let mut categories = stats.categories.clone();
        categories.sort();
        Self {
            message: result.message.clone(),
            accounts: stats.num_accounts.to_string(),
            transactions: stats.num_transactions.to_string(),
            anomalies: stats.num_anomalies.to_string(),
            total_value: format_currency(stats.total_value),
            avg_transaction: format_currency(stats.avg_transaction),
            categories: categories.join(", "),
            filename: result.filename.clone(),
            category_amounts_src: result.visualizations.category_amounts.clone(),
            timeline_src: result.visualizations.timeline.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Data files
// ---------------------------------------------------------------------------

pub fn data_file_option(entry: &DataFileEntry) -> SelectOption {
    SelectOption::new(
        entry.filename.clone(),
        format!("{} ({})", entry.filename, format_file_size(entry.size)),
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
