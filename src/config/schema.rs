/// Configuration schema and defaults for mldash.
///
/// Sections: `[server]`, `[generation]`, `[anomaly]`, `[prioritization]`,
/// `[logging]`. Every field has a built-in default; a config file only
/// needs the values it changes.
use serde::{Deserialize, Serialize};

use crate::controller::DEFAULT_TEST_LIST;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Maps to `~/.mldash/config.toml` and `.mldash.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub server: ServerConfig,
    pub generation: GenerationDefaults,
    pub anomaly: AnomalyDefaults,
    pub prioritization: PrioritizationDefaults,
    pub logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// [server]
// ---------------------------------------------------------------------------

/// Where the backend lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub base_url: String,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            timeout_ms: 30_000,
        }
    }
}

// ---------------------------------------------------------------------------
// Form defaults
// ---------------------------------------------------------------------------

/// Values placed in the data-generation inputs when a flag is omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationDefaults {
    pub num_accounts: u32,
    pub transactions_per_day: u32,
    pub num_days: u32,
}

impl Default for GenerationDefaults {
    fn default() -> Self {
        Self {
            num_accounts: 5,
            transactions_per_day: 5,
            num_days: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnomalyDefaults {
    /// `response_times` or `transactions`.
    pub data_type: String,
}

impl Default for AnomalyDefaults {
    fn default() -> Self {
        Self {
            data_type: "response_times".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrioritizationDefaults {
    /// Prefilled into an empty test list.
    pub default_tests: Vec<String>,
}

impl Default for PrioritizationDefaults {
    fn default() -> Self {
        Self {
            default_tests: DEFAULT_TEST_LIST.iter().map(|s| s.to_string()).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// [logging]
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive, e.g. `warn` or `mldash=debug`.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Annotated default config written by `mldash config init`.
    pub fn default_toml() -> String {
        let body = toml::to_string_pretty(&Self::default()).unwrap_or_default();
        format!(
            "# mldash configuration\n\
             #\n\
             # Precedence (later wins): built-in defaults, this file,\n\
             # .mldash.toml in the working directory, MLDASH_* variables.\n\n\
             {body}"
        )
    }
}
