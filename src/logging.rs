//! Diagnostic log channel.
//!
//! Events go to stderr so they never mix with rendered output on stdout.
//! `MLDASH_LOG` takes a full `tracing` filter and wins over the configured
//! `[logging] level`.

use tracing_subscriber::EnvFilter;

use crate::config::schema::LoggingConfig;

pub const LOG_ENV: &str = "MLDASH_LOG";

pub fn init(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    // A subscriber may already be installed (tests, embedding callers).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
