use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use mldash::cli::{self, GenerateArgs, OutputFormat};
use mldash::{config, logging};

#[derive(Debug, Parser)]
#[command(name = "mldash")]
#[command(about = "Drive the ML test-framework dashboard from the terminal")]
struct App {
    /// Backend base URL (overrides config and MLDASH_URL)
    #[arg(long, global = true)]
    url: Option<String>,
    /// Output format: table (default), json
    #[arg(long, global = true, default_value = "table")]
    format: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Generate synthetic banking data
    Generate {
        /// Number of accounts
        #[arg(long)]
        accounts: Option<u32>,
        /// Transactions per account per day
        #[arg(long)]
        per_day: Option<u32>,
        /// Number of days to simulate
        #[arg(long)]
        days: Option<u32>,
    },
    /// Detect anomalies in response times or transactions
    Detect {
        /// Data type: response_times or transactions
        #[arg(long = "type")]
        data_type: Option<String>,
        /// Data file from `mldash files` (default: backend sample data)
        #[arg(long)]
        file: Option<String>,
    },
    /// Order tests by estimated failure likelihood
    Prioritize {
        /// Test identifier; repeat for several (default: configured list)
        #[arg(long = "test")]
        tests: Vec<String>,
        /// Read newline-delimited test identifiers from a file
        #[arg(long)]
        from: Option<PathBuf>,
    },
    /// List data files available for anomaly detection
    Files,
    /// Check config files and backend reachability
    Health,
    /// Show or edit configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write the default config to ~/.mldash/config.toml
    Init {
        #[arg(long)]
        force: bool,
    },
    /// Set a dotted key, e.g. `server.base_url`
    Set { key: String, value: String },
    /// Overwrite the global config with defaults
    Reset,
}

fn main() -> Result<ExitCode> {
    let app = App::parse();

    let config::Loaded {
        config: mut cfg,
        warnings,
    } = config::load_with_warnings();
    if let Some(url) = app.url {
        cfg.server.base_url = url;
    }
    logging::init(&cfg.logging);
    for warning in &warnings {
        tracing::warn!("{warning}");
    }

    let fmt = OutputFormat::from_str_opt(Some(&app.format));

    let ok = match app.command {
        Commands::Generate {
            accounts,
            per_day,
            days,
        } => cli::run_generate(
            &cfg,
            fmt,
            GenerateArgs {
                accounts,
                per_day,
                days,
            },
        )?,
        Commands::Detect { data_type, file } => cli::run_detect(&cfg, fmt, data_type, file)?,
        Commands::Prioritize { tests, from } => {
            cli::run_prioritize(&cfg, fmt, tests, from.as_deref())?
        }
        Commands::Files => cli::run_files(&cfg, fmt)?,
        Commands::Health => cli::run_health(&cfg)?,
        Commands::Config { action } => {
            match action {
                ConfigAction::Show => cli::run_config_show()?,
                ConfigAction::Init { force } => cli::run_config_init(force)?,
                ConfigAction::Set { key, value } => cli::run_config_set(&key, &value)?,
                ConfigAction::Reset => cli::run_config_reset()?,
            }
            true
        }
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
