//! Terminal front-end for the dashboard.
//!
//! Each subcommand opens a [`Session`] (page + controller bound to the
//! live backend), fills the relevant form, dispatches one submit event and
//! prints the resulting page region:
//! - `mldash generate` — data generation
//! - `mldash detect` — anomaly detection
//! - `mldash prioritize` — test prioritization
//! - `mldash files` — data-file listing
//! - `mldash health` — config and backend reachability
//! - `mldash config show|init|set|reset` — configuration management
//!
//! Command functions return `Ok(true)` when the submission was rendered.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::api::{DashboardApi, HttpClient, Outcome};
use crate::config::{self, DashboardConfig};
use crate::controller::{DashboardController, FormId, Notifier, Submission};
use crate::page::{Image, Page};
use crate::render::format_file_size;

/// Output format for rendered regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl OutputFormat {
    pub fn from_str_opt(s: Option<&str>) -> Self {
        match s {
            Some("json") => Self::Json,
            _ => Self::Table,
        }
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Prints notifications to stderr with a local timestamp.
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn alert(&self, message: &str) {
        let now = chrono::Local::now().format("%H:%M:%S");
        eprintln!("{} {} {}", now.to_string().dimmed(), "!".red().bold(), message);
    }
}

/// A page bound to a controller talking to the configured backend.
pub struct Session {
    pub page: Page,
    pub controller: DashboardController<HttpClient, TerminalNotifier>,
}

impl Session {
    /// Build the page, bind the controller and run page-ready initialization.
    pub fn open(config: &DashboardConfig) -> Self {
        let page = Page::standard();
        let client = HttpClient::from_config(&config.server);
        let controller = DashboardController::new(client, TerminalNotifier, &page)
            .with_default_tests(config.prioritization.default_tests.clone());
        controller.initialize();
        Self { page, controller }
    }
}

// ---------------------------------------------------------------------------
// mldash generate
// ---------------------------------------------------------------------------

pub struct GenerateArgs {
    pub accounts: Option<u32>,
    pub per_day: Option<u32>,
    pub days: Option<u32>,
}

pub fn run_generate(config: &DashboardConfig, format: OutputFormat, args: GenerateArgs) -> Result<bool> {
    let session = Session::open(config);
    let defaults = &config.generation;
    let el = &session.page.generation;
    el.num_accounts
        .borrow_mut()
        .set(args.accounts.unwrap_or(defaults.num_accounts).to_string());
    el.transactions_per_day
        .borrow_mut()
        .set(args.per_day.unwrap_or(defaults.transactions_per_day).to_string());
    el.num_days
        .borrow_mut()
        .set(args.days.unwrap_or(defaults.num_days).to_string());

    let outcome = session.controller.submit(FormId::DataGeneration);
    if outcome.is_rendered() {
        match format {
            OutputFormat::Json => print_generation_json(&session.page)?,
            OutputFormat::Table => print_generation_table(&session.page),
        }
    }
    Ok(report(&outcome))
}

fn print_generation_table(page: &Page) {
    let el = &page.generation;
    println!("{}", "Data Generation".bold().cyan());
    println!("{}", "=".repeat(50));
    println!("  {}", el.message.get().value);
    println!();
    print_stat("Accounts:", &el.stat_accounts.get().value);
    print_stat("Transactions:", &el.stat_transactions.get().value);
    print_stat("Anomalies:", &el.stat_anomalies.get().value);
    print_stat("Total value:", &el.stat_value.get().value);
    print_stat("Avg transaction:", &el.stat_avg_transaction.get().value);
    let categories = el.stat_categories.get().value;
    if !categories.is_empty() {
        print_stat("Categories:", &categories);
    }
    print_stat("Data file:", &el.filename.get().value);
    println!();
    print_stat("Category chart:", &describe_image(&el.viz_category_amounts.get()));
    print_stat("Timeline chart:", &describe_image(&el.viz_timeline.get()));
}

fn print_generation_json(page: &Page) -> Result<()> {
    let el = &page.generation;
    let value = serde_json::json!({
        "message": el.message.get().value,
        "stats": {
            "accounts": el.stat_accounts.get().value,
            "transactions": el.stat_transactions.get().value,
            "anomalies": el.stat_anomalies.get().value,
            "total_value": el.stat_value.get().value,
            "avg_transaction": el.stat_avg_transaction.get().value,
            "categories": el.stat_categories.get().value,
        },
        "filename": el.filename.get().value,
        "visualizations": {
            "category_amounts": el.viz_category_amounts.get().src,
            "timeline": el.viz_timeline.get().src,
        },
    });
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// mldash detect
// ---------------------------------------------------------------------------

pub fn run_detect(
    config: &DashboardConfig,
    format: OutputFormat,
    data_type: Option<String>,
    file: Option<String>,
) -> Result<bool> {
    let session = Session::open(config);
    let el = &session.page.anomaly;
    el.data_type
        .borrow_mut()
        .set(data_type.unwrap_or_else(|| config.anomaly.data_type.clone()));

    if let Some(file) = file {
        let selected = el.data_file.borrow_mut().select(&file);
        if !selected {
            anyhow::bail!(
                "data file '{file}' is not in the backend's listing (see `mldash files`)"
            );
        }
    }

    let outcome = session.controller.submit(FormId::AnomalyDetection);
    if outcome.is_rendered() {
        match format {
            OutputFormat::Json => {
                let value = serde_json::json!({
                    "message": el.message.get().value,
                    "visualization": el.visualization.get().src,
                    "anomalies": el.table.get().rows,
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            }
            OutputFormat::Table => print_anomaly_table(&session.page),
        }
    }
    Ok(report(&outcome))
}

fn print_anomaly_table(page: &Page) {
    let el = &page.anomaly;
    println!("{}", "Anomaly Detection".bold().cyan());
    println!("{}", "=".repeat(60));
    println!("  {}", el.message.get().value);
    println!();

    let table = el.table.get();
    if !table.rows.is_empty() {
        println!("  {:>4}  {:<18} Description", "#", "Value");
        println!("  {}", "-".repeat(58));
        for (i, row) in table.rows.iter().enumerate() {
            let line = format!("  {:>4}  {:<18} {}", row.index, row.value, row.description);
            if i % 2 == 0 {
                println!("{line}");
            } else {
                println!("{}", line.dimmed());
            }
        }
        println!();
    }
    print_stat("Chart:", &describe_image(&el.visualization.get()));
}

// ---------------------------------------------------------------------------
// mldash prioritize
// ---------------------------------------------------------------------------

pub fn run_prioritize(
    config: &DashboardConfig,
    format: OutputFormat,
    tests: Vec<String>,
    from: Option<&Path>,
) -> Result<bool> {
    let session = Session::open(config);

    let mut lines = tests;
    if let Some(path) = from {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read test list from {}", path.display()))?;
        lines.extend(content.lines().map(str::to_string));
    }
    if !lines.is_empty() {
        session
            .page
            .prioritization
            .test_list
            .borrow_mut()
            .set(lines.join("\n"));
    }

    let outcome = session.controller.submit(FormId::TestPrioritization);
    if outcome.is_rendered() {
        let el = &session.page.prioritization;
        match format {
            OutputFormat::Json => {
                let value = serde_json::json!({
                    "message": el.message.get().value,
                    "prioritized_tests": el.prioritized.get().items,
                    "visualization": el.visualization.get().src,
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            }
            OutputFormat::Table => {
                println!("{}", "Test Prioritization".bold().cyan());
                println!("{}", "=".repeat(50));
                println!("  {}", el.message.get().value);
                println!();
                for (i, test) in el.prioritized.get().items.iter().enumerate() {
                    println!("  {:>3}. {}", i + 1, test);
                }
                println!();
                print_stat("Failure rates:", &describe_image(&el.visualization.get()));
            }
        }
    }
    Ok(report(&outcome))
}

// ---------------------------------------------------------------------------
// mldash files
// ---------------------------------------------------------------------------

/// List data files the way the anomaly form's selector shows them.
pub fn run_files(config: &DashboardConfig, format: OutputFormat) -> Result<bool> {
    let session = Session::open(config);
    let select = session.page.anomaly.data_file.get();

    match format {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "default": select.default_entry(),
                "options": select.options(),
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Table => {
            println!("{}", "Data Files".bold().cyan());
            println!("{}", "=".repeat(50));
            println!(
                "  {} {}",
                "·".dimmed(),
                select.default_entry().label.dimmed()
            );
            for option in select.options() {
                println!("  {} {}", "·".green(), option.label);
            }
            if select.options().is_empty() {
                println!();
                println!(
                    "  {}",
                    "No data files yet. Run `mldash generate` to create one.".yellow()
                );
            }
        }
    }
    Ok(true)
}

// ---------------------------------------------------------------------------
// mldash health
// ---------------------------------------------------------------------------

/// Check config files and backend reachability.
pub fn run_health(config: &DashboardConfig) -> Result<bool> {
    println!("{}", "mldash Health Check".bold().cyan());
    println!("{}", "=".repeat(40));

    let global_exists = config::global_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let project_exists = config::project_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    print_health_item(
        "Global config",
        global_exists,
        if global_exists {
            "~/.mldash/config.toml found"
        } else {
            "not found (run `mldash config init` to create)"
        },
    );
    print_health_item(
        "Project config",
        project_exists,
        if project_exists {
            ".mldash.toml found"
        } else {
            "none (optional)"
        },
    );

    let client = HttpClient::from_config(&config.server);
    let (reachable, detail) = match client.list_data_files() {
        Ok(Outcome::Success(listing)) => {
            let newest = listing
                .data_files
                .iter()
                .filter_map(|f| f.modified_at())
                .max()
                .map(|ts| format!(", newest {}", ts.format("%Y-%m-%d %H:%M")))
                .unwrap_or_default();
            (
                true,
                format!(
                    "reachable at {} ({} data files{})",
                    client.base_url(),
                    listing.data_files.len(),
                    newest
                ),
            )
        }
        Ok(Outcome::Failure(message)) => (false, format!("listing rejected: {message}")),
        Err(e) => (false, format!("not reachable at {}: {e}", client.base_url())),
    };
    print_health_item("Backend", reachable, &detail);

    Ok(reachable)
}

fn print_health_item(name: &str, ok: bool, detail: &str) {
    let status = if ok {
        "✓".green().bold()
    } else {
        "✗".red().bold()
    };
    println!("  {} {:<18} {}", status, name, detail.dimmed());
}

// ---------------------------------------------------------------------------
// mldash config show | init | set | reset
// ---------------------------------------------------------------------------

pub fn run_config_show() -> Result<()> {
    let toml_str = config::show_effective_config()?;
    println!("{}", "Effective mldash Configuration".bold().cyan());
    println!("{}", "=".repeat(50));
    println!();
    println!("{toml_str}");

    println!("{}", "Sources (highest priority last):".dimmed());
    println!("  {} built-in defaults", "·".dimmed());
    print_source(config::global_config_file().is_some_and(|p| p.exists()), "~/.mldash/config.toml");
    print_source(config::project_config_file().is_some_and(|p| p.exists()), ".mldash.toml");
    println!("  {} {}", "·".dimmed(), "MLDASH_* environment variables".dimmed());
    Ok(())
}

fn print_source(exists: bool, name: &str) {
    if exists {
        println!("  {} {}", "✓".green(), name.dimmed());
    } else {
        println!("  {} {}", "·".dimmed(), format!("{name} (not found)").dimmed());
    }
}

pub fn run_config_init(force: bool) -> Result<()> {
    let path = config::init_config(force)?;
    println!("{} Config written to {}", "✓".green().bold(), path.display());
    Ok(())
}

pub fn run_config_set(key: &str, value: &str) -> Result<()> {
    config::set_config_value(key, value)?;
    println!("{} Set {} = {}", "✓".green().bold(), key.bold(), value);
    Ok(())
}

pub fn run_config_reset() -> Result<()> {
    let path = config::reset_config()?;
    println!(
        "{} Config reset to defaults at {}",
        "✓".green().bold(),
        path.display()
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

fn print_stat(name: &str, value: &str) {
    println!("  {:<17} {}", name.bold(), value);
}

/// Short description of an image source; inline `data:` URLs are summarized
/// rather than dumped.
fn describe_image(image: &Image) -> String {
    match image.src.as_deref() {
        None | Some("") => "(none)".to_string(),
        Some(src) if src.starts_with("data:") => {
            let mime = src
                .trim_start_matches("data:")
                .split([';', ','])
                .next()
                .unwrap_or("unknown");
            format!("inline {} ({})", mime, format_file_size(src.len() as u64))
        }
        Some(src) => src.to_string(),
    }
}

/// Whether the submission counts as a success for the exit status.
fn report(outcome: &Submission) -> bool {
    match outcome {
        Submission::Rendered => true,
        Submission::Busy => {
            eprintln!("{}", "A request for this form is already running.".yellow());
            false
        }
        Submission::Rejected(_) | Submission::Failed | Submission::Abandoned => false,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
