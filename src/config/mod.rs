/// Configuration system for mldash.
///
/// Layers, later ones override earlier ones key by key:
///
/// 1. **Built-in defaults** — [`schema::DashboardConfig::default()`]
/// 2. **User global config** — `~/.mldash/config.toml`
/// 3. **Project local config** — `.mldash.toml` in the current directory
/// 4. **Environment variables** — `MLDASH_*`
///
/// Malformed files are skipped with a warning rather than aborting.
pub mod schema;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub use schema::DashboardConfig;

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load the fully resolved configuration, logging any problems with the
/// config files.
pub fn load() -> DashboardConfig {
    let loaded = load_with_warnings();
    for warning in &loaded.warnings {
        tracing::warn!("{warning}");
    }
    loaded.config
}

/// Resolved configuration plus the problems found while reading it.
///
/// Lets the caller install a log subscriber from the resolved
/// `[logging]` section before reporting the warnings.
#[derive(Debug)]
pub struct Loaded {
    pub config: DashboardConfig,
    pub warnings: Vec<String>,
}

pub fn load_with_warnings() -> Loaded {
    let paths: Vec<PathBuf> = [global_config_path(), project_config_path()]
        .into_iter()
        .flatten()
        .collect();
    let mut loaded = load_layers(&paths);
    apply_env_overrides(&mut loaded.config);
    loaded
}

/// Merge the files in `paths` (later wins) over the defaults.
fn load_layers(paths: &[PathBuf]) -> Loaded {
    let mut warnings = Vec::new();
    let mut merged = defaults_value();

    for path in paths {
        match load_toml_file(path) {
            Ok(Some(layer)) => merge_values(&mut merged, layer),
            Ok(None) => {}
            Err(warning) => warnings.push(warning),
        }
    }

    let config = match merged.try_into() {
        Ok(cfg) => cfg,
        Err(e) => {
            warnings.push(format!(
                "config files do not match the schema, using defaults: {e}"
            ));
            DashboardConfig::default()
        }
    };

    Loaded { config, warnings }
}

fn defaults_value() -> toml::Value {
    toml::Value::try_from(DashboardConfig::default())
        .unwrap_or_else(|_| toml::Value::Table(toml::map::Map::new()))
}

/// Read a TOML file as a raw value tree. Missing files yield `Ok(None)`.
fn load_toml_file(path: &Path) -> std::result::Result<Option<toml::Value>, String> {
    let Ok(content) = fs::read_to_string(path) else {
        return Ok(None);
    };
    toml::from_str(&content)
        .map(Some)
        .map_err(|e| format!("ignoring malformed config file {}: {e}", path.display()))
}

/// Overlay `layer` onto `base`: tables merge recursively, anything else
/// replaces the base value.
fn merge_values(base: &mut toml::Value, layer: toml::Value) {
    match (base, layer) {
        (toml::Value::Table(base_table), toml::Value::Table(layer_table)) => {
            for (key, value) in layer_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (base, layer) => *base = layer,
    }
}

// ---------------------------------------------------------------------------
// File paths
// ---------------------------------------------------------------------------

/// `~/.mldash/config.toml`
fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".mldash").join("config.toml"))
}

/// `.mldash.toml` in the current directory.
fn project_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|cwd| cwd.join(".mldash.toml"))
}

pub fn global_config_file() -> Option<PathBuf> {
    global_config_path()
}

pub fn project_config_file() -> Option<PathBuf> {
    project_config_path()
}

// ---------------------------------------------------------------------------
// Environment variable overrides
// ---------------------------------------------------------------------------

/// Supported variables:
/// - `MLDASH_URL` — backend base URL
/// - `MLDASH_TIMEOUT_MS` — request timeout
/// - `MLDASH_LOG_LEVEL` — tracing filter directive
fn apply_env_overrides(config: &mut DashboardConfig) {
    if let Ok(val) = std::env::var("MLDASH_URL")
        && !val.is_empty()
    {
        config.server.base_url = val;
    }
    if let Ok(val) = std::env::var("MLDASH_TIMEOUT_MS")
        && let Ok(ms) = val.parse::<u64>()
    {
        config.server.timeout_ms = ms;
    }
    if let Ok(val) = std::env::var("MLDASH_LOG_LEVEL")
        && !val.is_empty()
    {
        config.logging.level = val;
    }
}

// ---------------------------------------------------------------------------
// Config init / set / reset
// ---------------------------------------------------------------------------

/// Write the default config to `~/.mldash/config.toml`.
///
/// Refuses to overwrite an existing file unless `force` is set.
pub fn init_config(force: bool) -> Result<PathBuf> {
    let path = global_config_path().context("could not determine home directory")?;

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    write_config_file(&path, &DashboardConfig::default_toml())?;
    Ok(path)
}

/// Set one dotted key (e.g. `server.timeout_ms`) in the global config file,
/// creating the file from defaults if needed.
pub fn set_config_value(key: &str, value: &str) -> Result<()> {
    let path = global_config_path().context("could not determine home directory")?;

    let mut root: toml::Value = if path.exists() {
        let content = fs::read_to_string(&path).context("failed to read config file")?;
        toml::from_str(&content).context("failed to parse config file")?
    } else {
        defaults_value()
    };

    set_toml_value(&mut root, key, value)?;

    // Reject edits that would make the file unloadable.
    let _: DashboardConfig = root
        .clone()
        .try_into()
        .with_context(|| format!("'{value}' is not a valid value for '{key}'"))?;

    let output = toml::to_string_pretty(&root).context("failed to serialize config")?;
    write_config_file(&path, &output)
}

/// Set a value in a TOML tree using a dotted key path.
///
/// The new value takes the type of the value it replaces. Arrays are given
/// as comma-separated items.
fn set_toml_value(root: &mut toml::Value, key: &str, raw_value: &str) -> Result<()> {
    let (section_path, leaf) = match key.rsplit_once('.') {
        Some((sections, leaf)) => (Some(sections), leaf),
        None => (None, key),
    };
    if leaf.is_empty() {
        anyhow::bail!("empty config key");
    }

    let mut current = root;
    for part in section_path.into_iter().flat_map(|s| s.split('.')) {
        current = current
            .get_mut(part)
            .with_context(|| format!("config key not found: section '{part}' in '{key}'"))?;
    }

    let table = current
        .as_table_mut()
        .with_context(|| format!("expected a section above '{key}'"))?;

    let new_value = match table.get(leaf) {
        Some(toml::Value::Boolean(_)) => toml::Value::Boolean(is_truthy(raw_value)),
        Some(toml::Value::Integer(_)) => {
            let n: i64 = raw_value
                .parse()
                .with_context(|| format!("expected integer for '{key}', got '{raw_value}'"))?;
            toml::Value::Integer(n)
        }
        Some(toml::Value::Float(_)) => {
            let f: f64 = raw_value
                .parse()
                .with_context(|| format!("expected float for '{key}', got '{raw_value}'"))?;
            toml::Value::Float(f)
        }
        Some(toml::Value::Array(_)) => toml::Value::Array(
            raw_value
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| toml::Value::String(s.to_string()))
                .collect(),
        ),
        Some(_) => toml::Value::String(raw_value.to_string()),
        None => anyhow::bail!("unknown config key: '{key}'"),
    };

    table.insert(leaf.to_string(), new_value);
    Ok(())
}

/// Overwrite the global config with defaults.
pub fn reset_config() -> Result<PathBuf> {
    init_config(true)
}

/// The effective config rendered as TOML.
pub fn show_effective_config() -> Result<String> {
    toml::to_string_pretty(&load()).context("failed to serialize effective config")
}

fn write_config_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create ~/.mldash/ directory")?;
    }
    fs::write(path, contents).context("failed to write config file")
}

fn is_truthy(val: &str) -> bool {
    matches!(
        val.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
