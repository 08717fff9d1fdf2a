//! # Configuration Loader
//!
//! ## Responsibilities
//!
//! - Read TOML configuration files
//! - Parse TOML into the `AppConfig` DTO
//! - Report I/O and parsing errors with context
//!
//! ## Prohibited
//!
//! - No validation logic
//! - No business rules
//!
//! > **Pure data loading only. Accept whatever is in the file.**

use std::path::{Path, PathBuf};

use anyhow::Context;
use dm_core::config::AppConfig;

const CONFIG_DIR_NAME: &str = "dynamic";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Load configuration from a TOML file
///
/// Empty strings and missing sections are accepted as facts; defaults are
/// chosen later by the adapters that consume them.
///
/// # Errors
///
/// Returns error if the file cannot be read or is not valid TOML.
pub fn load_config(config_path: PathBuf) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
}

/// `<config dir>/dynamic/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Load `explicit` if given, else the default file if it exists, else
/// [`AppConfig::empty`].
pub fn resolve_config(explicit: Option<&Path>) -> anyhow::Result<AppConfig> {
    if let Some(path) = explicit {
        return load_config(path.to_path_buf());
    }
    match default_config_path() {
        Some(path) if path.is_file() => load_config(path),
        _ => Ok(AppConfig::empty()),
    }
}
