//! # Pure Data Module - Data Transfer Objects Only
//!
//! ## Responsibilities
//!
//! - Define configuration data structures
//! - Provide TOML → DTO mapping
//!
//! ## Prohibited
//!
//! - No business logic or policies
//! - No validation logic
//! - No default value calculation
//!
//! > **This module contains data only, no policy, no validation.**
//! > Empty values are facts; the bootstrap layer decides what they fall back to.

use std::path::PathBuf;

/// Application configuration DTO (pure data, no logic)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Bundle identifier naming the per-app scripts directory (may be empty)
    pub bundle_id: String,

    /// Directory holding the bundled script sources (path info only)
    pub resources_dir: PathBuf,

    /// Local data directory override (path info only)
    pub data_dir: PathBuf,

    /// Upper bound on wrong folder selections before a negotiation is abandoned.
    /// `None` keeps re-prompting until the user complies.
    pub max_selection_attempts: Option<u32>,
}

impl AppConfig {
    /// Create AppConfig from TOML value
    ///
    /// **Prohibited**: This method must NOT contain any validation
    /// or default value logic. Empty strings are valid "facts".
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        Ok(Self {
            bundle_id: toml_value
                .get("app")
                .and_then(|a| a.get("bundle_id"))
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string(),
            resources_dir: PathBuf::from(
                toml_value
                    .get("scripts")
                    .and_then(|s| s.get("resources_dir"))
                    .and_then(|v| v.as_str())
                    .unwrap_or(""),
            ),
            data_dir: PathBuf::from(
                toml_value
                    .get("storage")
                    .and_then(|s| s.get("data_dir"))
                    .and_then(|v| v.as_str())
                    .unwrap_or(""),
            ),
            max_selection_attempts: toml_value
                .get("setup")
                .and_then(|s| s.get("max_selection_attempts"))
                .and_then(|v| v.as_integer())
                .map(|n| n.clamp(0, i64::from(u32::MAX)) as u32),
        })
    }

    /// Create empty AppConfig (all empty/default values)
    pub fn empty() -> Self {
        Self {
            bundle_id: String::new(),
            resources_dir: PathBuf::new(),
            data_dir: PathBuf::new(),
            max_selection_attempts: None,
        }
    }
}
