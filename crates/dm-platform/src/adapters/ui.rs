use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::debug;

use dm_core::ports::UiPort;

/// Appearance pane of System Settings.
pub const APPEARANCE_SETTINGS_URL: &str =
    "x-apple.systempreferences:com.apple.Appearance-Settings.extension";

/// Brings the appearance settings to the front with `open`.
pub struct SystemSettingsUi {
    program: PathBuf,
    target: String,
}

impl SystemSettingsUi {
    pub fn new() -> Self {
        Self::with_command("/usr/bin/open", APPEARANCE_SETTINGS_URL)
    }

    pub fn with_command(program: impl Into<PathBuf>, target: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            target: target.into(),
        }
    }
}

impl Default for SystemSettingsUi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UiPort for SystemSettingsUi {
    async fn open_settings(&self) -> Result<()> {
        debug!(target = %self.target, "opening settings");
        let status = tokio::process::Command::new(&self.program)
            .arg(&self.target)
            .status()
            .await
            .with_context(|| format!("failed to launch {}", self.program.display()))?;
        if !status.success() {
            anyhow::bail!("{} {} exited with {status}", self.program.display(), self.target);
        }
        Ok(())
    }
}
