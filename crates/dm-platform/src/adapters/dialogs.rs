//! Folder picker and alerts rendered by `osascript`'s Standard Additions.

use std::path::{Path, PathBuf};

use anyhow::Result;
use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info_span, Instrument};

use dm_core::ports::{Alert, AlertPort, AlertStyle, FolderPickerPort, FolderPickerRequest};

use crate::osascript::{check_output, escape, OsascriptError, OSASCRIPT};

pub struct OsascriptDialogs {
    program: PathBuf,
}

impl OsascriptDialogs {
    pub fn new() -> Self {
        Self {
            program: PathBuf::from(OSASCRIPT),
        }
    }

    fn command(&self, source: &str) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("-e").arg(source);
        cmd
    }

    async fn run(&self, source: &str) -> Result<String, OsascriptError> {
        let output = self
            .command(source)
            .output()
            .await
            .map_err(|e| OsascriptError::launch(&self.program, e))?;
        check_output(&output)
    }
}

impl Default for OsascriptDialogs {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn folder_picker_source(request: &FolderPickerRequest) -> String {
    format!(
        "POSIX path of (choose folder with prompt \"{}\" default location (POSIX file \"{}\"))",
        escape(&request.prompt),
        escape(&request.directory.display().to_string()),
    )
}

pub(crate) fn alert_source(alert: &Alert) -> String {
    let style = match alert.style {
        AlertStyle::Informational => "informational",
        AlertStyle::Warning => "warning",
        AlertStyle::Critical => "critical",
    };
    format!(
        "display alert \"{}\" message \"{}\" as {style} buttons {{\"OK\"}} default button \"OK\"",
        escape(&alert.title),
        escape(&alert.message),
    )
}

/// `choose folder` answers with a trailing slash; the comparison downstream
/// is exact, so strip it.
pub(crate) fn parse_picked(stdout: &str) -> Option<PathBuf> {
    let raw = stdout.trim_end_matches(['\n', '\r']);
    if raw.is_empty() {
        return None;
    }
    let trimmed = raw.trim_end_matches('/');
    if trimmed.is_empty() {
        return Some(PathBuf::from("/"));
    }
    Some(Path::new(trimmed).to_path_buf())
}

#[async_trait]
impl FolderPickerPort for OsascriptDialogs {
    async fn pick_folder(&self, request: &FolderPickerRequest) -> Result<Option<PathBuf>> {
        let span = info_span!("platform.dialogs.pick_folder", title = %request.title);
        async {
            match self.run(&folder_picker_source(request)).await {
                Ok(stdout) => Ok(parse_picked(&stdout)),
                Err(err) if err.is_user_canceled() => {
                    debug!("folder picker dismissed");
                    Ok(None)
                }
                Err(err) => Err(err.into()),
            }
        }
        .instrument(span)
        .await
    }
}

#[async_trait]
impl AlertPort for OsascriptDialogs {
    async fn show_alert(&self, alert: &Alert) -> Result<()> {
        self.run(&alert_source(alert)).await?;
        Ok(())
    }
}
