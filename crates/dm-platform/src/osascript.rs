//! Helpers shared by every adapter that shells out to `osascript`.

use std::path::Path;
use std::process::Output;

use thiserror::Error;

use dm_core::ports::ScriptExecutionError;

pub const OSASCRIPT: &str = "/usr/bin/osascript";

/// Error number AppleScript reports when the user dismissed a dialog.
pub const USER_CANCELED: i32 = -128;

pub const ERROR_MESSAGE_KEY: &str = "NSAppleScriptErrorMessage";
pub const ERROR_NUMBER_KEY: &str = "NSAppleScriptErrorNumber";
pub const SCRIPT_PATH_KEY: &str = "ScriptPath";

#[derive(Debug, Error)]
pub enum OsascriptError {
    #[error("failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{message}")]
    Script {
        message: String,
        number: Option<i32>,
        status: Option<i32>,
    },
}

impl OsascriptError {
    pub fn launch(program: &Path, source: std::io::Error) -> Self {
        OsascriptError::Launch {
            program: program.display().to_string(),
            source,
        }
    }

    pub fn is_user_canceled(&self) -> bool {
        matches!(
            self,
            OsascriptError::Script {
                number: Some(USER_CANCELED),
                ..
            }
        )
    }

    /// Port-level error carrying every diagnostic as a field.
    pub fn into_execution_error(self, script: &Path) -> ScriptExecutionError {
        let message = self.to_string();
        let error = ScriptExecutionError::new(message.clone())
            .with_field(ERROR_MESSAGE_KEY, message)
            .with_field(SCRIPT_PATH_KEY, script.display().to_string());
        match self {
            OsascriptError::Script {
                number: Some(number),
                ..
            } => error.with_field(ERROR_NUMBER_KEY, number.to_string()),
            _ => error,
        }
    }
}

/// Quote `value` as an AppleScript string literal body.
pub fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Stdout of a finished `osascript`, or the error it reported on stderr.
pub fn check_output(output: &Output) -> Result<String, OsascriptError> {
    if output.status.success() {
        return Ok(String::from_utf8_lossy(&output.stdout).into_owned());
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    let status = output.status.code();
    let (message, number) = parse_diagnostic(&stderr).unwrap_or_else(|| {
        let status = status.map_or_else(|| "a signal".to_string(), |code| code.to_string());
        (format!("osascript exited with {status}"), None)
    });
    Err(OsascriptError::Script {
        message,
        number,
        status,
    })
}

/// Split `path: execution error: Message. (-1743)` into its message and number.
pub(crate) fn parse_diagnostic(stderr: &str) -> Option<(String, Option<i32>)> {
    let line = stderr.lines().rev().map(str::trim).find(|l| !l.is_empty())?;
    let body = line
        .find("error: ")
        .map_or(line, |idx| &line[idx + "error: ".len()..]);

    if let Some(open) = body.rfind(" (") {
        if let Some(inner) = body[open + 2..].strip_suffix(')') {
            if let Ok(number) = inner.parse::<i32>() {
                return Some((body[..open].to_string(), Some(number)));
            }
        }
    }
    Some((body.to_string(), None))
}
