use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use dm_core::ports::{ScriptExecutionError, ScriptRunnerPort};

use crate::osascript::{check_output, OsascriptError, OSASCRIPT};

/// Runs compiled scripts through `osascript`.
///
/// `submit` waits on a child process without blocking the runtime;
/// `run_in_process` blocks the calling thread until the script returns.
pub struct OsascriptRunner {
    program: PathBuf,
}

impl OsascriptRunner {
    pub fn new() -> Self {
        Self::with_program(OSASCRIPT)
    }

    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for OsascriptRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ScriptRunnerPort for OsascriptRunner {
    async fn submit(&self, script: &Path) -> Result<(), ScriptExecutionError> {
        debug!(script = %script.display(), "submitting script");
        let output = tokio::process::Command::new(&self.program)
            .arg(script)
            .output()
            .await
            .map_err(|e| OsascriptError::launch(&self.program, e).into_execution_error(script))?;
        check_output(&output)
            .map(|_| ())
            .map_err(|e| e.into_execution_error(script))
    }

    fn run_in_process(&self, script: &Path) -> Result<(), ScriptExecutionError> {
        debug!(script = %script.display(), "running script");
        let output = std::process::Command::new(&self.program)
            .arg(script)
            .output()
            .map_err(|e| OsascriptError::launch(&self.program, e).into_execution_error(script))?;
        check_output(&output)
            .map(|_| ())
            .map_err(|e| e.into_execution_error(script))
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::osascript::ERROR_NUMBER_KEY;
    use tempfile::TempDir;

    // `sh` stands in for `osascript`: both take the script path as their argument.
    fn shell_runner() -> OsascriptRunner {
        OsascriptRunner::with_program("/bin/sh")
    }

    #[tokio::test]
    async fn submit_succeeds_on_zero_exit() {
        let temp_dir = TempDir::new().unwrap();
        let script = temp_dir.path().join("toggle.scpt");
        std::fs::write(&script, "exit 0\n").unwrap();

        shell_runner().submit(&script).await.unwrap();
    }

    #[tokio::test]
    async fn submit_reports_script_diagnostics() {
        let temp_dir = TempDir::new().unwrap();
        let script = temp_dir.path().join("on.scpt");
        std::fs::write(
            &script,
            "echo 'on.scpt: execution error: Not authorized to send Apple events to System Events. (-1743)' >&2\nexit 1\n",
        )
        .unwrap();

        let err = shell_runner().submit(&script).await.unwrap_err();

        assert_eq!(
            err.message,
            "Not authorized to send Apple events to System Events."
        );
        assert_eq!(err.fields[ERROR_NUMBER_KEY], "-1743");
    }

    #[test]
    fn run_in_process_without_stderr_reports_exit_status() {
        let temp_dir = TempDir::new().unwrap();
        let script = temp_dir.path().join("off.scpt");
        std::fs::write(&script, "exit 3\n").unwrap();

        let err = shell_runner().run_in_process(&script).unwrap_err();

        assert_eq!(err.message, "osascript exited with 3");
    }

    #[test]
    fn missing_program_is_a_launch_failure() {
        let runner = OsascriptRunner::with_program("/nonexistent/osascript");

        let err = runner
            .run_in_process(Path::new("/scripts/toggle.scpt"))
            .unwrap_err();

        assert!(err.message.starts_with("failed to launch /nonexistent/osascript"));
    }
}
