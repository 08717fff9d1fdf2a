use std::path::PathBuf;
use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, error, info_span, warn, Instrument};

use dm_core::{
    app_dirs::AppDirs,
    ports::{
        Alert, AlertPort, AlertStyle, ScriptExecutionError, ScriptRunnerPort, SetupStatusPort,
        UiExecutorPort,
    },
    SandboxMode, ScriptAction,
};

/// Title of the alert shown when a bundled script fails outside the sandbox.
pub const CRITICAL_BUG_TITLE: &str = "Report Critical Bug To Developer";

/// Result of asking the registry to run a script.
#[derive(Debug)]
pub enum ExecutionOutcome {
    /// Setup has not completed; nothing ran.
    Declined,
    /// Handed to the sandboxed scripting facility. The handle resolves to the
    /// script's result once it finished and any failure alert was queued.
    Submitted(JoinHandle<Result<(), ScriptExecutionError>>),
    /// Ran in-process and succeeded.
    Completed,
    /// Ran in-process and failed; the user has been alerted.
    Failed(ScriptExecutionError),
}

impl ExecutionOutcome {
    pub fn is_declined(&self) -> bool {
        matches!(self, ExecutionOutcome::Declined)
    }
}

/// Resolves an action to its script file and runs it.
pub struct ExecuteScript {
    sandbox: SandboxMode,
    dirs: AppDirs,
    setup_status: Arc<dyn SetupStatusPort>,
    runner: Arc<dyn ScriptRunnerPort>,
    alerts: Arc<dyn AlertPort>,
    ui_executor: Arc<dyn UiExecutorPort>,
}

impl ExecuteScript {
    pub fn new(
        sandbox: SandboxMode,
        dirs: AppDirs,
        setup_status: Arc<dyn SetupStatusPort>,
        runner: Arc<dyn ScriptRunnerPort>,
        alerts: Arc<dyn AlertPort>,
        ui_executor: Arc<dyn UiExecutorPort>,
    ) -> Self {
        Self {
            sandbox,
            dirs,
            setup_status,
            runner,
            alerts,
            ui_executor,
        }
    }

    /// Where `action`'s script is read from in the current sandbox mode.
    pub fn script_path(&self, action: ScriptAction) -> PathBuf {
        if self.sandbox.is_on() {
            self.dirs.installed_script(action)
        } else {
            self.dirs.bundled_script(action)
        }
    }

    /// Run `action`'s script.
    ///
    /// Under the sandbox this silently declines until setup has completed; the
    /// caller is expected to start setup on its own. Failures are reported to
    /// the user once and never retried.
    pub async fn execute(&self, action: ScriptAction) -> ExecutionOutcome {
        let span = info_span!("usecase.execute_script", action = %action, sandbox = ?self.sandbox);
        async {
            if self.sandbox.is_on() {
                if !self.did_setup().await {
                    debug!("scripts not installed yet, declining");
                    return ExecutionOutcome::Declined;
                }
                self.submit(action)
            } else {
                self.run_in_process(action).await
            }
        }
        .instrument(span)
        .await
    }

    async fn did_setup(&self) -> bool {
        match self.setup_status.get_status().await {
            Ok(status) => status.did_setup_apple_script,
            Err(err) => {
                error!(error = %err, "failed to load setup status");
                false
            }
        }
    }

    fn submit(&self, action: ScriptAction) -> ExecutionOutcome {
        let path = self.script_path(action);
        let runner = Arc::clone(&self.runner);
        let alerts = Arc::clone(&self.alerts);
        let ui_executor = Arc::clone(&self.ui_executor);

        let handle = tokio::spawn(
            async move {
                let Err(err) = runner.submit(&path).await else {
                    debug!(path = %path.display(), "script finished");
                    return Ok(());
                };
                warn!(error = %err, path = %path.display(), "sandboxed script failed");
                let alert = Alert::new(
                    AlertStyle::Warning,
                    format!("Could not run the \"{action}\" script"),
                    err.to_string(),
                );
                ui_executor.dispatch(Box::pin(async move {
                    if let Err(err) = alerts.show_alert(&alert).await {
                        error!(error = %err, "failed to present script failure alert");
                    }
                }));
                Err(err)
            }
            .in_current_span(),
        );

        ExecutionOutcome::Submitted(handle)
    }

    /// `osascript` blocks until the script exits, so it runs on the blocking pool.
    async fn run_in_process(&self, action: ScriptAction) -> ExecutionOutcome {
        let path = self.script_path(action);
        let runner = Arc::clone(&self.runner);
        let script = path.clone();
        let result = tokio::task::spawn_blocking(move || runner.run_in_process(&script))
            .await
            .unwrap_or_else(|err| {
                Err(ScriptExecutionError::new(format!("script task did not finish: {err}")))
            });
        match result {
            Ok(()) => {
                debug!(path = %path.display(), "script finished");
                ExecutionOutcome::Completed
            }
            Err(err) => {
                error!(
                    error = %err,
                    path = %path.display(),
                    "bundled script failed outside the sandbox"
                );
                let alert = Alert::new(
                    AlertStyle::Critical,
                    CRITICAL_BUG_TITLE,
                    err.diagnostic_dump(),
                );
                let alerts = Arc::clone(&self.alerts);
                self.ui_executor.dispatch(Box::pin(async move {
                    if let Err(err) = alerts.show_alert(&alert).await {
                        error!(error = %err, "failed to present critical bug alert");
                    }
                }));
                ExecutionOutcome::Failed(err)
            }
        }
    }
}
