use std::sync::Arc;

use anyhow::Result;
use tokio::task::JoinHandle;
use tracing::{info, info_span, warn, Instrument};

use dm_core::{
    ports::{AppearancePreferencePort, ScriptExecutionError},
    AppearanceStyle, ScriptAction,
};

use crate::usecases::scripts::{ExecuteScript, ExecutionOutcome};
use crate::usecases::setup::ScriptSetupOrchestrator;

/// Entry point for switching the system appearance.
///
/// Runs the matching script; when the registry declines because the scripts
/// are not installed yet, it hands over to setup and drops the request.
pub struct AppearanceSwitcher {
    execute_script: Arc<ExecuteScript>,
    setup: Arc<ScriptSetupOrchestrator>,
    preferences: Arc<dyn AppearancePreferencePort>,
}

impl AppearanceSwitcher {
    pub fn new(
        execute_script: Arc<ExecuteScript>,
        setup: Arc<ScriptSetupOrchestrator>,
        preferences: Arc<dyn AppearancePreferencePort>,
    ) -> Self {
        Self {
            execute_script,
            setup,
            preferences,
        }
    }

    pub async fn toggle(&self) -> Result<ExecutionOutcome> {
        let next = self.current_style().await?.toggled();
        self.run(ScriptAction::Toggle, next).await
    }

    pub async fn enable(&self) -> Result<ExecutionOutcome> {
        self.run(ScriptAction::Enable, AppearanceStyle::DarkAqua).await
    }

    pub async fn disable(&self) -> Result<ExecutionOutcome> {
        self.run(ScriptAction::Disable, AppearanceStyle::Aqua).await
    }

    /// Force `style` on.
    pub async fn apply_style(&self, style: AppearanceStyle) -> Result<ExecutionOutcome> {
        self.run(style.action(), style).await
    }

    pub async fn current_style(&self) -> Result<AppearanceStyle> {
        self.preferences.get_style().await
    }

    pub async fn is_dark(&self) -> Result<bool> {
        Ok(self.current_style().await?.is_dark())
    }

    async fn run(&self, action: ScriptAction, resulting: AppearanceStyle) -> Result<ExecutionOutcome> {
        let span = info_span!("usecase.appearance_switcher.run", action = %action);
        async {
            let outcome = match self.execute_script.execute(action).await {
                ExecutionOutcome::Declined => {
                    let trigger = self.setup.setup_if_needed().await;
                    info!(trigger = ?trigger, "scripts not installed, deferred to setup");
                    ExecutionOutcome::Declined
                }
                ExecutionOutcome::Submitted(handle) => {
                    ExecutionOutcome::Submitted(self.record_when_finished(handle, resulting))
                }
                ExecutionOutcome::Completed => {
                    self.preferences.set_style(resulting).await?;
                    ExecutionOutcome::Completed
                }
                failed @ ExecutionOutcome::Failed(_) => failed,
            };
            Ok(outcome)
        }
        .instrument(span)
        .await
    }

    /// The stored style follows the sandboxed script only once it succeeded.
    fn record_when_finished(
        &self,
        handle: JoinHandle<Result<(), ScriptExecutionError>>,
        resulting: AppearanceStyle,
    ) -> JoinHandle<Result<(), ScriptExecutionError>> {
        let preferences = Arc::clone(&self.preferences);
        tokio::spawn(
            async move {
                let result = handle.await.unwrap_or_else(|err| {
                    Err(ScriptExecutionError::new(format!(
                        "script task did not finish: {err}"
                    )))
                });
                if result.is_ok() {
                    if let Err(err) = preferences.set_style(resulting).await {
                        warn!(error = %err, style = ?resulting, "failed to record appearance style");
                    }
                }
                result
            }
            .in_current_span(),
        )
    }
}
