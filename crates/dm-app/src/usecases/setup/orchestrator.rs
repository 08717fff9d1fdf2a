//! Script setup orchestrator.
//!
//! This module coordinates the setup state machine and side effects: it asks
//! the user for access to the scripts directory, installs the bundled scripts
//! there and records completion.

use std::path::Path;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, error, info, info_span, warn, Instrument};

use dm_core::{
    app_dirs::AppDirs,
    ports::{
        Alert, AlertPort, AlertStyle, FolderPickerPort, FolderPickerRequest, ScriptFilesPort,
        SetupStatusPort, UiExecutorPort, UiPort,
    },
    setup::{SetupAction, SetupEvent, SetupState, SetupStateMachine},
    SandboxMode, ScriptAction,
};

use crate::ui::present;
use crate::usecases::setup::context::SetupContext;
use crate::usecases::setup::{MarkSetupComplete, StageScripts};

pub const PICKER_TITLE: &str = "Select Apple Script Folder";
pub const PICKER_PROMPT: &str = "Please open this folder so our app can help you manage dark mode";
pub const WRONG_SELECTION_TITLE: &str = "Not Really...";
pub const WRONG_SELECTION_MESSAGE: &str = "You MUST select the prompted thing for this app to work.";
pub const SETUP_FAILED_TITLE: &str = "Dark Mode Scripts Not Installed";

/// What a call to [`ScriptSetupOrchestrator::setup_if_needed`] found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupTrigger {
    /// Not sandboxed; scripts run from the bundle.
    NotNeeded,
    /// The completion flag is set or the scripts are already in place.
    AlreadyDone,
    /// Another negotiation is in flight.
    InProgress,
    /// A negotiation was started in the background.
    Started,
}

/// Ports the orchestrator drives.
pub struct ScriptSetupDeps {
    pub setup_status: Arc<dyn SetupStatusPort>,
    pub script_files: Arc<dyn ScriptFilesPort>,
    pub folder_picker: Arc<dyn FolderPickerPort>,
    pub alerts: Arc<dyn AlertPort>,
    pub ui: Arc<dyn UiPort>,
    pub ui_executor: Arc<dyn UiExecutorPort>,
}

/// Orchestrator that drives the script setup negotiation.
///
/// Construct one per process and share it behind an `Arc`; the in-progress
/// guard lives inside it and dies with it.
pub struct ScriptSetupOrchestrator {
    sandbox: SandboxMode,
    dirs: AppDirs,
    machine: SetupStateMachine,
    context: Arc<SetupContext>,

    stage_scripts: Arc<StageScripts>,
    mark_setup_complete: Arc<MarkSetupComplete>,
    setup_status: Arc<dyn SetupStatusPort>,
    script_files: Arc<dyn ScriptFilesPort>,
    folder_picker: Arc<dyn FolderPickerPort>,
    alerts: Arc<dyn AlertPort>,
    ui: Arc<dyn UiPort>,
    ui_executor: Arc<dyn UiExecutorPort>,
}

impl ScriptSetupOrchestrator {
    pub fn new(
        sandbox: SandboxMode,
        dirs: AppDirs,
        max_selection_attempts: Option<u32>,
        deps: ScriptSetupDeps,
    ) -> Self {
        Self {
            sandbox,
            machine: SetupStateMachine::new(max_selection_attempts),
            context: Arc::new(SetupContext::default()),
            stage_scripts: Arc::new(StageScripts::new(
                dirs.clone(),
                Arc::clone(&deps.script_files),
            )),
            mark_setup_complete: Arc::new(MarkSetupComplete::new(Arc::clone(
                &deps.setup_status,
            ))),
            dirs,
            setup_status: deps.setup_status,
            script_files: deps.script_files,
            folder_picker: deps.folder_picker,
            alerts: deps.alerts,
            ui: deps.ui,
            ui_executor: deps.ui_executor,
        }
    }

    /// Start the negotiation unless it is unnecessary, done, or already running.
    ///
    /// Safe to call redundantly and concurrently from any trigger site. Never
    /// waits on the user: the negotiation continues in the background.
    pub async fn setup_if_needed(self: &Arc<Self>) -> SetupTrigger {
        let span = info_span!("usecase.script_setup.setup_if_needed");
        async {
            if !self.sandbox.is_on() {
                return SetupTrigger::NotNeeded;
            }
            if self.did_setup().await {
                return SetupTrigger::AlreadyDone;
            }
            let toggle = self.dirs.installed_script(ScriptAction::Toggle);
            if self.script_files.exists(&toggle).await {
                debug!(path = %toggle.display(), "toggle script already installed");
                return SetupTrigger::AlreadyDone;
            }
            if !self.context.try_begin().await {
                debug!("script setup already in progress");
                return SetupTrigger::InProgress;
            }

            self.context.set_state(SetupState::Idle);
            info!(scripts_dir = %self.dirs.scripts_dir.display(), "starting script setup");
            let this = Arc::clone(self);
            tokio::spawn(
                async move {
                    let state = this.dispatch(SetupEvent::Begin).await;
                    info!(state = ?state, "script setup settled");
                }
                .in_current_span(),
            );
            SetupTrigger::Started
        }
        .instrument(span)
        .await
    }

    pub fn state(&self) -> SetupState {
        self.context.get_state()
    }

    pub fn subscribe(&self) -> watch::Receiver<SetupState> {
        self.context.subscribe()
    }

    /// Wait for the running negotiation to complete, fail or be abandoned.
    ///
    /// Only meaningful after [`SetupTrigger::Started`]; otherwise it returns
    /// the last settled state, or waits forever if none ever ran.
    pub async fn wait_until_settled(&self) -> SetupState {
        let mut rx = self.context.subscribe();
        let settled = match rx.wait_for(SetupState::is_settled).await {
            Ok(state) => state.clone(),
            Err(_) => self.context.get_state(),
        };
        settled
    }

    /// Wait for the current negotiation, if one ran in this process, to settle.
    ///
    /// `None` when nothing was ever started.
    pub async fn wait_if_running(&self) -> Option<SetupState> {
        if !self.context.is_setting_up().await && self.context.get_state() == SetupState::Idle {
            return None;
        }
        Some(self.wait_until_settled().await)
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

    async fn dispatch(&self, event: SetupEvent) -> SetupState {
        let mut current = self.context.get_state();
        let mut pending_events = vec![event];

        while let Some(event) = pending_events.pop() {
            let from = current.clone();
            let event_name = format!("{:?}", event);
            let (next, actions) = self.machine.transition(current, event);
            info!(from = ?from, to = ?next, event = %event_name, "setup state transition");

            // A settled state and the guard release become visible together.
            let follow_up_events = if next.is_settled() {
                let (release, actions): (Vec<_>, Vec<_>) = actions
                    .into_iter()
                    .partition(|action| *action == SetupAction::ReleaseGuard);
                let follow_up = self.execute_actions(actions).await;
                if release.is_empty() {
                    self.context.set_state(next.clone());
                } else {
                    self.context.settle(next.clone()).await;
                }
                follow_up
            } else {
                self.context.set_state(next.clone());
                self.execute_actions(actions).await
            };
            current = next;
            pending_events.extend(follow_up_events);
        }

        current
    }

    async fn execute_actions(&self, actions: Vec<SetupAction>) -> Vec<SetupEvent> {
        let mut follow_up_events = Vec::new();
        for action in actions {
            debug!(?action, "setup executing action");
            match action {
                SetupAction::OpenSettings => {
                    let ui = Arc::clone(&self.ui);
                    let opened = present(&*self.ui_executor, async move {
                        ui.open_settings().await
                    })
                    .await
                    .and_then(|result| result);
                    if let Err(err) = opened {
                        warn!(error = %err, "failed to open settings");
                    }
                }
                SetupAction::RequestPermission => {
                    follow_up_events.push(self.request_permission().await);
                }
                SetupAction::ShowWrongSelectionAlert => {
                    self.show_alert(Alert::new(
                        AlertStyle::Warning,
                        WRONG_SELECTION_TITLE,
                        WRONG_SELECTION_MESSAGE,
                    ))
                    .await;
                }
                SetupAction::StageScripts => match self.stage_scripts.execute().await {
                    Ok(()) => follow_up_events.push(SetupEvent::ScriptsStaged),
                    Err(err) => {
                        error!(error = %err, "failed to stage scripts");
                        follow_up_events.push(SetupEvent::StagingFailed {
                            reason: err.to_string(),
                        });
                    }
                },
                SetupAction::MarkSetupComplete => {
                    match self.mark_setup_complete.execute().await {
                        Ok(written) => {
                            debug!(written, "setup completion recorded");
                            follow_up_events.push(SetupEvent::SetupRecorded);
                        }
                        Err(err) => {
                            error!(error = %err, "failed to record setup completion");
                            follow_up_events.push(SetupEvent::RecordFailed {
                                reason: format!("{err:#}"),
                            });
                        }
                    }
                }
                SetupAction::ShowFailureAlert { error } => {
                    self.show_alert(Alert::new(
                        AlertStyle::Critical,
                        SETUP_FAILED_TITLE,
                        error.to_string(),
                    ))
                    .await;
                }
                SetupAction::ReleaseGuard => {
                    self.context.release().await;
                }
            }
        }
        follow_up_events
    }

    async fn request_permission(&self) -> SetupEvent {
        let request = FolderPickerRequest::new(&self.dirs.scripts_dir, PICKER_TITLE, PICKER_PROMPT);
        let picker = Arc::clone(&self.folder_picker);
        let picked = present(&*self.ui_executor, async move {
            picker.pick_folder(&request).await
        })
        .await
        .and_then(|result| result);

        match picked {
            Ok(selected) => self.handle_selection(selected.as_deref()),
            Err(err) => {
                error!(error = %err, "folder picker unavailable");
                SetupEvent::PickerUnavailable {
                    reason: format!("{err:#}"),
                }
            }
        }
    }

    fn handle_selection(&self, selected: Option<&Path>) -> SetupEvent {
        let matches_target = selected == Some(self.dirs.scripts_dir.as_path());
        if !matches_target {
            warn!(
                selected = ?selected,
                expected = %self.dirs.scripts_dir.display(),
                "scripts folder not selected"
            );
        }
        SetupEvent::FolderSelected { matches_target }
    }

    async fn show_alert(&self, alert: Alert) {
        let alerts = Arc::clone(&self.alerts);
        let shown = present(&*self.ui_executor, async move {
            alerts.show_alert(&alert).await
        })
        .await
        .and_then(|result| result);
        if let Err(err) = shown {
            error!(error = %err, "failed to present alert");
        }
    }
}
