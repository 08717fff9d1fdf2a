//! Script setup state machine.
//!
//! Defines a pure state transition function for the permission negotiation
//! that installs the automation scripts into the sandbox scripts directory.

/// Negotiation state.
///
/// 协商状态。
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SetupState {
    /// No negotiation has run in this process.
    Idle,
    /// Folder picker is (or is about to be) on screen.
    ///
    /// `attempt` counts picker presentations, starting at 1.
    AwaitingSelection { attempt: u32 },
    /// Scripts are being copied and the completion flag recorded.
    Staging,
    /// Scripts installed and the flag persisted.
    Completed,
    /// Permission was granted but installation could not finish.
    Failed { error: SetupError },
    /// The user could not be brought to pick the folder.
    Abandoned { error: SetupError },
}

impl SetupState {
    /// Whether the negotiation has stopped and the guard may be released.
    pub fn is_settled(&self) -> bool {
        matches!(
            self,
            SetupState::Completed | SetupState::Failed { .. } | SetupState::Abandoned { .. }
        )
    }
}

/// Events that drive the negotiation.
///
/// 驱动协商流程的事件。
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SetupEvent {
    /// A caller found setup missing and won the guard.
    Begin,
    /// The folder picker closed.
    FolderSelected { matches_target: bool },
    /// The folder picker could not be presented at all.
    PickerUnavailable { reason: String },
    /// Every script was copied into the scripts directory.
    ScriptsStaged,
    /// Copying a script failed.
    StagingFailed { reason: String },
    /// The completion flag was persisted.
    SetupRecorded,
    /// Persisting the completion flag failed.
    RecordFailed { reason: String },
}

/// Side-effects produced by state transitions.
///
/// 状态迁移产生的副作用。
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SetupAction {
    /// Bring the settings surface to the front.
    OpenSettings,
    /// Present the folder picker pointed at the scripts directory.
    RequestPermission,
    /// Tell the user the wrong folder was chosen.
    ShowWrongSelectionAlert,
    /// Copy every bundled script into the scripts directory.
    StageScripts,
    /// Persist the completion flag.
    MarkSetupComplete,
    /// Report a terminal failure to the user.
    ShowFailureAlert { error: SetupError },
    /// Clear the in-memory "negotiation in progress" guard.
    ReleaseGuard,
}

/// Setup error types.
///
/// 设置错误类型。
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize, thiserror::Error)]
pub enum SetupError {
    #[error("could not install scripts: {reason}")]
    StagingFailed { reason: String },
    #[error("could not record setup completion: {reason}")]
    RecordFailed { reason: String },
    #[error("folder picker unavailable: {reason}")]
    PickerUnavailable { reason: String },
    #[error("wrong folder selected {attempts} times")]
    TooManyWrongSelections { attempts: u32 },
}

/// Pure setup state machine.
///
/// 纯状态机：不包含副作用。
#[derive(Debug, Clone, Copy, Default)]
pub struct SetupStateMachine {
    max_selection_attempts: Option<u32>,
}

impl SetupStateMachine {
    /// `max_selection_attempts = None` re-prompts until the user complies.
    pub fn new(max_selection_attempts: Option<u32>) -> Self {
        Self {
            max_selection_attempts,
        }
    }

    pub fn transition(&self, state: SetupState, event: SetupEvent) -> (SetupState, Vec<SetupAction>) {
        match (state, event) {
            (state, SetupEvent::Begin) if state == SetupState::Idle || state.is_settled() => (
                SetupState::AwaitingSelection { attempt: 1 },
                vec![SetupAction::OpenSettings, SetupAction::RequestPermission],
            ),
            (
                SetupState::AwaitingSelection { .. },
                SetupEvent::FolderSelected {
                    matches_target: true,
                },
            ) => (SetupState::Staging, vec![SetupAction::StageScripts]),
            (
                SetupState::AwaitingSelection { attempt },
                SetupEvent::FolderSelected {
                    matches_target: false,
                },
            ) => match self.max_selection_attempts {
                Some(max) if attempt >= max => Self::abandon(SetupError::TooManyWrongSelections {
                    attempts: attempt,
                }),
                _ => (
                    SetupState::AwaitingSelection {
                        attempt: attempt.saturating_add(1),
                    },
                    vec![
                        SetupAction::ShowWrongSelectionAlert,
                        SetupAction::RequestPermission,
                    ],
                ),
            },
            (SetupState::AwaitingSelection { .. }, SetupEvent::PickerUnavailable { reason }) => {
                Self::abandon(SetupError::PickerUnavailable { reason })
            }
            (SetupState::Staging, SetupEvent::ScriptsStaged) => {
                (SetupState::Staging, vec![SetupAction::MarkSetupComplete])
            }
            (SetupState::Staging, SetupEvent::SetupRecorded) => {
                (SetupState::Completed, vec![SetupAction::ReleaseGuard])
            }
            (SetupState::Staging, SetupEvent::StagingFailed { reason }) => {
                Self::fail(SetupError::StagingFailed { reason })
            }
            (SetupState::Staging, SetupEvent::RecordFailed { reason }) => {
                Self::fail(SetupError::RecordFailed { reason })
            }
            (state, _event) => (state, Vec::new()),
        }
    }

    fn fail(error: SetupError) -> (SetupState, Vec<SetupAction>) {
        (
            SetupState::Failed {
                error: error.clone(),
            },
            vec![
                SetupAction::ShowFailureAlert { error },
                SetupAction::ReleaseGuard,
            ],
        )
    }

    fn abandon(error: SetupError) -> (SetupState, Vec<SetupAction>) {
        (
            SetupState::Abandoned {
                error: error.clone(),
            },
            vec![
                SetupAction::ShowFailureAlert { error },
                SetupAction::ReleaseGuard,
            ],
        )
    }
}
