#![allow(dead_code)]

use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::{mpsc, Notify};

use dm_app::{ScriptSetupDeps, ScriptSetupOrchestrator};
use dm_core::{
    app_dirs::AppDirs,
    ports::{
        Alert, AlertPort, AppearancePreferencePort, FolderPickerPort, FolderPickerRequest,
        ScriptExecutionError, ScriptFilesPort, ScriptRunnerPort, SetupStatusPort, StagingError,
        UiExecutorPort, UiPort, UiTask,
    },
    setup::ScriptSetupStatus,
    AppearanceStyle, SandboxMode, ScriptAction,
};

pub fn test_dirs() -> AppDirs {
    AppDirs {
        app_data_root: PathBuf::from("/data/dynamic"),
        scripts_dir: PathBuf::from("/Users/test/Library/Application Scripts/com.example.dynamic"),
        resources_dir: PathBuf::from("/Applications/Dynamic.app/Contents/Resources/scripts"),
    }
}

#[derive(Default)]
pub struct InMemorySetupStatus {
    done: Mutex<bool>,
    pub writes: AtomicUsize,
    pub fail_writes: bool,
}

impl InMemorySetupStatus {
    pub fn with_done(done: bool) -> Self {
        Self {
            done: Mutex::new(done),
            ..Default::default()
        }
    }

    pub fn failing_writes() -> Self {
        Self {
            fail_writes: true,
            ..Default::default()
        }
    }

    pub fn is_done(&self) -> bool {
        *self.done.lock().unwrap()
    }
}

#[async_trait]
impl SetupStatusPort for InMemorySetupStatus {
    async fn get_status(&self) -> anyhow::Result<ScriptSetupStatus> {
        Ok(ScriptSetupStatus {
            did_setup_apple_script: self.is_done(),
        })
    }

    async fn set_status(&self, status: &ScriptSetupStatus) -> anyhow::Result<()> {
        if self.fail_writes {
            anyhow::bail!("preferences store is read-only");
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        *self.done.lock().unwrap() = status.did_setup_apple_script;
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryPreferences {
    style: Mutex<AppearanceStyle>,
    pub writes: AtomicUsize,
}

impl InMemoryPreferences {
    pub fn with_style(style: AppearanceStyle) -> Self {
        Self {
            style: Mutex::new(style),
            ..Default::default()
        }
    }

    pub fn style(&self) -> AppearanceStyle {
        *self.style.lock().unwrap()
    }
}

#[async_trait]
impl AppearancePreferencePort for InMemoryPreferences {
    async fn get_style(&self) -> anyhow::Result<AppearanceStyle> {
        Ok(self.style())
    }

    async fn set_style(&self, style: AppearanceStyle) -> anyhow::Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        *self.style.lock().unwrap() = style;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOp {
    Remove(PathBuf),
    Copy(PathBuf, PathBuf),
}

/// Files in memory. Bundled sources always exist.
pub struct FakeScriptFiles {
    dirs: AppDirs,
    present: Mutex<HashSet<PathBuf>>,
    pub ops: Mutex<Vec<FileOp>>,
    pub fail_copies: Mutex<bool>,
}

impl FakeScriptFiles {
    pub fn new(dirs: &AppDirs) -> Self {
        let present = ScriptAction::ALL
            .into_iter()
            .map(|action| dirs.bundled_script(action))
            .collect();
        Self {
            dirs: dirs.clone(),
            present: Mutex::new(present),
            ops: Mutex::new(Vec::new()),
            fail_copies: Mutex::new(false),
        }
    }

    pub fn with_installed(self, action: ScriptAction) -> Self {
        self.present
            .lock()
            .unwrap()
            .insert(self.dirs.installed_script(action));
        self
    }

    pub fn set_fail_copies(&self, fail: bool) {
        *self.fail_copies.lock().unwrap() = fail;
    }

    pub fn ops(&self) -> Vec<FileOp> {
        self.ops.lock().unwrap().clone()
    }

    pub fn writes_into_scripts_dir(&self) -> usize {
        self.ops()
            .iter()
            .filter(|op| match op {
                FileOp::Remove(path) => path.starts_with(&self.dirs.scripts_dir),
                FileOp::Copy(_, to) => to.starts_with(&self.dirs.scripts_dir),
            })
            .count()
    }

    pub fn is_installed(&self, action: ScriptAction) -> bool {
        self.present
            .lock()
            .unwrap()
            .contains(&self.dirs.installed_script(action))
    }
}

#[async_trait]
impl ScriptFilesPort for FakeScriptFiles {
    async fn exists(&self, path: &Path) -> bool {
        self.present.lock().unwrap().contains(path)
    }

    async fn remove_if_exists(&self, path: &Path) -> Result<(), StagingError> {
        self.ops.lock().unwrap().push(FileOp::Remove(path.to_path_buf()));
        self.present.lock().unwrap().remove(path);
        Ok(())
    }

    async fn copy(&self, from: &Path, to: &Path) -> Result<(), StagingError> {
        if *self.fail_copies.lock().unwrap() {
            return Err(StagingError::Copy {
                from: from.to_path_buf(),
                to: to.to_path_buf(),
                source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
            });
        }
        self.ops
            .lock()
            .unwrap()
            .push(FileOp::Copy(from.to_path_buf(), to.to_path_buf()));
        self.present.lock().unwrap().insert(to.to_path_buf());
        Ok(())
    }
}

/// Replays queued answers. Fails once it runs out, like a dialog that
/// cannot be shown.
#[derive(Default)]
pub struct ScriptedPicker {
    answers: Mutex<VecDeque<Option<PathBuf>>>,
    pub requests: Mutex<Vec<FolderPickerRequest>>,
    gate: Option<Arc<Notify>>,
}

impl ScriptedPicker {
    pub fn new(answers: impl IntoIterator<Item = Option<PathBuf>>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
            ..Default::default()
        }
    }

    /// Hold every presentation open until `gate` is notified.
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn presentations(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl FolderPickerPort for ScriptedPicker {
    async fn pick_folder(&self, request: &FolderPickerRequest) -> anyhow::Result<Option<PathBuf>> {
        self.requests.lock().unwrap().push(request.clone());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("folder picker unavailable"))
    }
}

#[derive(Default)]
pub struct RecordingAlerts {
    pub shown: Mutex<Vec<Alert>>,
}

impl RecordingAlerts {
    pub fn shown(&self) -> Vec<Alert> {
        self.shown.lock().unwrap().clone()
    }
}

#[async_trait]
impl AlertPort for RecordingAlerts {
    async fn show_alert(&self, alert: &Alert) -> anyhow::Result<()> {
        self.shown.lock().unwrap().push(alert.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingUi {
    pub opened: AtomicUsize,
}

#[async_trait]
impl UiPort for RecordingUi {
    async fn open_settings(&self) -> anyhow::Result<()> {
        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Runs tasks one at a time in submission order on a background task.
pub struct SerialTestExecutor {
    tx: mpsc::UnboundedSender<UiTask>,
    pub dispatched: AtomicUsize,
}

impl SerialTestExecutor {
    pub fn spawn() -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<UiTask>();
        tokio::spawn(async move {
            while let Some(task) = rx.recv().await {
                task.await;
            }
        });
        Self {
            tx,
            dispatched: AtomicUsize::new(0),
        }
    }
}

impl UiExecutorPort for SerialTestExecutor {
    fn dispatch(&self, task: UiTask) {
        self.dispatched.fetch_add(1, Ordering::SeqCst);
        let _ = self.tx.send(task);
    }
}

#[derive(Default)]
pub struct RecordingRunner {
    pub submitted: Mutex<Vec<PathBuf>>,
    pub ran_in_process: Mutex<Vec<PathBuf>>,
    failure: Option<String>,
}

impl RecordingRunner {
    /// Every script run fails with `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    fn outcome(&self) -> Result<(), ScriptExecutionError> {
        match &self.failure {
            Some(message) => Err(ScriptExecutionError::new(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ScriptRunnerPort for RecordingRunner {
    async fn submit(&self, script: &Path) -> Result<(), ScriptExecutionError> {
        self.submitted.lock().unwrap().push(script.to_path_buf());
        self.outcome()
    }

    fn run_in_process(&self, script: &Path) -> Result<(), ScriptExecutionError> {
        self.ran_in_process.lock().unwrap().push(script.to_path_buf());
        self.outcome()
    }
}

pub struct SetupHarness {
    pub dirs: AppDirs,
    pub status: Arc<InMemorySetupStatus>,
    pub files: Arc<FakeScriptFiles>,
    pub picker: Arc<ScriptedPicker>,
    pub alerts: Arc<RecordingAlerts>,
    pub ui: Arc<RecordingUi>,
    pub executor: Arc<SerialTestExecutor>,
    pub orchestrator: Arc<ScriptSetupOrchestrator>,
}

pub struct SetupHarnessBuilder {
    sandbox: SandboxMode,
    status: InMemorySetupStatus,
    files: Option<FakeScriptFiles>,
    picker: ScriptedPicker,
    max_selection_attempts: Option<u32>,
}

impl SetupHarnessBuilder {
    pub fn new() -> Self {
        Self {
            sandbox: SandboxMode::Sandboxed,
            status: InMemorySetupStatus::default(),
            files: None,
            picker: ScriptedPicker::default(),
            max_selection_attempts: None,
        }
    }

    pub fn sandbox(mut self, sandbox: SandboxMode) -> Self {
        self.sandbox = sandbox;
        self
    }

    pub fn status(mut self, status: InMemorySetupStatus) -> Self {
        self.status = status;
        self
    }

    pub fn files(mut self, files: FakeScriptFiles) -> Self {
        self.files = Some(files);
        self
    }

    pub fn picker(mut self, picker: ScriptedPicker) -> Self {
        self.picker = picker;
        self
    }

    pub fn max_selection_attempts(mut self, attempts: u32) -> Self {
        self.max_selection_attempts = Some(attempts);
        self
    }

    pub fn build(self) -> SetupHarness {
        let dirs = test_dirs();
        let status = Arc::new(self.status);
        let files = Arc::new(self.files.unwrap_or_else(|| FakeScriptFiles::new(&dirs)));
        let picker = Arc::new(self.picker);
        let alerts = Arc::new(RecordingAlerts::default());
        let ui = Arc::new(RecordingUi::default());
        let executor = Arc::new(SerialTestExecutor::spawn());

        let orchestrator = Arc::new(ScriptSetupOrchestrator::new(
            self.sandbox,
            dirs.clone(),
            self.max_selection_attempts,
            ScriptSetupDeps {
                setup_status: status.clone(),
                script_files: files.clone(),
                folder_picker: picker.clone(),
                alerts: alerts.clone(),
                ui: ui.clone(),
                ui_executor: executor.clone(),
            },
        ));

        SetupHarness {
            dirs,
            status,
            files,
            picker,
            alerts,
            ui,
            executor,
            orchestrator,
        }
    }
}
