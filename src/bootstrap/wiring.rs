//! # Dependency Injection
//!
//! ## Responsibilities
//!
//! - Create infra implementations (preferences, script files)
//! - Create platform implementations (osascript, dialogs, UI executor)
//! - Inject them into the use cases
//!
//! ## Prohibited
//!
//! - No business logic. Do not decide whether setup should run here.
//! - No configuration validation. Config is already loaded in `config.rs`.
//!
//! > **This is the only place allowed to depend on dm-infra + dm-platform + dm-app simultaneously.**

use std::path::PathBuf;
use std::sync::Arc;

use dm_app::{
    AppearanceSwitcher, ExecuteScript, ScriptSetupDeps, ScriptSetupOrchestrator,
};
use dm_core::app_dirs::AppDirs;
use dm_core::config::AppConfig;
use dm_core::ports::{AppDirsError, AppDirsPort, SetupStatusPort};
use dm_core::SandboxMode;
use dm_infra::{FilePreferencesRepository, FsScriptFiles};
use dm_platform::adapters::{OsascriptDialogs, OsascriptRunner, SystemSettingsUi};
use dm_platform::{DirsAppDirsAdapter, SerialUiExecutor};

/// Result type for wiring operations
pub type WiringResult<T> = Result<T, WiringError>;

/// Errors during dependency injection
#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("Directory resolution failed: {0}")]
    AppDirs(#[from] AppDirsError),
}

/// Everything the commands need, wired once per process.
pub struct AppServices {
    pub sandbox: SandboxMode,
    pub dirs: AppDirs,
    pub switcher: Arc<AppearanceSwitcher>,
    pub setup: Arc<ScriptSetupOrchestrator>,
    pub setup_status: Arc<dyn SetupStatusPort>,
    pub ui_executor: Arc<SerialUiExecutor>,
}

/// Resolve directories from config, falling back to platform defaults for
/// every empty value.
pub fn resolve_app_dirs(config: &AppConfig) -> WiringResult<AppDirs> {
    let mut adapter = DirsAppDirsAdapter::new(config.bundle_id.clone());
    if !config.resources_dir.as_os_str().is_empty() {
        adapter = adapter.with_resources_dir(config.resources_dir.clone());
    }
    if !config.data_dir.as_os_str().is_empty() {
        adapter = adapter.with_app_data_root(config.data_dir.clone());
    }
    Ok(adapter.get_app_dirs()?)
}

pub fn logs_dir(dirs: &AppDirs) -> PathBuf {
    dirs.app_data_root.join("logs")
}

/// Wire adapters into use cases.
///
/// Must run inside a Tokio runtime: the UI executor spawns its drain task.
pub fn wire_dependencies(config: &AppConfig, dirs: AppDirs, sandbox: SandboxMode) -> AppServices {
    // Infra
    let preferences = Arc::new(FilePreferencesRepository::with_defaults(&dirs.app_data_root));
    let script_files = Arc::new(FsScriptFiles::new());

    // Platform
    let dialogs = Arc::new(OsascriptDialogs::new());
    let runner = Arc::new(OsascriptRunner::new());
    let settings_ui = Arc::new(SystemSettingsUi::new());
    let ui_executor = Arc::new(SerialUiExecutor::spawn());

    let setup = Arc::new(ScriptSetupOrchestrator::new(
        sandbox,
        dirs.clone(),
        config.max_selection_attempts,
        ScriptSetupDeps {
            setup_status: preferences.clone(),
            script_files,
            folder_picker: dialogs.clone(),
            alerts: dialogs.clone(),
            ui: settings_ui,
            ui_executor: ui_executor.clone(),
        },
    ));
    let execute_script = Arc::new(ExecuteScript::new(
        sandbox,
        dirs.clone(),
        preferences.clone(),
        runner,
        dialogs,
        ui_executor.clone(),
    ));
    let switcher = Arc::new(AppearanceSwitcher::new(
        execute_script,
        setup.clone(),
        preferences.clone(),
    ));

    AppServices {
        sandbox,
        dirs,
        switcher,
        setup,
        setup_status: preferences,
        ui_executor,
    }
}
