//! Port interfaces for the application layer
//!
//! Ports define the contract between the application logic (use cases)
//! and infrastructure implementations. This follows Hexagonal Architecture
//! principles, allowing the core business logic to remain independent of
//! the operating system it drives.
//!
//! ## Port Placement Guidelines
//!
//! Before adding a new port to `dm-core/ports`, ask yourself three questions:
//!
//! 1. **Does this port represent a business capability?**
//! 2. **Will it be depended upon by multiple use cases or domains?**
//! 3. **Is it implemented by the infrastructure or platform layer?**
//!
//! If all three answers are **yes**, place it in `dm-core/ports`.
//! Otherwise, place it in the relevant `domain` submodule.

pub mod alert;
pub mod app_dirs;
pub mod appearance;
pub mod errors;
pub mod folder_picker;
pub mod script_files;
pub mod script_runner;
pub mod setup;
pub mod ui_executor;
pub mod ui_port;

pub use alert::{Alert, AlertPort, AlertStyle};
pub use app_dirs::AppDirsPort;
pub use appearance::AppearancePreferencePort;
pub use errors::{AppDirsError, ScriptExecutionError, StagingError};
pub use folder_picker::{FolderPickerPort, FolderPickerRequest};
pub use script_files::ScriptFilesPort;
pub use script_runner::ScriptRunnerPort;
pub use setup::SetupStatusPort;
pub use ui_executor::{UiExecutorPort, UiTask};
pub use ui_port::UiPort;
