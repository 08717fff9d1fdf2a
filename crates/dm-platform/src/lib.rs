//! # dm-platform
//!
//! macOS implementations of the ports Dynamic needs: scripting, dialogs,
//! directory resolution, sandbox detection and the serial UI executor.

pub mod adapters;
pub mod app_dirs;
pub mod osascript;
pub mod sandbox;
pub mod ui_executor;

pub use app_dirs::DirsAppDirsAdapter;
pub use sandbox::detect_sandbox_mode;
pub use ui_executor::SerialUiExecutor;
