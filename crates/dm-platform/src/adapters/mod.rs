//! OS adapters implementing `dm-core` ports.

pub mod dialogs;
pub mod script_runner;
pub mod ui;

pub use dialogs::OsascriptDialogs;
pub use script_runner::OsascriptRunner;
pub use ui::SystemSettingsUi;
