pub mod config;
pub mod runtime;
pub mod tracing;
pub mod wiring;

pub use config::{load_config, resolve_config};
pub use runtime::create_runtime;
pub use wiring::{logs_dir, resolve_app_dirs, wire_dependencies, AppServices, WiringError};
