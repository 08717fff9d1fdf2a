//! # dm-core
//!
//! Core domain models and business logic for Dynamic.
//!
//! This crate contains pure business logic without any infrastructure dependencies.

// Public module exports
pub mod app_dirs;
pub mod appearance;
pub mod config;
pub mod ports;
pub mod sandbox;
pub mod script;
pub mod setup;

// Re-export commonly used types at the crate root
pub use appearance::AppearanceStyle;
pub use config::AppConfig;
pub use sandbox::SandboxMode;
pub use script::ScriptAction;
