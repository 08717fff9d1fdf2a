//! Setup use cases.
//!
//! This module exposes the script setup orchestrator and the capability use
//! cases it drives.

mod context;
mod mark_complete;
pub mod orchestrator;
mod stage_scripts;

pub use mark_complete::MarkSetupComplete;
pub use orchestrator::{ScriptSetupDeps, ScriptSetupOrchestrator, SetupTrigger};
pub use stage_scripts::StageScripts;
