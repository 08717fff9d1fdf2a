//! Dynamic application orchestration layer
//!
//! This crate contains the use cases that run automation scripts and
//! negotiate their installation with the user.

pub mod usecases;
mod ui;

pub use usecases::{
    AppearanceSwitcher, ExecuteScript, ExecutionOutcome, ScriptSetupDeps, ScriptSetupOrchestrator,
    SetupTrigger,
};
