//! Setup domain module.
//!
//! This module defines the script installation negotiation types.

pub mod state_machine;
mod status;

pub use state_machine::{SetupAction, SetupError, SetupEvent, SetupState, SetupStateMachine};
pub use status::{ScriptSetupStatus, DID_SETUP_APPLE_SCRIPT_KEY};
