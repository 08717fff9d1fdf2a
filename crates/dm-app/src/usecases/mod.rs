//! Business logic use cases
//!
//! ```text
//! toggle / on / off
//!        ↓
//! AppearanceSwitcher ──declined──→ ScriptSetupOrchestrator
//!        ↓                                ↓
//! ExecuteScript                   StageScripts → MarkSetupComplete
//! ```

pub mod appearance;
pub mod scripts;
pub mod setup;

pub use appearance::AppearanceSwitcher;
pub use scripts::{ExecuteScript, ExecutionOutcome};
pub use setup::{ScriptSetupDeps, ScriptSetupOrchestrator, SetupTrigger};
