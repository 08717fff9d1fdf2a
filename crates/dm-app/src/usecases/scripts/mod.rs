//! Script registry use cases.

mod execute_script;

pub use execute_script::{ExecuteScript, ExecutionOutcome, CRITICAL_BUG_TITLE};
