use std::path::Path;

use async_trait::async_trait;

use crate::ports::errors::ScriptExecutionError;

/// OS scripting facility.
#[async_trait]
pub trait ScriptRunnerPort: Send + Sync {
    /// Submit a script from the permitted scripts directory and wait for its
    /// completion. Used under the sandbox.
    async fn submit(&self, script: &Path) -> Result<(), ScriptExecutionError>;

    /// Execute a script synchronously on the calling thread. Used outside the
    /// sandbox, where scripts are read from the bundle.
    fn run_in_process(&self, script: &Path) -> Result<(), ScriptExecutionError>;
}
