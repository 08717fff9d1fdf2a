use std::path::Path;

use async_trait::async_trait;

use crate::ports::errors::StagingError;

/// File operations the installer needs on the scripts directory.
#[async_trait]
pub trait ScriptFilesPort: Send + Sync {
    /// Cheap existence probe; errors read as "absent".
    async fn exists(&self, path: &Path) -> bool;

    /// Remove `path`. A missing file is not an error.
    async fn remove_if_exists(&self, path: &Path) -> Result<(), StagingError>;

    async fn copy(&self, from: &Path, to: &Path) -> Result<(), StagingError>;
}
