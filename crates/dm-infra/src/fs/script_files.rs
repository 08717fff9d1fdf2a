use std::io::ErrorKind;
use std::path::Path;

use async_trait::async_trait;
use tokio::fs;

use dm_core::ports::{ScriptFilesPort, StagingError};

/// [`ScriptFilesPort`] on the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsScriptFiles;

impl FsScriptFiles {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ScriptFilesPort for FsScriptFiles {
    async fn exists(&self, path: &Path) -> bool {
        fs::try_exists(path).await.unwrap_or(false)
    }

    async fn remove_if_exists(&self, path: &Path) -> Result<(), StagingError> {
        match fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StagingError::Remove {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    async fn copy(&self, from: &Path, to: &Path) -> Result<(), StagingError> {
        fs::copy(from, to)
            .await
            .map(|_| ())
            .map_err(|source| StagingError::Copy {
                from: from.to_path_buf(),
                to: to.to_path_buf(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn remove_missing_file_is_ok() {
        let temp_dir = TempDir::new().unwrap();
        let files = FsScriptFiles::new();

        files
            .remove_if_exists(&temp_dir.path().join("toggle.scpt"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn copy_replaces_destination_contents() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("source.scpt");
        let destination = temp_dir.path().join("toggle.scpt");
        fs::write(&source, "new").await.unwrap();
        fs::write(&destination, "old").await.unwrap();
        let files = FsScriptFiles::new();

        files.remove_if_exists(&destination).await.unwrap();
        assert!(!files.exists(&destination).await);
        files.copy(&source, &destination).await.unwrap();

        assert_eq!(fs::read_to_string(&destination).await.unwrap(), "new");
    }

    #[tokio::test]
    async fn copy_into_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("source.scpt");
        fs::write(&source, "x").await.unwrap();
        let files = FsScriptFiles::new();

        let err = files
            .copy(&source, &temp_dir.path().join("nope").join("toggle.scpt"))
            .await
            .unwrap_err();

        assert!(matches!(err, StagingError::Copy { .. }));
    }
}
