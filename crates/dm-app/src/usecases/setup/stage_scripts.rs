use std::sync::Arc;

use tracing::{debug, warn};

use dm_core::{
    app_dirs::AppDirs,
    ports::{ScriptFilesPort, StagingError},
    ScriptAction,
};

/// Copies every bundled script into the scripts directory.
///
/// Only meaningful once the user granted access to the scripts directory.
pub struct StageScripts {
    dirs: AppDirs,
    files: Arc<dyn ScriptFilesPort>,
}

impl StageScripts {
    pub fn new(dirs: AppDirs, files: Arc<dyn ScriptFilesPort>) -> Self {
        Self { dirs, files }
    }

    pub async fn execute(&self) -> Result<(), StagingError> {
        for action in ScriptAction::ALL {
            let source = self.dirs.bundled_script(action);
            let destination = self.dirs.installed_script(action);

            if !self.files.exists(&source).await {
                return Err(StagingError::SourceMissing(source));
            }
            // Clear whatever sits at the destination; a failure here surfaces on copy.
            if let Err(err) = self.files.remove_if_exists(&destination).await {
                warn!(error = %err, "could not clear previous script");
            }
            self.files.copy(&source, &destination).await?;
            debug!(action = %action, destination = %destination.display(), "script staged");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Op {
        Remove(PathBuf),
        Copy(PathBuf, PathBuf),
    }

    #[derive(Default)]
    struct RecordingFiles {
        ops: Mutex<Vec<Op>>,
        missing_source: bool,
        fail_copy_of: Option<&'static str>,
    }

    #[async_trait]
    impl ScriptFilesPort for RecordingFiles {
        async fn exists(&self, _path: &Path) -> bool {
            !self.missing_source
        }

        async fn remove_if_exists(&self, path: &Path) -> Result<(), StagingError> {
            self.ops.lock().unwrap().push(Op::Remove(path.to_path_buf()));
            Ok(())
        }

        async fn copy(&self, from: &Path, to: &Path) -> Result<(), StagingError> {
            if self.fail_copy_of.is_some_and(|name| from.ends_with(name)) {
                return Err(StagingError::Copy {
                    from: from.to_path_buf(),
                    to: to.to_path_buf(),
                    source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
                });
            }
            self.ops
                .lock()
                .unwrap()
                .push(Op::Copy(from.to_path_buf(), to.to_path_buf()));
            Ok(())
        }
    }

    fn dirs() -> AppDirs {
        AppDirs {
            app_data_root: PathBuf::from("/data"),
            scripts_dir: PathBuf::from("/scripts"),
            resources_dir: PathBuf::from("/bundle"),
        }
    }

    #[tokio::test]
    async fn removes_then_copies_each_script() {
        let files = Arc::new(RecordingFiles::default());
        let use_case = StageScripts::new(dirs(), files.clone());

        use_case.execute().await.unwrap();

        let ops = files.ops.lock().unwrap();
        assert_eq!(ops.len(), 6);
        assert_eq!(ops[0], Op::Remove(PathBuf::from("/scripts/toggle.scpt")));
        assert_eq!(
            ops[1],
            Op::Copy(
                PathBuf::from("/bundle/toggle.scpt"),
                PathBuf::from("/scripts/toggle.scpt")
            )
        );
        assert_eq!(ops[5], Op::Copy(PathBuf::from("/bundle/off.scpt"), PathBuf::from("/scripts/off.scpt")));
    }

    #[tokio::test]
    async fn missing_bundle_source_is_reported() {
        let files = Arc::new(RecordingFiles {
            missing_source: true,
            ..Default::default()
        });
        let use_case = StageScripts::new(dirs(), files.clone());

        let err = use_case.execute().await.unwrap_err();

        assert!(matches!(err, StagingError::SourceMissing(_)));
        assert!(files.ops.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn copy_failure_stops_staging() {
        let files = Arc::new(RecordingFiles {
            fail_copy_of: Some("on.scpt"),
            ..Default::default()
        });
        let use_case = StageScripts::new(dirs(), files.clone());

        let err = use_case.execute().await.unwrap_err();

        assert!(matches!(err, StagingError::Copy { .. }));
        let copies = files
            .ops
            .lock()
            .unwrap()
            .iter()
            .filter(|op| matches!(op, Op::Copy(..)))
            .count();
        assert_eq!(copies, 1);
    }
}
