use std::path::{Path, PathBuf};

use anyhow::Result;

/// Parameters of a directory-only selection dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderPickerRequest {
    /// Directory the dialog opens at.
    pub directory: PathBuf,
    pub title: String,
    pub prompt: String,
}

impl FolderPickerRequest {
    pub fn new(directory: &Path, title: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            directory: directory.to_path_buf(),
            title: title.into(),
            prompt: prompt.into(),
        }
    }
}

/// System directory picker.
///
/// Only directories can be chosen. `Ok(None)` means the user closed the
/// dialog without choosing; `Err` means the dialog could not be shown.
#[async_trait::async_trait]
pub trait FolderPickerPort: Send + Sync {
    async fn pick_folder(&self, request: &FolderPickerRequest) -> Result<Option<PathBuf>>;
}
