use std::collections::BTreeMap;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AppDirsError {
    #[error("home directory unavailable")]
    HomeDirUnavailable,

    #[error("local data directory unavailable")]
    DataLocalDirUnavailable,

    #[error("bundle resources directory unavailable")]
    ResourcesDirUnavailable,
}

/// A script could not be run.
///
/// `fields` carries every diagnostic the scripting engine reported
/// (message, number, range, ...) so it can be shown verbatim.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ScriptExecutionError {
    pub message: String,
    pub fields: BTreeMap<String, String>,
}

impl ScriptExecutionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// All reported fields as `key: value` lines.
    pub fn diagnostic_dump(&self) -> String {
        if self.fields.is_empty() {
            return format!("message: {}\n", self.message);
        }
        self.fields
            .iter()
            .fold(String::new(), |acc, (key, value)| format!("{acc}{key}: {value}\n"))
    }
}

#[derive(Debug, Error)]
pub enum StagingError {
    #[error("bundled script missing: {0}")]
    SourceMissing(PathBuf),

    #[error("remove {path} failed: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("copy {from} -> {to} failed: {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
