//! Key-value preferences persisted as a single JSON object.

mod file_repo;

pub use file_repo::{FilePreferencesRepository, DEFAULT_PREFERENCES_FILE};
