pub mod fs;
pub mod preferences;

pub use fs::FsScriptFiles;
pub use preferences::FilePreferencesRepository;
