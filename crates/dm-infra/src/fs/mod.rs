mod script_files;

pub use script_files::FsScriptFiles;
