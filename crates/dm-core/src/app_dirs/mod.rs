use std::path::PathBuf;

use crate::script::ScriptAction;

/// Directories the application works with. Pure facts, no existence checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDirs {
    /// Local data root (preferences, logs).
    pub app_data_root: PathBuf,
    /// OS-designated per-app directory scripts may be run from under the sandbox.
    pub scripts_dir: PathBuf,
    /// Bundled resources holding the script sources.
    pub resources_dir: PathBuf,
}

impl AppDirs {
    /// Installed location of `action` in the scripts directory.
    pub fn installed_script(&self, action: ScriptAction) -> PathBuf {
        self.scripts_dir.join(action.file_name())
    }

    /// Bundled source of `action`.
    pub fn bundled_script(&self, action: ScriptAction) -> PathBuf {
        self.resources_dir.join(action.file_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_paths_join_file_names() {
        let dirs = AppDirs {
            app_data_root: PathBuf::from("/tmp/dynamic"),
            scripts_dir: PathBuf::from("/tmp/scripts"),
            resources_dir: PathBuf::from("/tmp/bundle"),
        };

        assert_eq!(
            dirs.installed_script(ScriptAction::Toggle),
            PathBuf::from("/tmp/scripts/toggle.scpt")
        );
        assert_eq!(
            dirs.bundled_script(ScriptAction::Disable),
            PathBuf::from("/tmp/bundle/off.scpt")
        );
    }
}
