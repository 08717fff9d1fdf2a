use std::path::{Component, PathBuf};

use dm_core::{
    app_dirs::AppDirs,
    ports::{AppDirsError, AppDirsPort},
};

const APP_DIR_NAME: &str = "dynamic";

/// Bundle identifier used when the configuration names none.
pub const DEFAULT_BUNDLE_ID: &str = "io.github.dynamic-dark-mode.Dynamic";

/// Per-user root of the sandbox-permitted script directories.
const APPLICATION_SCRIPTS_DIR: [&str; 2] = ["Library", "Application Scripts"];

/// Inside the App Sandbox `$HOME` is `<home>/Library/Containers/<id>/Data`.
/// Returns the user's real home for such a path, and `home` unchanged otherwise.
fn outside_container(home: PathBuf) -> PathBuf {
    let components: Vec<Component<'_>> = home.components().collect();
    if let [prefix @ .., Component::Normal(library), Component::Normal(containers), Component::Normal(_), Component::Normal(data)] =
        components.as_slice()
    {
        if !prefix.is_empty()
            && library.to_str() == Some("Library")
            && containers.to_str() == Some("Containers")
            && data.to_str() == Some("Data")
        {
            return prefix.iter().collect();
        }
    }
    home
}

fn resolved_app_dir_name() -> String {
    match std::env::var("DM_PROFILE") {
        Ok(profile) if !profile.is_empty() => format!("{APP_DIR_NAME}-{profile}"),
        _ => APP_DIR_NAME.to_string(),
    }
}

/// Bundled scripts live in `Contents/Resources/scripts` next to `Contents/MacOS/<exe>`.
fn default_resources_dir() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    let contents = exe.parent()?.parent()?;
    Some(contents.join("Resources").join("scripts"))
}

pub struct DirsAppDirsAdapter {
    bundle_id: String,
    resources_dir_override: Option<PathBuf>,
    app_data_root_override: Option<PathBuf>,
    base_data_local_dir_override: Option<PathBuf>,
    home_dir_override: Option<PathBuf>,
}

impl DirsAppDirsAdapter {
    /// An empty `bundle_id` falls back to [`DEFAULT_BUNDLE_ID`].
    pub fn new(bundle_id: impl Into<String>) -> Self {
        let bundle_id = bundle_id.into();
        Self {
            bundle_id: if bundle_id.is_empty() {
                DEFAULT_BUNDLE_ID.to_string()
            } else {
                bundle_id
            },
            resources_dir_override: None,
            app_data_root_override: None,
            base_data_local_dir_override: None,
            home_dir_override: None,
        }
    }

    /// Read bundled scripts from `dir` instead of the app bundle.
    pub fn with_resources_dir(mut self, dir: PathBuf) -> Self {
        self.resources_dir_override = Some(dir);
        self
    }

    /// Use `dir` verbatim as the data root. No profile suffix is applied.
    pub fn with_app_data_root(mut self, dir: PathBuf) -> Self {
        self.app_data_root_override = Some(dir);
        self
    }

    #[cfg(test)]
    fn with_base_data_local_dir(mut self, base: PathBuf) -> Self {
        self.base_data_local_dir_override = Some(base);
        self
    }

    #[cfg(test)]
    fn with_home_dir(mut self, home: PathBuf) -> Self {
        self.home_dir_override = Some(home);
        self
    }

    pub fn bundle_id(&self) -> &str {
        &self.bundle_id
    }

    /// The user's home, never the sandbox container that `$HOME` points into.
    fn home_dir(&self) -> Option<PathBuf> {
        let home = match &self.home_dir_override {
            Some(home) => home.clone(),
            None => dirs::home_dir()?,
        };
        Some(outside_container(home))
    }

    fn app_data_root(&self) -> Option<PathBuf> {
        if let Some(root) = &self.app_data_root_override {
            return Some(root.clone());
        }
        let base = match &self.base_data_local_dir_override {
            Some(base) => base.clone(),
            None => dirs::data_local_dir()?,
        };
        Some(base.join(resolved_app_dir_name()))
    }
}

impl AppDirsPort for DirsAppDirsAdapter {
    fn get_app_dirs(&self) -> Result<AppDirs, AppDirsError> {
        let home = self.home_dir().ok_or(AppDirsError::HomeDirUnavailable)?;
        let app_data_root = self
            .app_data_root()
            .ok_or(AppDirsError::DataLocalDirUnavailable)?;
        let resources_dir = match &self.resources_dir_override {
            Some(dir) => dir.clone(),
            None => default_resources_dir().ok_or(AppDirsError::ResourcesDirUnavailable)?,
        };
        let scripts_dir = APPLICATION_SCRIPTS_DIR
            .iter()
            .fold(home, |dir, part| dir.join(part))
            .join(&self.bundle_id);

        Ok(AppDirs {
            app_data_root,
            scripts_dir,
            resources_dir,
        })
    }
}
