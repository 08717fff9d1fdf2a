//! File-based preferences repository
//!
//! Persists the app's key-value preferences (`didSetupAppleScript`,
//! `AppleInterfaceStyle`, ...) as one JSON object in the application data
//! directory. Writes go through a temp file and a rename.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

use dm_core::{
    appearance::{AppearanceStyle, DARK_MODE_STYLE_KEY},
    ports::{AppearancePreferencePort, SetupStatusPort},
    setup::{ScriptSetupStatus, DID_SETUP_APPLE_SCRIPT_KEY},
};

pub const DEFAULT_PREFERENCES_FILE: &str = "preferences.json";

pub struct FilePreferencesRepository {
    path: PathBuf,
    /// Serializes read-modify-write cycles so concurrent setters don't drop keys.
    write_lock: Mutex<()>,
}

impl FilePreferencesRepository {
    /// Create repository with custom file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Create repository with defaults
    pub fn with_defaults(base_dir: &Path) -> Self {
        Self::new(base_dir.join(DEFAULT_PREFERENCES_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the raw value stored under `key`.
    pub async fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.load().await?.remove(key))
    }

    /// Store `value` under `key`; `None` removes the key.
    pub async fn set(&self, key: &str, value: Option<Value>) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.load().await?;
        match value {
            Some(value) => entries.insert(key.to_string(), value),
            None => entries.remove(key),
        };
        let content = serde_json::to_string_pretty(&Value::Object(entries))
            .context("serialize preferences failed")?;
        self.atomic_write(&content).await?;
        debug!(key, path = %self.path.display(), "preference written");
        Ok(())
    }

    async fn load(&self) -> Result<Map<String, Value>> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("read preferences failed: {}", self.path.display()))
            }
        };

        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&content)
            .with_context(|| format!("Failed to parse preferences: {}", self.path.display()))?
        {
            Value::Object(entries) => Ok(entries),
            other => anyhow::bail!(
                "preferences file {} holds {} instead of an object",
                self.path.display(),
                json_kind(&other)
            ),
        }
    }

    async fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .await
                .with_context(|| format!("create preferences dir failed: {}", dir.display()))?;
        }
        Ok(())
    }

    async fn atomic_write(&self, content: &str) -> Result<()> {
        self.ensure_parent_dir().await?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, content)
            .await
            .with_context(|| format!("write temp preferences failed: {}", tmp_path.display()))?;

        fs::rename(&tmp_path, &self.path).await.with_context(|| {
            format!(
                "rename temp preferences to target failed: {} -> {}",
                tmp_path.display(),
                self.path.display()
            )
        })?;

        Ok(())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[async_trait]
impl SetupStatusPort for FilePreferencesRepository {
    async fn get_status(&self) -> Result<ScriptSetupStatus> {
        let did_setup_apple_script = self
            .get(DID_SETUP_APPLE_SCRIPT_KEY)
            .await?
            .and_then(|v| v.as_bool())
            .unwrap_or(false);
        Ok(ScriptSetupStatus {
            did_setup_apple_script,
        })
    }

    async fn set_status(&self, status: &ScriptSetupStatus) -> Result<()> {
        self.set(
            DID_SETUP_APPLE_SCRIPT_KEY,
            Some(Value::Bool(status.did_setup_apple_script)),
        )
        .await
    }
}

#[async_trait]
impl AppearancePreferencePort for FilePreferencesRepository {
    async fn get_style(&self) -> Result<AppearanceStyle> {
        let stored = self.get(DARK_MODE_STYLE_KEY).await?;
        Ok(AppearanceStyle::from_stored(
            stored.as_ref().and_then(|v| v.as_str()),
        ))
    }

    async fn set_style(&self, style: AppearanceStyle) -> Result<()> {
        self.set(
            DARK_MODE_STYLE_KEY,
            style.to_stored().map(|s| Value::String(s.to_string())),
        )
        .await
    }
}
