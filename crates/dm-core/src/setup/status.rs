/// Preferences key recording that the scripts were installed.
pub const DID_SETUP_APPLE_SCRIPT_KEY: &str = "didSetupAppleScript";

/// Script setup status persisted across app restarts.
///
/// Moves from `false` to `true` once and is never reset by the app.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ScriptSetupStatus {
    pub did_setup_apple_script: bool,
}
