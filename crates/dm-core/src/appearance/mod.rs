//! Appearance style as recorded in the preferences store.

use crate::script::ScriptAction;

/// Preferences key holding the interface style.
pub const DARK_MODE_STYLE_KEY: &str = "AppleInterfaceStyle";

/// Sentinel stored under [`DARK_MODE_STYLE_KEY`] when dark mode is on.
pub const DARK_STYLE_VALUE: &str = "Dark";

/// System interface style.
///
/// 系统界面风格。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum AppearanceStyle {
    #[default]
    Aqua,
    DarkAqua,
}

impl AppearanceStyle {
    /// Interpret the raw stored value. Absence means light; any value means dark.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            None => AppearanceStyle::Aqua,
            Some(_) => AppearanceStyle::DarkAqua,
        }
    }

    /// Value to store for this style; `None` removes the key.
    pub fn to_stored(self) -> Option<&'static str> {
        match self {
            AppearanceStyle::Aqua => None,
            AppearanceStyle::DarkAqua => Some(DARK_STYLE_VALUE),
        }
    }

    pub fn is_dark(self) -> bool {
        self == AppearanceStyle::DarkAqua
    }

    pub fn toggled(self) -> Self {
        match self {
            AppearanceStyle::Aqua => AppearanceStyle::DarkAqua,
            AppearanceStyle::DarkAqua => AppearanceStyle::Aqua,
        }
    }

    /// Script that forces this style.
    pub fn action(self) -> ScriptAction {
        match self {
            AppearanceStyle::Aqua => ScriptAction::Disable,
            AppearanceStyle::DarkAqua => ScriptAction::Enable,
        }
    }
}
