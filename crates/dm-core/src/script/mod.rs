//! Automation script catalogue.
//!
//! The set of scripts is closed: every action maps to exactly one file through
//! an exhaustive lookup, never through string interpolation.

use std::fmt;

/// File extension shared by every bundled automation script.
pub const SCRIPT_EXTENSION: &str = "scpt";

/// A named appearance operation backed by one automation script.
///
/// 由一个自动化脚本支撑的外观操作。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ScriptAction {
    /// Flip between light and dark.
    Toggle,
    /// Force dark appearance.
    Enable,
    /// Force light appearance.
    Disable,
}

impl ScriptAction {
    /// Every known action, in staging order.
    pub const ALL: [ScriptAction; 3] = [
        ScriptAction::Toggle,
        ScriptAction::Enable,
        ScriptAction::Disable,
    ];

    /// Stable identifier used as the script's file stem.
    pub const fn identifier(self) -> &'static str {
        match self {
            ScriptAction::Toggle => "toggle",
            ScriptAction::Enable => "on",
            ScriptAction::Disable => "off",
        }
    }

    /// File name of the script inside the scripts or resources directory.
    pub const fn file_name(self) -> &'static str {
        match self {
            ScriptAction::Toggle => "toggle.scpt",
            ScriptAction::Enable => "on.scpt",
            ScriptAction::Disable => "off.scpt",
        }
    }
}

impl fmt::Display for ScriptAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}
