use anyhow::Result;

/// Severity of a modal alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertStyle {
    Informational,
    Warning,
    Critical,
}

/// A blocking, user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub style: AlertStyle,
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn new(style: AlertStyle, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            style,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Presents modal alerts. Returns once the user dismissed the alert.
#[async_trait::async_trait]
pub trait AlertPort: Send + Sync {
    async fn show_alert(&self, alert: &Alert) -> Result<()>;
}
