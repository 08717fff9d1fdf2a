use async_trait::async_trait;

use crate::appearance::AppearanceStyle;

/// Access to the stored interface style (`AppleInterfaceStyle`).
#[async_trait]
pub trait AppearancePreferencePort: Send + Sync {
    async fn get_style(&self) -> anyhow::Result<AppearanceStyle>;
    async fn set_style(&self, style: AppearanceStyle) -> anyhow::Result<()>;
}
