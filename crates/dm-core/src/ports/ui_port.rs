use anyhow::Result;

/// The app's settings surface, shown while the user is asked for permission.
#[async_trait::async_trait]
pub trait UiPort: Send + Sync {
    async fn open_settings(&self) -> Result<()>;
}
