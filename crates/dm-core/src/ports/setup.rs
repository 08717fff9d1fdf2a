use async_trait::async_trait;

use crate::setup::ScriptSetupStatus;

#[async_trait]
pub trait SetupStatusPort: Send + Sync {
    async fn get_status(&self) -> anyhow::Result<ScriptSetupStatus>;
    async fn set_status(&self, status: &ScriptSetupStatus) -> anyhow::Result<()>;
}
