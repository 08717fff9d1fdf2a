use std::sync::Arc;

use anyhow::Context;
use tracing::debug;

use dm_core::ports::SetupStatusPort;

/// Records that the scripts are installed in the Target Directory.
///
/// Flips the persistent `didSetupAppleScript` flag. A flag that is already set
/// is left untouched so a repeated negotiation does not rewrite the store.
pub struct MarkSetupComplete {
    setup_status: Arc<dyn SetupStatusPort>,
}

impl MarkSetupComplete {
    pub fn new(setup_status: Arc<dyn SetupStatusPort>) -> Self {
        Self { setup_status }
    }

    /// Returns `true` if the flag was written, `false` if it was already set.
    pub async fn execute(&self) -> anyhow::Result<bool> {
        let mut status = self
            .setup_status
            .get_status()
            .await
            .context("failed to read setup status")?;
        if status.did_setup_apple_script {
            debug!("setup already recorded");
            return Ok(false);
        }

        status.did_setup_apple_script = true;
        self.setup_status
            .set_status(&status)
            .await
            .context("failed to record setup completion")?;
        Ok(true)
    }
}
