use anyhow::Context;
use tokio::runtime::Runtime;

/// Multi-thread runtime shared by the use cases and the UI executor.
pub fn create_runtime() -> anyhow::Result<Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .thread_name("dynamic-worker")
        .enable_all()
        .build()
        .context("Failed to build tokio runtime")
}
