use std::future::Future;

use dm_core::ports::UiExecutorPort;
use tokio::sync::oneshot;

/// Run `work` on the UI executor and wait for its result.
///
/// Fails only if the executor dropped the task without running it.
pub(crate) async fn present<T, F>(executor: &dyn UiExecutorPort, work: F) -> anyhow::Result<T>
where
    F: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    let (tx, rx) = oneshot::channel();
    executor.dispatch(Box::pin(async move {
        let _ = tx.send(work.await);
    }));
    rx.await
        .map_err(|_| anyhow::anyhow!("ui executor dropped the task before it ran"))
}
