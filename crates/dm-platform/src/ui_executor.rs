use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use dm_core::ports::{UiExecutorPort, UiTask};

/// Runs UI tasks one at a time, in submission order, on a single task.
///
/// Must be created inside a Tokio runtime. The drain loop ends once every
/// clone of the executor is dropped.
#[derive(Clone)]
pub struct SerialUiExecutor {
    tx: mpsc::UnboundedSender<UiTask>,
}

impl SerialUiExecutor {
    pub fn spawn() -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<UiTask>();
        tokio::spawn(async move {
            while let Some(task) = rx.recv().await {
                task.await;
            }
            debug!("ui executor stopped");
        });
        Self { tx }
    }

    /// Wait until every task dispatched so far has run.
    pub async fn flush(&self) {
        let (done_tx, done_rx) = oneshot::channel();
        self.dispatch(Box::pin(async move {
            let _ = done_tx.send(());
        }));
        let _ = done_rx.await;
    }
}

impl UiExecutorPort for SerialUiExecutor {
    fn dispatch(&self, task: UiTask) {
        if self.tx.send(task).is_err() {
            warn!("ui executor is gone, dropping task");
        }
    }
}
