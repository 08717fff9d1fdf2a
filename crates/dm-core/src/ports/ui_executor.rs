use futures::future::BoxFuture;

/// A unit of user-facing work.
pub type UiTask = BoxFuture<'static, ()>;

/// The main interaction context.
///
/// Every dialog, alert and settings presentation is handed to this executor.
/// Tasks run one at a time in submission order; `dispatch` never blocks.
pub trait UiExecutorPort: Send + Sync {
    fn dispatch(&self, task: UiTask);
}
