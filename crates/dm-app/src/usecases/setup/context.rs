use tokio::sync::{watch, Mutex};
use dm_core::setup::SetupState;

/// Shared setup context containing the published state and the in-progress guard.
///
/// ## Guard
/// `is_setting_up` is only locked around the check-and-flip when a negotiation
/// starts and around the final clear. It is never held while the user is
/// looking at a dialog, so fast-path checks from other callers never wait on it.
pub struct SetupContext {
    /// Current negotiation state, observable through [`SetupContext::subscribe`].
    state: watch::Sender<SetupState>,
    /// `true` while a negotiation is in flight. Not persisted.
    is_setting_up: Mutex<bool>,
}

impl SetupContext {
    /// Creates a new SetupContext with the given initial state.
    pub fn new(initial_state: SetupState) -> Self {
        let (state, _) = watch::channel(initial_state);
        Self {
            state,
            is_setting_up: Mutex::new(false),
        }
    }

    /// Flip the guard on. Returns `false` if another negotiation holds it.
    pub async fn try_begin(&self) -> bool {
        let mut is_setting_up = self.is_setting_up.lock().await;
        if *is_setting_up {
            return false;
        }
        *is_setting_up = true;
        true
    }

    /// Clear the guard so a future negotiation may start.
    pub async fn release(&self) {
        *self.is_setting_up.lock().await = false;
    }

    /// Publish a settled state and clear the guard under one lock.
    ///
    /// A caller that wins [`SetupContext::try_begin`] afterwards never has its
    /// state overwritten by the negotiation that just ended.
    pub async fn settle(&self, state: SetupState) {
        let mut is_setting_up = self.is_setting_up.lock().await;
        self.state.send_replace(state);
        *is_setting_up = false;
    }

    pub async fn is_setting_up(&self) -> bool {
        *self.is_setting_up.lock().await
    }

    pub fn get_state(&self) -> SetupState {
        self.state.borrow().clone()
    }

    pub fn set_state(&self, state: SetupState) {
        self.state.send_replace(state);
    }

    pub fn subscribe(&self) -> watch::Receiver<SetupState> {
        self.state.subscribe()
    }
}

impl Default for SetupContext {
    /// Creates a SetupContext in the `Idle` state with the guard cleared.
    fn default() -> Self {
        Self::new(SetupState::Idle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn guard_admits_one_negotiation_until_released() {
        let context = SetupContext::default();

        assert!(context.try_begin().await);
        assert!(!context.try_begin().await);
        assert!(context.is_setting_up().await);

        context.release().await;
        assert!(!context.is_setting_up().await);
        assert!(context.try_begin().await);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn settle_publishes_state_and_clears_guard_together() {
        let context = std::sync::Arc::new(SetupContext::default());
        assert!(context.try_begin().await);
        context.set_state(SetupState::Staging);

        let mut rx = context.subscribe();
        let waiter = {
            let context = context.clone();
            tokio::spawn(async move {
                rx.wait_for(SetupState::is_settled).await.unwrap();
                let restarted = context.try_begin().await;
                context.set_state(SetupState::Idle);
                restarted
            })
        };

        context.settle(SetupState::Completed).await;

        assert!(waiter.await.unwrap());
        assert_eq!(context.get_state(), SetupState::Idle);
        assert!(context.is_setting_up().await);
    }

    #[tokio::test]
    async fn subscribers_observe_state_changes() {
        let context = SetupContext::default();
        let mut rx = context.subscribe();

        context.set_state(SetupState::Staging);

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), SetupState::Staging);
        assert_eq!(context.get_state(), SetupState::Staging);
    }
}
