// Counter lifecycle: restore from storage, read-modify-write on click, broadcast to the active tab

use futures::lock::Mutex;

use crate::config::PopupConfig;
use crate::error::StorageError;
use crate::messages::PopupMessage;
use crate::services::{CounterStore, Messenger};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CounterAction {
    Increment,
    Decrement,
}

impl CounterAction {
    /// No bounds: the counter may go negative. Saturates at the i64 limits.
    pub fn apply(self, current: i64) -> i64 {
        match self {
            CounterAction::Increment => current.saturating_add(1),
            CounterAction::Decrement => current.saturating_sub(1),
        }
    }
}

/// How concurrent mutations are ordered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MutationPolicy {
    /// One read-modify-write cycle at a time, in click order.
    Serialized,
    /// Cycles may interleave between read and write; rapid clicks can lose updates.
    Unguarded,
}

impl MutationPolicy {
    pub fn from_config(config: &PopupConfig) -> Self {
        if config.counter.serialize_mutations {
            MutationPolicy::Serialized
        } else {
            MutationPolicy::Unguarded
        }
    }
}

/// Where the current count is shown.
pub trait CounterDisplay {
    fn render(&self, value: i64);
}

pub struct CounterController<S, M, D> {
    store: S,
    messenger: M,
    display: D,
    policy: MutationPolicy,
    notify_active_tab: bool,
    write_lock: Mutex<()>,
}

impl<S, M, D> CounterController<S, M, D>
where
    S: CounterStore,
    M: Messenger,
    D: CounterDisplay,
{
    pub fn new(store: S, messenger: M, display: D, policy: MutationPolicy) -> Self {
        Self {
            store,
            messenger,
            display,
            policy,
            notify_active_tab: true,
            write_lock: Mutex::new(()),
        }
    }

    pub fn from_config(store: S, messenger: M, display: D, config: &PopupConfig) -> Self {
        let policy = MutationPolicy::from_config(config);
        let mut controller = Self::new(store, messenger, display, policy);
        controller.notify_active_tab = config.messaging.notify_active_tab;
        controller
    }

    pub fn policy(&self) -> MutationPolicy {
        self.policy
    }

    /// Render the stored count, seeding storage with 0 on first open.
    pub async fn restore(&self) -> Result<i64, StorageError> {
        let value = match self.store.get().await? {
            Some(value) => value,
            None => {
                log::info!("No stored count, initializing to 0");
                self.store.set(0).await?;
                0
            }
        };

        self.display.render(value);
        Ok(value)
    }

    pub async fn increment(&self) -> Result<i64, StorageError> {
        self.apply(CounterAction::Increment).await
    }

    pub async fn decrement(&self) -> Result<i64, StorageError> {
        self.apply(CounterAction::Decrement).await
    }

    /// Read, compute, persist, render, then broadcast the new value.
    ///
    /// Under [`MutationPolicy::Serialized`] read, write and render run under one
    /// lock. The lock is released before the broadcast so a content script that
    /// never answers cannot stall later clicks. A failed broadcast is logged and
    /// does not fail the mutation.
    pub async fn apply(&self, action: CounterAction) -> Result<i64, StorageError> {
        let guard = match self.policy {
            MutationPolicy::Serialized => Some(self.write_lock.lock().await),
            MutationPolicy::Unguarded => None,
        };

        // Storage may have been cleared since restore
        let current = self.store.get().await?.unwrap_or(0);
        let next = action.apply(current);

        self.store.set(next).await?;
        log::info!("Counter {:?}: {} -> {}", action, current, next);

        self.display.render(next);
        drop(guard);

        self.broadcast(next).await;

        Ok(next)
    }

    async fn broadcast(&self, count: i64) {
        if !self.notify_active_tab {
            return;
        }

        match self
            .messenger
            .send_to_active_tab(&PopupMessage::count(count))
            .await
        {
            Ok(response) => {
                log::info!(
                    "Current count value {} passed to content script: {}",
                    count,
                    response.message
                );
            }
            Err(e) => {
                log::warn!("Failed to notify content script of count {}: {}", count, e);
            }
        }
    }
}
