//! Per-container mutual exclusion

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

use super::naming::ContainerId;

/// Hands out one lock per container so that file reads and writes within a
/// container never interleave. Containers never contend with each other.
#[derive(Default)]
pub struct ContainerLocks {
    locks: Mutex<HashMap<ContainerId, Arc<Mutex<()>>>>,
}

impl ContainerLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to a container
    pub async fn acquire(&self, id: ContainerId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            // Entries only referenced by the map have no holder and no waiter
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            locks.entry(id).or_default().clone()
        };

        lock.lock_owned().await
    }
}
