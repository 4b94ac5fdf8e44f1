//! Per-workload mutual exclusion.
//!
//! At most one lifecycle operation runs per identifier; different
//! identifiers proceed concurrently. An entry lives only while someone holds
//! or waits for it.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Lazily created lock per workload identifier.
#[derive(Default)]
pub struct WorkloadLocks {
    locks: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

/// Exclusive access to one identifier. Dropping it releases the lock and
/// removes the map entry when nobody else holds or awaits it.
pub struct WorkloadGuard<'a> {
    locks: &'a WorkloadLocks,
    key: String,
    guard: Option<OwnedMutexGuard<()>>,
}

impl WorkloadLocks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `key`.
    pub async fn acquire(&self, key: &str) -> WorkloadGuard<'_> {
        let lock = Arc::clone(self.map().entry(key.to_string()).or_default());
        let guard = lock.lock_owned().await;
        WorkloadGuard {
            locks: self,
            key: key.to_string(),
            guard: Some(guard),
        }
    }

    /// Number of identifiers currently held or awaited.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn map(&self) -> MutexGuard<'_, HashMap<String, Arc<AsyncMutex<()>>>> {
        self.locks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for WorkloadGuard<'_> {
    fn drop(&mut self) {
        // Release first so the owned guard's Arc no longer counts.
        drop(self.guard.take());
        let mut map = self.locks.map();
        // Waiters clone the Arc under the map mutex, so a count of one means
        // only the map itself still refers to the lock.
        let idle = map
            .get(&self.key)
            .is_some_and(|lock| Arc::strong_count(lock) == 1);
        if idle {
            map.remove(&self.key);
        }
    }
}
