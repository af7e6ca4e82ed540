use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

type LockTable = Arc<Mutex<HashMap<String, Arc<AsyncMutex<()>>>>>;

/// Async mutual exclusion per string key.
///
/// Entries are removed once the last holder or waiter for a key is gone, so the
/// table only grows with the number of keys in flight.
#[derive(Debug, Clone, Default)]
pub struct KeyedMutex {
    locks: LockTable,
}

impl KeyedMutex {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn lock(&self, key: &str) -> KeyedGuard {
        let entry = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(locks.entry(key.to_string()).or_default())
        };

        KeyedGuard {
            guard: entry.lock_owned().await,
            key: key.to_string(),
            locks: Arc::clone(&self.locks),
        }
    }

    pub fn in_flight(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

pub struct KeyedGuard {
    guard: OwnedMutexGuard<()>,
    key: String,
    locks: LockTable,
}

impl Drop for KeyedGuard {
    fn drop(&mut self) {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        // The table and this guard hold the only references when nobody is waiting.
        if Arc::strong_count(OwnedMutexGuard::mutex(&self.guard)) == 2 {
            locks.remove(&self.key);
        }
    }
}
