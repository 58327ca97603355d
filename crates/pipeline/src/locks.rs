//! Per-destination exclusion for the clear-then-write sequence.
//!
//! Clear and write are two separate store calls. Without exclusion a second
//! import into the same sheet can clear between the first import's clear
//! and write. Each destination key maps to its own async mutex; imports into
//! different sheets never wait on each other.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

/// Lock table keyed by destination (`{file}!{sheet}`).
#[derive(Default)]
pub struct DestinationLocks {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl DestinationLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `key`. Access ends when the guard drops.
    pub async fn acquire(&self, key: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            // Entries referenced only by the table are idle.
            locks.retain(|k, l| k == key || Arc::strong_count(l) > 1);
            Arc::clone(locks.entry(key.to_string()).or_default())
        };
        lock.lock_owned().await
    }
}
