//! In-memory counter store

use crate::{CounterStore, CounterStoreError};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;

/// In-memory counter and lock-marker store
///
/// In production this would be backed by a shared store (Redis-class);
/// this backend serves single-process deployments and tests. A single
/// mutex guards the whole map, so every operation is trivially atomic
/// with respect to every other.
pub struct MemoryCounterStore {
    entries: Mutex<HashMap<String, i64>>,
}

impl Default for MemoryCounterStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryCounterStore {
    /// Create a new empty counter store
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Number of live entries (counters and lock markers)
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Check if the store holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

#[async_trait]
impl CounterStore for MemoryCounterStore {
    async fn get(&self, key: &str) -> Result<Option<i64>, CounterStoreError> {
        Ok(self.entries.lock().get(key).copied())
    }

    async fn set(&self, key: &str, value: i64) -> Result<(), CounterStoreError> {
        self.entries.lock().insert(key.to_string(), value);
        Ok(())
    }

    async fn set_if_absent(&self, key: &str, value: i64) -> Result<bool, CounterStoreError> {
        let mut entries = self.entries.lock();
        if entries.contains_key(key) {
            Ok(false)
        } else {
            entries.insert(key.to_string(), value);
            Ok(true)
        }
    }

    async fn increment(&self, key: &str, delta: i64) -> Result<i64, CounterStoreError> {
        let mut entries = self.entries.lock();
        let value = entries.entry(key.to_string()).or_insert(0);
        *value += delta;
        Ok(*value)
    }

    async fn get_and_delete(&self, key: &str) -> Result<Option<i64>, CounterStoreError> {
        Ok(self.entries.lock().remove(key))
    }

    async fn delete(&self, key: &str) -> Result<(), CounterStoreError> {
        self.entries.lock().remove(key);
        Ok(())
    }
}
