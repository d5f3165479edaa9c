//! Libris Counter Store - shared atomic counter and lock-marker storage
//!
//! This crate defines the contract the coordination core relies on for all
//! cross-process synchronization: per-key atomic increments back the
//! submission quotas, and atomic get-and-delete backs the reply locks.
//! Backends must serialize operations per key; nothing else in the system
//! takes locks across request boundaries.

pub mod memory;

pub use memory::MemoryCounterStore;

use async_trait::async_trait;

/// Counter store error types
#[derive(Debug, thiserror::Error)]
pub enum CounterStoreError {
    #[error("counter store unavailable: {0}")]
    Unavailable(String),
    #[error("counter store internal error: {0}")]
    Internal(String),
}

/// Trait for pluggable counter/lock-marker stores
///
/// Values are small signed integers. Quota counters hold the remaining
/// submission budget; lock markers hold a placeholder value whose presence
/// alone is meaningful. `increment` and `get_and_delete` must be atomic
/// with respect to concurrent callers on the same key.
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Read the current value, or `None` if the key is absent
    async fn get(&self, key: &str) -> Result<Option<i64>, CounterStoreError>;

    /// Unconditionally set the value
    async fn set(&self, key: &str, value: i64) -> Result<(), CounterStoreError>;

    /// Set the value only if the key is absent
    ///
    /// Returns `true` if the value was installed, `false` if an existing
    /// value was left untouched.
    async fn set_if_absent(&self, key: &str, value: i64) -> Result<bool, CounterStoreError>;

    /// Atomically add `delta` (may be negative) and return the new value
    ///
    /// An absent key is treated as holding 0.
    async fn increment(&self, key: &str, delta: i64) -> Result<i64, CounterStoreError>;

    /// Atomically read and remove the key in one step
    ///
    /// Returns the prior value, or `None` if the key did not exist. Two
    /// concurrent callers on the same key can never both observe a value.
    async fn get_and_delete(&self, key: &str) -> Result<Option<i64>, CounterStoreError>;

    /// Unconditionally remove the key
    async fn delete(&self, key: &str) -> Result<(), CounterStoreError>;
}
