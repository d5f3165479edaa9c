//! Exactly-once reply gating
//!
//! A presence marker in the shared store stands for "no reply yet
//! recorded". The marker is armed right after the request record commits
//! and removed with an atomic get-and-delete when a reply is accepted, so
//! two concurrent reply attempts can never both observe it present.

use crate::store_err;
use libris_common::{Error, RequestId, RequestKind, Result};
use libris_counter_store::CounterStore;
use std::sync::Arc;
use tracing::debug;

/// Placeholder value stored under a lock key; only presence matters
const LOCK_MARKER: i64 = 1;

/// Counter-store key for a request's reply lock marker
fn lock_key(kind: RequestKind, request_id: RequestId) -> String {
    format!("{}-request-id:{}", kind.as_str(), request_id)
}

/// Gates replies so each request is answered at most once
#[derive(Clone)]
pub struct ReplyLock {
    store: Arc<dyn CounterStore>,
}

impl ReplyLock {
    /// Create a reply lock over the given store
    pub fn new(store: Arc<dyn CounterStore>) -> Self {
        Self { store }
    }

    /// Mark the request as answerable
    ///
    /// Called once, immediately after the request record is durably
    /// committed, so the marker can never reference a nonexistent
    /// request. Also the administrative re-arm operation for a request
    /// left un-answerable by a crash between disarm and the reply write.
    pub async fn arm(&self, kind: RequestKind, request_id: RequestId) -> Result<()> {
        let key = lock_key(kind, request_id);
        self.store
            .set(&key, LOCK_MARKER)
            .await
            .map_err(store_err)?;
        debug!("armed reply lock for {} request {}", kind, request_id);
        Ok(())
    }

    /// Claim the exclusive right to answer the request
    ///
    /// Atomically removes the marker; fails with `AlreadyAnswered` if it
    /// was absent. Must be called before the reply record is persisted,
    /// and the caller must abort the reply if this fails.
    pub async fn disarm(&self, kind: RequestKind, request_id: RequestId) -> Result<()> {
        let key = lock_key(kind, request_id);
        match self.store.get_and_delete(&key).await.map_err(store_err)? {
            Some(_) => {
                debug!("disarmed reply lock for {} request {}", kind, request_id);
                Ok(())
            }
            None => Err(Error::AlreadyAnswered(request_id)),
        }
    }

    /// Check whether the request is currently answerable
    pub async fn is_armed(&self, kind: RequestKind, request_id: RequestId) -> Result<bool> {
        let key = lock_key(kind, request_id);
        Ok(self.store.get(&key).await.map_err(store_err)?.is_some())
    }
}
