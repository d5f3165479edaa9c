//! Per-member submission quota enforcement
//!
//! Each `(kind, member)` pair gets a counter in the shared store, lazily
//! initialized to the ceiling and consumed by atomic decrement. There is
//! no expiry or refill; quota lasts until an administrative reset.

use crate::store_err;
use libris_common::{Error, MemberCode, QuotaConfig, RequestKind, Result};
use libris_counter_store::CounterStore;
use std::sync::Arc;
use tracing::debug;

/// Counter-store key for a member's remaining submissions
fn quota_key(kind: RequestKind, member_code: &MemberCode) -> String {
    format!("{}-request-count:{}", kind.as_str(), member_code.as_str())
}

/// Enforces the per-member, per-kind submission quota
#[derive(Clone)]
pub struct QuotaGuard {
    store: Arc<dyn CounterStore>,
    ceiling: i64,
}

impl QuotaGuard {
    /// Create a quota guard with the given ceiling
    pub fn new(store: Arc<dyn CounterStore>, ceiling: i64) -> Self {
        Self { store, ceiling }
    }

    /// Create a quota guard with the default ceiling
    pub fn with_defaults(store: Arc<dyn CounterStore>) -> Self {
        Self::new(store, QuotaConfig::default().ceiling)
    }

    /// Charge one submission against the member's quota
    ///
    /// The counter is initialized to the ceiling on first reference, then
    /// decremented in a single atomic step. A decrement that lands below
    /// zero is compensated back before the caller sees `QuotaExceeded`,
    /// so a rejected member is never charged and concurrent callers can
    /// never overdraw the budget.
    pub async fn consume(&self, kind: RequestKind, member_code: &MemberCode) -> Result<()> {
        let key = quota_key(kind, member_code);
        self.store
            .set_if_absent(&key, self.ceiling)
            .await
            .map_err(store_err)?;

        let left = self.store.increment(&key, -1).await.map_err(store_err)?;
        if left < 0 {
            self.store.increment(&key, 1).await.map_err(store_err)?;
            debug!(
                "quota exhausted for member '{}' on {} requests",
                member_code, kind
            );
            return Err(Error::QuotaExceeded {
                kind,
                member_code: member_code.clone(),
            });
        }

        debug!(
            "charged {} request quota for member '{}', {} left",
            kind, member_code, left
        );
        Ok(())
    }

    /// Return a previously charged submission to the member
    ///
    /// Used when the durable request write fails after a successful
    /// charge, so the member is not billed for a request that was never
    /// recorded.
    pub async fn restore(&self, kind: RequestKind, member_code: &MemberCode) -> Result<()> {
        let key = quota_key(kind, member_code);
        self.store.increment(&key, 1).await.map_err(store_err)?;
        Ok(())
    }

    /// Read the member's remaining submissions, if the counter exists
    pub async fn remaining(
        &self,
        kind: RequestKind,
        member_code: &MemberCode,
    ) -> Result<Option<i64>> {
        let key = quota_key(kind, member_code);
        self.store.get(&key).await.map_err(store_err)
    }

    /// Administrative reset: drop the counter, returning the member to
    /// full quota on next reference
    pub async fn reset(&self, kind: RequestKind, member_code: &MemberCode) -> Result<()> {
        let key = quota_key(kind, member_code);
        self.store.delete(&key).await.map_err(store_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libris_counter_store::MemoryCounterStore;

    fn guard() -> QuotaGuard {
        QuotaGuard::with_defaults(Arc::new(MemoryCounterStore::new()))
    }

    #[test]
    fn test_quota_key_format() {
        assert_eq!(
            quota_key(RequestKind::NewBook, &MemberCode::new("M-1")),
            "new-book-request-count:M-1"
        );
        assert_eq!(
            quota_key(RequestKind::Improvement, &MemberCode::new("M-1")),
            "improvement-request-count:M-1"
        );
    }

    #[tokio::test]
    async fn test_consume_to_exhaustion() {
        let guard = guard();
        let member = MemberCode::new("M-1");

        for _ in 0..5 {
            guard.consume(RequestKind::NewBook, &member).await.unwrap();
        }
        let result = guard.consume(RequestKind::NewBook, &member).await;
        assert!(matches!(result, Err(Error::QuotaExceeded { .. })));

        // The rejected attempt is not charged
        assert_eq!(
            guard
                .remaining(RequestKind::NewBook, &member)
                .await
                .unwrap(),
            Some(0)
        );
    }

    #[tokio::test]
    async fn test_kinds_have_independent_budgets() {
        let guard = guard();
        let member = MemberCode::new("M-1");

        for _ in 0..5 {
            guard.consume(RequestKind::NewBook, &member).await.unwrap();
        }
        guard
            .consume(RequestKind::Improvement, &member)
            .await
            .unwrap();
        assert_eq!(
            guard
                .remaining(RequestKind::Improvement, &member)
                .await
                .unwrap(),
            Some(4)
        );
    }

    #[tokio::test]
    async fn test_restore_returns_charge() {
        let guard = guard();
        let member = MemberCode::new("M-1");

        guard.consume(RequestKind::NewBook, &member).await.unwrap();
        guard.restore(RequestKind::NewBook, &member).await.unwrap();
        assert_eq!(
            guard
                .remaining(RequestKind::NewBook, &member)
                .await
                .unwrap(),
            Some(5)
        );
    }

    #[tokio::test]
    async fn test_reset_refills_on_next_reference() {
        let guard = guard();
        let member = MemberCode::new("M-1");

        for _ in 0..5 {
            guard.consume(RequestKind::NewBook, &member).await.unwrap();
        }
        guard.reset(RequestKind::NewBook, &member).await.unwrap();
        assert_eq!(
            guard
                .remaining(RequestKind::NewBook, &member)
                .await
                .unwrap(),
            None
        );
        guard.consume(RequestKind::NewBook, &member).await.unwrap();
        assert_eq!(
            guard
                .remaining(RequestKind::NewBook, &member)
                .await
                .unwrap(),
            Some(4)
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_concurrent_first_touch_loses_no_decrement() {
        let guard = guard();
        let member = MemberCode::new("fresh");

        let tasks: Vec<_> = (0..2)
            .map(|_| {
                let guard = guard.clone();
                let member = member.clone();
                tokio::spawn(async move { guard.consume(RequestKind::NewBook, &member).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert_eq!(
            guard
                .remaining(RequestKind::NewBook, &member)
                .await
                .unwrap(),
            Some(3)
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_concurrent_overdraw_is_rejected() {
        let guard = guard();
        let member = MemberCode::new("M-1");

        let tasks: Vec<_> = (0..20)
            .map(|_| {
                let guard = guard.clone();
                let member = member.clone();
                tokio::spawn(async move { guard.consume(RequestKind::NewBook, &member).await })
            })
            .collect();
        let results = futures::future::join_all(tasks).await;

        let granted = results
            .iter()
            .filter(|r| r.as_ref().unwrap().is_ok())
            .count();
        assert_eq!(granted, 5);
        assert_eq!(
            guard
                .remaining(RequestKind::NewBook, &member)
                .await
                .unwrap(),
            Some(0)
        );
    }
}
