//! Request workflow orchestration
//!
//! One `RequestWorkflow` instance exists per request kind; both kinds run
//! the identical protocol over disjoint counter-store namespaces. The
//! ordering inside `submit` and `reply` is load-bearing: quota is charged
//! before the durable request write (a failed write never leaves an
//! uncharged-but-recorded request), the lock is armed only after the
//! write (the marker can never reference a nonexistent request), and the
//! lock is disarmed before anything about the reply is persisted.

use crate::directory::{AdminDirectory, MemberDirectory};
use crate::quota::QuotaGuard;
use crate::record::{ReplyDraft, ReplyRecord, RequestDraft, RequestRecord};
use crate::reply_lock::ReplyLock;
use crate::store::{ReplyStore, RequestStore};
use libris_common::{
    AdminId, CoordinationConfig, Error, MemberCode, RequestId, RequestKind, RequestStatus, Result,
};
use libris_counter_store::CounterStore;
use std::sync::Arc;
use tracing::{info, warn};

/// Coordinates submissions and replies for one request kind
pub struct RequestWorkflow {
    kind: RequestKind,
    members: Arc<dyn MemberDirectory>,
    admins: Arc<dyn AdminDirectory>,
    requests: Arc<dyn RequestStore>,
    replies: Arc<dyn ReplyStore>,
    quota: QuotaGuard,
    lock: ReplyLock,
}

impl RequestWorkflow {
    /// Create a workflow for one request kind
    pub fn new(
        kind: RequestKind,
        counters: Arc<dyn CounterStore>,
        members: Arc<dyn MemberDirectory>,
        admins: Arc<dyn AdminDirectory>,
        requests: Arc<dyn RequestStore>,
        replies: Arc<dyn ReplyStore>,
        config: &CoordinationConfig,
    ) -> Self {
        Self {
            kind,
            members,
            admins,
            requests,
            replies,
            quota: QuotaGuard::new(Arc::clone(&counters), config.quota.ceiling),
            lock: ReplyLock::new(counters),
        }
    }

    /// Create a workflow with the default configuration
    pub fn with_defaults(
        kind: RequestKind,
        counters: Arc<dyn CounterStore>,
        members: Arc<dyn MemberDirectory>,
        admins: Arc<dyn AdminDirectory>,
        requests: Arc<dyn RequestStore>,
        replies: Arc<dyn ReplyStore>,
    ) -> Self {
        Self::new(
            kind,
            counters,
            members,
            admins,
            requests,
            replies,
            &CoordinationConfig::default(),
        )
    }

    /// The request kind this workflow instance coordinates
    #[must_use]
    pub const fn kind(&self) -> RequestKind {
        self.kind
    }

    /// The quota guard, exposed for administrative resets
    #[must_use]
    pub const fn quota(&self) -> &QuotaGuard {
        &self.quota
    }

    /// The reply lock, exposed for administrative re-arming
    #[must_use]
    pub const fn reply_lock(&self) -> &ReplyLock {
        &self.lock
    }

    /// Submit a new request on behalf of a member
    pub async fn submit(
        &self,
        member_code: &MemberCode,
        draft: RequestDraft,
    ) -> Result<RequestRecord> {
        self.members.resolve(member_code).await?;
        self.quota.consume(self.kind, member_code).await?;

        let record = match self.requests.create(self.kind, member_code, draft).await {
            Ok(record) => record,
            Err(err) => {
                warn!(
                    "request write failed after quota charge for member '{}', restoring: {}",
                    member_code, err
                );
                if let Err(restore_err) = self.quota.restore(self.kind, member_code).await {
                    warn!(
                        "could not restore quota charge for member '{}': {}",
                        member_code, restore_err
                    );
                }
                return Err(err);
            }
        };

        self.lock.arm(self.kind, record.id).await?;
        info!(
            "member '{}' submitted {} request {}",
            member_code, self.kind, record.id
        );
        Ok(record)
    }

    /// Record an admin's reply to a request, closing it
    ///
    /// `final_status` must be terminal. Exactly one reply ever succeeds
    /// per request; later attempts fail with `AlreadyAnswered` and leave
    /// no trace.
    pub async fn reply(
        &self,
        admin_id: &AdminId,
        request_id: RequestId,
        draft: ReplyDraft,
        final_status: RequestStatus,
    ) -> Result<ReplyRecord> {
        let request = self
            .requests
            .get(request_id)
            .await?
            .ok_or(Error::RequestNotFound(request_id))?;
        // A record of the other kind is not visible through this workflow
        if request.kind != self.kind {
            return Err(Error::RequestNotFound(request_id));
        }
        self.admins.resolve(admin_id).await?;
        if !final_status.is_terminal() {
            return Err(Error::InvalidReplyStatus(final_status));
        }

        self.lock.disarm(self.kind, request_id).await?;

        self.requests.update_status(request_id, final_status).await?;
        let reply = self
            .replies
            .create(request_id, admin_id, draft, final_status)
            .await?;
        info!(
            "admin '{}' answered {} request {} as {:?}",
            admin_id, self.kind, request_id, final_status
        );
        Ok(reply)
    }
}
