//! Durable request and reply record stores
//!
//! The relational store behind these traits is expected to provide
//! per-record atomicity only; nothing here is transactional across the
//! counter store. Reply uniqueness (one reply per request) is enforced at
//! this layer as a schema-level backstop, in addition to the reply lock.

use crate::record::{ReplyDraft, ReplyRecord, RequestDraft, RequestRecord};
use async_trait::async_trait;
use libris_common::{AdminId, Error, MemberCode, RequestId, RequestKind, RequestStatus, Result};
use parking_lot::RwLock;
use std::collections::HashMap;

/// Trait for the durable request record store
#[async_trait]
pub trait RequestStore: Send + Sync {
    /// Durably create a new request in `Awaiting` status, assigning its id
    async fn create(
        &self,
        kind: RequestKind,
        member_code: &MemberCode,
        draft: RequestDraft,
    ) -> Result<RequestRecord>;

    /// Fetch a request by id
    async fn get(&self, id: RequestId) -> Result<Option<RequestRecord>>;

    /// Overwrite the status of an existing request
    async fn update_status(&self, id: RequestId, status: RequestStatus) -> Result<()>;

    /// List all requests submitted by a member
    async fn list_for_member(&self, member_code: &MemberCode) -> Result<Vec<RequestRecord>>;
}

/// Trait for the durable reply record store
#[async_trait]
pub trait ReplyStore: Send + Sync {
    /// Durably create the reply for a request, assigning its id
    ///
    /// Fails with `AlreadyAnswered` if a reply already references the
    /// request; the one-reply-per-request relationship is unique at the
    /// schema level.
    async fn create(
        &self,
        request_id: RequestId,
        admin_id: &AdminId,
        draft: ReplyDraft,
        status: RequestStatus,
    ) -> Result<ReplyRecord>;

    /// Fetch the reply answering a request, if one exists
    async fn get_for_request(&self, request_id: RequestId) -> Result<Option<ReplyRecord>>;
}

/// In-memory request record store
///
/// In production this would be backed by the relational store; this
/// implementation serves single-process deployments and tests.
#[derive(Default)]
pub struct MemoryRequestStore {
    requests: RwLock<HashMap<RequestId, RequestRecord>>,
}

impl MemoryRequestStore {
    /// Create a new empty request store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RequestStore for MemoryRequestStore {
    async fn create(
        &self,
        kind: RequestKind,
        member_code: &MemberCode,
        draft: RequestDraft,
    ) -> Result<RequestRecord> {
        let record = RequestRecord::create(kind, member_code.clone(), draft);
        self.requests.write().insert(record.id, record.clone());
        Ok(record)
    }

    async fn get(&self, id: RequestId) -> Result<Option<RequestRecord>> {
        Ok(self.requests.read().get(&id).cloned())
    }

    async fn update_status(&self, id: RequestId, status: RequestStatus) -> Result<()> {
        let mut requests = self.requests.write();
        let record = requests.get_mut(&id).ok_or(Error::RequestNotFound(id))?;
        record.status = status;
        Ok(())
    }

    async fn list_for_member(&self, member_code: &MemberCode) -> Result<Vec<RequestRecord>> {
        Ok(self
            .requests
            .read()
            .values()
            .filter(|r| &r.member_code == member_code)
            .cloned()
            .collect())
    }
}

/// In-memory reply record store
///
/// Replies are keyed by the request they answer, which makes the
/// one-reply-per-request uniqueness check a plain occupied-entry test
/// under the write lock.
#[derive(Default)]
pub struct MemoryReplyStore {
    replies: RwLock<HashMap<RequestId, ReplyRecord>>,
}

impl MemoryReplyStore {
    /// Create a new empty reply store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReplyStore for MemoryReplyStore {
    async fn create(
        &self,
        request_id: RequestId,
        admin_id: &AdminId,
        draft: ReplyDraft,
        status: RequestStatus,
    ) -> Result<ReplyRecord> {
        let mut replies = self.replies.write();
        if replies.contains_key(&request_id) {
            return Err(Error::AlreadyAnswered(request_id));
        }
        let record = ReplyRecord::create(request_id, admin_id.clone(), draft, status);
        replies.insert(request_id, record.clone());
        Ok(record)
    }

    async fn get_for_request(&self, request_id: RequestId) -> Result<Option<ReplyRecord>> {
        Ok(self.replies.read().get(&request_id).cloned())
    }
}
