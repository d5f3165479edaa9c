//! Request and reply record types

use libris_common::{unix_now, AdminId, MemberCode, ReplyId, RequestId, RequestKind, RequestStatus};
use serde::{Deserialize, Serialize};

/// Free-text payload of a citizen request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestDraft {
    /// Short summary line
    pub title: String,
    /// Full request text
    pub content: String,
}

impl RequestDraft {
    /// Create a new request draft
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// Free-text payload of an admin reply
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyDraft {
    /// Full reply text
    pub content: String,
}

impl ReplyDraft {
    /// Create a new reply draft
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// A durable citizen request record
///
/// Created in `Awaiting` status; moved to a terminal status exactly once,
/// as a side effect of a reply being recorded. Never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestRecord {
    /// Unique request identifier
    pub id: RequestId,
    /// Which of the two workflows this request belongs to
    pub kind: RequestKind,
    /// Submitting member
    pub member_code: MemberCode,
    /// Short summary line
    pub title: String,
    /// Full request text
    pub content: String,
    /// Lifecycle status
    pub status: RequestStatus,
    /// Unix timestamp of creation
    pub created_at: u64,
}

impl RequestRecord {
    /// Create a new awaiting request with a generated ID
    ///
    /// Called by the durable request store at creation time.
    pub fn create(kind: RequestKind, member_code: MemberCode, draft: RequestDraft) -> Self {
        Self {
            id: RequestId::new(),
            kind,
            member_code,
            title: draft.title,
            content: draft.content,
            status: RequestStatus::Awaiting,
            created_at: unix_now(),
        }
    }

    /// Check if the request has been answered
    #[must_use]
    pub fn is_answered(&self) -> bool {
        self.status.is_terminal()
    }
}

/// A durable admin reply record
///
/// One-to-one with its request; immutable after creation. Carries the
/// final status that was written onto the request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyRecord {
    /// Unique reply identifier
    pub id: ReplyId,
    /// The request this reply answers
    pub request_id: RequestId,
    /// Authoring admin
    pub admin_id: AdminId,
    /// Full reply text
    pub content: String,
    /// Final status written onto the request
    pub status: RequestStatus,
    /// Unix timestamp of creation
    pub created_at: u64,
}

impl ReplyRecord {
    /// Create a new reply with a generated ID
    ///
    /// Called by the durable reply store at creation time.
    pub fn create(
        request_id: RequestId,
        admin_id: AdminId,
        draft: ReplyDraft,
        status: RequestStatus,
    ) -> Self {
        Self {
            id: ReplyId::new(),
            request_id,
            admin_id,
            content: draft.content,
            status,
            created_at: unix_now(),
        }
    }
}
