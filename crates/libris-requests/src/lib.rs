//! Libris Requests - quota-limited submission and exactly-once replies
//!
//! This crate implements the coordination protocol shared by the two
//! citizen-request workflows (operational-improvement and new-book). A
//! submission is charged against a per-member quota before the request
//! record is durably written, and a presence marker in the counter store
//! gates replies so that at most one admin ever answers a given request.
//! The counter store's per-key atomic primitives are the only
//! synchronization in the design; the workflow itself holds no locks.

pub mod directory;
pub mod quota;
pub mod record;
pub mod reply_lock;
pub mod store;
pub mod workflow;

pub use directory::{
    Admin, AdminDirectory, Member, MemberDirectory, MemoryAdminDirectory, MemoryMemberDirectory,
};
pub use quota::QuotaGuard;
pub use record::{ReplyDraft, ReplyRecord, RequestDraft, RequestRecord};
pub use reply_lock::ReplyLock;
pub use store::{MemoryReplyStore, MemoryRequestStore, ReplyStore, RequestStore};
pub use workflow::RequestWorkflow;

use libris_common::Error;
use libris_counter_store::CounterStoreError;

/// Map a counter-store fault onto the common error taxonomy
pub(crate) fn store_err(err: CounterStoreError) -> Error {
    Error::StoreUnavailable(err.to_string())
}
