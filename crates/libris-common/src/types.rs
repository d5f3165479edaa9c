//! Core type definitions for Libris
//!
//! This module defines the fundamental identifier and status types used
//! throughout the system.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a citizen request record
///
/// Assigned by the durable request store when the record is created.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(Uuid);

impl RequestId {
    /// Generate a new random request ID
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from existing UUID
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the underlying UUID
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RequestId({})", self.0)
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a reply record
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReplyId(Uuid);

impl ReplyId {
    /// Generate a new random reply ID
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from existing UUID
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the underlying UUID
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ReplyId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ReplyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ReplyId({})", self.0)
    }
}

impl fmt::Display for ReplyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Durable member code issued by the membership subsystem
///
/// Opaque and immutable once issued; used as the partition key for
/// submission quotas.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("{_0}")]
pub struct MemberCode(String);

impl MemberCode {
    /// Wrap an externally issued member code
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Get the member code as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for MemberCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MemberCode({:?})", self.0)
    }
}

/// Identifier for an administrator account
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("{_0}")]
pub struct AdminId(String);

impl AdminId {
    /// Wrap an externally issued admin identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the admin identifier as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AdminId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AdminId({:?})", self.0)
    }
}

/// The two citizen-request workflows
///
/// Both share the same protocol shape but use disjoint counter-store
/// namespaces, so quotas and locks never collide across kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RequestKind {
    /// Request to improve library operations
    Improvement,
    /// Request to acquire a new book
    NewBook,
}

impl RequestKind {
    /// Stable name used in counter-store key namespaces
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Improvement => "improvement",
            Self::NewBook => "new-book",
        }
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle status of a citizen request
///
/// Created as `Awaiting`; moved to exactly one of the terminal states as
/// a side effect of a reply being recorded. Terminal states never revert.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    #[default]
    Awaiting,
    Accepted,
    Refused,
}

impl RequestStatus {
    /// Check whether this status is terminal (a reply has been recorded)
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Accepted | Self::Refused)
    }
}

/// Current unix timestamp in seconds
#[must_use]
pub fn unix_now() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_kind_names() {
        assert_eq!(RequestKind::Improvement.as_str(), "improvement");
        assert_eq!(RequestKind::NewBook.as_str(), "new-book");
    }

    #[test]
    fn test_status_terminality() {
        assert!(!RequestStatus::Awaiting.is_terminal());
        assert!(RequestStatus::Accepted.is_terminal());
        assert!(RequestStatus::Refused.is_terminal());
    }

    #[test]
    fn test_status_serde_names() {
        assert_eq!(
            serde_json::to_string(&RequestStatus::Awaiting).unwrap(),
            "\"AWAITING\""
        );
        assert_eq!(
            serde_json::to_string(&RequestStatus::Accepted).unwrap(),
            "\"ACCEPTED\""
        );
        assert_eq!(
            serde_json::to_string(&RequestStatus::Refused).unwrap(),
            "\"REFUSED\""
        );
    }

    #[test]
    fn test_member_code_display() {
        let code = MemberCode::new("M-1024");
        assert_eq!(code.as_str(), "M-1024");
        assert_eq!(code.to_string(), "M-1024");
    }

    #[test]
    fn test_request_id_roundtrip() {
        let id = RequestId::new();
        assert_eq!(RequestId::from_uuid(id.as_uuid()), id);
    }
}
