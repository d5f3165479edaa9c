//! Error types for Libris
//!
//! This module defines the common error taxonomy used throughout the
//! system. Every failure of the coordination core surfaces as one of
//! these stable kinds, never as an opaque failure.

use crate::types::{MemberCode, RequestId, RequestKind, RequestStatus};
use thiserror::Error;

/// Common result type for Libris operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for Libris
#[derive(Debug, Error)]
pub enum Error {
    // Identity resolution errors
    #[error("member not found: {0}")]
    MemberNotFound(String),

    #[error("admin not found: {0}")]
    AdminNotFound(String),

    #[error("request not found: {0}")]
    RequestNotFound(RequestId),

    // Protocol errors
    #[error("submission quota exhausted for member {member_code} on {kind} requests")]
    QuotaExceeded {
        kind: RequestKind,
        member_code: MemberCode,
    },

    #[error("request already answered: {0}")]
    AlreadyAnswered(RequestId),

    #[error("invalid reply status: {0:?} is not a terminal status")]
    InvalidReplyStatus(RequestStatus),

    // Backend errors
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a store unavailable error
    pub fn store_unavailable(msg: impl Into<String>) -> Self {
        Self::StoreUnavailable(msg.into())
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Check if this is a not found error
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::MemberNotFound(_) | Self::AdminNotFound(_) | Self::RequestNotFound(_)
        )
    }

    /// Check if this is a retryable error
    ///
    /// Only backend outages are worth retrying; protocol rejections are
    /// final until an administrative action changes the underlying state.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::StoreUnavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_not_found() {
        assert!(Error::MemberNotFound("m1".into()).is_not_found());
        assert!(Error::AdminNotFound("a1".into()).is_not_found());
        assert!(Error::RequestNotFound(RequestId::new()).is_not_found());
        assert!(!Error::StoreUnavailable("down".into()).is_not_found());
    }

    #[test]
    fn test_error_retryable() {
        assert!(Error::StoreUnavailable("down".into()).is_retryable());
        assert!(
            !Error::QuotaExceeded {
                kind: RequestKind::NewBook,
                member_code: MemberCode::new("m1"),
            }
            .is_retryable()
        );
        assert!(!Error::AlreadyAnswered(RequestId::new()).is_retryable());
    }

    #[test]
    fn test_quota_exceeded_message() {
        let err = Error::QuotaExceeded {
            kind: RequestKind::Improvement,
            member_code: MemberCode::new("M-7"),
        };
        let msg = err.to_string();
        assert!(msg.contains("M-7"));
        assert!(msg.contains("improvement"));
    }
}
