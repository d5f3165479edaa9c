//! Membership and admin-identity collaborator interfaces
//!
//! The coordination core only resolves identities; registration,
//! authentication and everything else about members and admins is owned
//! by external subsystems.

use async_trait::async_trait;
use libris_common::{unix_now, AdminId, Error, MemberCode, Result};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The member projection this core reads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    /// Durable member code
    pub code: MemberCode,
    /// Display name
    pub display_name: String,
    /// Unix timestamp of registration
    pub created_at: u64,
}

impl Member {
    /// Create a new member projection
    pub fn new(code: MemberCode, display_name: impl Into<String>) -> Self {
        Self {
            code,
            display_name: display_name.into(),
            created_at: unix_now(),
        }
    }
}

/// The admin projection this core reads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Admin {
    /// Admin identifier
    pub id: AdminId,
    /// Display name
    pub display_name: String,
    /// Unix timestamp of registration
    pub created_at: u64,
}

impl Admin {
    /// Create a new admin projection
    pub fn new(id: AdminId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            created_at: unix_now(),
        }
    }
}

/// Trait for resolving member codes to known members
#[async_trait]
pub trait MemberDirectory: Send + Sync {
    /// Resolve a member code, failing with `MemberNotFound` if unknown
    async fn resolve(&self, code: &MemberCode) -> Result<Member>;
}

/// Trait for resolving admin identifiers to known admins
#[async_trait]
pub trait AdminDirectory: Send + Sync {
    /// Resolve an admin id, failing with `AdminNotFound` if unknown
    async fn resolve(&self, id: &AdminId) -> Result<Admin>;
}

/// In-memory member directory
///
/// In production this would be backed by the membership subsystem; this
/// implementation serves single-process deployments and tests.
#[derive(Default)]
pub struct MemoryMemberDirectory {
    members: RwLock<HashMap<MemberCode, Member>>,
}

impl MemoryMemberDirectory {
    /// Create a new empty directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a member
    pub fn register(&self, member: Member) {
        self.members.write().insert(member.code.clone(), member);
    }
}

#[async_trait]
impl MemberDirectory for MemoryMemberDirectory {
    async fn resolve(&self, code: &MemberCode) -> Result<Member> {
        self.members
            .read()
            .get(code)
            .cloned()
            .ok_or_else(|| Error::MemberNotFound(code.as_str().to_string()))
    }
}

/// In-memory admin directory
///
/// In production this would be backed by the admin-identity subsystem.
#[derive(Default)]
pub struct MemoryAdminDirectory {
    admins: RwLock<HashMap<AdminId, Admin>>,
}

impl MemoryAdminDirectory {
    /// Create a new empty directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an admin
    pub fn register(&self, admin: Admin) {
        self.admins.write().insert(admin.id.clone(), admin);
    }
}

#[async_trait]
impl AdminDirectory for MemoryAdminDirectory {
    async fn resolve(&self, id: &AdminId) -> Result<Admin> {
        self.admins
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| Error::AdminNotFound(id.as_str().to_string()))
    }
}
