//! Identity model - the authorization-relevant snapshot of an admin.
//!
//! An [`Identity`] is immutable once built. The session layer replaces it
//! wholesale on login, logout, or a permission refresh.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{BranchId, PermissionRecord, Role};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    #[error("Branch-specific scope requires a branch id")]
    MissingBranch,

    #[error("General scope cannot carry a branch id")]
    UnexpectedBranch,

    #[error("Unknown access scope: {0}")]
    UnknownScope(String),
}

/// Scope without its branch binding, as chosen during provisioning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeKind {
    General,
    BranchSpecific,
}

/// Whether an identity acts on every branch or on one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AccessScope {
    General,
    BranchSpecific(BranchId),
}

impl AccessScope {
    /// Branch scope; rejects blank ids.
    pub fn branch(id: impl Into<BranchId>) -> Result<Self, IdentityError> {
        let id = id.into();
        if id.is_empty() {
            return Err(IdentityError::MissingBranch);
        }
        Ok(AccessScope::BranchSpecific(id))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AccessScope::General => "general",
            AccessScope::BranchSpecific(_) => "branch_specific",
        }
    }

    pub fn kind(&self) -> ScopeKind {
        match self {
            AccessScope::General => ScopeKind::General,
            AccessScope::BranchSpecific(_) => ScopeKind::BranchSpecific,
        }
    }

    pub fn branch_id(&self) -> Option<&BranchId> {
        match self {
            AccessScope::General => None,
            AccessScope::BranchSpecific(id) => Some(id),
        }
    }

    pub fn is_general(&self) -> bool {
        matches!(self, AccessScope::General)
    }

    /// Build from the wire pair, accepting the backend's Portuguese codes.
    pub fn from_parts(scope: &str, branch_id: Option<BranchId>) -> Result<Self, IdentityError> {
        match scope {
            "general" | "geral" => match branch_id {
                Some(id) if !id.is_empty() => Err(IdentityError::UnexpectedBranch),
                _ => Ok(AccessScope::General),
            },
            "branch_specific" | "polo_especifico" => {
                AccessScope::branch(branch_id.ok_or(IdentityError::MissingBranch)?)
            }
            other => Err(IdentityError::UnknownScope(other.to_string())),
        }
    }
}

/// Admin identity as consumed by the evaluator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "IdentityRecord", into = "IdentityRecord")]
pub struct Identity {
    pub role: Role,
    pub scope: AccessScope,
    pub permissions: Option<PermissionRecord>,
}

impl Identity {
    pub fn new(role: Role, scope: AccessScope) -> Self {
        Self {
            role,
            scope,
            permissions: None,
        }
    }

    pub fn with_permissions(mut self, permissions: PermissionRecord) -> Self {
        self.permissions = Some(permissions);
        self
    }

    pub fn branch_id(&self) -> Option<&BranchId> {
        self.scope.branch_id()
    }
}

/// Flat wire representation of an [`Identity`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityRecord {
    pub role: Role,
    pub scope: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<BranchId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<PermissionRecord>,
}

impl TryFrom<IdentityRecord> for Identity {
    type Error = IdentityError;

    fn try_from(record: IdentityRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            role: record.role,
            scope: AccessScope::from_parts(&record.scope, record.branch_id)?,
            permissions: record.permissions,
        })
    }
}

impl From<Identity> for IdentityRecord {
    fn from(identity: Identity) -> Self {
        Self {
            role: identity.role,
            scope: identity.scope.as_str().to_string(),
            branch_id: identity.scope.branch_id().cloned(),
            permissions: identity.permissions,
        }
    }
}

/// Authenticated admin. `profile` is absent for the legacy default admin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSession {
    pub user_id: String,
    pub email: String,
    pub name: String,
    pub profile: Option<Identity>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentSession {
    pub user_id: String,
    pub email: String,
    pub student_id: Option<String>,
}

/// The current user, as held by the session layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    Admin(AdminSession),
    Student(StudentSession),
}

impl Principal {
    pub fn user_id(&self) -> &str {
        match self {
            Principal::Admin(admin) => &admin.user_id,
            Principal::Student(student) => &student.user_id,
        }
    }

    pub fn as_admin(&self) -> Option<&AdminSession> {
        match self {
            Principal::Admin(admin) => Some(admin),
            Principal::Student(_) => None,
        }
    }

    /// Admin profile, if this is a configured admin.
    pub fn admin_profile(&self) -> Option<&Identity> {
        self.as_admin().and_then(|admin| admin.profile.as_ref())
    }
}
