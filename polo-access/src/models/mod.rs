pub mod branch;
pub mod identity;
pub mod module;
pub mod permission;
pub mod role;

pub use branch::{Branch, BranchId};
pub use identity::{
    AccessScope, AdminSession, Identity, IdentityError, IdentityRecord, Principal, ScopeKind,
    StudentSession,
};
pub use module::{ModuleKey, UnknownModule};
pub use permission::{PermissionMode, PermissionRecord};
pub use role::{Role, RoleFamily, LEGACY_ALIASES};
