//! Static role classification. Looks at the role only, never at scope or
//! permission records.

use crate::models::{Role, RoleFamily, ScopeKind};

/// Branch directors and coordinators, including the vice/second seats.
pub const BRANCH_LEADERSHIP_ROLES: [Role; 4] = [
    Role::DiretorPolo,
    Role::ViceDiretorPolo,
    Role::CoordenadorPolo,
    Role::ViceCoordenadorPolo,
];

/// Organization-wide roles, `super_admin` and `admin_geral` included.
pub fn is_general_role(role: Role) -> bool {
    role.family() == RoleFamily::General
}

/// Branch directors and coordinators. Secretaries, treasurers and
/// instructional staff are excluded.
pub fn is_branch_leadership_role(role: Role) -> bool {
    BRANCH_LEADERSHIP_ROLES.contains(&role)
}

/// Any branch-bound role, leadership or instructional.
pub fn role_requires_branch(role: Role) -> bool {
    matches!(
        role.family(),
        RoleFamily::BranchOfficer | RoleFamily::Instructional
    )
}

/// Scope a newly provisioned account receives.
///
/// A branch-scoped creator can only ever mint branch-scoped accounts.
pub fn resolve_scope_for_role(role: Role, creator_is_branch_scoped: bool) -> ScopeKind {
    if creator_is_branch_scoped {
        return ScopeKind::BranchSpecific;
    }
    if is_general_role(role) {
        ScopeKind::General
    } else {
        ScopeKind::BranchSpecific
    }
}
