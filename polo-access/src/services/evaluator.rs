//! Authorization evaluator.
//!
//! Pure functions over an optional [`Principal`]. Nothing here performs I/O,
//! holds state, or caches a decision: role, scope, branch, and permission
//! record may all change between two calls.
//!
//! Absent or non-admin principals are denied. A present admin with no
//! permission record, or with no profile at all, is granted. Both grants are
//! legacy behavior.

use crate::models::{AccessScope, BranchId, Identity, ModuleKey, PermissionMode, Principal, Role};
use crate::services::classification::is_branch_leadership_role;

/// Roles allowed into `dracmas`, `dracmas_settings` and `financeiro`.
/// Branch secretaries and treasurers are excluded regardless of grants.
pub const FINANCE_ROLES: [Role; 6] = [
    Role::SuperAdmin,
    Role::AdminGeral,
    Role::DiretorGeral,
    Role::CoordenadorGeral,
    Role::PrimeiroSecretarioGeral,
    Role::PrimeiroTesoureiroGeral,
];

/// Roles allowed into the branch registry (`polos`).
pub const BRANCH_REGISTRY_ROLES: [Role; 3] = [Role::DiretorGeral, Role::SuperAdmin, Role::AdminGeral];

/// Roles that see every non-finance, non-registry module.
///
/// Differs from [`ALL_BRANCHES_ROLES`]: module visibility and
/// cross-branch visibility are maintained separately.
pub const UNRESTRICTED_MODULE_ROLES: [Role; 5] = [
    Role::SuperAdmin,
    Role::AdminGeral,
    Role::CoordenadorGeral,
    Role::DiretorGeral,
    Role::PrimeiroSecretarioGeral,
];

/// Roles that, with general scope, act on every branch.
///
/// Legacy `secretario`/`tesoureiro` resolve to the first branch secretary and
/// treasurer. `super_admin` and `admin_geral` are not listed; see
/// [`UNRESTRICTED_MODULE_ROLES`] for the module-side list.
pub const ALL_BRANCHES_ROLES: [Role; 4] = [
    Role::CoordenadorGeral,
    Role::DiretorGeral,
    Role::PrimeiroSecretarioPolo,
    Role::PrimeiroTesoureiroPolo,
];

/// Whether the principal may open `module`.
///
/// Rules are checked in order; the first that applies decides.
pub fn can_access_module(principal: Option<&Principal>, module: ModuleKey) -> bool {
    let Some(identity) = principal.and_then(Principal::admin_profile) else {
        return false;
    };

    let allowed = module_decision(identity, module);
    tracing::trace!(
        role = %identity.role,
        module = %module,
        allowed,
        "Module access evaluated"
    );
    allowed
}

fn module_decision(identity: &Identity, module: ModuleKey) -> bool {
    let role = identity.role;

    if module.is_finance() {
        return FINANCE_ROLES.contains(&role);
    }

    if module == ModuleKey::Polos {
        return BRANCH_REGISTRY_ROLES.contains(&role);
    }

    if UNRESTRICTED_MODULE_ROLES.contains(&role) {
        return true;
    }

    // Branch confinement is enforced by `has_access_to_branch`.
    if is_branch_leadership_role(role) {
        return true;
    }

    let Some(permissions) = identity.permissions.as_ref() else {
        return true;
    };

    if permissions.mode == PermissionMode::Full {
        return true;
    }

    if permissions.grants(module) {
        return true;
    }

    // Pre-enrollments ride on the enrollments grant.
    module == ModuleKey::PreEnrollments && permissions.grants(ModuleKey::Enrollments)
}

/// Whether the principal acts on every branch.
pub fn has_access_to_all_branches(principal: Option<&Principal>) -> bool {
    let Some(admin) = principal.and_then(Principal::as_admin) else {
        return false;
    };

    let Some(identity) = admin.profile.as_ref() else {
        tracing::trace!(user_id = %admin.user_id, "Bare admin granted all branches");
        return true;
    };

    identity.scope.is_general() && ALL_BRANCHES_ROLES.contains(&identity.role)
}

/// Whether the principal may act on `branch_id`.
pub fn has_access_to_branch(principal: Option<&Principal>, branch_id: &BranchId) -> bool {
    if has_access_to_all_branches(principal) {
        return true;
    }

    let allowed = match principal.and_then(Principal::admin_profile) {
        Some(identity) => identity.branch_id() == Some(branch_id),
        None => false,
    };
    tracing::trace!(branch_id = %branch_id, allowed, "Branch access evaluated");
    allowed
}

/// Branch ids the principal may act on, out of `all_branches`.
pub fn allowed_branch_ids(principal: Option<&Principal>, all_branches: &[BranchId]) -> Vec<BranchId> {
    if has_access_to_all_branches(principal) {
        return all_branches.to_vec();
    }

    principal
        .and_then(Principal::admin_profile)
        .and_then(Identity::branch_id)
        .map(|id| vec![id.clone()])
        .unwrap_or_default()
}

/// Every module the principal may open, in [`ModuleKey::ALL`] order.
pub fn visible_modules(principal: Option<&Principal>) -> Vec<ModuleKey> {
    ModuleKey::ALL
        .into_iter()
        .filter(|module| can_access_module(principal, *module))
        .collect()
}

/// Whether any module of the settings section is accessible.
pub fn settings_section_visible(principal: Option<&Principal>) -> bool {
    ModuleKey::SETTINGS_GROUP
        .into_iter()
        .any(|module| can_access_module(principal, module))
}

/// Effective access scope; a bare admin counts as general.
pub fn access_level(principal: Option<&Principal>) -> Option<AccessScope> {
    let admin = principal.and_then(Principal::as_admin)?;
    Some(
        admin
            .profile
            .as_ref()
            .map(|identity| identity.scope.clone())
            .unwrap_or(AccessScope::General),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AdminSession, PermissionRecord, StudentSession};

    fn admin(identity: Option<Identity>) -> Principal {
        Principal::Admin(AdminSession {
            user_id: "u-1".to_string(),
            email: "admin@polo.org".to_string(),
            name: "Admin".to_string(),
            profile: identity,
        })
    }

    fn general(role: Role) -> Principal {
        admin(Some(Identity::new(role, AccessScope::General)))
    }

    fn branch(role: Role, id: &str) -> Principal {
        admin(Some(Identity::new(role, AccessScope::branch(id).unwrap())))
    }

    fn student() -> Principal {
        Principal::Student(StudentSession {
            user_id: "s-1".to_string(),
            email: "aluno@polo.org".to_string(),
            student_id: None,
        })
    }

    #[test]
    fn test_absent_principal_is_denied_everything() {
        for module in ModuleKey::ALL {
            assert!(!can_access_module(None, module));
        }
        assert!(!has_access_to_all_branches(None));
        assert!(!has_access_to_branch(None, &"B1".into()));
        assert!(allowed_branch_ids(None, &["B1".into()]).is_empty());
        assert!(access_level(None).is_none());
    }

    #[test]
    fn test_student_is_denied_everything() {
        let p = student();
        assert!(visible_modules(Some(&p)).is_empty());
        assert!(!has_access_to_all_branches(Some(&p)));
        assert!(allowed_branch_ids(Some(&p), &["B1".into()]).is_empty());
    }

    #[test]
    fn test_bare_admin_has_branches_but_no_modules() {
        let p = admin(None);
        assert!(has_access_to_all_branches(Some(&p)));
        assert!(has_access_to_branch(Some(&p), &"anything".into()));
        assert!(!can_access_module(Some(&p), ModuleKey::Students));
        assert_eq!(access_level(Some(&p)), Some(AccessScope::General));
    }

    #[test]
    fn test_finance_gate_ignores_full_permissions() {
        let identity = Identity::new(Role::PrimeiroTesoureiroPolo, AccessScope::branch("B1").unwrap())
            .with_permissions(PermissionRecord::full());
        let p = admin(Some(identity));

        assert!(!can_access_module(Some(&p), ModuleKey::Financeiro));
        assert!(!can_access_module(Some(&p), ModuleKey::Dracmas));
        assert!(can_access_module(Some(&p), ModuleKey::Students));
    }

    #[test]
    fn test_general_treasurer_gets_finance_but_not_unrestricted() {
        let identity = Identity::new(Role::PrimeiroTesoureiroGeral, AccessScope::General)
            .with_permissions(PermissionRecord::limited([]));
        let p = admin(Some(identity));

        assert!(can_access_module(Some(&p), ModuleKey::Financeiro));
        assert!(!can_access_module(Some(&p), ModuleKey::Students));
    }

    #[test]
    fn test_registry_gate() {
        assert!(can_access_module(Some(&general(Role::DiretorGeral)), ModuleKey::Polos));
        assert!(can_access_module(Some(&general(Role::AdminGeral)), ModuleKey::Polos));
        assert!(!can_access_module(Some(&general(Role::CoordenadorGeral)), ModuleKey::Polos));
        assert!(!can_access_module(Some(&branch(Role::DiretorPolo, "B1")), ModuleKey::Polos));
    }

    #[test]
    fn test_missing_permission_record_is_open() {
        let p = branch(Role::Professor, "B1");
        assert!(can_access_module(Some(&p), ModuleKey::Attendance));
        assert!(can_access_module(Some(&p), ModuleKey::Backup));
    }

    #[test]
    fn test_unrecognized_role_routes_to_permission_record() {
        let identity = Identity::new(Role::Unrecognized, AccessScope::General)
            .with_permissions(PermissionRecord::limited([ModuleKey::Reports]));
        let p = admin(Some(identity));

        assert!(can_access_module(Some(&p), ModuleKey::Reports));
        assert!(!can_access_module(Some(&p), ModuleKey::Students));
        assert!(!has_access_to_all_branches(Some(&p)));
    }

    #[test]
    fn test_settings_section_visibility() {
        let identity = Identity::new(Role::Auxiliar, AccessScope::branch("B1").unwrap())
            .with_permissions(PermissionRecord::limited([ModuleKey::Backup]));
        assert!(settings_section_visible(Some(&admin(Some(identity)))));

        let identity = Identity::new(Role::Auxiliar, AccessScope::branch("B1").unwrap())
            .with_permissions(PermissionRecord::limited([ModuleKey::Students]));
        assert!(!settings_section_visible(Some(&admin(Some(identity)))));
    }

    #[test]
    fn test_visible_modules_for_director_general() {
        let modules = visible_modules(Some(&general(Role::DiretorGeral)));
        assert_eq!(modules, ModuleKey::ALL.to_vec());
    }

    #[test]
    fn test_branch_scope_with_general_only_role_is_confined() {
        let p = branch(Role::DiretorGeral, "B3");
        assert!(!has_access_to_all_branches(Some(&p)));
        assert!(has_access_to_branch(Some(&p), &"B3".into()));
        assert!(!has_access_to_branch(Some(&p), &"B4".into()));
    }
}
