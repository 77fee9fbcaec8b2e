//! Route guard requirements.
//!
//! An [`AccessRequirement`] bundles the checks a protected route needs and
//! reports the first one that fails.

use serde::Serialize;
use thiserror::Error;

use crate::models::{BranchId, ModuleKey, Principal, Role};
use crate::services::evaluator::{can_access_module, has_access_to_all_branches, has_access_to_branch};

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum AccessDenied {
    #[error("No active session")]
    Unauthenticated,

    #[error("Administrator access required")]
    NotAdmin,

    #[error("General coordination or direction access required")]
    GeneralAccessRequired,

    #[error("No access to branch {branch_id}")]
    BranchDenied { branch_id: BranchId },

    #[error("Role {role} is not allowed here")]
    RoleNotAllowed { role: Role },

    #[error("No access to module {module}")]
    ModuleDenied { module: ModuleKey },
}

/// What a route demands of the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessRequirement {
    pub module: Option<ModuleKey>,
    pub requires_general_access: bool,
    pub branch: Option<BranchId>,
    pub allowed_roles: Option<Vec<Role>>,
}

impl AccessRequirement {
    /// Any admin principal passes.
    pub fn admin() -> Self {
        Self::default()
    }

    pub fn module(module: ModuleKey) -> Self {
        Self {
            module: Some(module),
            ..Self::default()
        }
    }

    pub fn general_access(mut self) -> Self {
        self.requires_general_access = true;
        self
    }

    pub fn branch(mut self, branch_id: impl Into<BranchId>) -> Self {
        self.branch = Some(branch_id.into());
        self
    }

    pub fn roles(mut self, roles: impl IntoIterator<Item = Role>) -> Self {
        self.allowed_roles = Some(roles.into_iter().collect());
        self
    }

    /// Checks run in a fixed order: admin, general access, branch, role,
    /// module.
    pub fn check(&self, principal: Option<&Principal>) -> Result<(), AccessDenied> {
        let Some(current) = principal else {
            return Err(AccessDenied::Unauthenticated);
        };
        let Some(admin) = current.as_admin() else {
            return Err(AccessDenied::NotAdmin);
        };

        if self.requires_general_access && !has_access_to_all_branches(principal) {
            return Err(AccessDenied::GeneralAccessRequired);
        }

        if let Some(branch_id) = &self.branch {
            if !has_access_to_branch(principal, branch_id) {
                return Err(AccessDenied::BranchDenied {
                    branch_id: branch_id.clone(),
                });
            }
        }

        // Bare admins carry no role and skip the role list.
        if let (Some(roles), Some(identity)) = (&self.allowed_roles, admin.profile.as_ref()) {
            if !roles.contains(&identity.role) {
                return Err(AccessDenied::RoleNotAllowed {
                    role: identity.role,
                });
            }
        }

        if let Some(module) = self.module {
            if !can_access_module(principal, module) {
                return Err(AccessDenied::ModuleDenied { module });
            }
        }

        Ok(())
    }
}
