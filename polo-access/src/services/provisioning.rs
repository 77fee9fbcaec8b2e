//! Account provisioning rules.
//!
//! Decides which roles a creator may hand out and which scope the new account
//! gets. This is the only place an [`Identity`] is built from a role choice.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::models::{AccessScope, BranchId, Identity, PermissionRecord, Principal, Role, ScopeKind};
use crate::services::classification::{resolve_scope_for_role, role_requires_branch};

/// General board members below `admin_geral` who may staff branches.
const GENERAL_MANAGEMENT_ROLES: [Role; 8] = [
    Role::DiretorGeral,
    Role::ViceDiretorGeral,
    Role::CoordenadorGeral,
    Role::ViceCoordenadorGeral,
    Role::PrimeiroSecretarioGeral,
    Role::SegundoSecretarioGeral,
    Role::PrimeiroTesoureiroGeral,
    Role::SegundoTesoureiroGeral,
];

const BRANCH_DIRECTOR_ROLES: [Role; 2] = [Role::DiretorPolo, Role::ViceDiretorPolo];

#[derive(Debug, Error)]
pub enum ProvisioningError {
    #[error("Invalid account request: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Creator has no admin profile")]
    CreatorNotConfigured,

    #[error("Unknown role: {0}")]
    UnknownRole(String),

    #[error("Role {0} cannot be assigned by this creator")]
    RoleNotAllowed(Role),

    #[error("Role {0} requires a branch")]
    MissingBranch(Role),

    #[error("Branch {requested} is outside the creator's branch {own}")]
    BranchOutsideScope { requested: BranchId, own: BranchId },
}

/// Request to provision a new admin account.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewAccountRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email"))]
    pub email: String,
    pub role: String,
    #[serde(default, alias = "polo_id")]
    pub branch_id: Option<BranchId>,
    #[serde(default)]
    pub permissions: Option<PermissionRecord>,
}

/// Outcome of a successful provisioning check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountPlan {
    pub name: String,
    pub email: String,
    pub identity: Identity,
}

/// Roles `creator` may assign, in [`Role::ALL`] order.
pub fn allowed_roles_for_creator(creator: &Identity) -> Vec<Role> {
    match creator.role {
        Role::SuperAdmin | Role::AdminGeral => Role::ALL.to_vec(),
        role if GENERAL_MANAGEMENT_ROLES.contains(&role) || BRANCH_DIRECTOR_ROLES.contains(&role) => {
            branch_roles()
        }
        _ => Vec::new(),
    }
}

fn branch_roles() -> Vec<Role> {
    Role::ALL
        .into_iter()
        .filter(|role| role_requires_branch(*role))
        .collect()
}

/// Check a provisioning request against the creator's authority.
pub fn plan_account(
    creator: Option<&Principal>,
    request: &NewAccountRequest,
) -> Result<AccountPlan, ProvisioningError> {
    request.validate()?;

    let creator = creator
        .and_then(Principal::admin_profile)
        .ok_or(ProvisioningError::CreatorNotConfigured)?;

    let role = Role::parse(&request.role);
    if !role.is_recognized() {
        return Err(ProvisioningError::UnknownRole(request.role.clone()));
    }

    if !allowed_roles_for_creator(creator).contains(&role) {
        tracing::warn!(creator_role = %creator.role, requested_role = %role, "Role not assignable by creator");
        return Err(ProvisioningError::RoleNotAllowed(role));
    }

    let requested_branch = request.branch_id.clone().filter(|id| !id.is_empty());
    let scope = match resolve_scope_for_role(role, creator.branch_id().is_some()) {
        ScopeKind::General => AccessScope::General,
        ScopeKind::BranchSpecific => match (creator.branch_id(), requested_branch) {
            (Some(own), Some(requested)) if *own != requested => {
                return Err(ProvisioningError::BranchOutsideScope {
                    requested,
                    own: own.clone(),
                });
            }
            (Some(own), _) => AccessScope::BranchSpecific(own.clone()),
            (None, Some(requested)) => AccessScope::BranchSpecific(requested),
            (None, None) => return Err(ProvisioningError::MissingBranch(role)),
        },
    };

    let mut identity = Identity::new(role, scope);
    identity.permissions = request.permissions.clone();

    tracing::debug!(
        role = %identity.role,
        scope = identity.scope.as_str(),
        branch_id = ?identity.branch_id(),
        "Account plan resolved"
    );

    Ok(AccountPlan {
        name: request.name.clone(),
        email: request.email.clone(),
        identity,
    })
}
