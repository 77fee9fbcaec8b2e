use serde::Serialize;
use service_core::{axum::Json, error::AppError};

use crate::{
    middleware::CurrentPrincipal,
    models::{Principal, Role},
    services::{allowed_roles_for_creator, plan_account, AccountPlan, NewAccountRequest, ProvisioningError},
};

#[derive(Debug, Serialize)]
pub struct RoleOption {
    pub role: Role,
    pub label: &'static str,
}

/// Roles the caller may assign when creating an account.
pub async fn assignable_roles(
    principal: CurrentPrincipal,
) -> Result<Json<Vec<RoleOption>>, AppError> {
    let creator = principal
        .as_ref()
        .and_then(Principal::admin_profile)
        .ok_or(ProvisioningError::CreatorNotConfigured)?;

    let roles = allowed_roles_for_creator(creator)
        .into_iter()
        .map(|role| RoleOption {
            role,
            label: role.label(),
        })
        .collect();

    Ok(Json(roles))
}

pub async fn plan(
    principal: CurrentPrincipal,
    Json(request): Json<NewAccountRequest>,
) -> Result<Json<AccountPlan>, AppError> {
    let plan = plan_account(principal.as_ref(), &request)?;
    tracing::info!(
        creator = principal.as_ref().map(Principal::user_id).unwrap_or("-"),
        role = %plan.identity.role,
        "Account provisioning plan accepted"
    );
    Ok(Json(plan))
}
