use serde::Serialize;
use service_core::{
    axum::{
        extract::{Path, State},
        Json,
    },
    error::AppError,
};

use crate::{
    middleware::CurrentPrincipal,
    models::{BranchId, ModuleKey, Principal, Role, ScopeKind},
    services::{
        access_level, allowed_branch_ids, can_access_module, has_access_to_all_branches,
        settings_section_visible, visible_modules,
    },
    AppState,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrincipalKind {
    Admin,
    Student,
}

#[derive(Debug, Serialize)]
pub struct AccessSummary {
    pub user_id: String,
    pub kind: PrincipalKind,
    pub role: Option<Role>,
    pub role_label: Option<&'static str>,
    pub scope: Option<ScopeKind>,
    pub branch_id: Option<BranchId>,
    pub visible_modules: Vec<ModuleKey>,
    pub settings_section_visible: bool,
    pub all_branches: bool,
    pub allowed_branch_ids: Vec<BranchId>,
}

#[derive(Debug, Serialize)]
pub struct ModuleAccess {
    pub module: ModuleKey,
    pub label: &'static str,
    pub allowed: bool,
}

/// Everything the navigation shell needs to render for the caller.
pub async fn me(
    State(state): State<AppState>,
    principal: CurrentPrincipal,
) -> Result<Json<AccessSummary>, AppError> {
    let caller = principal.required()?;
    let principal = Some(caller);

    let profile = caller.admin_profile();
    let level = access_level(principal);

    let allowed = if caller.as_admin().is_some() {
        let branch_ids: Vec<BranchId> = state
            .branches
            .list()
            .await?
            .into_iter()
            .map(|branch| branch.id)
            .collect();
        allowed_branch_ids(principal, &branch_ids)
    } else {
        Vec::new()
    };

    Ok(Json(AccessSummary {
        user_id: caller.user_id().to_string(),
        kind: match caller {
            Principal::Admin(_) => PrincipalKind::Admin,
            Principal::Student(_) => PrincipalKind::Student,
        },
        role: profile.map(|identity| identity.role),
        role_label: profile.map(|identity| identity.role.label()),
        scope: level.as_ref().map(|scope| scope.kind()),
        branch_id: level.as_ref().and_then(|scope| scope.branch_id().cloned()),
        visible_modules: visible_modules(principal),
        settings_section_visible: settings_section_visible(principal),
        all_branches: has_access_to_all_branches(principal),
        allowed_branch_ids: allowed,
    }))
}

pub async fn check_module(
    principal: CurrentPrincipal,
    Path(module): Path<String>,
) -> Result<Json<ModuleAccess>, AppError> {
    let module = module
        .parse::<ModuleKey>()
        .map_err(|e| AppError::NotFound(anyhow::anyhow!(e)))?;
    let caller = principal.required()?;

    Ok(Json(ModuleAccess {
        module,
        label: module.label(),
        allowed: can_access_module(Some(caller), module),
    }))
}
