use service_core::{
    axum::{
        extract::{Path, State},
        Json,
    },
    error::AppError,
};

use crate::{
    middleware::CurrentPrincipal,
    models::{Branch, BranchId},
    services::{filter_branches, AccessRequirement},
    AppState,
};

/// Branches visible to the caller, in directory order.
pub async fn list_branches(
    State(state): State<AppState>,
    principal: CurrentPrincipal,
) -> Result<Json<Vec<Branch>>, AppError> {
    let all = state.branches.list().await?;
    let visible = filter_branches(principal.as_ref(), &all);

    tracing::debug!(total = all.len(), visible = visible.len(), "Branch list filtered");
    Ok(Json(visible))
}

pub async fn get_branch(
    State(state): State<AppState>,
    principal: CurrentPrincipal,
    Path(branch_id): Path<String>,
) -> Result<Json<Branch>, AppError> {
    let branch_id = BranchId::new(branch_id);
    AccessRequirement::admin()
        .branch(branch_id.clone())
        .check(principal.as_ref())?;

    state
        .branches
        .list()
        .await?
        .into_iter()
        .find(|branch| branch.id == branch_id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Branch {} not found", branch_id)))
}
