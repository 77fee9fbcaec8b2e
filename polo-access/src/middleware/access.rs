use service_core::{
    axum::{extract::Request, middleware::Next, response::Response},
    error::AppError,
};

use crate::{
    models::{ModuleKey, Principal},
    services::AccessRequirement,
};

/// Rejects the request unless the principal satisfies `requirement`.
pub async fn require_access(
    requirement: AccessRequirement,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let principal = req.extensions().get::<Principal>();

    if let Err(denied) = requirement.check(principal) {
        tracing::warn!(
            user_id = principal.map(Principal::user_id).unwrap_or("-"),
            path = %req.uri().path(),
            reason = %denied,
            "Access denied"
        );
        return Err(denied.into());
    }

    Ok(next.run(req).await)
}

pub async fn require_module(
    module: ModuleKey,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    require_access(AccessRequirement::module(module), req, next).await
}

pub async fn require_general_access(req: Request, next: Next) -> Result<Response, AppError> {
    require_access(AccessRequirement::admin().general_access(), req, next).await
}
