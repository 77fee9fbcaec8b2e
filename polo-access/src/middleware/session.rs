use service_core::{
    axum::{
        async_trait,
        extract::{FromRequestParts, Request, State},
        http::{header, request::Parts},
        middleware::Next,
        response::Response,
    },
    error::AppError,
};
use std::convert::Infallible;

use crate::{
    models::Principal,
    services::principal_from_payload,
    AppState,
};

/// Resolves the bearer token and stores the [`Principal`] in request
/// extensions. Requests without a live session pass through untouched; the
/// access guards decide what that means.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string);

    if let Some(token) = token {
        match state.sessions.resolve(&token).await? {
            Some(payload) => {
                let principal = principal_from_payload(payload);
                tracing::debug!(user_id = %principal.user_id(), "Session resolved");
                req.extensions_mut().insert(principal);
            }
            None => tracing::debug!("Bearer token does not name a live session"),
        }
    }

    Ok(next.run(req).await)
}

/// The caller's principal, if the session middleware found one.
pub struct CurrentPrincipal(pub Option<Principal>);

impl CurrentPrincipal {
    pub fn as_ref(&self) -> Option<&Principal> {
        self.0.as_ref()
    }

    /// Any principal at all, admin or student.
    pub fn required(&self) -> Result<&Principal, AppError> {
        self.0
            .as_ref()
            .ok_or_else(|| AppError::Unauthorized(anyhow::anyhow!("Missing or invalid session")))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentPrincipal
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(CurrentPrincipal(parts.extensions.get::<Principal>().cloned()))
    }
}
