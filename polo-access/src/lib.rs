pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

use service_core::axum::{
    extract::Request,
    middleware::{from_fn, from_fn_with_state, Next},
    routing::{get, post},
    Router,
};
use service_core::middleware::request_id_middleware;
use service_core::error::AppError;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::AccessConfig;
use crate::models::ModuleKey;
use crate::services::{AccessRequirement, BranchDirectory, SessionSource};

#[derive(Clone)]
pub struct AppState {
    pub config: AccessConfig,
    pub sessions: Arc<dyn SessionSource>,
    pub branches: Arc<dyn BranchDirectory>,
}

pub fn build_router(state: AppState) -> Router {
    let branch_routes = Router::new()
        .route("/branches", get(handlers::branches::list_branches))
        .route("/branches/:branch_id", get(handlers::branches::get_branch))
        .layer(from_fn(|req: Request, next: Next| {
            middleware::require_access(AccessRequirement::admin(), req, next)
        }));

    let provisioning_routes = Router::new()
        .route(
            "/provisioning/roles",
            get(handlers::provisioning::assignable_roles),
        )
        .route("/provisioning/plan", post(handlers::provisioning::plan))
        .layer(from_fn(|req: Request, next: Next| {
            middleware::require_module(ModuleKey::ManageUsers, req, next)
        }));

    Router::new()
        .route("/access/me", get(handlers::access::me))
        .route("/access/modules/:module", get(handlers::access::check_module))
        .merge(branch_routes)
        .merge(provisioning_routes)
        .layer(from_fn_with_state(
            state.clone(),
            middleware::session_middleware,
        ))
        .route("/health", get(handlers::health_check))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(from_fn(request_id_middleware))
}

/// Serves `app` on `listener` until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    app: Router,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), AppError> {
    tracing::info!(address = ?listener.local_addr().ok(), "Listening");

    service_core::axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
