use polo_access::{
    build_router,
    config::AccessConfig,
    serve,
    services::{
        BranchDirectory, Fixtures, HttpBranchDirectory, HttpSessionSource, SessionSource,
    },
    AppState,
};
use service_core::error::AppError;
use service_core::observability::logging::init_tracing;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::Instrument;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let config = AccessConfig::from_env()?;

    init_tracing(&config.service_name, &config.log_level);

    tracing::info!(
        service = %config.service_name,
        version = %config.service_version,
        environment = ?config.environment,
        "Starting polo access service"
    );

    let (sessions, branches): (Arc<dyn SessionSource>, Arc<dyn BranchDirectory>) =
        match &config.fixtures {
            Some(path) => {
                let (sessions, branches) = Fixtures::load(path)?.into_sources();
                tracing::warn!(path = %path, "Serving sessions and branches from fixtures");
                (Arc::new(sessions), Arc::new(branches))
            }
            None => {
                let timeout = config.backend.timeout();
                let sessions = HttpSessionSource::new(&config.backend.url, timeout)
                    .map_err(|e| AppError::ConfigError(anyhow::anyhow!(e)))?;
                let branches = HttpBranchDirectory::new(&config.backend.url, timeout)
                    .map_err(|e| AppError::ConfigError(anyhow::anyhow!(e)))?;
                tracing::info!(backend = %config.backend.url, "Backend clients initialized");
                (Arc::new(sessions), Arc::new(branches))
            }
        };

    let state = AppState {
        config: config.clone(),
        sessions,
        branches,
    };
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));

    let service_span = tracing::info_span!(
        "service",
        service = %config.service_name,
        version = %config.service_version,
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    serve(listener, app, shutdown_signal())
        .instrument(service_span)
        .await?;

    tracing::info!("Service shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received SIGINT, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
