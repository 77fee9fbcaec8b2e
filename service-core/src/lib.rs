//! service-core: Shared infrastructure for the polo services.
pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;

pub use async_trait;
pub use axum;
pub use tracing;
