//! HTTP application wiring (axum router + service wiring).
//!
//! Layout:
//! - `services.rs`: long-lived handles (store, directory, token codec)
//! - `routes/`: HTTP routes + handlers (one file per domain area)
//! - `dto.rs`: request DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use freshmart_store::StoreError;

use crate::config::ApiConfig;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub async fn build_app(config: &ApiConfig) -> Result<Router, StoreError> {
    let services = Arc::new(services::AppServices::from_config(config).await?);
    Ok(build_router(services))
}

/// Assemble the router over already-wired services.
///
/// Split out from [`build_app`] so tests can run the real router over an
/// in-memory store.
pub fn build_router(services: Arc<services::AppServices>) -> Router {
    // The storefront is served from another origin; stay permissive, the
    // token is the actual gate.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    routes::router().layer(
        ServiceBuilder::new()
            .layer(cors)
            .layer(Extension(services)),
    )
}
