//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: shared state (the session registry)
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request DTOs
//! - `errors.rs`: consistent error responses
//! - `sweeper.rs`: idle session eviction

use std::sync::Arc;

use axum::{Extension, Router, extract::DefaultBodyLimit, routing::{get, post}};
use tower::ServiceBuilder;

use stockdesk_infra::AppConfig;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;
pub mod sweeper;

/// Build the full HTTP router over a fresh in-memory session registry.
pub fn build_app(config: &AppConfig) -> Router {
    build_app_with(Arc::new(services::AppServices::in_memory()), config)
}

/// Build the full HTTP router over `services` (public entrypoint used by `main.rs`).
pub fn build_app_with(services: Arc<services::AppServices>, config: &AppConfig) -> Router {
    let session_state = middleware::SessionState {
        sessions: services.sessions(),
    };

    // Session routes: require a known session id.
    let scoped = routes::router()
        .layer(Extension(services.clone()))
        .layer(axum::middleware::from_fn_with_state(
            session_state,
            middleware::session_middleware,
        ));

    Router::new()
        .route("/health", get(routes::system::health))
        .route("/sessions", post(routes::session::open_session))
        .layer(Extension(services))
        .merge(scoped)
        .layer(
            ServiceBuilder::new().layer(DefaultBodyLimit::max(config.max_upload_bytes)),
        )
}
