use axum::{Router, routing::get};

pub mod chat;
pub mod dashboard;
pub mod inventory;
pub mod session;
pub mod system;

/// Router for all session-scoped endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/session", get(session::get_session).delete(session::close_session))
        .nest("/inventory", inventory::router())
        .nest("/dashboard", dashboard::router())
        .nest("/chat", chat::router())
}
