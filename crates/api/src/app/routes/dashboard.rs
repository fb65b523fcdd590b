use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use stockdesk_core::DomainResult;
use stockdesk_infra::Session;
use stockdesk_inventory::{InventoryStore, category_counts, executive_summary, snapshot};

use crate::app::errors;
use crate::context::SessionContext;

pub fn router() -> Router {
    Router::new()
        .route("/snapshot", get(get_snapshot))
        .route("/categories", get(get_category_counts))
        .route("/summary", get(get_summary))
}

/// Render one read-only dashboard view of the session inventory.
fn view<T: Serialize>(
    session: &SessionContext,
    build: impl FnOnce(&InventoryStore) -> DomainResult<T>,
) -> axum::response::Response {
    match session.with(|s: &mut Session| build(s.store())) {
        Ok(Ok(view)) => (StatusCode::OK, Json(view)).into_response(),
        Ok(Err(e)) => errors::domain_error_to_response(e),
        Err(e) => errors::session_error_to_response(e),
    }
}

pub async fn get_snapshot(Extension(session): Extension<SessionContext>) -> axum::response::Response {
    view(&session, snapshot)
}

pub async fn get_category_counts(
    Extension(session): Extension<SessionContext>,
) -> axum::response::Response {
    view(&session, category_counts)
}

pub async fn get_summary(Extension(session): Extension<SessionContext>) -> axum::response::Response {
    view(&session, executive_summary)
}
