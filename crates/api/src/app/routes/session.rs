use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use crate::app::errors;
use crate::app::services::AppServices;
use crate::context::SessionContext;

pub async fn open_session(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    let handle = match services.sessions().create() {
        Ok(handle) => handle,
        Err(e) => return errors::session_error_to_response(e),
    };
    let (session_id, created_at) = match handle.lock() {
        Ok(s) => (s.id(), s.created_at()),
        Err(_) => {
            return errors::json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "session_poisoned",
                "new session is unusable",
            );
        }
    };

    (
        StatusCode::CREATED,
        Json(serde_json::json!({
            "session_id": session_id.to_string(),
            "created_at": created_at,
        })),
    )
        .into_response()
}

pub async fn get_session(Extension(session): Extension<SessionContext>) -> axum::response::Response {
    let info = session.with(|s| {
        serde_json::json!({
            "session_id": s.id().to_string(),
            "created_at": s.created_at(),
            "csv_loaded": s.csv_loaded(),
            "item_count": s.store().len(),
            "chat_messages": s.transcript().len(),
        })
    });

    match info {
        Ok(info) => (StatusCode::OK, Json(info)).into_response(),
        Err(e) => errors::session_error_to_response(e),
    }
}

pub async fn close_session(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
) -> axum::response::Response {
    if services.sessions().remove(session.session_id()) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        errors::json_error(StatusCode::NOT_FOUND, "unknown_session", "session already closed")
    }
}
