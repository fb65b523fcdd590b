use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::Utc;

use stockdesk_core::DomainError;

use crate::app::{dto, errors};
use crate::context::SessionContext;

pub fn router() -> Router {
    Router::new().route("/", get(get_transcript).post(send_message))
}

pub async fn send_message(
    Extension(session): Extension<SessionContext>,
    Json(body): Json<dto::ChatRequest>,
) -> axum::response::Response {
    if body.message.trim().is_empty() {
        return errors::domain_error_to_response(DomainError::validation("message cannot be empty"));
    }

    match session.with(|s| s.chat(&body.message, Utc::now())) {
        Ok(reply) => (StatusCode::OK, Json(reply)).into_response(),
        Err(e) => errors::session_error_to_response(e),
    }
}

pub async fn get_transcript(Extension(session): Extension<SessionContext>) -> axum::response::Response {
    match session.with(|s| s.transcript().clone()) {
        Ok(transcript) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "count": transcript.len(),
                "messages": transcript,
            })),
        )
            .into_response(),
        Err(e) => errors::session_error_to_response(e),
    }
}
