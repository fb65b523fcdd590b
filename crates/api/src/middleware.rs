use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};

use stockdesk_core::SessionId;
use stockdesk_infra::{SessionError, SessionStore};

use crate::app::errors;
use crate::context::SessionContext;

/// Header carrying the session id returned by `POST /sessions`.
pub const SESSION_HEADER: &str = "x-session-id";

#[derive(Clone)]
pub struct SessionState {
    pub sessions: Arc<dyn SessionStore>,
}

pub async fn session_middleware(
    State(state): State<SessionState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, Response> {
    let session_id = extract_session_id(req.headers())?;

    let handle = state
        .sessions
        .get(session_id)
        .ok_or_else(|| errors::session_error_to_response(SessionError::Unknown(session_id)))?;

    req.extensions_mut()
        .insert(SessionContext::new(session_id, handle));

    Ok(next.run(req).await)
}

fn extract_session_id(headers: &HeaderMap) -> Result<SessionId, Response> {
    let missing = || {
        errors::json_error(
            StatusCode::BAD_REQUEST,
            "missing_session",
            format!("{SESSION_HEADER} header is required"),
        )
    };

    let header = headers.get(SESSION_HEADER).ok_or_else(missing)?;
    let header = header.to_str().map_err(|_| missing())?.trim();
    if header.is_empty() {
        return Err(missing());
    }

    header
        .parse::<SessionId>()
        .map_err(|e| errors::json_error(StatusCode::BAD_REQUEST, "invalid_session", e.to_string()))
}
