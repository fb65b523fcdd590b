use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use stockdesk_core::DomainError;
use stockdesk_infra::{CsvError, SessionError};

/// Shown wherever an empty inventory stops a view from rendering.
pub const EMPTY_INVENTORY_MESSAGE: &str = "Please upload a CSV file to view inventory data.";

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::NotFound(what) => {
            json_error(StatusCode::NOT_FOUND, "not_found", format!("{what} not found"))
        }
        DomainError::EmptyInventory => {
            json_error(StatusCode::CONFLICT, "empty_inventory", EMPTY_INVENTORY_MESSAGE)
        }
    }
}

pub fn csv_error_to_response(err: CsvError) -> axum::response::Response {
    match err {
        CsvError::MissingColumn(_) | CsvError::Malformed { .. } => {
            json_error(StatusCode::BAD_REQUEST, "invalid_csv", err.to_string())
        }
        CsvError::Write(msg) => json_error(StatusCode::INTERNAL_SERVER_ERROR, "csv_write_error", msg),
    }
}

pub fn session_error_to_response(err: SessionError) -> axum::response::Response {
    match err {
        SessionError::Unknown(_) => json_error(StatusCode::NOT_FOUND, "unknown_session", err.to_string()),
        SessionError::Poisoned(_) | SessionError::RegistryPoisoned => {
            tracing::error!(error = %err, "session lock poisoned");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "session_poisoned", err.to_string())
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
