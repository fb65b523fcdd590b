use axum::{
    body::Bytes,
    extract::{Extension, Query},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};

use stockdesk_inventory::{Category, NewItem};

use crate::app::{dto, errors};
use crate::context::SessionContext;

pub fn router() -> Router {
    Router::new()
        .route("/csv", put(upload_csv).get(download_csv))
        .route("/items", get(list_items).post(add_item).delete(remove_item))
        .route("/items/quantity", put(update_quantity))
        .route("/options", get(form_options))
}

pub async fn upload_csv(
    Extension(session): Extension<SessionContext>,
    body: Bytes,
) -> axum::response::Response {
    let result = session.with(|s| s.import_csv(&body));

    match result {
        Ok(Ok(report)) => (StatusCode::OK, Json(report)).into_response(),
        Ok(Err(e)) => {
            tracing::warn!(session_id = %session.session_id(), error = %e, "CSV upload rejected");
            errors::csv_error_to_response(e)
        }
        Err(e) => errors::session_error_to_response(e),
    }
}

pub async fn download_csv(Extension(session): Extension<SessionContext>) -> axum::response::Response {
    let result = session.with(|s| {
        if s.store().is_empty() {
            return None;
        }
        Some(s.export_csv())
    });

    match result {
        Ok(Some(Ok(csv))) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"updated_inventory.csv\"",
                ),
            ],
            csv,
        )
            .into_response(),
        Ok(Some(Err(e))) => errors::csv_error_to_response(e),
        Ok(None) => errors::json_error(
            StatusCode::CONFLICT,
            "empty_inventory",
            "No inventory data available to download.",
        ),
        Err(e) => errors::session_error_to_response(e),
    }
}

pub async fn list_items(
    Extension(session): Extension<SessionContext>,
    Query(query): Query<dto::ItemsQuery>,
) -> axum::response::Response {
    let result = session.with(|s| {
        let store = s.store();
        let items: Vec<_> = match &query.category {
            Some(category) => store
                .in_category(&Category::new(category.as_str()))
                .into_iter()
                .cloned()
                .collect(),
            None => store.query().to_vec(),
        };
        serde_json::json!({
            "count": items.len(),
            "items": items,
        })
    });

    match result {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(e) => errors::session_error_to_response(e),
    }
}

pub async fn add_item(
    Extension(session): Extension<SessionContext>,
    Json(body): Json<dto::AddItemRequest>,
) -> axum::response::Response {
    let item = NewItem::from(body);
    if let Err(e) = item.validate_form() {
        return errors::domain_error_to_response(e);
    }

    match session.with(|s| s.store_mut().add(item)) {
        Ok(item) => {
            tracing::info!(session_id = %session.session_id(), item_id = %item.id, "item added");
            (StatusCode::CREATED, Json(item)).into_response()
        }
        Err(e) => errors::session_error_to_response(e),
    }
}

pub async fn update_quantity(
    Extension(session): Extension<SessionContext>,
    Json(body): Json<dto::UpdateQuantityRequest>,
) -> axum::response::Response {
    let result = session.with(|s| s.store_mut().update_quantity(&body.item_name, body.quantity));

    match result {
        Ok(Ok(updated)) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "item_name": body.item_name,
                "quantity_in_stock": body.quantity,
                "rows_updated": updated,
            })),
        )
            .into_response(),
        Ok(Err(e)) => errors::domain_error_to_response(e),
        Err(e) => errors::session_error_to_response(e),
    }
}

pub async fn remove_item(
    Extension(session): Extension<SessionContext>,
    Json(body): Json<dto::RemoveItemRequest>,
) -> axum::response::Response {
    let result = session.with(|s| s.store_mut().remove(&body.item_name));

    match result {
        Ok(Ok(removed)) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "item_name": body.item_name,
                "rows_removed": removed,
            })),
        )
            .into_response(),
        Ok(Err(e)) => errors::domain_error_to_response(e),
        Err(e) => errors::session_error_to_response(e),
    }
}

/// Choices for the add / update / remove forms.
pub async fn form_options(Extension(session): Extension<SessionContext>) -> axum::response::Response {
    let result = session.with(|s| {
        let store = s.store();
        serde_json::json!({
            "form_categories": Category::FORM_CHOICES,
            "categories": store.categories(),
            "item_names": store.names(),
            "next_item_id": store.next_id(),
        })
    });

    match result {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(e) => errors::session_error_to_response(e),
    }
}
