// Handlers module
// HTTP handlers for the phrase practice API

pub mod phrases;

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

/// Root handler
/// GET /
/// Static greeting payload; never touches the store.
pub async fn read_root() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "message": "Japanese speaking practice API - phrases by lesson category"
        })),
    )
}

/// Health check handler
/// Returns "OK" with 200 status for monitoring purposes
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
