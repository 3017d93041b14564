use axum::{Json, response::IntoResponse, response::Response};

use ipgate_core::NormalizedError;

use crate::app::errors;

/// Liveness only; does not touch the backend.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "success": true, "status": "ok" }))
}

/// Unknown path inside the gateway namespace.
pub async fn not_found() -> Response {
    errors::error_response(NormalizedError::new(404, "no such gateway endpoint"))
}
