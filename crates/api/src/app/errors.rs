use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::Value;

use ipgate_core::{Envelope, GatewayError, NormalizedError};

/// Render a normalized failure; the HTTP status mirrors `err.status`.
pub fn error_response(err: NormalizedError) -> Response {
    let status = StatusCode::from_u16(err.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(err)).into_response()
}

pub fn gateway_error(err: GatewayError) -> Response {
    error_response(err.into())
}

/// `{ success: true, ...payload }` with the given status.
pub fn success_response(status: StatusCode, payload: Value) -> Response {
    (status, Json(Envelope::success(payload))).into_response()
}
