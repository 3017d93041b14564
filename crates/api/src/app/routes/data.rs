//! Pass-through data endpoints (companies, licenses, trademarks).
//!
//! All follow one pattern: read cookie, forward with bearer header, relay
//! status and envelope.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    extract::{Extension, Path, Query},
    http::{HeaderValue, header},
    response::Response,
    routing::get,
};
use axum_extra::extract::cookie::CookieJar;

use ipgate_core::GatewayError;

use crate::app::errors;
use crate::backend::{BackendRequest, CallTimeout};
use crate::context::GatewayState;

type QueryPairs = Query<Vec<(String, String)>>;

pub fn router() -> Router {
    Router::new()
        .route("/companies", get(list_companies))
        .route("/companies/:id", get(get_company))
        .route("/licenses", get(list_licenses))
        .route("/licenses/:id", get(get_license))
        .route("/trademarks", get(list_trademarks))
        .route("/trademarks/:id", get(get_trademark))
        .route("/exports/trademarks", get(export_trademarks))
}

pub async fn list_companies(
    Extension(state): Extension<Arc<GatewayState>>,
    jar: CookieJar,
    Query(query): QueryPairs,
) -> Response {
    forward(&state, &jar, BackendRequest::get("/companies").query(query)).await
}

pub async fn get_company(
    Extension(state): Extension<Arc<GatewayState>>,
    jar: CookieJar,
    Path(id): Path<String>,
) -> Response {
    forward(&state, &jar, BackendRequest::get(item_path("/companies", &id))).await
}

pub async fn list_licenses(
    Extension(state): Extension<Arc<GatewayState>>,
    jar: CookieJar,
    Query(query): QueryPairs,
) -> Response {
    forward(&state, &jar, BackendRequest::get("/licenses").query(query)).await
}

pub async fn get_license(
    Extension(state): Extension<Arc<GatewayState>>,
    jar: CookieJar,
    Path(id): Path<String>,
) -> Response {
    forward(&state, &jar, BackendRequest::get(item_path("/licenses", &id))).await
}

pub async fn list_trademarks(
    Extension(state): Extension<Arc<GatewayState>>,
    jar: CookieJar,
    Query(query): QueryPairs,
) -> Response {
    forward(&state, &jar, BackendRequest::get("/trademarks").query(query)).await
}

pub async fn get_trademark(
    Extension(state): Extension<Arc<GatewayState>>,
    jar: CookieJar,
    Path(id): Path<String>,
) -> Response {
    forward(&state, &jar, BackendRequest::get(item_path("/trademarks", &id))).await
}

/// Bulk export: long timeout, body relayed as bytes (not enveloped).
pub async fn export_trademarks(
    Extension(state): Extension<Arc<GatewayState>>,
    jar: CookieJar,
    Query(query): QueryPairs,
) -> Response {
    let Some(credential) = state.credentials().read(&jar) else {
        return errors::gateway_error(GatewayError::Unauthenticated);
    };

    let request = BackendRequest::get("/trademarks/export")
        .query(query)
        .credential(Some(credential))
        .timeout(CallTimeout::Export);

    let upstream = match state.backend().call(request).await {
        Ok(r) => r,
        Err(err) => return errors::error_response(err),
    };

    let mut response = Response::new(Body::from(upstream.body));
    *response.status_mut() = upstream.status;
    for name in [header::CONTENT_TYPE, header::CONTENT_DISPOSITION] {
        if let Some(value) = upstream.headers.get(&name) {
            response.headers_mut().insert(name, value.clone());
        }
    }
    if !response.headers().contains_key(header::CONTENT_TYPE) {
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/octet-stream"),
        );
    }
    response
}

/// Read cookie, forward with bearer header, relay status and envelope.
async fn forward(state: &GatewayState, jar: &CookieJar, request: BackendRequest) -> Response {
    let Some(credential) = state.credentials().read(jar) else {
        return errors::gateway_error(GatewayError::Unauthenticated);
    };

    let response = match state.backend().call(request.credential(Some(credential))).await {
        Ok(r) => r,
        Err(err) => return errors::error_response(err),
    };

    match response.json() {
        Ok(payload) => errors::success_response(response.status, payload),
        Err(err) => errors::error_response(err),
    }
}

/// `/collection/{id}` with the id percent-encoded as a single path segment.
fn item_path(collection: &str, id: &str) -> String {
    format!("{collection}/{}", urlencoding::encode(id))
}
