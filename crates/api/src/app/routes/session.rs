//! Session Endpoints: login, logout, identity lookup.
//!
//! Each call is independent; the only state is the `token` cookie.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use axum_extra::extract::cookie::CookieJar;

use ipgate_auth::LoginCredentials;
use ipgate_core::{Envelope, GatewayError, Identity, NormalizedError, TokenGrant};

use crate::app::{dto, errors};
use crate::backend::BackendRequest;
use crate::context::GatewayState;

const BACKEND_LOGIN: &str = "/auth/login";
const BACKEND_LOGOUT: &str = "/auth/logout";
const BACKEND_ME: &str = "/auth/me";

pub fn router() -> Router {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me))
}

pub async fn login(
    Extension(state): Extension<Arc<GatewayState>>,
    jar: CookieJar,
    body: Result<Json<dto::LoginRequest>, JsonRejection>,
) -> Response {
    let Ok(Json(body)) = body else {
        return errors::gateway_error(GatewayError::validation(
            "request body must be JSON with username and password",
        ));
    };

    let creds = match LoginCredentials::parse(&body.username, &body.password) {
        Ok(c) => c,
        Err(e) => return errors::gateway_error(e.into()),
    };

    let request = BackendRequest::post(BACKEND_LOGIN).json(creds.to_backend_body());
    let response = match state.backend().call(request).await {
        Ok(r) => r,
        Err(err) => {
            tracing::info!(username = creds.username(), status = err.status, "login rejected");
            return errors::error_response(err);
        }
    };

    let payload = match response.json() {
        Ok(p) => p,
        Err(err) => return errors::error_response(err),
    };

    let Some(credential) = TokenGrant::from_payload(&payload).credential() else {
        tracing::warn!(
            username = creds.username(),
            "backend accepted login but issued no access token"
        );
        return errors::error_response(NormalizedError::new(
            StatusCode::UNAUTHORIZED.as_u16(),
            "login failed: no access token issued",
        ));
    };

    tracing::info!(username = creds.username(), "login succeeded");
    let jar = jar.add(state.credentials().issue(&credential));
    (jar, errors::success_response(StatusCode::OK, payload)).into_response()
}

/// Fail-open on the backend: the cookie is revoked whatever the backend says.
pub async fn logout(Extension(state): Extension<Arc<GatewayState>>, jar: CookieJar) -> Response {
    if let Some(credential) = state.credentials().read(&jar) {
        let request = BackendRequest::post(BACKEND_LOGOUT).credential(Some(credential));
        if let Err(err) = state.backend().call(request).await {
            tracing::warn!(
                status = err.status,
                error = %err.message,
                "backend logout failed; revoking cookie anyway"
            );
        }
    }

    let jar = jar.add(state.credentials().revoke());
    (jar, Json(Envelope::message("logged out"))).into_response()
}

pub async fn me(Extension(state): Extension<Arc<GatewayState>>, jar: CookieJar) -> Response {
    let Some(credential) = state.credentials().read(&jar) else {
        return errors::gateway_error(GatewayError::Unauthenticated);
    };

    let request = BackendRequest::get(BACKEND_ME).credential(Some(credential));
    let response = match state.backend().call(request).await {
        Ok(r) => r,
        Err(err) => return errors::error_response(err),
    };

    let payload = match response.json() {
        Ok(payload) if payload.is_object() => payload,
        Ok(_) => {
            return errors::gateway_error(GatewayError::invalid_response(
                "identity payload is not a user object",
            ));
        }
        Err(err) => return errors::error_response(err),
    };

    match Identity::view(&payload) {
        Some(identity) => tracing::debug!(
            username = identity.username.as_deref().unwrap_or("-"),
            roles = identity.role_count(),
            "identity relayed"
        ),
        None => tracing::debug!("identity relayed without a readable view"),
    }

    errors::success_response(StatusCode::OK, payload)
}
