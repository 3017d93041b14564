//! HTTP application wiring (Axum router + state).
//!
//! - `routes/`: HTTP routes + handlers (session endpoints, pass-through data)
//! - `dto.rs`: request DTOs
//! - `errors.rs`: normalized error and envelope responses

use std::sync::Arc;

use axum::{Extension, Router};
use thiserror::Error;
use tower::ServiceBuilder;

use ipgate_auth::RoutePolicy;

use crate::backend::BackendClient;
use crate::config::GatewayConfig;
use crate::context::{GatewayState, GuardState};
use crate::cookies::CredentialStore;
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to build backend HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Build the full HTTP router (public entrypoint used by `main.rs`).
///
/// `pages` is the presentation surface (everything outside `/api`). The route
/// guard wraps both the gateway API and the pages, fallback included.
pub fn build_app(config: &GatewayConfig, pages: Router) -> Result<Router, AppError> {
    build_app_with_policy(config, RoutePolicy::default(), pages)
}

pub fn build_app_with_policy(
    config: &GatewayConfig,
    policy: RoutePolicy,
    pages: Router,
) -> Result<Router, AppError> {
    let backend = BackendClient::new(config.backend_url.clone(), config.timeouts)?;
    let credentials = CredentialStore::new(config.cookie_secure());
    let state = Arc::new(GatewayState::new(backend, credentials));

    let guard = GuardState {
        policy: Arc::new(policy),
        credentials,
    };

    let api = routes::router().layer(Extension(state));

    Ok(Router::new()
        .nest("/api", api)
        .merge(pages)
        .layer(
            ServiceBuilder::new().layer(axum::middleware::from_fn_with_state(
                guard,
                middleware::route_guard,
            )),
        ))
}
