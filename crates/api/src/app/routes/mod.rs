use axum::{Router, routing::get};

pub mod data;
pub mod session;
pub mod system;

/// Router for the gateway's own `/api` namespace.
pub fn router() -> Router {
    Router::new()
        .route("/health", get(system::health))
        .nest("/auth", session::router())
        .merge(data::router())
        .fallback(system::not_found)
}
