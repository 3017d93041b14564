use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use ipgate_auth::{GuardDecision, SessionState, evaluate};

use crate::context::GuardState;

/// Route guard: runs before any handler and redirects on path class and
/// credential presence alone.
pub async fn route_guard(State(state): State<GuardState>, req: Request, next: Next) -> Response {
    let has_credential = state.credentials.read_headers(req.headers()).is_some();
    let session = SessionState::from_presence(has_credential);
    let path = req.uri().path();

    match evaluate(&state.policy, path, session) {
        GuardDecision::Admit => next.run(req).await,
        GuardDecision::RedirectToLogin(target) => {
            tracing::debug!(path, target = %target, "no credential for protected path");
            Redirect::temporary(&target).into_response()
        }
        GuardDecision::RedirectToLanding(target) => {
            tracing::debug!(path, target = %target, "credential holder on public path");
            Redirect::temporary(&target).into_response()
        }
    }
}
