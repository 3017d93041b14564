//! Route guard policy (pure).
//!
//! Presence of a credential is the only input besides the path; the guard never
//! checks authenticity. The backend is the sole authority on validity and
//! rejects a bad credential on the first forwarded call.

use crate::route::{RouteClass, RoutePolicy};

/// Per-request session state, derived solely from cookie presence.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    PresumedAuthenticated,
}

impl SessionState {
    pub fn from_presence(has_credential: bool) -> Self {
        if has_credential {
            SessionState::PresumedAuthenticated
        } else {
            SessionState::Unauthenticated
        }
    }
}

/// Outcome of evaluating the guard for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Let the request through unchanged.
    Admit,
    /// Send the visitor to the login entry point.
    ///
    /// The original target is discarded; no return-to parameter is kept.
    RedirectToLogin(String),
    /// Send an authenticated visitor away from a public page.
    RedirectToLanding(String),
}

/// Decide what happens to a request for `path`.
///
/// - No IO
/// - No panics
pub fn evaluate(policy: &RoutePolicy, path: &str, state: SessionState) -> GuardDecision {
    match (policy.classify(path), state) {
        (RouteClass::Bypass, _) => GuardDecision::Admit,
        (RouteClass::Public, SessionState::Unauthenticated) => GuardDecision::Admit,
        (RouteClass::Protected, SessionState::Unauthenticated) => {
            GuardDecision::RedirectToLogin(policy.login_path().to_string())
        }
        (RouteClass::Public, SessionState::PresumedAuthenticated) => {
            GuardDecision::RedirectToLanding(policy.landing_path().to_string())
        }
        (RouteClass::Protected, SessionState::PresumedAuthenticated) => GuardDecision::Admit,
    }
}
