//! `ipgate-auth` — pure request-time policy for the gateway.
//!
//! This crate is intentionally decoupled from HTTP and storage: it decides,
//! from a path and the presence of a credential, what should happen.

pub mod guard;
pub mod login;
pub mod route;

pub use guard::{GuardDecision, SessionState, evaluate};
pub use login::{LoginCredentials, LoginError};
pub use route::{RouteClass, RoutePolicy};
