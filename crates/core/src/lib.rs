//! `ipgate-core` — gateway data model shared by the policy and HTTP layers.
//!
//! This crate contains **pure** types (no IO, no HTTP framework).

pub mod credential;
pub mod envelope;
pub mod error;
pub mod identity;

pub use credential::{Credential, TokenGrant};
pub use envelope::{Envelope, NormalizedError, extract_message};
pub use error::GatewayError;
pub use identity::{Department, Identity, Organization, ResourceId, RoleBinding};
