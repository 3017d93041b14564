//! Gateway error model.

use thiserror::Error;

/// Every way a gateway operation can fail.
///
/// These never reach a caller directly: they are converted into a
/// [`NormalizedError`](crate::NormalizedError) at the backend-client or
/// endpoint boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Caller input failed validation before any network call.
    #[error("validation failed: {0}")]
    Validation(String),

    /// An API call that needs a credential arrived without one.
    #[error("not authenticated")]
    Unauthenticated,

    /// The backend could not be reached (connect/DNS/IO failure).
    #[error("backend unreachable: {0}")]
    Transport(String),

    /// The backend did not answer within the per-call timeout.
    #[error("backend request timed out")]
    Timeout,

    /// The backend answered with a non-2xx status.
    ///
    /// A rejected credential arrives here with the backend's own 401.
    #[error("{message}")]
    Backend { status: u16, message: String },

    /// The backend answered 2xx with a body the gateway cannot use.
    #[error("invalid backend response: {0}")]
    InvalidResponse(String),
}

impl GatewayError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn backend(status: u16, message: impl Into<String>) -> Self {
        Self::Backend {
            status,
            message: message.into(),
        }
    }

    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// HTTP status a caller observes for this failure.
    pub fn status(&self) -> u16 {
        match self {
            GatewayError::Validation(_) => 400,
            GatewayError::Unauthenticated => 401,
            GatewayError::Transport(_) => 500,
            GatewayError::Timeout => 504,
            GatewayError::Backend { status, .. } => *status,
            GatewayError::InvalidResponse(_) => 502,
        }
    }
}
