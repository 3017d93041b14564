//! Login input validation.

use thiserror::Error;

use ipgate_core::GatewayError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoginError {
    #[error("username is required")]
    MissingUsername,

    #[error("password is required")]
    MissingPassword,
}

impl From<LoginError> for GatewayError {
    fn from(err: LoginError) -> Self {
        GatewayError::validation(err.to_string())
    }
}

/// Trimmed, non-empty login input ready to forward to the backend.
///
/// `Debug` never prints the password.
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: String,
}

impl LoginCredentials {
    /// Trim both fields; either one blank after trimming is a validation failure.
    pub fn parse(username: &str, password: &str) -> Result<Self, LoginError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(LoginError::MissingUsername);
        }
        let password = password.trim();
        if password.is_empty() {
            return Err(LoginError::MissingPassword);
        }
        Ok(Self {
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Backend login body: `{ username, password }`.
    pub fn to_backend_body(&self) -> serde_json::Value {
        serde_json::json!({
            "username": self.username,
            "password": self.password,
        })
    }
}

impl core::fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
