use serde::Deserialize;

// -------------------------
// Request DTOs
// -------------------------

/// Raw login body. Fields default to empty so a missing field is reported
/// by login validation rather than by the JSON extractor.
#[derive(Deserialize, Default)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl core::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
