//! Credential Store: the session credential <-> `token` cookie codec.
//!
//! The cookie is the only record of a session; nothing is kept server-side.

use axum::http::HeaderMap;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use ipgate_core::Credential;

/// Cookie name shared by the guard, the session endpoints and the backend client.
pub const CREDENTIAL_COOKIE: &str = "token";

/// Credential lifetime: 24 hours.
pub const CREDENTIAL_MAX_AGE_SECS: i64 = 86_400;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CredentialStore {
    secure: bool,
}

impl CredentialStore {
    /// `secure` comes from [`crate::config::GatewayConfig::cookie_secure`].
    pub fn new(secure: bool) -> Self {
        Self { secure }
    }

    /// Cookie instruction that stores `credential` for 24 hours.
    pub fn issue(&self, credential: &Credential) -> Cookie<'static> {
        self.build(credential.expose().to_string(), CREDENTIAL_MAX_AGE_SECS)
    }

    /// Same attributes as [`issue`](Self::issue), empty value, max-age 0.
    pub fn revoke(&self) -> Cookie<'static> {
        self.build(String::new(), 0)
    }

    /// Credential carried by the request, if any. Absence is not an error.
    pub fn read(&self, jar: &CookieJar) -> Option<Credential> {
        jar.get(CREDENTIAL_COOKIE)
            .and_then(|cookie| Credential::new(cookie.value()))
    }

    pub fn read_headers(&self, headers: &HeaderMap) -> Option<Credential> {
        self.read(&CookieJar::from_headers(headers))
    }

    fn build(&self, value: String, max_age_secs: i64) -> Cookie<'static> {
        Cookie::build((CREDENTIAL_COOKIE, value))
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .max_age(time::Duration::seconds(max_age_secs))
            .build()
    }
}
