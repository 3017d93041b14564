//! Session credential: the opaque bearer string issued by the backend.
//!
//! The gateway never inspects or decodes a credential. It is carried from the
//! backend's login reply into a cookie and from the cookie into an
//! `Authorization: Bearer` header, verbatim.

use serde::{Deserialize, Serialize};

/// Opaque bearer credential.
///
/// Construction rejects blank values so that "no credential" is always
/// represented as `Option::None`, never as an empty string.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Credential(String);

impl Credential {
    /// Wrap a credential value; `None` when the value is empty or whitespace.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return None;
        }
        Some(Self(value))
    }

    /// The raw value, for forwarding to the backend or writing into a cookie.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Debug for Credential {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Token material returned by the backend's login route.
///
/// Parsed leniently: every field is optional and validation happens in
/// [`TokenGrant::credential`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenGrant {
    #[serde(default)]
    pub access_token: Option<String>,

    /// Relayed to the caller only. Never stored and never used for refresh.
    #[serde(default)]
    pub refresh_token: Option<String>,

    #[serde(default)]
    pub token_type: Option<String>,
}

impl TokenGrant {
    /// Parse a grant out of an arbitrary backend payload.
    ///
    /// Only a JSON object can carry a grant. Anything else, including an
    /// array whose elements would line up with the fields, yields an empty one.
    pub fn from_payload(payload: &serde_json::Value) -> Self {
        if !payload.is_object() {
            return Self::default();
        }
        serde_json::from_value(payload.clone()).unwrap_or_default()
    }

    /// The access credential, if the backend issued a non-blank one.
    pub fn credential(&self) -> Option<Credential> {
        self.access_token.clone().and_then(Credential::new)
    }
}
