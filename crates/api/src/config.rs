//! Gateway configuration, read once from the environment at startup.

use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000/api/v1";
const DEFAULT_BACKEND_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_EXPORT_TIMEOUT_MS: u64 = 300_000;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}: invalid value '{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    fn invalid(var: &'static str, value: &str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            var,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// Build mode. Production turns the cookie `Secure` flag on.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(ConfigError::invalid(
                "IPGATE_ENV",
                value,
                "expected 'development' or 'production'",
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }
}

/// Whether the credential cookie carries the `Secure` attribute.
///
/// This is the only place the decision is made: on in production unless
/// the insecure-cookie override is set.
pub fn resolve_cookie_secure(environment: Environment, allow_insecure_cookie: bool) -> bool {
    environment == Environment::Production && !allow_insecure_cookie
}

/// Per-call timeouts for backend requests.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BackendTimeouts {
    /// Ordinary calls.
    pub default: Duration,
    /// Bulk/export calls that the backend takes minutes to produce.
    pub export: Duration,
}

impl Default for BackendTimeouts {
    fn default() -> Self {
        Self {
            default: Duration::from_millis(DEFAULT_BACKEND_TIMEOUT_MS),
            export: Duration::from_millis(DEFAULT_EXPORT_TIMEOUT_MS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub bind_addr: SocketAddr,
    /// Backend API base URL without a trailing slash.
    pub backend_url: String,
    pub environment: Environment,
    pub allow_insecure_cookie: bool,
    pub timeouts: BackendTimeouts,
}

impl GatewayConfig {
    /// Development defaults pointing at `backend_url`; used by tests and embedders.
    pub fn new(backend_url: impl Into<String>) -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            backend_url: backend_url.into().trim_end_matches('/').to_string(),
            environment: Environment::Development,
            allow_insecure_cookie: false,
            timeouts: BackendTimeouts::default(),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source (the process environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_raw = lookup("IPGATE_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::invalid("IPGATE_BIND_ADDR", &bind_raw, e.to_string()))?;

        let backend_raw =
            lookup("IPGATE_BACKEND_URL").unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());
        let backend_url = parse_backend_url(&backend_raw)?;

        let environment = match lookup("IPGATE_ENV") {
            Some(v) => Environment::parse(&v)?,
            None => Environment::Development,
        };

        let allow_insecure_cookie = match lookup("IPGATE_ALLOW_INSECURE_COOKIE") {
            Some(v) => parse_bool("IPGATE_ALLOW_INSECURE_COOKIE", &v)?,
            None => false,
        };

        let timeouts = BackendTimeouts {
            default: parse_timeout(
                "IPGATE_BACKEND_TIMEOUT_MS",
                lookup("IPGATE_BACKEND_TIMEOUT_MS"),
                DEFAULT_BACKEND_TIMEOUT_MS,
            )?,
            export: parse_timeout(
                "IPGATE_EXPORT_TIMEOUT_MS",
                lookup("IPGATE_EXPORT_TIMEOUT_MS"),
                DEFAULT_EXPORT_TIMEOUT_MS,
            )?,
        };

        Ok(Self {
            bind_addr,
            backend_url,
            environment,
            allow_insecure_cookie,
            timeouts,
        })
    }

    pub fn cookie_secure(&self) -> bool {
        resolve_cookie_secure(self.environment, self.allow_insecure_cookie)
    }
}

fn parse_backend_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = reqwest::Url::parse(trimmed)
        .map_err(|e| ConfigError::invalid("IPGATE_BACKEND_URL", raw, e.to_string()))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::invalid(
            "IPGATE_BACKEND_URL",
            raw,
            "scheme must be http or https",
        ));
    }
    Ok(trimmed.to_string())
}

fn parse_bool(var: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::invalid(var, raw, "expected a boolean")),
    }
}

fn parse_timeout(
    var: &'static str,
    raw: Option<String>,
    default_ms: u64,
) -> Result<Duration, ConfigError> {
    let Some(raw) = raw else {
        return Ok(Duration::from_millis(default_ms));
    };
    let ms: u64 = raw
        .trim()
        .parse()
        .map_err(|_| ConfigError::invalid(var, &raw, "expected milliseconds"))?;
    if ms == 0 {
        return Err(ConfigError::invalid(var, &raw, "must be greater than zero"));
    }
    Ok(Duration::from_millis(ms))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_are_development_and_short_timeouts() {
        let cfg = GatewayConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.environment, Environment::Development);
        assert_eq!(cfg.backend_url, "http://127.0.0.1:8000/api/v1");
        assert_eq!(cfg.timeouts.default, Duration::from_secs(5));
        assert_eq!(cfg.timeouts.export, Duration::from_secs(300));
        assert!(!cfg.cookie_secure());
    }

    #[test]
    fn production_enables_secure_cookie_unless_overridden() {
        let cfg = GatewayConfig::from_lookup(lookup(&[("IPGATE_ENV", "production")])).unwrap();
        assert!(cfg.cookie_secure());

        let cfg = GatewayConfig::from_lookup(lookup(&[
            ("IPGATE_ENV", "production"),
            ("IPGATE_ALLOW_INSECURE_COOKIE", "true"),
        ]))
        .unwrap();
        assert!(!cfg.cookie_secure());
    }

    #[test]
    fn override_has_no_effect_in_development() {
        assert!(!resolve_cookie_secure(Environment::Development, false));
        assert!(!resolve_cookie_secure(Environment::Development, true));
    }

    #[test]
    fn trailing_slash_is_dropped_from_backend_url() {
        let cfg = GatewayConfig::from_lookup(lookup(&[(
            "IPGATE_BACKEND_URL",
            "https://ip.example.com/api/v1/",
        )]))
        .unwrap();
        assert_eq!(cfg.backend_url, "https://ip.example.com/api/v1");
    }

    #[test]
    fn invalid_values_fail_startup() {
        assert!(GatewayConfig::from_lookup(lookup(&[("IPGATE_ENV", "staging")])).is_err());
        assert!(GatewayConfig::from_lookup(lookup(&[("IPGATE_BACKEND_TIMEOUT_MS", "0")])).is_err());
        assert!(GatewayConfig::from_lookup(lookup(&[("IPGATE_EXPORT_TIMEOUT_MS", "soon")])).is_err());
        assert!(GatewayConfig::from_lookup(lookup(&[("IPGATE_BACKEND_URL", "ftp://x")])).is_err());
        assert!(GatewayConfig::from_lookup(lookup(&[("IPGATE_BIND_ADDR", "nowhere")])).is_err());
        assert!(
            GatewayConfig::from_lookup(lookup(&[("IPGATE_ALLOW_INSECURE_COOKIE", "maybe")])).is_err()
        );
    }
}
