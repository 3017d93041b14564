//! Static classification of site paths.

use std::collections::HashSet;

/// Which group a path belongs to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RouteClass {
    /// Gateway API namespace or a static asset; the guard does not look at it.
    Bypass,
    /// Reachable without a credential (login entry, landing page).
    Public,
    /// Everything else; requires a credential.
    Protected,
}

/// The path partition plus the two redirect targets.
///
/// Classification is a pure function of the path string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePolicy {
    public: HashSet<String>,
    bypass_prefixes: Vec<String>,
    bypass_exact: HashSet<String>,
    login_path: String,
    landing_path: String,
}

impl Default for RoutePolicy {
    fn default() -> Self {
        Self {
            public: ["/", "/login"].into_iter().map(String::from).collect(),
            bypass_prefixes: ["/api", "/_next/", "/static/", "/assets/"]
                .into_iter()
                .map(String::from)
                .collect(),
            bypass_exact: ["/favicon.ico", "/robots.txt"]
                .into_iter()
                .map(String::from)
                .collect(),
            login_path: "/login".to_string(),
            landing_path: "/dashboard".to_string(),
        }
    }
}

impl RoutePolicy {
    /// Login entry point unauthenticated visitors are sent to.
    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    /// Default page for authenticated visitors of a public path.
    pub fn landing_path(&self) -> &str {
        &self.landing_path
    }

    pub fn classify(&self, path: &str) -> RouteClass {
        let path = normalize(path);

        if self.is_bypass(path) {
            return RouteClass::Bypass;
        }
        if self.public.contains(path) {
            return RouteClass::Public;
        }
        RouteClass::Protected
    }

    fn is_bypass(&self, path: &str) -> bool {
        if self.bypass_exact.contains(path) {
            return true;
        }

        // "/api" matches "/api" and "/api/..." but not "/apiary".
        let prefixed = self.bypass_prefixes.iter().any(|prefix| {
            if prefix.ends_with('/') {
                path.starts_with(prefix.as_str())
            } else {
                path == prefix
                    || path
                        .strip_prefix(prefix.as_str())
                        .is_some_and(|rest| rest.starts_with('/'))
            }
        });
        if prefixed {
            return true;
        }

        has_asset_extension(path)
    }
}

/// Strip trailing slashes (except on the root) so `/login/` ≡ `/login`.
fn normalize(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

/// Extensions of files the browser fetches on its own. A dot in a page path
/// (`/companies/acme.inc`) is not enough to skip the guard.
const ASSET_EXTENSIONS: &[&str] = &[
    "js", "mjs", "css", "map", "png", "jpg", "jpeg", "gif", "svg", "ico", "webp", "woff",
    "woff2", "ttf", "webmanifest",
];

fn has_asset_extension(path: &str) -> bool {
    let last = path.rsplit('/').next().unwrap_or_default();
    match last.rsplit_once('.') {
        Some((stem, ext)) => {
            !stem.is_empty()
                && ASSET_EXTENSIONS
                    .iter()
                    .any(|known| known.eq_ignore_ascii_case(ext))
        }
        None => false,
    }
}
