use std::sync::Arc;

use ipgate_auth::RoutePolicy;

use crate::backend::BackendClient;
use crate::cookies::CredentialStore;

/// Per-process gateway state shared by every handler.
///
/// Immutable after startup: no session table, no locks.
#[derive(Debug, Clone)]
pub struct GatewayState {
    backend: BackendClient,
    credentials: CredentialStore,
}

impl GatewayState {
    pub fn new(backend: BackendClient, credentials: CredentialStore) -> Self {
        Self {
            backend,
            credentials,
        }
    }

    pub fn backend(&self) -> &BackendClient {
        &self.backend
    }

    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }
}

/// State for the route guard middleware.
#[derive(Debug, Clone)]
pub struct GuardState {
    pub policy: Arc<RoutePolicy>,
    pub credentials: CredentialStore,
}
