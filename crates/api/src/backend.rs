//! Backend Client: the single choke point for outbound calls to the backend API.
//!
//! - One attempt per call; no retries, no backoff.
//! - `Authorization: Bearer` is attached only when the inbound request carried
//!   a credential; credentials are never fabricated or refreshed.
//! - Every failure leaves this module as a [`NormalizedError`].
//! - Dropping the returned future aborts the in-flight request, so an aborted
//!   inbound request cancels its outbound call.

use std::time::{Duration, Instant};

use axum::body::Bytes;
use axum::http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
use serde_json::Value;
use uuid::Uuid;

use ipgate_core::{Credential, GatewayError, NormalizedError, extract_message};

use crate::config::BackendTimeouts;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Which timeout budget a call runs under.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CallTimeout {
    /// Short budget for ordinary calls.
    Default,
    /// Long budget for bulk/export calls.
    Export,
    Custom(Duration),
}

/// One outbound call, described independently of the HTTP client.
#[derive(Debug, Clone)]
pub struct BackendRequest {
    method: Method,
    path: String,
    body: Option<Value>,
    headers: HeaderMap,
    query: Vec<(String, String)>,
    credential: Option<Credential>,
    timeout: CallTimeout,
}

impl BackendRequest {
    /// `path` is relative to the configured backend base URL.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            headers: HeaderMap::new(),
            query: Vec::new(),
            credential: None,
            timeout: CallTimeout::Default,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn query(mut self, pairs: Vec<(String, String)>) -> Self {
        self.query = pairs;
        self
    }

    /// Attach the caller's credential (if any) as a bearer token.
    pub fn credential(mut self, credential: Option<Credential>) -> Self {
        self.credential = credential;
        self
    }

    pub fn timeout(mut self, timeout: CallTimeout) -> Self {
        self.timeout = timeout;
        self
    }
}

/// A 2xx backend reply.
#[derive(Debug, Clone)]
pub struct BackendResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl BackendResponse {
    /// Body as JSON; an empty body is `null`.
    pub fn json(&self) -> Result<Value, NormalizedError> {
        if self.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&self.body).map_err(|e| {
            NormalizedError::from(GatewayError::invalid_response(format!(
                "backend returned malformed JSON: {e}"
            )))
        })
    }
}

#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
    timeouts: BackendTimeouts,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>, timeouts: BackendTimeouts) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeouts,
        })
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    fn resolve_timeout(&self, timeout: CallTimeout) -> Duration {
        match timeout {
            CallTimeout::Default => self.timeouts.default,
            CallTimeout::Export => self.timeouts.export,
            CallTimeout::Custom(d) => d,
        }
    }

    /// Issue a single call. Non-2xx replies and transport failures become a
    /// [`NormalizedError`] carrying the backend's status (or a fallback).
    pub async fn call(&self, request: BackendRequest) -> Result<BackendResponse, NormalizedError> {
        let BackendRequest {
            method,
            path,
            body,
            headers,
            query,
            credential,
            timeout,
        } = request;

        let request_id = Uuid::now_v7().to_string();
        let timeout = self.resolve_timeout(timeout);

        let mut builder = self
            .http
            .request(method.clone(), self.url(&path))
            .timeout(timeout)
            .headers(headers)
            .header(REQUEST_ID_HEADER, request_id.as_str());

        if !query.is_empty() {
            builder = builder.query(&query);
        }
        if let Some(credential) = &credential {
            builder = builder.bearer_auth(credential.expose());
        }
        if let Some(body) = &body {
            builder = builder.json(body);
        }

        let started = Instant::now();
        let result = self.execute(builder).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match &result {
            Ok(resp) => tracing::debug!(
                %method,
                path = %path,
                status = resp.status.as_u16(),
                elapsed_ms,
                request_id = %request_id,
                "backend call completed"
            ),
            Err(err) => tracing::debug!(
                %method,
                path = %path,
                status = err.status,
                elapsed_ms,
                request_id = %request_id,
                error = %err.message,
                "backend call failed"
            ),
        }

        result
    }

    async fn execute(&self, builder: reqwest::RequestBuilder) -> Result<BackendResponse, NormalizedError> {
        let response = builder.send().await.map_err(transport_error)?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(transport_error)?;

        if !status.is_success() {
            return Err(rejection(status, &body).into());
        }

        Ok(BackendResponse {
            status,
            headers,
            body,
        })
    }
}

fn transport_error(err: reqwest::Error) -> NormalizedError {
    let err = err.without_url();
    if err.is_timeout() {
        GatewayError::Timeout.into()
    } else {
        GatewayError::transport(err.to_string()).into()
    }
}

/// Turn a non-2xx reply into a backend error with the best available message.
fn rejection(status: StatusCode, body: &[u8]) -> GatewayError {
    let message = serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|payload| extract_message(&payload))
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("backend request failed")
                .to_string()
        });
    GatewayError::backend(status.as_u16(), message)
}
