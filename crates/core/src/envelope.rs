//! Uniform response envelope: `{ success, message?, ...payload }`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::GatewayError;

/// Failure shape every endpoint returns, whatever the underlying cause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedError {
    pub success: bool,
    pub message: String,
    pub status: u16,
}

impl NormalizedError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            status,
        }
    }
}

impl From<GatewayError> for NormalizedError {
    fn from(err: GatewayError) -> Self {
        Self::new(err.status(), err.to_string())
    }
}

impl core::fmt::Display for NormalizedError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} ({})", self.message, self.status)
    }
}

impl std::error::Error for NormalizedError {}

/// Success envelope builder.
pub struct Envelope;

impl Envelope {
    /// `{ success: true, ...payload }`.
    ///
    /// Object payloads are spread at top level (`success` always wins);
    /// other payloads go under `data`; `null` adds nothing.
    pub fn success(payload: Value) -> Value {
        let mut out = Map::new();
        out.insert("success".to_string(), Value::Bool(true));
        match payload {
            Value::Object(fields) => {
                for (key, value) in fields {
                    if key != "success" {
                        out.insert(key, value);
                    }
                }
            }
            Value::Null => {}
            other => {
                out.insert("data".to_string(), other);
            }
        }
        Value::Object(out)
    }

    /// `{ success: true, message }`.
    pub fn message(message: impl Into<String>) -> Value {
        serde_json::json!({ "success": true, "message": message.into() })
    }
}

/// Pull a human-readable message out of a backend error payload.
///
/// Looks at `message`, then `detail` (string, or a list of `{msg}` entries),
/// then `error_description`, then `error`.
pub fn extract_message(payload: &Value) -> Option<String> {
    let obj = payload.as_object()?;

    if let Some(msg) = non_blank(obj.get("message")) {
        return Some(msg);
    }

    match obj.get("detail") {
        Some(Value::String(s)) if !s.trim().is_empty() => return Some(s.clone()),
        Some(Value::Array(items)) => {
            let parts: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            if !parts.is_empty() {
                return Some(parts.join("; "));
            }
        }
        _ => {}
    }

    non_blank(obj.get("error_description")).or_else(|| non_blank(obj.get("error")))
}

fn non_blank(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}
