//! Identity of the signed-in user, as reported by the backend.
//!
//! The gateway relays the backend's identity object verbatim. [`Identity`] is
//! a read-only view over that object: it is used for logging and never
//! decides what the caller receives, so a payload it cannot read is still
//! relayed untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Backend identifier: numeric or string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    Int(i64),
    Str(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ResourceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ResourceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A role granted within a scope (e.g. organization or department).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleBinding {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_id: Option<ResourceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope_id: Option<ResourceId>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// View over the backend's identity object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ResourceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<Organization>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<Department>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<RoleBinding>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Identity {
    /// Read a view out of an identity payload.
    ///
    /// `None` when the payload is not an object or a known field has an
    /// unexpected shape. Callers must not treat `None` as a failed lookup.
    pub fn view(payload: &Value) -> Option<Self> {
        if !payload.is_object() {
            return None;
        }
        serde_json::from_value(payload.clone()).ok()
    }

    /// Number of role bindings the backend reported.
    pub fn role_count(&self) -> usize {
        self.roles.as_ref().map_or(0, Vec::len)
    }
}
