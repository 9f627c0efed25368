use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Payload, impl_model, wire_enum};

wire_enum! {
    /// Access mode of a compute endpoint
    pub enum EndpointType {
        ReadOnly => "read_only",
        ReadWrite => "read_write",
    }
}

wire_enum! {
    /// Lifecycle state of a compute endpoint
    pub enum EndpointState {
        Init => "init",
        Active => "active",
        Idle => "idle",
    }
}

/// A compute endpoint attached to a branch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    pub id: String,
    pub host: String,
    pub project_id: String,
    pub branch_id: String,
    pub region_id: String,
    pub autoscaling_limit_min_cu: f64,
    pub autoscaling_limit_max_cu: f64,
    #[serde(rename = "type")]
    pub endpoint_type: EndpointType,
    pub current_state: EndpointState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending_state: Option<EndpointState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Payload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pooler_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pooler_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passwordless_access: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suspend_timeout_seconds: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provisioner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy_host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_active: Option<DateTime<Utc>>,
}

impl Endpoint {
    /// True for the branch's writable compute
    pub fn is_read_write(&self) -> bool {
        self.endpoint_type == EndpointType::ReadWrite
    }
}

impl_model!(Endpoint);
