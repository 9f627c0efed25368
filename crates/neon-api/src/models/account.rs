use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Payload, impl_model};

/// The authenticated account (`users/me`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub login: String,
    pub name: String,
    pub last_name: String,
    pub image: String,
    pub active_seconds_limit: i64,
    pub projects_limit: i64,
    pub branches_limit: i64,
    pub max_autoscaling_limit: f64,
    pub auth_accounts: Vec<AuthAccount>,
    pub plan: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_account: Option<Payload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compute_seconds_limit: Option<i64>,
}

/// Identity provider linked to a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthAccount {
    pub email: String,
    pub image: String,
    pub login: String,
    pub name: String,
    pub provider: String,
}

/// How the current credentials authenticated (`auth`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthDetails {
    pub account_id: String,
    pub auth_method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_data: Option<String>,
}

/// An organization the user belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub managed_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A personal API key
///
/// `key` is only returned once, by the create call. `revoked` is only
/// returned by the revoke call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKey {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<ApiKeyCreator>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_used_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_used_from_addr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revoked: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKeyCreator {
    pub id: String,
    pub name: String,
    pub image: String,
}

impl_model!(User, AuthAccount, AuthDetails, Organization, ApiKey, ApiKeyCreator);
