use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::impl_model;

/// A Postgres role on a branch
///
/// `password` is only present right after creation or a password reset.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub branch_id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protected: Option<bool>,
}

impl std::fmt::Debug for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Role")
            .field("branch_id", &self.branch_id)
            .field("name", &self.name)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("protected", &self.protected)
            .finish()
    }
}

/// Response of the reveal-password action
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealedPassword {
    pub password: String,
}

impl std::fmt::Debug for RevealedPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RevealedPassword")
            .field("password", &"***")
            .finish()
    }
}

impl_model!(Role, RevealedPassword);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Model, ToPayload};
    use serde_json::json;

    #[test]
    fn test_role_round_trip() {
        let role = Role::from_value(json!({
            "branch_id": "br-quiet-1",
            "name": "app_owner",
            "password": "s3cret",
            "protected": false,
            "created_at": "2024-05-01T10:00:00Z",
            "updated_at": "2024-05-01T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(role.protected, Some(false));
        assert_eq!(Role::hydrate(role.to_payload()).unwrap(), role);
    }

    #[test]
    fn test_role_debug_hides_password() {
        let role = Role::from_value(json!({
            "branch_id": "br-quiet-1",
            "name": "app_owner",
            "password": "s3cret",
            "created_at": "2024-05-01T10:00:00Z",
            "updated_at": "2024-05-01T10:00:00Z"
        }))
        .unwrap();
        let debug = format!("{role:?}");
        assert!(!debug.contains("s3cret"));

        let revealed = RevealedPassword::from_value(json!({"password": "s3cret"})).unwrap();
        assert!(!format!("{revealed:?}").contains("s3cret"));
        assert_eq!(revealed.password, "s3cret");
    }
}
