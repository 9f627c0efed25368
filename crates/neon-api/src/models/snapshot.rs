use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::impl_model;

/// Point-in-time capture of a branch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_branch_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lsn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manual: Option<bool>,
}

impl_model!(Snapshot);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Model, ToPayload};
    use serde_json::json;

    #[test]
    fn test_snapshot_round_trip() {
        let snapshot = Snapshot::from_value(json!({
            "id": "snap-1",
            "name": "before-migration",
            "created_at": "2024-05-01T10:00:00Z",
            "source_branch_id": "br-quiet-1",
            "lsn": "0/1F2A3B8",
            "manual": true
        }))
        .unwrap();
        assert_eq!(snapshot.expires_at, None);
        assert_eq!(Snapshot::hydrate(snapshot.to_payload()).unwrap(), snapshot);
    }
}
