use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{impl_model, wire_enum};

wire_enum! {
    /// What an operation does
    pub enum OperationAction {
        CreateCompute => "create_compute",
        CreateTimeline => "create_timeline",
        StartCompute => "start_compute",
        SuspendCompute => "suspend_compute",
        ApplyConfig => "apply_config",
        CheckAvailability => "check_availability",
        DeleteTimeline => "delete_timeline",
        CreateBranch => "create_branch",
        DeleteBranch => "delete_branch",
        UpdateBranch => "update_branch",
        CreateDatabase => "create_database",
        UpdateDatabase => "update_database",
        DeleteDatabase => "delete_database",
        CreateRole => "create_role",
        DeleteRole => "delete_role",
        CreateEndpoint => "create_endpoint",
        UpdateEndpoint => "update_endpoint",
        DeleteEndpoint => "delete_endpoint",
        StartEndpoint => "start_endpoint",
        SuspendEndpoint => "suspend_endpoint",
        CreateProject => "create_project",
        UpdateProject => "update_project",
    }
}

wire_enum! {
    /// Progress of an operation
    pub enum OperationStatus {
        Scheduling => "scheduling",
        Running => "running",
        Finished => "finished",
        Failed => "failed",
        Error => "error",
        Cancelled => "cancelled",
        Cancelling => "cancelling",
        Skipped => "skipped",
    }
}

impl OperationStatus {
    /// True once the operation will not change status again
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OperationStatus::Finished
                | OperationStatus::Failed
                | OperationStatus::Error
                | OperationStatus::Cancelled
                | OperationStatus::Skipped
        )
    }
}

/// Asynchronous work scheduled by the control plane
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    pub id: String,
    pub project_id: String,
    pub action: OperationAction,
    pub status: OperationStatus,
    pub failures_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub total_duration_ms: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_at: Option<DateTime<Utc>>,
}

impl_model!(Operation);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Model, ToPayload};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_operation_round_trip() {
        let payload = json!({
            "id": "a07f8772-1877-4da9-a939-3a3ae62d1d8d",
            "project_id": "silent-frog-123456",
            "branch_id": "br-quiet-1",
            "endpoint_id": "ep-cool-1",
            "action": "start_compute",
            "status": "running",
            "failures_count": 0,
            "created_at": "2024-05-01T10:00:00Z",
            "updated_at": "2024-05-01T10:00:01Z",
            "total_duration_ms": 0
        });
        let operation = Operation::from_value(payload.clone()).unwrap();
        assert_eq!(operation.action, OperationAction::StartCompute);
        assert_eq!(operation.status, OperationStatus::Running);
        assert!(!operation.status.is_terminal());
        assert_eq!(serde_json::Value::Object(operation.to_payload()), payload);
    }

    #[test]
    fn test_all_actions_parse() {
        assert_eq!(OperationAction::ALL.len(), 22);
        for action in OperationAction::ALL {
            assert_eq!(action.as_str().parse::<OperationAction>().unwrap(), *action);
            let value = serde_json::to_value(action).unwrap();
            assert_eq!(value, json!(action.as_str()));
        }
    }

    #[test]
    fn test_all_statuses_parse() {
        assert_eq!(OperationStatus::ALL.len(), 8);
        for status in OperationStatus::ALL {
            assert_eq!(status.as_str().parse::<OperationStatus>().unwrap(), *status);
        }
        assert!(OperationStatus::Finished.is_terminal());
        assert!(!OperationStatus::Cancelling.is_terminal());
    }

    #[test]
    fn test_unknown_status_fails() {
        let err = "done".parse::<OperationStatus>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown OperationStatus value 'done'");
        assert!(serde_json::from_value::<OperationStatus>(json!("done")).is_err());
    }
}
