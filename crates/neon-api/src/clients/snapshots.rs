//! Snapshot operations

use super::{branch_path, field, list, record, segment};
use crate::api::NeonApi;
use crate::body::RequestBody;
use crate::error::Result;
use crate::models::{Snapshot, SnapshotOperations, SnapshotRestored};

/// Handler for snapshot endpoints
#[derive(Debug, Clone)]
pub struct SnapshotsClient {
    api: NeonApi,
}

impl SnapshotsClient {
    pub fn new(api: NeonApi) -> Self {
        Self { api }
    }

    fn path(project_id: &str, snapshot_id: &str) -> String {
        format!(
            "projects/{}/snapshots/{}",
            segment(project_id),
            segment(snapshot_id)
        )
    }

    /// Snapshot a branch; the body (name, lsn, timestamp, expiry) is optional
    pub async fn create(
        &self,
        project_id: &str,
        branch_id: &str,
        snapshot: Option<RequestBody>,
    ) -> Result<SnapshotOperations> {
        let path = format!("{}/snapshot", branch_path(project_id, branch_id));
        let response = self.api.post(&path, snapshot).await?;
        record(response)
    }

    pub async fn list(&self, project_id: &str) -> Result<Vec<Snapshot>> {
        let body = self
            .api
            .get(&format!("projects/{}/snapshots", segment(project_id)))
            .await?;
        list(body, "snapshots")
    }

    /// Rename or change the expiry; sent under the `snapshot` key
    pub async fn update(
        &self,
        project_id: &str,
        snapshot_id: &str,
        snapshot: impl Into<RequestBody>,
    ) -> Result<Snapshot> {
        let body = snapshot.into().wrapped("snapshot");
        let response = self
            .api
            .patch(&Self::path(project_id, snapshot_id), Some(body))
            .await?;
        field(response, "snapshot")
    }

    pub async fn delete(&self, project_id: &str, snapshot_id: &str) -> Result<Snapshot> {
        let response = self.api.delete(&Self::path(project_id, snapshot_id)).await?;
        field(response, "snapshot")
    }

    /// Restore into a new branch (or onto `target_branch_id`)
    pub async fn restore(
        &self,
        project_id: &str,
        snapshot_id: &str,
        restore: impl Into<RequestBody>,
    ) -> Result<SnapshotRestored> {
        let path = format!("{}/restore", Self::path(project_id, snapshot_id));
        let response = self.api.post(&path, Some(restore.into())).await?;
        record(response)
    }
}
