//! Branch operations

use tracing::debug;

use super::{branch_path, field, list, record, segment};
use crate::api::NeonApi;
use crate::body::RequestBody;
use crate::error::Result;
use crate::models::{Branch, BranchCreated, BranchOperations, Endpoint, Page};
use crate::params::PageParams;

/// Handler for `projects/{project_id}/branches` endpoints
#[derive(Debug, Clone)]
pub struct BranchesClient {
    api: NeonApi,
}

impl BranchesClient {
    pub fn new(api: NeonApi) -> Self {
        Self { api }
    }

    pub async fn list(&self, project_id: &str, page: PageParams) -> Result<Page<Branch>> {
        let path = format!(
            "projects/{}/branches{}",
            segment(project_id),
            page.to_query().build()
        );
        let body = self.api.get(&path).await?;
        Ok(Page::from_response(body, "branches")?)
    }

    pub async fn get(&self, project_id: &str, branch_id: &str) -> Result<Branch> {
        let body = self.api.get(&branch_path(project_id, branch_id)).await?;
        field(body, "branch")
    }

    /// Create a branch
    ///
    /// The body is sent as-is and must carry the `branch` key itself, see
    /// [`CreateBranchParams`](crate::params::CreateBranchParams).
    pub async fn create(
        &self,
        project_id: &str,
        branch: impl Into<RequestBody>,
    ) -> Result<BranchCreated> {
        let path = format!("projects/{}/branches", segment(project_id));
        let response = self.api.post(&path, Some(branch.into())).await?;
        let created: BranchCreated = record(response)?;
        debug!(
            branch_id = %created.branch.id,
            operations = created.operations.len(),
            "Created branch"
        );
        Ok(created)
    }

    pub async fn update(
        &self,
        project_id: &str,
        branch_id: &str,
        branch: impl Into<RequestBody>,
    ) -> Result<BranchOperations> {
        let body = branch.into().wrapped("branch");
        let response = self
            .api
            .patch(&branch_path(project_id, branch_id), Some(body))
            .await?;
        record(response)
    }

    pub async fn delete(&self, project_id: &str, branch_id: &str) -> Result<BranchOperations> {
        let response = self.api.delete(&branch_path(project_id, branch_id)).await?;
        record(response)
    }

    /// Make this branch the project's default branch
    pub async fn set_as_primary(
        &self,
        project_id: &str,
        branch_id: &str,
    ) -> Result<BranchOperations> {
        let path = format!("{}/set_as_primary", branch_path(project_id, branch_id));
        let response = self.api.post(&path, None).await?;
        record(response)
    }

    /// Compute endpoints attached to the branch
    pub async fn list_endpoints(&self, project_id: &str, branch_id: &str) -> Result<Vec<Endpoint>> {
        let path = format!("{}/endpoints", branch_path(project_id, branch_id));
        let body = self.api.get(&path).await?;
        list(body, "endpoints")
    }
}
