//! Role operations

use super::{branch_path, field, list, record, segment};
use crate::api::NeonApi;
use crate::body::RequestBody;
use crate::error::Result;
use crate::models::{RevealedPassword, Role, RoleOperations};

/// Handler for `.../branches/{branch_id}/roles` endpoints
#[derive(Debug, Clone)]
pub struct RolesClient {
    api: NeonApi,
}

impl RolesClient {
    pub fn new(api: NeonApi) -> Self {
        Self { api }
    }

    fn collection(project_id: &str, branch_id: &str) -> String {
        format!("{}/roles", branch_path(project_id, branch_id))
    }

    fn path(project_id: &str, branch_id: &str, role_name: &str) -> String {
        format!(
            "{}/{}",
            Self::collection(project_id, branch_id),
            segment(role_name)
        )
    }

    pub async fn list(&self, project_id: &str, branch_id: &str) -> Result<Vec<Role>> {
        let body = self
            .api
            .get(&Self::collection(project_id, branch_id))
            .await?;
        list(body, "roles")
    }

    pub async fn get(&self, project_id: &str, branch_id: &str, role_name: &str) -> Result<Role> {
        let body = self
            .api
            .get(&Self::path(project_id, branch_id, role_name))
            .await?;
        field(body, "role")
    }

    /// Create a role; `role` is sent under the `role` key
    pub async fn create(
        &self,
        project_id: &str,
        branch_id: &str,
        role: impl Into<RequestBody>,
    ) -> Result<RoleOperations> {
        let body = role.into().wrapped("role");
        let response = self
            .api
            .post(&Self::collection(project_id, branch_id), Some(body))
            .await?;
        record(response)
    }

    pub async fn delete(
        &self,
        project_id: &str,
        branch_id: &str,
        role_name: &str,
    ) -> Result<RoleOperations> {
        let response = self
            .api
            .delete(&Self::path(project_id, branch_id, role_name))
            .await?;
        record(response)
    }

    /// Current password of a role (requires stored passwords on the project)
    pub async fn reveal_password(
        &self,
        project_id: &str,
        branch_id: &str,
        role_name: &str,
    ) -> Result<RevealedPassword> {
        let path = format!(
            "{}/reveal_password",
            Self::path(project_id, branch_id, role_name)
        );
        let response = self.api.post(&path, None).await?;
        record(response)
    }

    /// Generate a new password; the returned role carries it
    pub async fn reset_password(
        &self,
        project_id: &str,
        branch_id: &str,
        role_name: &str,
    ) -> Result<RoleOperations> {
        let path = format!(
            "{}/reset_password",
            Self::path(project_id, branch_id, role_name)
        );
        let response = self.api.post(&path, None).await?;
        record(response)
    }
}
