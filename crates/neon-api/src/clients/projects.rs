//! Project operations

use tracing::debug;

use super::{field, record, segment};
use crate::api::NeonApi;
use crate::body::RequestBody;
use crate::error::{DecodeError, Result};
use crate::models::{Page, Project, ProjectCreated, ProjectOperations};
use crate::params::{ConnectionUriParams, ListProjectsParams};

/// Handler for `projects` endpoints
#[derive(Debug, Clone)]
pub struct ProjectsClient {
    api: NeonApi,
}

impl ProjectsClient {
    pub fn new(api: NeonApi) -> Self {
        Self { api }
    }

    /// One page of the caller's projects
    pub async fn list(&self, params: ListProjectsParams) -> Result<Page<Project>> {
        let path = format!("projects{}", params.to_query().build());
        let body = self.api.get(&path).await?;
        Ok(Page::from_response(body, "projects")?)
    }

    /// One page of projects shared with the caller
    pub async fn list_shared(&self, params: ListProjectsParams) -> Result<Page<Project>> {
        let path = format!("projects/shared{}", params.to_shared_query().build());
        let body = self.api.get(&path).await?;
        Ok(Page::from_response(body, "projects")?)
    }

    pub async fn get(&self, project_id: &str) -> Result<Project> {
        let body = self
            .api
            .get(&format!("projects/{}", segment(project_id)))
            .await?;
        field(body, "project")
    }

    /// Create a project; `project` is sent under the `project` key
    pub async fn create(&self, project: impl Into<RequestBody>) -> Result<ProjectCreated> {
        let body = project.into().wrapped("project");
        let response = self.api.post("projects", Some(body)).await?;
        let created: ProjectCreated = record(response)?;
        debug!(project_id = %created.project.id, "Created project");
        Ok(created)
    }

    pub async fn update(
        &self,
        project_id: &str,
        project: impl Into<RequestBody>,
    ) -> Result<ProjectOperations> {
        let body = project.into().wrapped("project");
        let response = self
            .api
            .patch(&format!("projects/{}", segment(project_id)), Some(body))
            .await?;
        record(response)
    }

    /// Delete a project and return its final representation
    pub async fn delete(&self, project_id: &str) -> Result<Project> {
        let body = self
            .api
            .delete(&format!("projects/{}", segment(project_id)))
            .await?;
        field(body, "project")
    }

    /// Postgres connection string for a database and role
    pub async fn connection_uri(
        &self,
        project_id: &str,
        params: &ConnectionUriParams,
    ) -> Result<String> {
        let path = format!(
            "projects/{}/connection_uri{}",
            segment(project_id),
            params.to_query().build()
        );
        let body = self.api.get(&path).await?;
        let uri = body
            .get("uri")
            .and_then(|v| v.as_str())
            .ok_or(DecodeError::MissingField { field: "uri" })?;
        Ok(uri.to_string())
    }
}
