//! Compute endpoint operations

use super::{field, list, record, segment};
use crate::api::NeonApi;
use crate::body::RequestBody;
use crate::error::Result;
use crate::models::{Endpoint, EndpointOperations};

/// Handler for `projects/{project_id}/endpoints` endpoints
#[derive(Debug, Clone)]
pub struct EndpointsClient {
    api: NeonApi,
}

impl EndpointsClient {
    pub fn new(api: NeonApi) -> Self {
        Self { api }
    }

    fn path(project_id: &str, endpoint_id: &str) -> String {
        format!(
            "projects/{}/endpoints/{}",
            segment(project_id),
            segment(endpoint_id)
        )
    }

    pub async fn list(&self, project_id: &str) -> Result<Vec<Endpoint>> {
        let body = self
            .api
            .get(&format!("projects/{}/endpoints", segment(project_id)))
            .await?;
        list(body, "endpoints")
    }

    pub async fn get(&self, project_id: &str, endpoint_id: &str) -> Result<Endpoint> {
        let body = self.api.get(&Self::path(project_id, endpoint_id)).await?;
        field(body, "endpoint")
    }

    /// Create an endpoint; `endpoint` is sent under the `endpoint` key
    pub async fn create(
        &self,
        project_id: &str,
        endpoint: impl Into<RequestBody>,
    ) -> Result<EndpointOperations> {
        let body = endpoint.into().wrapped("endpoint");
        let response = self
            .api
            .post(
                &format!("projects/{}/endpoints", segment(project_id)),
                Some(body),
            )
            .await?;
        record(response)
    }

    pub async fn update(
        &self,
        project_id: &str,
        endpoint_id: &str,
        endpoint: impl Into<RequestBody>,
    ) -> Result<EndpointOperations> {
        let body = endpoint.into().wrapped("endpoint");
        let response = self
            .api
            .patch(&Self::path(project_id, endpoint_id), Some(body))
            .await?;
        record(response)
    }

    pub async fn delete(&self, project_id: &str, endpoint_id: &str) -> Result<EndpointOperations> {
        let response = self.api.delete(&Self::path(project_id, endpoint_id)).await?;
        record(response)
    }

    pub async fn start(&self, project_id: &str, endpoint_id: &str) -> Result<EndpointOperations> {
        self.action(project_id, endpoint_id, "start").await
    }

    pub async fn suspend(&self, project_id: &str, endpoint_id: &str) -> Result<EndpointOperations> {
        self.action(project_id, endpoint_id, "suspend").await
    }

    pub async fn restart(&self, project_id: &str, endpoint_id: &str) -> Result<EndpointOperations> {
        self.action(project_id, endpoint_id, "restart").await
    }

    async fn action(
        &self,
        project_id: &str,
        endpoint_id: &str,
        action: &str,
    ) -> Result<EndpointOperations> {
        let path = format!("{}/{}", Self::path(project_id, endpoint_id), action);
        let response = self.api.post(&path, None).await?;
        record(response)
    }
}
