//! Operation tracking

use super::{field, segment};
use crate::api::NeonApi;
use crate::error::Result;
use crate::models::{Operation, Page};
use crate::params::PageParams;

/// Handler for `projects/{project_id}/operations` endpoints
#[derive(Debug, Clone)]
pub struct OperationsClient {
    api: NeonApi,
}

impl OperationsClient {
    pub fn new(api: NeonApi) -> Self {
        Self { api }
    }

    pub async fn list(&self, project_id: &str, page: PageParams) -> Result<Page<Operation>> {
        let path = format!(
            "projects/{}/operations{}",
            segment(project_id),
            page.to_query().build()
        );
        let body = self.api.get(&path).await?;
        Ok(Page::from_response(body, "operations")?)
    }

    pub async fn get(&self, project_id: &str, operation_id: &str) -> Result<Operation> {
        let path = format!(
            "projects/{}/operations/{}",
            segment(project_id),
            segment(operation_id)
        );
        let body = self.api.get(&path).await?;
        field(body, "operation")
    }
}
