//! Database operations

use super::{branch_path, field, list, record, segment};
use crate::api::NeonApi;
use crate::body::RequestBody;
use crate::error::Result;
use crate::models::{Database, DatabaseOperations};

/// Handler for `.../branches/{branch_id}/databases` endpoints
#[derive(Debug, Clone)]
pub struct DatabasesClient {
    api: NeonApi,
}

impl DatabasesClient {
    pub fn new(api: NeonApi) -> Self {
        Self { api }
    }

    fn collection(project_id: &str, branch_id: &str) -> String {
        format!("{}/databases", branch_path(project_id, branch_id))
    }

    fn path(project_id: &str, branch_id: &str, database_name: &str) -> String {
        format!(
            "{}/{}",
            Self::collection(project_id, branch_id),
            segment(database_name)
        )
    }

    pub async fn list(&self, project_id: &str, branch_id: &str) -> Result<Vec<Database>> {
        let body = self
            .api
            .get(&Self::collection(project_id, branch_id))
            .await?;
        list(body, "databases")
    }

    pub async fn get(
        &self,
        project_id: &str,
        branch_id: &str,
        database_name: &str,
    ) -> Result<Database> {
        let body = self
            .api
            .get(&Self::path(project_id, branch_id, database_name))
            .await?;
        field(body, "database")
    }

    /// Create a database; `database` is sent under the `database` key
    pub async fn create(
        &self,
        project_id: &str,
        branch_id: &str,
        database: impl Into<RequestBody>,
    ) -> Result<DatabaseOperations> {
        let body = database.into().wrapped("database");
        let response = self
            .api
            .post(&Self::collection(project_id, branch_id), Some(body))
            .await?;
        record(response)
    }

    pub async fn update(
        &self,
        project_id: &str,
        branch_id: &str,
        database_name: &str,
        database: impl Into<RequestBody>,
    ) -> Result<DatabaseOperations> {
        let body = database.into().wrapped("database");
        let response = self
            .api
            .patch(&Self::path(project_id, branch_id, database_name), Some(body))
            .await?;
        record(response)
    }

    pub async fn delete(
        &self,
        project_id: &str,
        branch_id: &str,
        database_name: &str,
    ) -> Result<DatabaseOperations> {
        let response = self
            .api
            .delete(&Self::path(project_id, branch_id, database_name))
            .await?;
        record(response)
    }
}
