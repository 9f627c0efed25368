//! Consumption history (paid plans only)

use super::list;
use crate::api::NeonApi;
use crate::error::Result;
use crate::models::{Page, Period, ProjectConsumption};
use crate::params::{AccountConsumptionParams, ProjectConsumptionParams};

/// Handler for `consumption_history` endpoints
#[derive(Debug, Clone)]
pub struct ConsumptionClient {
    api: NeonApi,
}

impl ConsumptionClient {
    pub fn new(api: NeonApi) -> Self {
        Self { api }
    }

    /// Billing periods of the whole account
    pub async fn account(&self, params: &AccountConsumptionParams) -> Result<Vec<Period>> {
        let path = format!(
            "consumption_history/account{}",
            params.to_query().build()
        );
        let body = self.api.get(&path).await?;
        list(body, "periods")
    }

    /// Per-project billing periods, in server order
    pub async fn projects(
        &self,
        params: &ProjectConsumptionParams,
    ) -> Result<Page<ProjectConsumption>> {
        let path = format!(
            "consumption_history/projects{}",
            params.to_query().build()
        );
        let body = self.api.get(&path).await?;
        Ok(Page::from_response(body, "projects")?)
    }
}
