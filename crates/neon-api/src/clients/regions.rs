use super::list;
use crate::api::NeonApi;
use crate::error::Result;
use crate::models::Region;

/// Handler for `regions`
#[derive(Debug, Clone)]
pub struct RegionsClient {
    api: NeonApi,
}

impl RegionsClient {
    pub fn new(api: NeonApi) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<Region>> {
        let body = self.api.get("regions").await?;
        list(body, "regions")
    }
}
