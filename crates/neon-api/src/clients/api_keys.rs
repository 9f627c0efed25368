//! Personal API key management

use tracing::info;

use super::record;
use crate::api::NeonApi;
use crate::body::RequestBody;
use crate::error::Result;
use crate::models::{ApiKey, hydrate_array};
use crate::params::CreateApiKeyParams;

/// Handler for `api_keys` endpoints
#[derive(Debug, Clone)]
pub struct ApiKeysClient {
    api: NeonApi,
}

impl ApiKeysClient {
    pub fn new(api: NeonApi) -> Self {
        Self { api }
    }

    /// All keys of the account; the API returns a bare array
    pub async fn list(&self) -> Result<Vec<ApiKey>> {
        let body = self.api.get("api_keys").await?;
        Ok(hydrate_array(body)?)
    }

    /// Create a key; the secret is only available in the returned `key` field
    pub async fn create(&self, key_name: &str) -> Result<ApiKey> {
        let body = RequestBody::from(CreateApiKeyParams::new(key_name));
        let response = self.api.post("api_keys", Some(body)).await?;
        let key: ApiKey = record(response)?;
        info!(key_id = key.id, "Created API key");
        Ok(key)
    }

    pub async fn revoke(&self, key_id: i64) -> Result<ApiKey> {
        let response = self.api.delete(&format!("api_keys/{key_id}")).await?;
        let key: ApiKey = record(response)?;
        info!(key_id = key.id, "Revoked API key");
        Ok(key)
    }
}
