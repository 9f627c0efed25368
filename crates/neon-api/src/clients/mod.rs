//! Resource clients
//!
//! One handler per resource family. Handlers are cheap to clone and can be
//! created either from a [`NeonClient`] or directly from a [`NeonApi`].

use std::borrow::Cow;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use crate::api::{ClientConfig, NeonApi};
use crate::error::Result;
use crate::models::{Model, hydrate_field, hydrate_list, into_object};
use crate::transport::{DEFAULT_TIMEOUT, HttpTransport};

mod api_keys;
mod branches;
mod consumption;
mod databases;
mod endpoints;
mod operations;
mod projects;
mod regions;
mod roles;
mod snapshots;
mod users;

pub use api_keys::ApiKeysClient;
pub use branches::BranchesClient;
pub use consumption::ConsumptionClient;
pub use databases::DatabasesClient;
pub use endpoints::EndpointsClient;
pub use operations::OperationsClient;
pub use projects::ProjectsClient;
pub use regions::RegionsClient;
pub use roles::RolesClient;
pub use snapshots::SnapshotsClient;
pub use users::UsersClient;

/// Entry point to the Neon API
///
/// # Example
///
/// ```rust,no_run
/// use neon_api::NeonClient;
///
/// # async fn example() -> neon_api::Result<()> {
/// let client = NeonClient::new("napi_...")?;
/// for project in client.projects().list(Default::default()).await? {
///     println!("{} {:?}", project.id, project.name);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct NeonClient {
    api: NeonApi,
}

impl NeonClient {
    /// Client for the production API using the default transport
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(ClientConfig::new(api_key), DEFAULT_TIMEOUT)
    }

    /// Client with custom settings using the default transport
    pub fn with_config(config: ClientConfig, timeout: Duration) -> Result<Self> {
        Ok(Self {
            api: NeonApi::with_timeout(config, timeout)?,
        })
    }

    /// Client using a caller-supplied transport
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            api: NeonApi::new(config, transport),
        }
    }

    /// Low-level access for endpoints not covered by a handler
    pub fn api(&self) -> &NeonApi {
        &self.api
    }

    pub fn users(&self) -> UsersClient {
        UsersClient::new(self.api.clone())
    }

    pub fn api_keys(&self) -> ApiKeysClient {
        ApiKeysClient::new(self.api.clone())
    }

    pub fn projects(&self) -> ProjectsClient {
        ProjectsClient::new(self.api.clone())
    }

    pub fn branches(&self) -> BranchesClient {
        BranchesClient::new(self.api.clone())
    }

    pub fn endpoints(&self) -> EndpointsClient {
        EndpointsClient::new(self.api.clone())
    }

    pub fn databases(&self) -> DatabasesClient {
        DatabasesClient::new(self.api.clone())
    }

    pub fn roles(&self) -> RolesClient {
        RolesClient::new(self.api.clone())
    }

    pub fn operations(&self) -> OperationsClient {
        OperationsClient::new(self.api.clone())
    }

    pub fn snapshots(&self) -> SnapshotsClient {
        SnapshotsClient::new(self.api.clone())
    }

    pub fn regions(&self) -> RegionsClient {
        RegionsClient::new(self.api.clone())
    }

    pub fn consumption(&self) -> ConsumptionClient {
        ConsumptionClient::new(self.api.clone())
    }
}

impl From<NeonApi> for NeonClient {
    fn from(api: NeonApi) -> Self {
        Self { api }
    }
}

/// Percent-encode a path segment (ids, database and role names)
pub(crate) fn segment(value: &str) -> Cow<'_, str> {
    urlencoding::encode(value)
}

/// `projects/{project_id}/branches/{branch_id}`
pub(crate) fn branch_path(project_id: &str, branch_id: &str) -> String {
    format!(
        "projects/{}/branches/{}",
        segment(project_id),
        segment(branch_id)
    )
}

/// Record stored under `key` of a response
pub(crate) fn field<T: Model>(value: Value, key: &'static str) -> Result<T> {
    let mut body = into_object(value)?;
    Ok(hydrate_field(&mut body, key)?)
}

/// List stored under `key` of a response
pub(crate) fn list<T: Model>(value: Value, key: &'static str) -> Result<Vec<T>> {
    let mut body = into_object(value)?;
    Ok(hydrate_list(&mut body, key)?)
}

/// Whole response as one record
pub(crate) fn record<T: Model>(value: Value) -> Result<T> {
    Ok(T::from_value(value)?)
}
