//! Test helpers for code built on top of this crate
//!
//! [`RecordingTransport`] replays canned responses without any network and
//! keeps every request it saw. With the `test-support` feature,
//! [`MockNeonServer`] runs a local wiremock server speaking the Neon wire
//! format, and [`fixtures`] builds realistic JSON records.
//!
//! ```rust,ignore
//! use neon_api::testing::{MockNeonServer, fixtures::ProjectFixture};
//!
//! let server = MockNeonServer::start().await;
//! server
//!     .mock_projects_list(vec![ProjectFixture::new("p-1").name("demo").build()])
//!     .await;
//!
//! let page = server.client().projects().list(Default::default()).await?;
//! assert_eq!(page.len(), 1);
//! ```

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use serde_json::Value;

use crate::transport::{ApiRequest, ApiResponse, HttpTransport, TransportError};

/// Transport that answers from a queue and records requests
#[derive(Debug, Default)]
pub struct RecordingTransport {
    responses: Mutex<VecDeque<ApiResponse>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a JSON response
    #[must_use]
    pub fn respond(self, status: u16, body: Value) -> Self {
        self.push(ApiResponse::json(status, &body));
        self
    }

    /// Queue a raw response
    pub fn push(&self, response: ApiResponse) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(response);
    }

    /// Requests seen so far, oldest first
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Most recent request
    pub fn last_request(&self) -> Option<ApiRequest> {
        self.requests().pop()
    }
}

#[async_trait]
impl HttpTransport for RecordingTransport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .ok_or_else(|| {
                format!("no response queued for {} {}", request.method(), request.url()).into()
            })
    }
}

#[cfg(feature = "test-support")]
pub use server::MockNeonServer;

#[cfg(feature = "test-support")]
mod server {
    use serde_json::{Value, json};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::api::ClientConfig;
    use crate::clients::NeonClient;

    /// API key the mock server expects
    pub const TEST_API_KEY: &str = "napi_test_key";

    /// Local server mimicking `https://console.neon.tech/api/v2`
    pub struct MockNeonServer {
        server: MockServer,
    }

    impl MockNeonServer {
        pub async fn start() -> Self {
            Self {
                server: MockServer::start().await,
            }
        }

        /// Base URL including the `/api/v2/` prefix
        pub fn base_url(&self) -> String {
            format!("{}/api/v2/", self.server.uri())
        }

        pub fn uri(&self) -> String {
            self.server.uri()
        }

        /// Client pointed at this server
        pub fn client(&self) -> NeonClient {
            let config = ClientConfig::new(TEST_API_KEY).with_base_url(self.base_url());
            match NeonClient::with_config(config, crate::transport::DEFAULT_TIMEOUT) {
                Ok(client) => client,
                Err(e) => panic!("failed to build mock client: {e}"),
            }
        }

        /// Underlying wiremock server for custom expectations
        pub fn inner(&self) -> &MockServer {
            &self.server
        }

        /// Mount a response for `method` on a path relative to `/api/v2`
        pub async fn mock_path(
            &self,
            http_method: &str,
            api_path: &str,
            response: ResponseTemplate,
        ) {
            Mock::given(method(http_method))
                .and(path(format!("/api/v2{api_path}")))
                .respond_with(response)
                .mount(&self.server)
                .await;
        }

        pub async fn mock_json(&self, http_method: &str, api_path: &str, body: Value) {
            self.mock_path(
                http_method,
                api_path,
                ResponseTemplate::new(200).set_body_json(body),
            )
            .await;
        }

        /// Neon-shaped error body
        pub async fn mock_error(
            &self,
            http_method: &str,
            api_path: &str,
            status: u16,
            message: &str,
        ) {
            self.mock_path(
                http_method,
                api_path,
                ResponseTemplate::new(status).set_body_json(json!({
                    "code": "",
                    "message": message
                })),
            )
            .await;
        }

        pub async fn mock_current_user(&self, user: Value) {
            self.mock_json("GET", "/users/me", user).await;
        }

        pub async fn mock_projects_list(&self, projects: Vec<Value>) {
            self.mock_json("GET", "/projects", json!({ "projects": projects }))
                .await;
        }

        pub async fn mock_project_get(&self, project_id: &str, project: Value) {
            self.mock_json(
                "GET",
                &format!("/projects/{project_id}"),
                json!({ "project": project }),
            )
            .await;
        }

        pub async fn mock_branches_list(&self, project_id: &str, branches: Vec<Value>) {
            self.mock_json(
                "GET",
                &format!("/projects/{project_id}/branches"),
                json!({ "branches": branches }),
            )
            .await;
        }

        pub async fn mock_branch_get(&self, project_id: &str, branch_id: &str, branch: Value) {
            self.mock_json(
                "GET",
                &format!("/projects/{project_id}/branches/{branch_id}"),
                json!({ "branch": branch }),
            )
            .await;
        }

        pub async fn mock_endpoints_list(&self, project_id: &str, endpoints: Vec<Value>) {
            self.mock_json(
                "GET",
                &format!("/projects/{project_id}/endpoints"),
                json!({ "endpoints": endpoints }),
            )
            .await;
        }

        pub async fn mock_databases_list(
            &self,
            project_id: &str,
            branch_id: &str,
            databases: Vec<Value>,
        ) {
            self.mock_json(
                "GET",
                &format!("/projects/{project_id}/branches/{branch_id}/databases"),
                json!({ "databases": databases }),
            )
            .await;
        }

        pub async fn mock_roles_list(&self, project_id: &str, branch_id: &str, roles: Vec<Value>) {
            self.mock_json(
                "GET",
                &format!("/projects/{project_id}/branches/{branch_id}/roles"),
                json!({ "roles": roles }),
            )
            .await;
        }

        pub async fn mock_operations_list(&self, project_id: &str, operations: Vec<Value>) {
            self.mock_json(
                "GET",
                &format!("/projects/{project_id}/operations"),
                json!({ "operations": operations }),
            )
            .await;
        }

        pub async fn mock_operation_get(
            &self,
            project_id: &str,
            operation_id: &str,
            operation: Value,
        ) {
            self.mock_json(
                "GET",
                &format!("/projects/{project_id}/operations/{operation_id}"),
                json!({ "operation": operation }),
            )
            .await;
        }

        pub async fn mock_regions_list(&self, regions: Vec<Value>) {
            self.mock_json("GET", "/regions", json!({ "regions": regions }))
                .await;
        }
    }
}

#[cfg(feature = "test-support")]
pub use server::TEST_API_KEY;

/// JSON builders for Neon records
///
/// Each fixture starts from a complete, valid record and lets a test
/// override the fields it cares about.
pub mod fixtures {
    use serde_json::{Value, json};

    const CREATED: &str = "2024-03-01T12:00:00Z";

    pub struct ProjectFixture {
        id: String,
        name: String,
        region_id: String,
        pg_version: u32,
        org_id: Option<String>,
    }

    impl ProjectFixture {
        pub fn new(id: impl Into<String>) -> Self {
            Self {
                id: id.into(),
                name: "my-project".to_string(),
                region_id: "aws-us-east-2".to_string(),
                pg_version: 16,
                org_id: None,
            }
        }

        pub fn name(mut self, name: impl Into<String>) -> Self {
            self.name = name.into();
            self
        }

        pub fn region(mut self, region_id: impl Into<String>) -> Self {
            self.region_id = region_id.into();
            self
        }

        pub fn pg_version(mut self, version: u32) -> Self {
            self.pg_version = version;
            self
        }

        pub fn org(mut self, org_id: impl Into<String>) -> Self {
            self.org_id = Some(org_id.into());
            self
        }

        pub fn build(self) -> Value {
            let mut project = json!({
                "id": self.id,
                "platform_id": "aws",
                "region_id": self.region_id,
                "name": self.name,
                "provisioner": "k8s-neonvm",
                "pg_version": self.pg_version,
                "proxy_host": "us-east-2.aws.neon.tech",
                "store_passwords": true,
                "history_retention_seconds": 86400,
                "active_time_seconds": 0,
                "cpu_used_sec": 0,
                "creation_source": "console",
                "owner_id": "user-1",
                "created_at": CREATED,
                "updated_at": CREATED
            });
            if let Some(org_id) = self.org_id {
                project["org_id"] = json!(org_id);
            }
            project
        }
    }

    pub struct BranchFixture {
        id: String,
        project_id: String,
        name: String,
        parent_id: Option<String>,
        state: String,
        default: bool,
    }

    impl BranchFixture {
        pub fn new(id: impl Into<String>, project_id: impl Into<String>) -> Self {
            Self {
                id: id.into(),
                project_id: project_id.into(),
                name: "main".to_string(),
                parent_id: None,
                state: "ready".to_string(),
                default: false,
            }
        }

        pub fn name(mut self, name: impl Into<String>) -> Self {
            self.name = name.into();
            self
        }

        pub fn parent(mut self, parent_id: impl Into<String>) -> Self {
            self.parent_id = Some(parent_id.into());
            self
        }

        pub fn state(mut self, state: impl Into<String>) -> Self {
            self.state = state.into();
            self
        }

        pub fn default_branch(mut self, default: bool) -> Self {
            self.default = default;
            self
        }

        pub fn build(self) -> Value {
            let mut branch = json!({
                "id": self.id,
                "project_id": self.project_id,
                "name": self.name,
                "current_state": self.state,
                "state_changed_at": CREATED,
                "creation_source": "console",
                "default": self.default,
                "protected": false,
                "cpu_used_sec": 0,
                "compute_time_seconds": 0,
                "active_time_seconds": 0,
                "written_data_bytes": 0,
                "data_transfer_bytes": 0,
                "logical_size": 30_000_000,
                "created_at": CREATED,
                "updated_at": CREATED
            });
            if let Some(parent_id) = self.parent_id {
                branch["parent_id"] = json!(parent_id);
            }
            branch
        }
    }

    pub struct EndpointFixture {
        id: String,
        project_id: String,
        branch_id: String,
        endpoint_type: String,
        state: String,
        min_cu: f64,
        max_cu: f64,
    }

    impl EndpointFixture {
        pub fn new(
            id: impl Into<String>,
            project_id: impl Into<String>,
            branch_id: impl Into<String>,
        ) -> Self {
            Self {
                id: id.into(),
                project_id: project_id.into(),
                branch_id: branch_id.into(),
                endpoint_type: "read_write".to_string(),
                state: "idle".to_string(),
                min_cu: 0.25,
                max_cu: 0.25,
            }
        }

        pub fn read_only(mut self) -> Self {
            self.endpoint_type = "read_only".to_string();
            self
        }

        pub fn state(mut self, state: impl Into<String>) -> Self {
            self.state = state.into();
            self
        }

        pub fn autoscaling(mut self, min_cu: f64, max_cu: f64) -> Self {
            self.min_cu = min_cu;
            self.max_cu = max_cu;
            self
        }

        pub fn build(self) -> Value {
            json!({
                "id": self.id,
                "host": format!("{}.us-east-2.aws.neon.tech", self.id),
                "project_id": self.project_id,
                "branch_id": self.branch_id,
                "region_id": "aws-us-east-2",
                "autoscaling_limit_min_cu": self.min_cu,
                "autoscaling_limit_max_cu": self.max_cu,
                "type": self.endpoint_type,
                "current_state": self.state,
                "settings": {},
                "pooler_enabled": false,
                "pooler_mode": "transaction",
                "disabled": false,
                "passwordless_access": true,
                "provisioner": "k8s-neonvm",
                "suspend_timeout_seconds": 0,
                "created_at": CREATED,
                "updated_at": CREATED
            })
        }
    }

    pub struct DatabaseFixture {
        id: i64,
        branch_id: String,
        name: String,
        owner_name: String,
    }

    impl DatabaseFixture {
        pub fn new(id: i64, branch_id: impl Into<String>, name: impl Into<String>) -> Self {
            Self {
                id,
                branch_id: branch_id.into(),
                name: name.into(),
                owner_name: "neondb_owner".to_string(),
            }
        }

        pub fn owner(mut self, owner_name: impl Into<String>) -> Self {
            self.owner_name = owner_name.into();
            self
        }

        pub fn build(self) -> Value {
            json!({
                "id": self.id,
                "branch_id": self.branch_id,
                "name": self.name,
                "owner_name": self.owner_name,
                "created_at": CREATED,
                "updated_at": CREATED
            })
        }
    }

    pub struct RoleFixture {
        branch_id: String,
        name: String,
        password: Option<String>,
        protected: bool,
    }

    impl RoleFixture {
        pub fn new(branch_id: impl Into<String>, name: impl Into<String>) -> Self {
            Self {
                branch_id: branch_id.into(),
                name: name.into(),
                password: None,
                protected: false,
            }
        }

        pub fn password(mut self, password: impl Into<String>) -> Self {
            self.password = Some(password.into());
            self
        }

        pub fn protected(mut self, protected: bool) -> Self {
            self.protected = protected;
            self
        }

        pub fn build(self) -> Value {
            let mut role = json!({
                "branch_id": self.branch_id,
                "name": self.name,
                "protected": self.protected,
                "created_at": CREATED,
                "updated_at": CREATED
            });
            if let Some(password) = self.password {
                role["password"] = json!(password);
            }
            role
        }
    }

    pub struct OperationFixture {
        id: String,
        project_id: String,
        action: String,
        status: String,
        branch_id: Option<String>,
        endpoint_id: Option<String>,
    }

    impl OperationFixture {
        pub fn new(id: impl Into<String>, project_id: impl Into<String>) -> Self {
            Self {
                id: id.into(),
                project_id: project_id.into(),
                action: "apply_config".to_string(),
                status: "running".to_string(),
                branch_id: None,
                endpoint_id: None,
            }
        }

        pub fn action(mut self, action: impl Into<String>) -> Self {
            self.action = action.into();
            self
        }

        pub fn status(mut self, status: impl Into<String>) -> Self {
            self.status = status.into();
            self
        }

        pub fn branch(mut self, branch_id: impl Into<String>) -> Self {
            self.branch_id = Some(branch_id.into());
            self
        }

        pub fn endpoint(mut self, endpoint_id: impl Into<String>) -> Self {
            self.endpoint_id = Some(endpoint_id.into());
            self
        }

        pub fn build(self) -> Value {
            let mut operation = json!({
                "id": self.id,
                "project_id": self.project_id,
                "action": self.action,
                "status": self.status,
                "failures_count": 0,
                "created_at": CREATED,
                "updated_at": CREATED,
                "total_duration_ms": 0
            });
            if let Some(branch_id) = self.branch_id {
                operation["branch_id"] = json!(branch_id);
            }
            if let Some(endpoint_id) = self.endpoint_id {
                operation["endpoint_id"] = json!(endpoint_id);
            }
            operation
        }
    }

    pub struct SnapshotFixture {
        id: String,
        name: String,
        source_branch_id: Option<String>,
    }

    impl SnapshotFixture {
        pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
            Self {
                id: id.into(),
                name: name.into(),
                source_branch_id: None,
            }
        }

        pub fn source_branch(mut self, branch_id: impl Into<String>) -> Self {
            self.source_branch_id = Some(branch_id.into());
            self
        }

        pub fn build(self) -> Value {
            let mut snapshot = json!({
                "id": self.id,
                "name": self.name,
                "manual": true,
                "created_at": CREATED
            });
            if let Some(branch_id) = self.source_branch_id {
                snapshot["source_branch_id"] = json!(branch_id);
            }
            snapshot
        }
    }

    pub struct RegionFixture {
        region_id: String,
        name: String,
        default: bool,
    }

    impl RegionFixture {
        pub fn new(region_id: impl Into<String>, name: impl Into<String>) -> Self {
            Self {
                region_id: region_id.into(),
                name: name.into(),
                default: false,
            }
        }

        pub fn default_region(mut self, default: bool) -> Self {
            self.default = default;
            self
        }

        pub fn build(self) -> Value {
            json!({
                "region_id": self.region_id,
                "name": self.name,
                "default": self.default,
                "geo_lat": "39.0438",
                "geo_long": "-77.4874"
            })
        }
    }
}
