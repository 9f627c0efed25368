//! Convenience parameter structs for common operations
//!
//! Each struct covers the options most callers need and converts into a
//! [`RequestBody`](crate::RequestBody) or a [`Query`]. For anything not covered,
//! pass a raw [`Payload`](crate::models::Payload) instead.
//!
//! # Example
//!
//! ```rust
//! use neon_api::params::{CreateEndpointParams, ListProjectsParams};
//! use neon_api::models::EndpointType;
//!
//! let endpoint = CreateEndpointParams::new("br-quiet-1", EndpointType::ReadOnly)
//!     .with_autoscaling(0.25, 2.0)
//!     .with_suspend_timeout_seconds(300);
//!
//! let listing = ListProjectsParams::new().with_limit(50).with_search("staging");
//! assert_eq!(listing.to_query().build(), "?limit=50&search=staging");
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::models::{EndpointType, Granularity, Payload, ProjectSettings, impl_payload};
use crate::query::Query;

/// Cursor and page size for plain paginated listings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageParams {
    pub cursor: Option<String>,
    pub limit: Option<u32>,
}

impl PageParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn to_query(&self) -> Query {
        Query::new()
            .param("cursor", &self.cursor)
            .param("limit", self.limit)
    }
}

/// Filters for listing projects
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListProjectsParams {
    pub cursor: Option<String>,
    /// Page size, 1 to 400; the server defaults to 10
    pub limit: Option<u32>,
    /// Matches project names and ids
    pub search: Option<String>,
    /// Organization scope; ignored for shared projects
    pub org_id: Option<String>,
    /// Server-side timeout in milliseconds for the listing
    pub timeout: Option<u32>,
}

impl ListProjectsParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    #[must_use]
    pub fn with_org_id(mut self, org_id: impl Into<String>) -> Self {
        self.org_id = Some(org_id.into());
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout_ms: u32) -> Self {
        self.timeout = Some(timeout_ms);
        self
    }

    pub fn to_query(&self) -> Query {
        Query::new()
            .param("cursor", &self.cursor)
            .param("limit", self.limit)
            .param("search", &self.search)
            .param("org_id", &self.org_id)
            .param("timeout", self.timeout)
    }

    pub(crate) fn to_shared_query(&self) -> Query {
        Query::new()
            .param("cursor", &self.cursor)
            .param("limit", self.limit)
            .param("search", &self.search)
            .param("timeout", self.timeout)
    }
}

/// Initial branch settings for a new project
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectBranchSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_name: Option<String>,
}

/// Body of a project create call (sent under `project`)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateProjectParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pg_version: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_passwords: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_retention_seconds: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<ProjectBranchSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<ProjectSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_endpoint_settings: Option<Payload>,
}

impl CreateProjectParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_region(mut self, region_id: impl Into<String>) -> Self {
        self.region_id = Some(region_id.into());
        self
    }

    #[must_use]
    pub fn with_pg_version(mut self, pg_version: u32) -> Self {
        self.pg_version = Some(pg_version);
        self
    }

    #[must_use]
    pub fn with_org_id(mut self, org_id: impl Into<String>) -> Self {
        self.org_id = Some(org_id.into());
        self
    }

    #[must_use]
    pub fn with_store_passwords(mut self, store: bool) -> Self {
        self.store_passwords = Some(store);
        self
    }

    #[must_use]
    pub fn with_history_retention_seconds(mut self, seconds: u32) -> Self {
        self.history_retention_seconds = Some(seconds);
        self
    }

    #[must_use]
    pub fn with_branch(mut self, branch: ProjectBranchSpec) -> Self {
        self.branch = Some(branch);
        self
    }

    #[must_use]
    pub fn with_settings(mut self, settings: ProjectSettings) -> Self {
        self.settings = Some(settings);
        self
    }
}

/// Body of a project update call (sent under `project`)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateProjectParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_retention_seconds: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<ProjectSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_endpoint_settings: Option<Payload>,
}

impl UpdateProjectParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_history_retention_seconds(mut self, seconds: u32) -> Self {
        self.history_retention_seconds = Some(seconds);
        self
    }

    #[must_use]
    pub fn with_settings(mut self, settings: ProjectSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.history_retention_seconds.is_none()
            && self.settings.is_none()
            && self.default_endpoint_settings.is_none()
    }
}

/// Options for fetching a connection string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionUriParams {
    pub database_name: String,
    pub role_name: String,
    /// Defaults to the project's default branch
    pub branch_id: Option<String>,
    /// Defaults to the branch's read-write endpoint
    pub endpoint_id: Option<String>,
    /// Use the connection pooler host
    pub pooled: Option<bool>,
}

impl ConnectionUriParams {
    #[must_use]
    pub fn new(database_name: impl Into<String>, role_name: impl Into<String>) -> Self {
        Self {
            database_name: database_name.into(),
            role_name: role_name.into(),
            branch_id: None,
            endpoint_id: None,
            pooled: None,
        }
    }

    #[must_use]
    pub fn with_branch(mut self, branch_id: impl Into<String>) -> Self {
        self.branch_id = Some(branch_id.into());
        self
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint_id: impl Into<String>) -> Self {
        self.endpoint_id = Some(endpoint_id.into());
        self
    }

    #[must_use]
    pub fn with_pooled(mut self, pooled: bool) -> Self {
        self.pooled = Some(pooled);
        self
    }

    pub fn to_query(&self) -> Query {
        Query::new()
            .param("branch_id", &self.branch_id)
            .param("endpoint_id", &self.endpoint_id)
            .param("database_name", self.database_name.as_str())
            .param("role_name", self.role_name.as_str())
            .param("pooled", self.pooled)
    }
}

/// Compute settings for an endpoint created together with a branch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BranchEndpointSpec {
    #[serde(rename = "type")]
    pub endpoint_type: EndpointType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autoscaling_limit_min_cu: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autoscaling_limit_max_cu: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suspend_timeout_seconds: Option<i64>,
}

impl BranchEndpointSpec {
    #[must_use]
    pub fn new(endpoint_type: EndpointType) -> Self {
        Self {
            endpoint_type,
            autoscaling_limit_min_cu: None,
            autoscaling_limit_max_cu: None,
            suspend_timeout_seconds: None,
        }
    }

    #[must_use]
    pub fn with_autoscaling(mut self, min_cu: f64, max_cu: f64) -> Self {
        self.autoscaling_limit_min_cu = Some(min_cu);
        self.autoscaling_limit_max_cu = Some(max_cu);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
struct BranchSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    parent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent_lsn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent_timestamp: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    protected: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    expires_at: Option<DateTime<Utc>>,
}

/// Full body of a branch create call: `{"branch": {...}, "endpoints": [...]}`
///
/// Without a parent the branch forks from the project's default branch.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateBranchParams {
    branch: BranchSpec,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    endpoints: Vec<BranchEndpointSpec>,
}

impl CreateBranchParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.branch.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.branch.parent_id = Some(parent_id.into());
        self
    }

    /// Fork from a log sequence number of the parent
    #[must_use]
    pub fn with_parent_lsn(mut self, lsn: impl Into<String>) -> Self {
        self.branch.parent_lsn = Some(lsn.into());
        self
    }

    /// Fork from a point in time of the parent
    #[must_use]
    pub fn with_parent_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.branch.parent_timestamp = Some(timestamp);
        self
    }

    #[must_use]
    pub fn with_protected(mut self, protected: bool) -> Self {
        self.branch.protected = Some(protected);
        self
    }

    #[must_use]
    pub fn with_expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.branch.expires_at = Some(expires_at);
        self
    }

    /// Also create a compute endpoint on the new branch
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: BranchEndpointSpec) -> Self {
        self.endpoints.push(endpoint);
        self
    }
}

/// Body of a branch update call (sent under `branch`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdateBranchParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protected: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl UpdateBranchParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_protected(mut self, protected: bool) -> Self {
        self.protected = Some(protected);
        self
    }
}

/// Body of an endpoint create call (sent under `endpoint`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateEndpointParams {
    pub branch_id: String,
    #[serde(rename = "type")]
    pub endpoint_type: EndpointType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autoscaling_limit_min_cu: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autoscaling_limit_max_cu: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suspend_timeout_seconds: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pooler_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pooler_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passwordless_access: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<Payload>,
}

impl CreateEndpointParams {
    #[must_use]
    pub fn new(branch_id: impl Into<String>, endpoint_type: EndpointType) -> Self {
        Self {
            branch_id: branch_id.into(),
            endpoint_type,
            region_id: None,
            autoscaling_limit_min_cu: None,
            autoscaling_limit_max_cu: None,
            suspend_timeout_seconds: None,
            pooler_enabled: None,
            pooler_mode: None,
            disabled: None,
            passwordless_access: None,
            settings: None,
        }
    }

    #[must_use]
    pub fn with_region(mut self, region_id: impl Into<String>) -> Self {
        self.region_id = Some(region_id.into());
        self
    }

    /// Compute units range, e.g. `0.25..=4.0`
    #[must_use]
    pub fn with_autoscaling(mut self, min_cu: f64, max_cu: f64) -> Self {
        self.autoscaling_limit_min_cu = Some(min_cu);
        self.autoscaling_limit_max_cu = Some(max_cu);
        self
    }

    /// Idle seconds before suspend; `-1` disables, `0` uses the default
    #[must_use]
    pub fn with_suspend_timeout_seconds(mut self, seconds: i64) -> Self {
        self.suspend_timeout_seconds = Some(seconds);
        self
    }

    #[must_use]
    pub fn with_pooler(mut self, enabled: bool) -> Self {
        self.pooler_enabled = Some(enabled);
        self
    }

    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = Some(disabled);
        self
    }
}

/// Body of an endpoint update call (sent under `endpoint`)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateEndpointParams {
    /// Moves the endpoint to another branch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autoscaling_limit_min_cu: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autoscaling_limit_max_cu: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suspend_timeout_seconds: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pooler_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passwordless_access: Option<bool>,
}

impl UpdateEndpointParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_branch(mut self, branch_id: impl Into<String>) -> Self {
        self.branch_id = Some(branch_id.into());
        self
    }

    #[must_use]
    pub fn with_autoscaling(mut self, min_cu: f64, max_cu: f64) -> Self {
        self.autoscaling_limit_min_cu = Some(min_cu);
        self.autoscaling_limit_max_cu = Some(max_cu);
        self
    }

    #[must_use]
    pub fn with_suspend_timeout_seconds(mut self, seconds: i64) -> Self {
        self.suspend_timeout_seconds = Some(seconds);
        self
    }

    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = Some(disabled);
        self
    }
}

/// Body of a database create call (sent under `database`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateDatabaseParams {
    pub name: String,
    pub owner_name: String,
}

impl CreateDatabaseParams {
    #[must_use]
    pub fn new(name: impl Into<String>, owner_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            owner_name: owner_name.into(),
        }
    }
}

/// Body of a database update call (sent under `database`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdateDatabaseParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,
}

impl UpdateDatabaseParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_owner(mut self, owner_name: impl Into<String>) -> Self {
        self.owner_name = Some(owner_name.into());
        self
    }
}

/// Body of a role create call (sent under `role`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateRoleParams {
    pub name: String,
    /// Create a role that cannot log in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_login: Option<bool>,
}

impl CreateRoleParams {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            no_login: None,
        }
    }

    #[must_use]
    pub fn with_no_login(mut self, no_login: bool) -> Self {
        self.no_login = Some(no_login);
        self
    }
}

/// Body of a snapshot create call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreateSnapshotParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lsn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl CreateSnapshotParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_lsn(mut self, lsn: impl Into<String>) -> Self {
        self.lsn = Some(lsn.into());
        self
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    #[must_use]
    pub fn with_expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }
}

/// Body of a snapshot update call (sent under `snapshot`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdateSnapshotParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl UpdateSnapshotParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }
}

/// Body of a snapshot restore call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RestoreSnapshotParams {
    /// Name of the branch created from the snapshot
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Restore onto an existing branch instead of creating one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_branch_id: Option<String>,
    /// Move the target branch's computes to the restored branch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finalize_restore: Option<bool>,
}

impl RestoreSnapshotParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_target_branch(mut self, branch_id: impl Into<String>) -> Self {
        self.target_branch_id = Some(branch_id.into());
        self
    }

    #[must_use]
    pub fn with_finalize_restore(mut self, finalize: bool) -> Self {
        self.finalize_restore = Some(finalize);
        self
    }
}

/// Time range and filters for account consumption
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountConsumptionParams {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub granularity: Granularity,
    pub org_id: Option<String>,
    pub include_v1_metrics: Option<bool>,
    /// Restrict to named metrics, e.g. `compute_unit_seconds`
    pub metrics: Vec<String>,
}

impl AccountConsumptionParams {
    #[must_use]
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>, granularity: Granularity) -> Self {
        Self {
            from,
            to,
            granularity,
            org_id: None,
            include_v1_metrics: None,
            metrics: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_org_id(mut self, org_id: impl Into<String>) -> Self {
        self.org_id = Some(org_id.into());
        self
    }

    #[must_use]
    pub fn with_v1_metrics(mut self, include: bool) -> Self {
        self.include_v1_metrics = Some(include);
        self
    }

    #[must_use]
    pub fn with_metric(mut self, metric: impl Into<String>) -> Self {
        self.metrics.push(metric.into());
        self
    }

    pub fn to_query(&self) -> Query {
        Query::new()
            .param("from", self.from)
            .param("to", self.to)
            .param("granularity", self.granularity)
            .param("org_id", &self.org_id)
            .param("include_v1_metrics", self.include_v1_metrics)
            .param("metrics", &self.metrics)
    }
}

/// Time range, filters and pagination for per-project consumption
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConsumptionParams {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub granularity: Granularity,
    pub cursor: Option<String>,
    pub limit: Option<u32>,
    pub project_ids: Vec<String>,
    pub org_id: Option<String>,
    pub include_v1_metrics: Option<bool>,
    pub metrics: Vec<String>,
}

impl ProjectConsumptionParams {
    #[must_use]
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>, granularity: Granularity) -> Self {
        Self {
            from,
            to,
            granularity,
            cursor: None,
            limit: None,
            project_ids: Vec::new(),
            org_id: None,
            include_v1_metrics: None,
            metrics: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn with_project(mut self, project_id: impl Into<String>) -> Self {
        self.project_ids.push(project_id.into());
        self
    }

    #[must_use]
    pub fn with_org_id(mut self, org_id: impl Into<String>) -> Self {
        self.org_id = Some(org_id.into());
        self
    }

    #[must_use]
    pub fn with_v1_metrics(mut self, include: bool) -> Self {
        self.include_v1_metrics = Some(include);
        self
    }

    #[must_use]
    pub fn with_metric(mut self, metric: impl Into<String>) -> Self {
        self.metrics.push(metric.into());
        self
    }

    pub fn to_query(&self) -> Query {
        Query::new()
            .param("cursor", &self.cursor)
            .param("limit", self.limit)
            .param("project_ids", &self.project_ids)
            .param("from", self.from)
            .param("to", self.to)
            .param("granularity", self.granularity)
            .param("org_id", &self.org_id)
            .param("include_v1_metrics", self.include_v1_metrics)
            .param("metrics", &self.metrics)
    }
}

/// Body of a project transfer between organizations
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferProjectsParams {
    pub destination_org_id: String,
    pub project_ids: Vec<String>,
}

impl TransferProjectsParams {
    #[must_use]
    pub fn new(destination_org_id: impl Into<String>) -> Self {
        Self {
            destination_org_id: destination_org_id.into(),
            project_ids: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_project(mut self, project_id: impl Into<String>) -> Self {
        self.project_ids.push(project_id.into());
        self
    }
}

/// Body of an API key create call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateApiKeyParams {
    pub key_name: String,
}

impl CreateApiKeyParams {
    #[must_use]
    pub fn new(key_name: impl Into<String>) -> Self {
        Self {
            key_name: key_name.into(),
        }
    }
}

impl_payload!(
    ProjectBranchSpec,
    CreateProjectParams,
    UpdateProjectParams,
    BranchEndpointSpec,
    CreateBranchParams,
    UpdateBranchParams,
    CreateEndpointParams,
    UpdateEndpointParams,
    CreateDatabaseParams,
    UpdateDatabaseParams,
    CreateRoleParams,
    CreateSnapshotParams,
    UpdateSnapshotParams,
    RestoreSnapshotParams,
    TransferProjectsParams,
    CreateApiKeyParams,
);

/// Settings map from `(key, value)` pairs, for the `settings` fields that the
/// API leaves open-ended
pub fn settings<K: Into<String>>(pairs: impl IntoIterator<Item = (K, Value)>) -> Payload {
    pairs.into_iter().map(|(k, v)| (k.into(), v)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ToPayload;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_create_database_params() {
        let params = CreateDatabaseParams::new("app", "app_owner");
        assert_eq!(
            Value::Object(params.to_payload()),
            json!({"name": "app", "owner_name": "app_owner"})
        );
    }

    #[test]
    fn test_create_branch_params_layout() {
        let params = CreateBranchParams::new()
            .with_name("feature")
            .with_parent("br-quiet-1")
            .with_endpoint(
                BranchEndpointSpec::new(EndpointType::ReadWrite).with_autoscaling(0.25, 1.0),
            );

        assert_eq!(
            Value::Object(params.to_payload()),
            json!({
                "branch": {"parent_id": "br-quiet-1", "name": "feature"},
                "endpoints": [{
                    "type": "read_write",
                    "autoscaling_limit_min_cu": 0.25,
                    "autoscaling_limit_max_cu": 1.0
                }]
            })
        );
    }

    #[test]
    fn test_empty_branch_params_still_send_branch_key() {
        let params = CreateBranchParams::new();
        assert_eq!(Value::Object(params.to_payload()), json!({"branch": {}}));
    }

    #[test]
    fn test_endpoint_params_use_type_key() {
        let params = CreateEndpointParams::new("br-quiet-1", EndpointType::ReadOnly)
            .with_suspend_timeout_seconds(0)
            .with_disabled(false);
        assert_eq!(
            Value::Object(params.to_payload()),
            json!({
                "branch_id": "br-quiet-1",
                "type": "read_only",
                "suspend_timeout_seconds": 0,
                "disabled": false
            })
        );
    }

    #[test]
    fn test_list_projects_query() {
        let params = ListProjectsParams::new()
            .with_limit(20)
            .with_org_id("org-1")
            .with_cursor("abc");
        assert_eq!(params.to_query().build(), "?cursor=abc&limit=20&org_id=org-1");
        assert_eq!(params.to_shared_query().build(), "?cursor=abc&limit=20");
        assert_eq!(ListProjectsParams::new().to_query().build(), "");
    }

    #[test]
    fn test_connection_uri_query() {
        let params = ConnectionUriParams::new("app", "app_owner").with_pooled(true);
        assert_eq!(
            params.to_query().build(),
            "?database_name=app&role_name=app_owner&pooled=true"
        );
    }

    #[test]
    fn test_consumption_query() {
        let from = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let params = ProjectConsumptionParams::new(from, to, Granularity::Daily)
            .with_limit(5)
            .with_project("p-1")
            .with_project("p-2");
        assert_eq!(
            params.to_query().build(),
            concat!(
                "?limit=5&project_ids=p-1%2Cp-2",
                "&from=2024-05-01T00%3A00%3A00Z&to=2024-06-01T00%3A00%3A00Z",
                "&granularity=daily"
            )
        );

        let account = AccountConsumptionParams::new(from, to, Granularity::Monthly)
            .with_v1_metrics(false)
            .with_metric("compute_unit_seconds");
        let query = account.to_query().build();
        let tail = "granularity=monthly&include_v1_metrics=false&metrics=compute_unit_seconds";
        assert!(query.ends_with(tail), "{query}");
    }

    #[test]
    fn test_transfer_params() {
        let params = TransferProjectsParams::new("org-2").with_project("p-1");
        assert_eq!(
            Value::Object(params.to_payload()),
            json!({"destination_org_id": "org-2", "project_ids": ["p-1"]})
        );
    }

    #[test]
    fn test_update_project_is_empty() {
        assert!(UpdateProjectParams::new().is_empty());
        assert!(!UpdateProjectParams::new().with_name("x").is_empty());
    }

    #[test]
    fn test_settings_helper() {
        let map = settings([("pg_settings", json!({"work_mem": "64MB"}))]);
        assert_eq!(map["pg_settings"]["work_mem"], "64MB");
    }
}
