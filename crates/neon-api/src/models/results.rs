//! Compound responses and pagination
//!
//! Mutations that trigger provisioning return the affected resource along
//! with the operations the control plane scheduled for it. Those operations
//! are returned as-is; nothing here waits for them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{
    Branch, ConnectionUri, Database, Endpoint, Model, Operation, Payload, Project, Role, Snapshot,
    hydrate_list, impl_model, into_object,
};
use crate::error::DecodeError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectCreated {
    pub project: Project,
    pub branch: Branch,
    pub operations: Vec<Operation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub endpoints: Vec<Endpoint>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub databases: Vec<Database>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<Role>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub connection_uris: Vec<ConnectionUri>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectOperations {
    pub project: Project,
    pub operations: Vec<Operation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchCreated {
    pub branch: Branch,
    pub operations: Vec<Operation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub endpoints: Vec<Endpoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchOperations {
    pub branch: Branch,
    pub operations: Vec<Operation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointOperations {
    pub endpoint: Endpoint,
    pub operations: Vec<Operation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseOperations {
    pub database: Database,
    pub operations: Vec<Operation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleOperations {
    pub role: Role,
    pub operations: Vec<Operation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotOperations {
    pub snapshot: Snapshot,
    pub operations: Vec<Operation>,
}

/// Result of restoring a snapshot into a branch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotRestored {
    pub branch: Branch,
    pub operations: Vec<Operation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub endpoints: Vec<Endpoint>,
}

impl_model!(
    ProjectCreated,
    ProjectOperations,
    BranchCreated,
    BranchOperations,
    EndpointOperations,
    DatabaseOperations,
    RoleOperations,
    SnapshotOperations,
    SnapshotRestored,
);

/// One page of a cursor-paginated listing
///
/// Pass `next_cursor` back to the list call to fetch the following page.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_cursor: Option<String>,
}

impl<T> Page<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T: Model> Page<T> {
    /// Read `field` and the `pagination.cursor` of a list response
    pub fn from_response(body: Value, field: &'static str) -> Result<Self, DecodeError> {
        let mut body = into_object(body)?;
        let items = hydrate_list(&mut body, field)?;
        Ok(Self {
            items,
            next_cursor: pagination_cursor(&body),
        })
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

fn pagination_cursor(body: &Payload) -> Option<String> {
    body.get("pagination")
        .and_then(|p| p.get("cursor"))
        .and_then(Value::as_str)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
}
