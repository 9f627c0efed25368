//! Current user and organization membership

use serde_json::Value;

use super::{list, record};
use crate::api::NeonApi;
use crate::error::Result;
use crate::models::{AuthDetails, Organization, User};
use crate::params::TransferProjectsParams;

/// Handler for `users/me` and `auth`
#[derive(Debug, Clone)]
pub struct UsersClient {
    api: NeonApi,
}

impl UsersClient {
    pub fn new(api: NeonApi) -> Self {
        Self { api }
    }

    pub async fn current_user(&self) -> Result<User> {
        let body = self.api.get("users/me").await?;
        record(body)
    }

    pub async fn organizations(&self) -> Result<Vec<Organization>> {
        let body = self.api.get("users/me/organizations").await?;
        list(body, "organizations")
    }

    /// Move personal projects into an organization
    ///
    /// The response has no fixed shape and is returned as decoded JSON.
    pub async fn transfer_projects(&self, transfer: TransferProjectsParams) -> Result<Value> {
        self.api
            .post("users/me/projects/transfer", Some(transfer.into()))
            .await
    }

    /// How the configured key authenticates
    pub async fn auth_details(&self) -> Result<AuthDetails> {
        let body = self.api.get("auth").await?;
        record(body)
    }
}
