use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::impl_model;

/// A Postgres database on a branch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Database {
    pub id: i64,
    pub branch_id: String,
    pub name: String,
    pub owner_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl_model!(Database);
