use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{impl_model, wire_enum};

wire_enum! {
    /// Bucket size for consumption history
    pub enum Granularity {
        Hourly => "hourly",
        Daily => "daily",
        Monthly => "monthly",
    }
}

/// Usage within one time bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consumption {
    pub timeframe_start: DateTime<Utc>,
    pub timeframe_end: DateTime<Utc>,
    pub active_time_seconds: i64,
    pub compute_time_seconds: i64,
    pub written_data_bytes: i64,
    pub synthetic_storage_size_bytes: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_storage_bytes_hour: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logical_size_bytes: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logical_size_bytes_hour: Option<i64>,
}

/// A billing period and its consumption buckets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub period_id: String,
    pub period_plan: String,
    pub period_start: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_end: Option<DateTime<Utc>>,
    pub consumption: Vec<Consumption>,
}

/// Consumption history of a single project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConsumption {
    pub project_id: String,
    pub periods: Vec<Period>,
}

impl Period {
    /// Sum of compute seconds across all buckets
    pub fn total_compute_time_seconds(&self) -> i64 {
        self.consumption.iter().map(|c| c.compute_time_seconds).sum()
    }
}

impl_model!(Consumption, Period, ProjectConsumption);
