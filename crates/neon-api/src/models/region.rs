use serde::{Deserialize, Serialize};

use super::impl_model;

/// A region projects can be created in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub region_id: String,
    pub name: String,
    pub default: bool,
    pub geo_lat: String,
    pub geo_long: String,
}

impl_model!(Region);
