//! Request bodies
//!
//! Callers may send either a typed record (a model or a params builder) or
//! a raw key/value map. Both go through [`RequestBody::to_payload`].

use std::fmt;

use serde_json::Value;

use crate::error::DecodeError;
use crate::models::{Payload, ToPayload};

/// A JSON object request body
pub enum RequestBody {
    /// A typed record serialized on demand
    Record(Box<dyn ToPayload + Send + Sync>),
    /// A raw key/value map
    Map(Payload),
}

impl RequestBody {
    pub fn record<T: ToPayload + Send + Sync + 'static>(record: T) -> Self {
        RequestBody::Record(Box::new(record))
    }

    /// Wire representation of the body
    pub fn to_payload(&self) -> Payload {
        match self {
            RequestBody::Record(record) => record.to_payload(),
            RequestBody::Map(map) => map.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            RequestBody::Record(record) => record.to_payload().is_empty(),
            RequestBody::Map(map) => map.is_empty(),
        }
    }

    /// Nest this body under `key`, e.g. `{"database": {...}}`
    #[must_use]
    pub fn wrapped(self, key: &str) -> RequestBody {
        let mut outer = Payload::new();
        outer.insert(key.to_string(), Value::Object(self.to_payload()));
        RequestBody::Map(outer)
    }

    /// Add a top-level key next to the existing ones
    #[must_use]
    pub fn with_field(self, key: &str, value: Value) -> RequestBody {
        let mut payload = self.to_payload();
        payload.insert(key.to_string(), value);
        RequestBody::Map(payload)
    }

    /// Encode as JSON bytes
    pub fn to_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(&self.to_payload())
    }
}

impl fmt::Debug for RequestBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let variant = match self {
            RequestBody::Record(_) => "Record",
            RequestBody::Map(_) => "Map",
        };
        f.debug_tuple(variant).field(&self.to_payload()).finish()
    }
}

impl From<Payload> for RequestBody {
    fn from(map: Payload) -> Self {
        RequestBody::Map(map)
    }
}

impl TryFrom<Value> for RequestBody {
    type Error = DecodeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(RequestBody::Map(map)),
            other => Err(DecodeError::shape("an object", &other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::CreateDatabaseParams;
    use serde_json::json;

    #[test]
    fn test_map_and_record_share_payload() {
        let record: RequestBody = CreateDatabaseParams::new("app", "app_owner").into();
        let map = RequestBody::try_from(json!({"name": "app", "owner_name": "app_owner"})).unwrap();
        assert_eq!(record.to_payload(), map.to_payload());
    }

    #[test]
    fn test_wrapped() {
        let body: RequestBody = CreateDatabaseParams::new("app", "app_owner").into();
        let wrapped = body.wrapped("database");
        assert_eq!(
            Value::Object(wrapped.to_payload()),
            json!({"database": {"name": "app", "owner_name": "app_owner"}})
        );
        assert!(!wrapped.is_empty());
    }

    #[test]
    fn test_with_field() {
        let body = RequestBody::from(Payload::new()).with_field("key_name", json!("ci"));
        assert_eq!(body.to_json().unwrap(), br#"{"key_name":"ci"}"#.to_vec());
    }

    #[test]
    fn test_empty_detection() {
        assert!(RequestBody::from(Payload::new()).is_empty());
        assert!(RequestBody::try_from(json!([1, 2])).is_err());
    }
}
