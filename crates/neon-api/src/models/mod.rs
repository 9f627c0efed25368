//! Typed records for Neon API resources
//!
//! Every record is a plain serde struct using the API's snake_case wire
//! names. Optional fields are `Option<T>`: absent on the wire means `None`,
//! and `None` is omitted again on the way out, so
//! `T::hydrate(record.to_payload())` always reproduces `record`.
//!
//! Enumerations match wire strings exactly. An unknown value is a
//! [`DecodeError`], never a silent fallback.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{DecodeError, json_kind};

mod account;
mod branch;
mod consumption;
mod database;
mod endpoint;
mod operation;
mod project;
mod region;
mod results;
mod role;
mod snapshot;

pub use account::{ApiKey, ApiKeyCreator, AuthAccount, AuthDetails, Organization, User};
pub use branch::Branch;
pub use consumption::{Consumption, Granularity, Period, ProjectConsumption};
pub use database::Database;
pub use endpoint::{Endpoint, EndpointState, EndpointType};
pub use operation::{Operation, OperationAction, OperationStatus};
pub use project::{
    ConnectionParameters, ConnectionUri, MaintenanceWindow, Project, ProjectOwner, ProjectQuota,
    ProjectSettings,
};
pub use region::Region;
pub use results::{
    BranchCreated, BranchOperations, DatabaseOperations, EndpointOperations, Page,
    ProjectCreated, ProjectOperations, RoleOperations, SnapshotOperations, SnapshotRestored,
};
pub use role::{RevealedPassword, Role};
pub use snapshot::Snapshot;

/// Generic key/value payload as sent and received on the wire
pub type Payload = serde_json::Map<String, Value>;

/// Anything that can be sent as a JSON object body
pub trait ToPayload {
    /// Wire representation; absent optional fields are omitted
    fn to_payload(&self) -> Payload;
}

/// A record hydrated from API responses
pub trait Model: ToPayload + Serialize + DeserializeOwned {
    /// Build the record from a key/value payload
    fn hydrate(payload: Payload) -> Result<Self, DecodeError> {
        Self::from_value(Value::Object(payload))
    }

    /// Build the record from an arbitrary JSON value, which must be an object
    fn from_value(value: Value) -> Result<Self, DecodeError> {
        if !value.is_object() {
            return Err(DecodeError::shape("an object", &value));
        }
        serde_json::from_value(value).map_err(DecodeError::model::<Self>)
    }
}

/// Serialize a derived record into a payload
///
/// Derived structs always serialize to JSON objects, anything else yields an
/// empty payload.
pub(crate) fn serialize_payload<T: Serialize + ?Sized>(value: &T) -> Payload {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => map,
        _ => Payload::new(),
    }
}

/// Hydrate the record stored under `field` of a response object
pub fn hydrate_field<T: Model>(body: &mut Payload, field: &'static str) -> Result<T, DecodeError> {
    let value = take_field(body, field)?;
    T::from_value(value)
}

/// Hydrate the list stored under `field` of a response object
pub fn hydrate_list<T: Model>(
    body: &mut Payload,
    field: &'static str,
) -> Result<Vec<T>, DecodeError> {
    let value = take_field(body, field)?;
    hydrate_array(value)
}

/// Hydrate a JSON array of records
pub fn hydrate_array<T: Model>(value: Value) -> Result<Vec<T>, DecodeError> {
    match value {
        Value::Array(items) => items.into_iter().map(T::from_value).collect(),
        other => Err(DecodeError::shape("an array", &other)),
    }
}

/// Unwrap a response body that must be a JSON object
pub fn into_object(value: Value) -> Result<Payload, DecodeError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(DecodeError::UnexpectedShape {
            expected: "an object",
            found: json_kind(&other),
        }),
    }
}

fn take_field(body: &mut Payload, field: &'static str) -> Result<Value, DecodeError> {
    match body.remove(field) {
        Some(Value::Null) | None => Err(DecodeError::MissingField { field }),
        Some(value) => Ok(value),
    }
}

/// Implements [`ToPayload`] and `Into<RequestBody>` for serializable types
macro_rules! impl_payload {
    ($($ty:ty),+ $(,)?) => {$(
        impl $crate::models::ToPayload for $ty {
            fn to_payload(&self) -> $crate::models::Payload {
                $crate::models::serialize_payload(self)
            }
        }

        impl From<$ty> for $crate::body::RequestBody {
            fn from(value: $ty) -> Self {
                $crate::body::RequestBody::record(value)
            }
        }
    )+};
}

/// Marks record types as [`Model`]s
macro_rules! impl_model {
    ($($ty:ty),+ $(,)?) => {
        $crate::models::impl_payload!($($ty),+);
        $(impl $crate::models::Model for $ty {})+
    };
}

/// Closed string enumeration with exact wire matching
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $($(#[$vmeta])* #[serde(rename = $wire)] $variant),+
        }

        impl $name {
            /// Every member, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire representation
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::DecodeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    other => Err($crate::error::DecodeError::UnknownVariant {
                        kind: stringify!($name),
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl $crate::query::QueryValue for $name {
            fn to_query_value(&self) -> Option<String> {
                Some(self.as_str().to_string())
            }
        }
    };
}

pub(crate) use impl_model;
pub(crate) use impl_payload;
pub(crate) use wire_enum;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_hydrate_field_missing() {
        let mut body = into_object(json!({"other": {}})).unwrap();
        let err = hydrate_field::<Database>(&mut body, "database").unwrap_err();
        assert!(matches!(err, DecodeError::MissingField { field: "database" }));
    }

    #[test]
    fn test_hydrate_field_null_is_missing() {
        let mut body = into_object(json!({"database": null})).unwrap();
        let err = hydrate_field::<Database>(&mut body, "database").unwrap_err();
        assert!(matches!(err, DecodeError::MissingField { .. }));
    }

    #[test]
    fn test_hydrate_array_rejects_object() {
        let err = hydrate_array::<Region>(json!({"regions": []})).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::UnexpectedShape {
                expected: "an array",
                found: "an object"
            }
        ));
    }

    #[test]
    fn test_from_value_rejects_non_object() {
        let err = Region::from_value(json!("aws-us-east-2")).unwrap_err();
        assert!(err.to_string().contains("Expected an object, found a string"));
    }

    #[test]
    fn test_into_object() {
        assert!(into_object(json!([])).is_err());
        assert_eq!(into_object(json!({})).unwrap().len(), 0);
    }
}
