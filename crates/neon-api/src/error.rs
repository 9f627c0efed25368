//! Error types for the Neon API client
//!
//! Every call surfaces exactly one of three failure families:
//!
//! - [`NeonError::Request`]: the transport failed before a response arrived
//! - [`NeonError::Api`]: the server answered with a status of 400 or above
//! - [`NeonError::Decode`]: a successful response could not be understood
//!
//! Nothing is retried or papered over. The helper predicates mirror the
//! status classes callers usually branch on.
//!
//! # Example
//!
//! ```rust,no_run
//! use neon_api::{NeonClient, NeonError};
//!
//! # async fn example(client: NeonClient) {
//! match client.projects().get("silent-frog-123456").await {
//!     Ok(project) => println!("{}", project.id),
//!     Err(err) if err.is_not_found() => println!("no such project"),
//!     Err(err) => eprintln!("{err}"),
//! }
//! # }
//! ```

use thiserror::Error;

use crate::transport::{ApiRequest, ApiResponse, TransportError};

/// Message used when an error response carries no `message` field
pub const MISSING_ERROR_MESSAGE: &str = "Error message not provided.";

/// Errors returned by the Neon API client
#[derive(Error, Debug)]
pub enum NeonError {
    /// The transport could not complete the request
    #[error("Request to {} {} failed: {source}", .request.method(), .request.url())]
    Request {
        request: Box<ApiRequest>,
        #[source]
        source: TransportError,
    },

    /// The API answered with an error status (>= 400)
    #[error("Neon API error [{status}]: {message}")]
    Api {
        status: u16,
        message: String,
        code: Option<String>,
        response: Box<ApiResponse>,
    },

    /// A successful response carried an unusable body
    #[error("Failed to decode Neon API response: {0}")]
    Decode(#[from] DecodeError),

    /// A request body could not be serialized
    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// The default HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Errors raised while mapping JSON payloads into models
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The response body is not valid JSON
    #[error("Neon response has invalid JSON: {0}")]
    Json(#[source] serde_json::Error),

    /// The payload does not match the model (missing field, wrong type, unknown enum value)
    #[error("Invalid {model} payload: {source}")]
    Model {
        model: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A response envelope lacks the expected key
    #[error("Response is missing the `{field}` field")]
    MissingField { field: &'static str },

    /// A string is not a member of a closed enumeration
    #[error("Unknown {kind} value '{value}'")]
    UnknownVariant { kind: &'static str, value: String },

    /// The payload has the wrong JSON kind
    #[error("Expected {expected}, found {found}")]
    UnexpectedShape {
        expected: &'static str,
        found: &'static str,
    },
}

/// Result type for Neon API operations
pub type Result<T> = std::result::Result<T, NeonError>;

impl NeonError {
    /// HTTP status of an API error, if the server answered
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            NeonError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Error code returned by the API, if any
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        match self {
            NeonError::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// The request that failed in transit, if this is a transport failure
    #[must_use]
    pub fn request(&self) -> Option<&ApiRequest> {
        match self {
            NeonError::Request { request, .. } => Some(request),
            _ => None,
        }
    }

    /// The raw error response, if the server answered
    #[must_use]
    pub fn response(&self) -> Option<&ApiResponse> {
        match self {
            NeonError::Api { response, .. } => Some(response),
            _ => None,
        }
    }

    /// Returns true if this is a "not found" error (404)
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns true if this is an authentication/authorization error (401/403)
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }

    /// Returns true if this is a bad request error (400/422)
    #[must_use]
    pub fn is_bad_request(&self) -> bool {
        matches!(self.status(), Some(400 | 422))
    }

    /// Returns true if this is a conflict, precondition or locked error (409/412/423)
    ///
    /// Neon answers 423 while a project has operations in flight.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self.status(), Some(409 | 412 | 423))
    }

    /// Returns true if this is a rate limiting error (429)
    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        self.status() == Some(429)
    }

    /// Returns true if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self.status(), Some(500..=599))
    }

    /// Returns true if the transport gave up waiting
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        match self {
            NeonError::Request { source, .. } => source
                .downcast_ref::<reqwest::Error>()
                .is_some_and(reqwest::Error::is_timeout),
            _ => false,
        }
    }

    /// Returns true if a successful response could not be decoded
    #[must_use]
    pub fn is_decode(&self) -> bool {
        matches!(self, NeonError::Decode(_))
    }
}

impl DecodeError {
    pub(crate) fn model<T>(source: serde_json::Error) -> Self {
        DecodeError::Model {
            model: short_type_name::<T>(),
            source,
        }
    }

    pub(crate) fn shape(expected: &'static str, found: &serde_json::Value) -> Self {
        DecodeError::UnexpectedShape {
            expected,
            found: json_kind(found),
        }
    }
}

fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}

pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
