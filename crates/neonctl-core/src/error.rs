//! Unified error handling for neonctl-core
//!
//! Wraps API and configuration errors behind one type with the same status
//! helpers as [`NeonError`].
//!
//! ```rust
//! use neonctl_core::{CoreError, ConfigError};
//!
//! let err: CoreError = ConfigError::ProfileNotFound { name: "work".into() }.into();
//! assert!(err.is_config());
//! assert!(!err.is_not_found());
//! ```

use neon_api::NeonError;
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum CoreError {
    /// Error from the Neon API client
    #[error("Neon API error: {0}")]
    Api(#[from] NeonError),

    /// Profile or credential problem
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Input rejected before any request was sent
    #[error("Validation error: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;

impl CoreError {
    /// HTTP status of an API error
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            CoreError::Api(e) => e.status(),
            _ => None,
        }
    }

    /// Returns true if this is a "not found" error (404)
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, CoreError::Api(e) if e.is_not_found())
    }

    /// Returns true if this is an authentication/authorization error (401/403)
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, CoreError::Api(e) if e.is_unauthorized())
    }

    /// Returns true if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self, CoreError::Api(e) if e.is_server_error())
    }

    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, CoreError::Api(e) if e.is_timeout())
    }

    /// Returns true if this is a rate limiting error (429)
    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, CoreError::Api(e) if e.is_rate_limited())
    }

    /// Returns true if this is a conflict/locked error
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, CoreError::Api(e) if e.is_conflict())
    }

    /// Returns true for 400/422 responses and local validation failures
    #[must_use]
    pub fn is_bad_request(&self) -> bool {
        match self {
            CoreError::Api(e) => e.is_bad_request(),
            CoreError::Validation(_) => true,
            CoreError::Config(_) => false,
        }
    }

    #[must_use]
    pub fn is_decode(&self) -> bool {
        matches!(self, CoreError::Api(e) if e.is_decode())
    }

    #[must_use]
    pub fn is_config(&self) -> bool {
        matches!(self, CoreError::Config(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neon_api::{ApiResponse, DecodeError};

    fn api_error(status: u16) -> NeonError {
        NeonError::Api {
            status,
            message: "boom".to_string(),
            code: None,
            response: Box::new(ApiResponse::new(status, Vec::new())),
        }
    }

    #[test]
    fn test_core_error_from_api() {
        let err: CoreError = api_error(404).into();

        assert!(err.is_not_found());
        assert!(!err.is_unauthorized());
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_core_error_helpers_delegate() {
        assert!(CoreError::from(api_error(403)).is_unauthorized());
        assert!(CoreError::from(api_error(429)).is_rate_limited());
        assert!(CoreError::from(api_error(409)).is_conflict());
        assert!(CoreError::from(api_error(422)).is_bad_request());
        assert!(CoreError::from(api_error(503)).is_server_error());

        let missing = DecodeError::MissingField { field: "project" };
        let decode: CoreError = NeonError::from(missing).into();
        assert!(decode.is_decode());
        assert_eq!(decode.status(), None);
    }

    #[test]
    fn test_core_error_validation() {
        let err = CoreError::Validation("branch name is empty".to_string());
        assert!(err.is_bad_request());
        assert!(!err.is_not_found());
        assert!(!err.is_config());
    }

    #[test]
    fn test_core_error_display() {
        let api: CoreError = api_error(404).into();
        assert!(api.to_string().starts_with("Neon API error"));

        let config: CoreError = ConfigError::ConfigDirError.into();
        assert!(config.to_string().starts_with("Configuration error"));
        assert!(config.is_config());
    }
}
