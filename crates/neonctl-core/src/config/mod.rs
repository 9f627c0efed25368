//! Configuration and profile management for Neon API tools
//!
//! - Multiple named profiles (one API key and endpoint each)
//! - Secure credential storage using the OS keyring (optional)
//! - Environment variable expansion in config files
//! - Platform-specific config file locations

#![allow(clippy::module_inception)]

pub mod config;
pub mod credential;
pub mod error;

pub use config::{API_KEY_ENV, API_URL_ENV, Config, Profile};
pub use credential::{CredentialStorage, CredentialStore};
pub use error::{ConfigError, Result};
