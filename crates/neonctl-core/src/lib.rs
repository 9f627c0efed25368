//! # neonctl-core
//!
//! Shared plumbing for tools built on [`neon_api`]:
//!
//! - [`config`]: named profiles in `~/.config/neonctl/config.toml`, with
//!   `${VAR}` expansion and optional keyring-backed API keys
//! - [`connection`]: turns a profile (or `NEON_API_KEY`) into a
//!   [`NeonClient`](neon_api::NeonClient)
//! - [`error`]: one error type over API and configuration failures
//! - [`telemetry`]: tracing subscriber setup
//!
//! ```rust,no_run
//! use neonctl_core::{Config, ConnectionManager};
//!
//! # async fn example() -> neonctl_core::Result<()> {
//! let manager = ConnectionManager::new(Config::load()?);
//! let client = manager.create_client(None)?;
//! let projects = client
//!     .projects()
//!     .list(manager.project_list_params(None)?)
//!     .await?;
//! println!("{} projects", projects.len());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod connection;
pub mod error;
pub mod telemetry;

pub use config::{Config, ConfigError, CredentialStore, Profile};
pub use connection::ConnectionManager;
pub use error::{CoreError, Result};
