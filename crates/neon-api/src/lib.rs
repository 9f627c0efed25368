//! # neon-api
//!
//! Typed async client for the [Neon](https://neon.tech) control-plane REST API
//! (`https://console.neon.tech/api/v2/`).
//!
//! The crate is layered:
//!
//! - [`models`]: records for every API resource, hydrated from and
//!   serialized to snake_case JSON payloads
//! - [`api`] and [`transport`]: request construction (bearer auth, JSON
//!   headers, user agent), dispatch through an [`HttpTransport`] and response
//!   classification into success, transport failure, API error or decode
//!   failure
//! - [`clients`]: one handler per resource family
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use neon_api::NeonClient;
//! use neon_api::params::CreateDatabaseParams;
//!
//! # async fn example() -> neon_api::Result<()> {
//! let client = NeonClient::new(std::env::var("NEON_API_KEY").unwrap_or_default())?;
//!
//! let user = client.users().current_user().await?;
//! println!("signed in as {}", user.email);
//!
//! let created = client
//!     .databases()
//!     .create("p-quiet-1", "br-quiet-1", CreateDatabaseParams::new("app", "app_owner"))
//!     .await?;
//! for operation in &created.operations {
//!     println!("{} {}", operation.action, operation.status);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Errors
//!
//! Every call returns [`Result`]. API failures keep the status, message and
//! raw response:
//!
//! ```rust,no_run
//! # async fn example(client: neon_api::NeonClient) {
//! match client.projects().get("missing").await {
//!     Ok(project) => println!("{}", project.id),
//!     Err(e) if e.is_not_found() => println!("no such project"),
//!     Err(e) => eprintln!("{e}"),
//! }
//! # }
//! ```
//!
//! ## Custom transports
//!
//! Anything implementing [`HttpTransport`] can carry requests, which is how
//! the test helpers in [`testing`] work without a network.

pub mod api;
pub mod body;
pub mod clients;
pub mod error;
pub mod models;
pub mod params;
pub mod query;
pub mod transport;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use api::{ClientConfig, DEFAULT_BASE_URL, NeonApi, USER_AGENT};
pub use body::RequestBody;
pub use clients::{
    ApiKeysClient, BranchesClient, ConsumptionClient, DatabasesClient, EndpointsClient,
    NeonClient, OperationsClient, ProjectsClient, RegionsClient, RolesClient, SnapshotsClient,
    UsersClient,
};
pub use error::{DecodeError, NeonError, Result};
pub use query::{Query, QueryValue, build_query};
pub use transport::{
    ApiRequest, ApiResponse, DEFAULT_TIMEOUT, HttpTransport, ReqwestTransport, TransportError,
};
