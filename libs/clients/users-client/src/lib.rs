//! Users API client
//!
//! Thin `reqwest` wrapper over the users REST endpoints, for front-ends and
//! other services.
//!
//! ```rust,no_run
//! use users_client::{CreateUserRequest, UsersClient};
//!
//! # async fn example() -> users_client::ClientResult<()> {
//! let client = UsersClient::from_env()?;
//! let user = client.create(&CreateUserRequest::new("bob123", "bob@example.com")).await?;
//! let total = client.count().await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod models;

pub use client::{DEFAULT_BASE_URL, REQUEST_TIMEOUT, UsersClient};
pub use error::{ClientError, ClientResult};
pub use models::{CreateUserRequest, DbTestResult, HealthStatus, UpdateUserRequest, User};
