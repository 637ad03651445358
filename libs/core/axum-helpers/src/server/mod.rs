//! Server setup: router assembly, health endpoints, graceful shutdown.
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router, health_router};
//!
//! let router = create_router::<ApiDoc>(api_routes, root_routes, &settings)?;
//! create_production_app(router, &config.server, Duration::from_secs(30), cleanup).await?;
//! ```

pub mod app;
pub mod cleanup;
pub mod health;
pub mod shutdown;

pub use app::{RouterSettings, create_production_app, create_router};
pub use cleanup::close_postgres;
pub use health::{
    HealthCheckFuture, HealthResponse, HealthState, health_router, run_health_checks,
};
pub use shutdown::{ShutdownCoordinator, shutdown_signal};
