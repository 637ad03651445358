//! # Axum Helpers
//!
//! Shared HTTP plumbing for the users service.
//!
//! ## Modules
//!
//! - **[`server`]**: router assembly, health endpoints, graceful shutdown
//! - **[`http`]**: CORS, security headers, development error details
//! - **[`errors`]**: `AppError` and the `{success:false, error}` envelope
//! - **[`envelope`]**: `{success:true, ...}` response bodies
//! - **[`extractors`]**: integer id path and JSON body extractors
//! - **[`audit`]**: audit events for data modifications
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum_helpers::server::{RouterSettings, create_production_app, create_router};
//!
//! let router = create_router::<ApiDoc>(api_routes, root_routes, &settings)?;
//! create_production_app(router, &server_config, Duration::from_secs(30), async {}).await?;
//! ```

pub mod audit;
pub mod envelope;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use server::{
    HealthCheckFuture, HealthResponse, HealthState, RouterSettings, ShutdownCoordinator,
    close_postgres, create_production_app, create_router, health_router, run_health_checks,
    shutdown_signal,
};

pub use http::{create_cors_layer, expose_error_details, security_headers};

pub use errors::{AppError, ErrorCode, ErrorDetail, ErrorResponse};

pub use envelope::{CountResponse, Envelope, MessageResponse};

pub use extractors::{IdPath, JsonBody};

pub use audit::{AuditEvent, AuditOutcome, extract_ip_from_headers, extract_user_agent};
