//! HTTP middleware: CORS, security headers and development error details.
//!
//! ```ignore
//! use axum_helpers::http::{create_cors_layer, security_headers};
//!
//! let app = Router::new()
//!     .layer(axum::middleware::from_fn(security_headers))
//!     .layer(create_cors_layer(&cors_config)?);
//! ```

pub mod cors;
pub mod error_details;
pub mod security;

pub use cors::create_cors_layer;
pub use error_details::expose_error_details;
pub use security::security_headers;
