use axum::http::{HeaderValue, Method, header};
use core_config::cors::CorsConfig;
use std::io;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

const ALLOWED_METHODS: [Method; 5] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::OPTIONS,
];

/// Build the CORS layer for the configured origins.
///
/// - `Any`: every origin, no credentials (browsers refuse `*` with credentials)
/// - `Origins`: the exact list, credentials allowed
///
/// Methods: GET, POST, PUT, DELETE, OPTIONS. Headers: Content-Type, Authorization.
pub fn create_cors_layer(config: &CorsConfig) -> io::Result<CorsLayer> {
    let layer = CorsLayer::new()
        .allow_methods(ALLOWED_METHODS)
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .max_age(Duration::from_secs(3600));

    match config {
        CorsConfig::Any => Ok(layer.allow_origin(Any)),
        CorsConfig::Origins(origins) => {
            let origins = origins
                .iter()
                .map(|o| o.parse::<HeaderValue>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| {
                    io::Error::new(
                        io::ErrorKind::InvalidInput,
                        format!("Invalid CORS_ORIGIN value: {}", e),
                    )
                })?;

            Ok(layer
                .allow_origin(AllowOrigin::list(origins))
                .allow_credentials(true))
        }
    }
}
