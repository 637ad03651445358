use axum::{
    Json,
    extract::OriginalUri,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::{ErrorCode, ErrorResponse, messages};

/// Fallback for unmatched routes: `404 {success:false, error, path}`.
pub async fn not_found(OriginalUri(uri): OriginalUri) -> Response {
    tracing::info!(
        error_code = ErrorCode::RouteNotFound.code(),
        path = %uri.path(),
        "No route matched"
    );

    let body = ErrorResponse::new(messages::ROUTE_NOT_FOUND).with_path(uri.path());
    (StatusCode::NOT_FOUND, Json(body)).into_response()
}
