use crate::errors::{ErrorDetail, messages};
use axum::{
    Json,
    body::{Body, to_bytes},
    extract::{Request, State},
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use core_config::Environment;
use serde_json::Value;

/// Error bodies are small envelopes; anything bigger is left alone.
const MAX_ERROR_BODY: usize = 64 * 1024;

/// Copies the [`ErrorDetail`] extension of an error response into its JSON
/// body as `message`, outside production.
///
/// In production the extension is dropped and the body is untouched.
pub async fn expose_error_details(
    State(environment): State<Environment>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;

    let Some(ErrorDetail(detail)) = response.extensions_mut().remove::<ErrorDetail>() else {
        return response;
    };

    if environment.is_production() {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let bytes = match to_bytes(body, MAX_ERROR_BODY).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!(error = %e, "Failed to buffer error body");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(crate::errors::ErrorResponse::new(messages::INTERNAL_ERROR)),
            )
                .into_response();
        }
    };

    let body = match serde_json::from_slice::<Value>(&bytes) {
        Ok(Value::Object(mut map)) => {
            map.entry("message").or_insert(Value::String(detail));
            match serde_json::to_vec(&map) {
                Ok(encoded) => {
                    parts.headers.remove(header::CONTENT_LENGTH);
                    Body::from(encoded)
                }
                Err(_) => Body::from(bytes),
            }
        }
        _ => Body::from(bytes),
    };

    Response::from_parts(parts, body)
}
