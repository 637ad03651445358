//! Integer id path parameter.

use crate::errors::{AppError, messages};
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

/// Parses the single path parameter as an `i32`.
///
/// Anything else (including overflow and trailing garbage) is rejected with
/// 400 `"ID invalide"`.
///
/// ```ignore
/// async fn get_user(IdPath(id): IdPath) -> String {
///     format!("User ID: {}", id)
/// }
///
/// let app = Router::new().route("/users/{id}", get(get_user));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdPath(pub i32);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::BadRequest(messages::INVALID_ID.to_string()))?;

        raw.parse::<i32>()
            .map(IdPath)
            .map_err(|_| AppError::BadRequest(messages::INVALID_ID.to_string()))
    }
}
