//! JSON body extractor with an envelope rejection.

use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;

/// Like [`axum::Json`], but a missing content type, malformed JSON or a body
/// of the wrong shape is a 400 `"Corps de requête JSON invalide"`.
///
/// Field-level checks belong to the domain layer, which reports them with its
/// own messages.
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await?;
        Ok(JsonBody(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode, header},
        routing::post,
    };
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize)]
    struct Payload {
        name: Option<String>,
    }

    fn app() -> Router {
        Router::new().route(
            "/echo",
            post(|JsonBody(p): JsonBody<Payload>| async move { p.name.unwrap_or_default() }),
        )
    }

    fn request(content_type: Option<&str>, body: &'static str) -> Request<Body> {
        let mut builder = Request::builder().method("POST").uri("/echo");
        if let Some(ct) = content_type {
            builder = builder.header(header::CONTENT_TYPE, ct);
        }
        builder.body(Body::from(body)).unwrap()
    }

    #[tokio::test]
    async fn test_valid_body() {
        let response = app()
            .oneshot(request(Some("application/json"), r#"{"name":"bob"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"bob");
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let response = app()
            .oneshot(request(Some("application/json"), "{not json"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], crate::errors::messages::INVALID_JSON);
    }

    #[tokio::test]
    async fn test_wrong_shape_is_bad_request() {
        let response = app()
            .oneshot(request(Some("application/json"), r#"{"name": 12}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_content_type_is_bad_request() {
        let response = app().oneshot(request(None, r#"{"name":"bob"}"#)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
