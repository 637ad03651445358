//! `GET /`: service banner with the main entry points.

use axum::{Json, Router, routing::get};
use core_config::AppInfo;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Endpoints {
    pub health: String,
    pub db_test: String,
    pub users: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WelcomeResponse {
    pub message: String,
    pub version: String,
    pub endpoints: Endpoints,
}

/// Welcome message and endpoint index
#[utoipa::path(
    get,
    path = "/",
    tag = "root",
    responses(
        (status = 200, description = "Service banner", body = WelcomeResponse)
    )
)]
pub async fn welcome(app: AppInfo) -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Bienvenue sur l'API".to_string(),
        version: app.version.to_string(),
        endpoints: Endpoints {
            health: "/health".to_string(),
            db_test: "/api/db-test".to_string(),
            users: "/api/users".to_string(),
        },
    })
}

pub fn router(app: AppInfo) -> Router {
    Router::new().route("/", get(move || welcome(app)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_welcome_lists_endpoints() {
        let app = router(AppInfo {
            name: "users_api",
            version: "1.2.3",
        });

        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body,
            json!({
                "message": "Bienvenue sur l'API",
                "version": "1.2.3",
                "endpoints": {
                    "health": "/health",
                    "dbTest": "/api/db-test",
                    "users": "/api/users"
                }
            })
        );
    }
}
