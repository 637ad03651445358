//! Handler tests for the Users domain
//!
//! These drive the users router over the in-memory repository and check:
//! - status codes and JSON envelopes
//! - validation messages and their order
//! - id parsing and body parsing errors
//!
//! The full application (fallback, CORS, `/api` nesting) is covered in the
//! `users_api` binary tests.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use domain_users::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use test_utils::TestDataBuilder;
use tower::ServiceExt; // For oneshot()

fn app() -> Router {
    handlers::router(UserService::new(InMemoryUserRepository::new()))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn create(app: &Router, username: &str, email: &str) -> Value {
    let (status, body) = send(
        app,
        "POST",
        "/users",
        Some(json!({ "username": username, "email": email })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["data"].clone()
}

#[tokio::test]
async fn test_create_user_returns_201_envelope() {
    let app = app();
    let (status, body) = send(
        &app,
        "POST",
        "/users",
        Some(json!({ "username": "bob123", "email": "bob@x.com" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Utilisateur créé avec succès");
    assert!(body["data"]["id"].as_i64().unwrap() > 0);
    assert_eq!(body["data"]["username"], "bob123");
    assert_eq!(body["data"]["email"], "bob@x.com");
    assert!(body["data"]["created_at"].is_string());
    assert!(body["data"].get("updated_at").is_none());
}

#[tokio::test]
async fn test_create_user_validation_messages() {
    let app = app();
    let cases = [
        (json!({ "email": "bob@x.com" }), "Le nom d'utilisateur et l'email sont requis"),
        (json!({ "username": "", "email": "bob@x.com" }), "Le nom d'utilisateur et l'email sont requis"),
        (json!({ "username": "bob123", "email": "bob.x.com" }), "Format d'email invalide"),
        (json!({ "username": "bob123", "email": "bob@x" }), "Format d'email invalide"),
        (
            json!({ "username": "ab", "email": "bob@x.com" }),
            "Le nom d'utilisateur doit contenir entre 3 et 50 caractères",
        ),
        (
            json!({ "username": "a".repeat(51), "email": "bob@x.com" }),
            "Le nom d'utilisateur doit contenir entre 3 et 50 caractères",
        ),
    ];

    for (payload, expected) in cases {
        let (status, body) = send(&app, "POST", "/users", Some(payload.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{payload}");
        assert_eq!(body, json!({ "success": false, "error": expected }), "{payload}");
    }

    let (_, body) = send(&app, "GET", "/users/stats/count", None).await;
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn test_create_duplicate_returns_409() {
    let app = app();
    create(&app, "bob123", "bob@x.com").await;

    let (status, body) = send(
        &app,
        "POST",
        "/users",
        Some(json!({ "username": "bob123", "email": "other@x.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Ce nom d'utilisateur existe déjà");

    let (status, body) = send(
        &app,
        "POST",
        "/users",
        Some(json!({ "username": "other", "email": "bob@x.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Cet email existe déjà");

    let (_, body) = send(&app, "GET", "/users/stats/count", None).await;
    assert_eq!(body, json!({ "success": true, "count": 1 }));
}

#[tokio::test]
async fn test_malformed_body_is_400() {
    let app = app();
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/users")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "Corps de requête JSON invalide");

    // Missing content type
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/users")
                .body(Body::from(r#"{"username":"bob123","email":"bob@x.com"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_user_by_id() {
    let app = app();
    let created = create(&app, "bob123", "bob@x.com").await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = send(&app, "GET", &format!("/users/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"], created);

    let (status, body) = send(&app, "GET", "/users/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "success": false, "error": "Utilisateur non trouvé" }));

    let (status, body) = send(&app, "GET", "/users/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "success": false, "error": "ID invalide" }));
}

#[tokio::test]
async fn test_list_users_newest_first() {
    let app = app();

    let (status, body) = send(&app, "GET", "/users", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "count": 0, "data": [] }));

    let builder = TestDataBuilder::from_test_name("list_newest_first");
    for prefix in ["first", "second", "third"] {
        create(&app, &builder.username(prefix), &builder.email(prefix)).await;
    }

    let (_, body) = send(&app, "GET", "/users", None).await;
    assert_eq!(body["count"], 3);
    assert_eq!(body["data"][0]["username"], builder.username("third"));
    assert_eq!(body["data"][2]["username"], builder.username("first"));

    let (_, body) = send(&app, "GET", "/users?limit=2", None).await;
    assert_eq!(body["count"], 2);

    for fallback in ["0", "-1", "abc"] {
        let (status, body) = send(&app, "GET", &format!("/users?limit={fallback}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 3, "limit={fallback}");
    }
}

#[tokio::test]
async fn test_unusable_limit_falls_back_to_default() {
    let app = app();
    create(&app, "alice", "alice@x.com").await;
    create(&app, "bob123", "bob@x.com").await;

    for query in [
        "limit=1&limit=2",
        "limit=9223372036854775808",
        "limit=99999999999999999999",
        "limit=%FF",
    ] {
        let (status, body) = send(&app, "GET", &format!("/users?{query}"), None).await;
        assert_eq!(status, StatusCode::OK, "{query}");
        assert_eq!(body["success"], true, "{query}");
        assert_eq!(body["count"], 2, "{query}");
    }
}

#[tokio::test]
async fn test_update_user() {
    let app = app();
    let created = create(&app, "bob123", "bob@x.com").await;
    let id = created["id"].as_i64().unwrap();
    let uri = format!("/users/{id}");

    let (status, body) = send(&app, "PUT", &uri, Some(json!({ "email": "new@x.com" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Utilisateur mis à jour avec succès");
    assert_eq!(body["data"]["username"], "bob123");
    assert_eq!(body["data"]["email"], "new@x.com");
    assert!(body["data"]["updated_at"].is_string());

    let (status, body) = send(&app, "PUT", &uri, Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Aucun champ à mettre à jour");

    let (status, body) = send(
        &app,
        "PUT",
        &uri,
        Some(json!({ "username": "", "email": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Aucun champ à mettre à jour");

    let (status, body) = send(&app, "PUT", &uri, Some(json!({ "email": "broken" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Format d'email invalide");

    let (status, _) = send(&app, "PUT", "/users/999", Some(json!({ "username": "ghost" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, "PUT", "/users/x1", Some(json!({ "username": "ghost" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "ID invalide");

    // Unchanged after the rejected updates
    let (_, body) = send(&app, "GET", &uri, None).await;
    assert_eq!(body["data"]["email"], "new@x.com");
}

#[tokio::test]
async fn test_update_to_taken_email_is_409() {
    let app = app();
    create(&app, "alice", "alice@x.com").await;
    let bob = create(&app, "bob123", "bob@x.com").await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/users/{}", bob["id"]),
        Some(json!({ "email": "alice@x.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Cet email existe déjà");
}

#[tokio::test]
async fn test_delete_user() {
    let app = app();
    let created = create(&app, "bob123", "bob@x.com").await;
    let uri = format!("/users/{}", created["id"]);

    let (status, body) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "success": true, "message": "Utilisateur supprimé avec succès" })
    );

    let (status, _) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Utilisateur non trouvé");

    let (status, _) = send(&app, "DELETE", "/users/1.5", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_count_tracks_creates_and_deletes() {
    let app = app();
    let a = create(&app, "alice", "alice@x.com").await;
    create(&app, "bob123", "bob@x.com").await;
    create(&app, "carol", "carol@x.com").await;

    send(&app, "DELETE", &format!("/users/{}", a["id"]), None).await;

    let (status, body) = send(&app, "GET", "/users/stats/count", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "count": 2 }));
}
