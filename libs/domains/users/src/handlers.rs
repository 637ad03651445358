use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    AuditEvent, AuditOutcome, CountResponse, Envelope, IdPath, JsonBody, MessageResponse,
    errors::responses::{
        BadRequestResponse, ConflictResponse, InternalServerErrorResponse, NotFoundResponse,
    },
};
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{UserResult, messages};
use crate::models::{CreateUserRequest, ListUsersQuery, UpdateUserRequest, User};
use crate::repository::UserRepository;
use crate::service::UserService;

pub const TAG: &str = "users";

/// OpenAPI documentation for the Users API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_users,
        create_user,
        get_user,
        update_user,
        delete_user,
        count_users,
    ),
    components(
        schemas(User, CreateUserRequest, UpdateUserRequest, MessageResponse, CountResponse),
        responses(
            BadRequestResponse,
            NotFoundResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "User management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the users router; paths are relative to the `/api` mount point
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/stats/count", get(count_users))
        .route(
            "/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .with_state(shared_service)
}

/// List users, newest first
#[utoipa::path(
    get,
    path = "/users",
    tag = TAG,
    params(ListUsersQuery),
    responses(
        (status = 200, description = "Users, newest first", body = Envelope<Vec<User>>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_users<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    query: Result<Query<ListUsersQuery>, QueryRejection>,
) -> UserResult<Json<Envelope<Vec<User>>>> {
    // An unreadable query string (e.g. a repeated `limit`) means the default limit
    let query = query.map(|Query(q)| q).unwrap_or_default();
    let users = service.list_users(&query).await?;
    Ok(Json(Envelope::list(users)))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "/users",
    tag = TAG,
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = Envelope<User>),
        (status = 400, response = BadRequestResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    headers: HeaderMap,
    JsonBody(input): JsonBody<CreateUserRequest>,
) -> UserResult<impl IntoResponse> {
    let user = service.create_user(input).await?;

    AuditEvent::new("user.create", AuditOutcome::Success)
        .with_resource(format!("user:{}", user.id))
        .with_request_headers(&headers)
        .with_details(json!({ "username": user.username }))
        .log();

    Ok((
        StatusCode::CREATED,
        Json(Envelope::data(user).with_message(messages::CREATED)),
    ))
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = Envelope<User>),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    IdPath(id): IdPath,
) -> UserResult<Json<Envelope<User>>> {
    let user = service.get_user(id).await?;
    Ok(Json(Envelope::data(user)))
}

/// Update a user's username and/or email
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = Envelope<User>),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    headers: HeaderMap,
    IdPath(id): IdPath,
    JsonBody(input): JsonBody<UpdateUserRequest>,
) -> UserResult<Json<Envelope<User>>> {
    let fields: Vec<&str> = [
        input.username.as_deref().filter(|v| !v.is_empty()).map(|_| "username"),
        input.email.as_deref().filter(|v| !v.is_empty()).map(|_| "email"),
    ]
    .into_iter()
    .flatten()
    .collect();

    let user = service.update_user(id, input).await?;

    AuditEvent::new("user.update", AuditOutcome::Success)
        .with_resource(format!("user:{}", id))
        .with_request_headers(&headers)
        .with_details(json!({ "fields": fields }))
        .log();

    Ok(Json(Envelope::data(user).with_message(messages::UPDATED)))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    headers: HeaderMap,
    IdPath(id): IdPath,
) -> UserResult<Json<MessageResponse>> {
    service.delete_user(id).await?;

    AuditEvent::new("user.delete", AuditOutcome::Success)
        .with_resource(format!("user:{}", id))
        .with_request_headers(&headers)
        .log();

    Ok(Json(MessageResponse::new(messages::DELETED)))
}

/// Total number of users
#[utoipa::path(
    get,
    path = "/users/stats/count",
    tag = TAG,
    responses(
        (status = 200, description = "User count", body = CountResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn count_users<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
) -> UserResult<Json<CountResponse>> {
    let count = service.count_users().await?;
    Ok(Json(CountResponse::new(count)))
}
