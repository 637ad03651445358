use utoipa::OpenApi;

/// `/api/db-test`, documented next to the users endpoints
#[derive(OpenApi)]
#[openapi(
    paths(crate::api::db_test::db_test),
    components(schemas(crate::api::db_test::DbTestResponse))
)]
pub struct DbTestApiDoc;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::root::welcome,
        axum_helpers::server::health::health_handler,
        crate::api::health::ready_handler,
    ),
    components(
        schemas(
            axum_helpers::ErrorResponse,
            axum_helpers::HealthResponse,
            crate::api::root::WelcomeResponse
        )
    ),
    info(
        title = "Users API",
        description = "CRUD API for users backed by PostgreSQL"
    ),
    nest(
        (path = "/api", api = domain_users::ApiDoc),
        (path = "/api", api = DbTestApiDoc)
    ),
    tags(
        (name = "root", description = "Service banner"),
        (name = "health", description = "Liveness, readiness and database checks")
    )
)]
pub struct ApiDoc;
