use axum::{Router, routing::get};
use axum_helpers::server::{HealthState, health_router};

pub mod health;
pub mod root;
pub mod users;

use crate::state::AppState;

/// Routes served under `/api`; the prefix is added by `create_router`.
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .merge(users::router(state)) // /api/users...
        .route("/db-test", get(db_test::db_test).with_state(state.db.clone()))
}

/// Routes served at the root: `/`, `/health` and `/ready`.
pub fn root_routes(state: &AppState) -> Router {
    Router::new()
        .merge(root::router(state.config.app))
        .merge(health_router(HealthState::new(state.config.environment)))
        .merge(ready_router(state.clone()))
}

/// `/ready` with a real database check.
pub fn ready_router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state.db)
}
