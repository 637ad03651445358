//! Users API - REST server over PostgreSQL

use axum_helpers::server::{RouterSettings, close_postgres, create_production_app, create_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use migration::Migrator;
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let db = database::postgres::connect_from_config_with_retry(config.database.clone(), None)
        .await
        .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

    if config.run_migrations {
        database::postgres::run_migrations::<Migrator>(&db, config.app.name).await?;
    } else {
        info!("Skipping migrations (RUN_MIGRATIONS=false)");
    }

    let state = AppState { config, db };

    let settings = RouterSettings {
        cors: state.config.cors.clone(),
        environment: state.config.environment,
    };
    let router = create_router::<openapi::ApiDoc>(
        api::routes(&state),
        api::root_routes(&state),
        &settings,
    )?;

    info!(
        app = state.config.app.name,
        version = state.config.app.version,
        environment = %state.config.environment,
        port = state.config.server.port,
        "Starting Users API"
    );

    let AppState { config, db } = state;
    create_production_app(
        router,
        &config.server,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: closing database connections");
            close_postgres(db, "users").await;
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Users API shutdown complete");
    Ok(())
}
