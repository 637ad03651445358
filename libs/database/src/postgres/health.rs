use chrono::{DateTime, FixedOffset};
use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement};
use std::time::Instant;
use tracing::debug;

use crate::common::DatabaseError;

/// Ping the database with `SELECT 1`. Used by the readiness probe.
pub async fn check_health(db: &DatabaseConnection) -> Result<(), DatabaseError> {
    debug!("Running PostgreSQL health check");

    let stmt = Statement::from_string(DatabaseBackend::Postgres, "SELECT 1".to_owned());
    db.query_one_raw(stmt)
        .await
        .map_err(|e| DatabaseError::HealthCheckFailed(e.to_string()))?;

    Ok(())
}

/// Outcome of a timed health check
#[derive(Debug, Clone)]
pub struct HealthStatus {
    pub healthy: bool,
    pub message: Option<String>,
    pub response_time_ms: u64,
}

impl HealthStatus {
    pub fn healthy(response_time_ms: u64) -> Self {
        Self {
            healthy: true,
            message: None,
            response_time_ms,
        }
    }

    pub fn unhealthy(message: String, response_time_ms: u64) -> Self {
        Self {
            healthy: false,
            message: Some(message),
            response_time_ms,
        }
    }
}

pub async fn check_health_detailed(db: &DatabaseConnection) -> HealthStatus {
    let start = Instant::now();
    let result = check_health(db).await;
    let elapsed = start.elapsed().as_millis() as u64;

    match result {
        Ok(()) => HealthStatus::healthy(elapsed),
        Err(e) => HealthStatus::unhealthy(e.to_string(), elapsed),
    }
}

/// Server clock and version string reported by PostgreSQL.
#[derive(Debug, Clone)]
pub struct DbProbe {
    pub now: DateTime<FixedOffset>,
    pub version: String,
}

/// Run `SELECT NOW(), version()` and return both values.
pub async fn probe(db: &DatabaseConnection) -> Result<DbProbe, DatabaseError> {
    let stmt = Statement::from_string(
        DatabaseBackend::Postgres,
        "SELECT NOW() AS now, version() AS version".to_owned(),
    );

    let row = db
        .query_one_raw(stmt)
        .await?
        .ok_or_else(|| DatabaseError::HealthCheckFailed("probe returned no row".to_string()))?;

    Ok(DbProbe {
        now: row.try_get("", "now")?,
        version: row.try_get("", "version")?,
    })
}
