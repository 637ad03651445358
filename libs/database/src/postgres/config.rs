use sea_orm::ConnectOptions;
use std::time::Duration;
use tracing::log::LevelFilter;

#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_or_default, env_parse_or};

const DEFAULT_MAX_CONNECTIONS: u32 = 20;
const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 2;

/// PostgreSQL pool settings.
///
/// `connect_timeout_secs` bounds both opening a new connection and waiting for
/// a free one from the pool.
#[derive(Clone, Debug)]
pub struct PostgresConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    /// Log every statement through sqlx
    pub sqlx_logging: bool,
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Build a URL from its parts. The password is omitted when empty.
    pub fn compose_url(host: &str, port: u16, name: &str, user: &str, password: &str) -> String {
        if password.is_empty() {
            format!("postgres://{user}@{host}:{port}/{name}")
        } else {
            format!("postgres://{user}:{password}@{host}:{port}/{name}")
        }
    }

    pub fn into_connect_options(self) -> ConnectOptions {
        let timeout = Duration::from_secs(self.connect_timeout_secs);

        let mut opt = ConnectOptions::new(&self.url);
        opt.max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .connect_timeout(timeout)
            .acquire_timeout(timeout)
            .idle_timeout(Duration::from_secs(self.idle_timeout_secs))
            .sqlx_logging(self.sqlx_logging)
            .sqlx_logging_level(LevelFilter::Debug);
        opt
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            min_connections: 1,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            idle_timeout_secs: DEFAULT_IDLE_TIMEOUT_SECS,
            sqlx_logging: false,
        }
    }
}

/// Environment variables:
/// - `DATABASE_URL` - full connection string; when unset the URL is composed
///   from `DB_HOST` (localhost), `DB_PORT` (5432), `DB_NAME` (appdb),
///   `DB_USER` (appuser) and `DB_PASSWORD` (empty)
/// - `DB_MAX_CONNECTIONS` (default: 20)
/// - `DB_IDLE_TIMEOUT_SECS` (default: 30)
/// - `DB_CONNECT_TIMEOUT_SECS` (default: 2)
/// - `DB_SQLX_LOGGING` (default: false)
#[cfg(feature = "config")]
impl FromEnv for PostgresConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let url = match std::env::var("DATABASE_URL") {
            Ok(url) if !url.trim().is_empty() => url,
            _ => Self::compose_url(
                &env_or_default("DB_HOST", "localhost"),
                env_parse_or("DB_PORT", 5432u16)?,
                &env_or_default("DB_NAME", "appdb"),
                &env_or_default("DB_USER", "appuser"),
                &env_or_default("DB_PASSWORD", ""),
            ),
        };

        Ok(Self {
            url,
            max_connections: env_parse_or("DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
            min_connections: 1,
            connect_timeout_secs: env_parse_or(
                "DB_CONNECT_TIMEOUT_SECS",
                DEFAULT_CONNECT_TIMEOUT_SECS,
            )?,
            idle_timeout_secs: env_parse_or("DB_IDLE_TIMEOUT_SECS", DEFAULT_IDLE_TIMEOUT_SECS)?,
            sqlx_logging: env_parse_or("DB_SQLX_LOGGING", false)?,
        })
    }
}
