use crate::{env_or_default, ConfigError, FromEnv};

/// Allowed CORS origins.
///
/// `CORS_ORIGIN` takes a comma-separated list of origins; `*` (the default)
/// allows any origin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CorsConfig {
    Any,
    Origins(Vec<String>),
}

impl CorsConfig {
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let origins: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        if origins.is_empty() {
            return Err(ConfigError::ParseError {
                key: "CORS_ORIGIN".to_string(),
                details: "at least one origin is required".to_string(),
            });
        }

        if origins.iter().any(|o| o == "*") {
            return Ok(CorsConfig::Any);
        }

        Ok(CorsConfig::Origins(origins))
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        CorsConfig::Any
    }
}

impl FromEnv for CorsConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Self::parse(&env_or_default("CORS_ORIGIN", "*"))
    }
}
