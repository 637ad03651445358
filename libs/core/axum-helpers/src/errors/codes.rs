//! Error codes attached to log records.
//!
//! Clients only see the French `error` text; the numeric code and identifier
//! end up in the `error_code` field of the log line so failures can be
//! grouped without parsing messages.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::InvalidId;
//! assert_eq!(code.as_str(), "INVALID_ID");
//! assert_eq!(code.code(), 1002);
//! assert_eq!(code.default_message(), "ID invalide");
//! ```

use super::messages;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// Request body or parameters failed validation
    ValidationError,
    /// Path id is not an integer
    InvalidId,
    /// Request body is not valid JSON
    InvalidJson,
    /// Resource does not exist
    NotFound,
    /// No route matches the request
    RouteNotFound,
    /// Unique constraint violated
    Conflict,

    // Server errors (5000-5999)
    InternalError,
    DatabaseError,
    ServiceUnavailable,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidId => "INVALID_ID",
            Self::InvalidJson => "INVALID_JSON",
            Self::NotFound => "NOT_FOUND",
            Self::RouteNotFound => "ROUTE_NOT_FOUND",
            Self::Conflict => "CONFLICT",
            Self::InternalError => "INTERNAL_ERROR",
            Self::DatabaseError => "DATABASE_ERROR",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
        }
    }

    pub const fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::InvalidId => 1002,
            Self::InvalidJson => 1003,
            Self::NotFound => 1004,
            Self::RouteNotFound => 1005,
            Self::Conflict => 1006,
            Self::InternalError => 5001,
            Self::DatabaseError => 5002,
            Self::ServiceUnavailable => 5003,
        }
    }

    /// Message used when the caller has nothing more specific to say.
    pub const fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Données invalides",
            Self::InvalidId => messages::INVALID_ID,
            Self::InvalidJson => messages::INVALID_JSON,
            Self::NotFound => "Ressource non trouvée",
            Self::RouteNotFound => messages::ROUTE_NOT_FOUND,
            Self::Conflict => "Ressource déjà existante",
            Self::InternalError => messages::INTERNAL_ERROR,
            Self::DatabaseError => messages::DB_CONNECTION_ERROR,
            Self::ServiceUnavailable => messages::SERVICE_UNAVAILABLE,
        }
    }

    pub const fn is_server_error(&self) -> bool {
        self.code() >= 5000
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.as_str(), self.code())
    }
}
