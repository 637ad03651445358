use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure: connection refused, timeout, invalid URL
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response carrying the error envelope
    #[error("API error {status}: {error}")]
    Api {
        status: StatusCode,
        error: String,
        /// Internal detail, only sent by servers in development mode
        message: Option<String>,
    },

    /// 2xx response whose body does not match the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status(),
            ClientError::Decode(_) => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    pub fn is_conflict(&self) -> bool {
        self.status() == Some(StatusCode::CONFLICT)
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
