use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::error::{ClientError, ClientResult};
use crate::models::{
    CreateUserRequest, DbTestResult, Envelope, ErrorBody, HealthStatus, UpdateUserRequest, User,
};

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the users API
#[derive(Clone, Debug)]
pub struct UsersClient {
    client: reqwest::Client,
    base_url: String,
}

impl UsersClient {
    /// `base_url` is the server root, e.g. `http://localhost:3000`; the
    /// `/api` prefix is added per call.
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Create from `USERS_API_URL` (default `http://localhost:3000`)
    pub fn from_env() -> ClientResult<Self> {
        let base_url =
            std::env::var("USERS_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn api(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    /// Up to `limit` users, newest first; `None` lets the server pick (100)
    #[instrument(skip(self))]
    pub async fn list(&self, limit: Option<u64>) -> ClientResult<Vec<User>> {
        let mut request = self.client.get(self.api("/users"));
        if let Some(limit) = limit {
            request = request.query(&[("limit", limit)]);
        }

        let envelope: Envelope<Vec<User>> = decode(request.send().await?).await?;
        Ok(envelope.data.unwrap_or_default())
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> ClientResult<User> {
        let response = self.client.get(self.api(&format!("/users/{id}"))).send().await?;
        data(decode(response).await?)
    }

    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn create(&self, input: &CreateUserRequest) -> ClientResult<User> {
        let response = self.client.post(self.api("/users")).json(input).send().await?;
        data(decode(response).await?)
    }

    #[instrument(skip(self, input))]
    pub async fn update(&self, id: i32, input: &UpdateUserRequest) -> ClientResult<User> {
        let response = self
            .client
            .put(self.api(&format!("/users/{id}")))
            .json(input)
            .send()
            .await?;
        data(decode(response).await?)
    }

    /// Returns the server's confirmation message
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> ClientResult<String> {
        let response = self
            .client
            .delete(self.api(&format!("/users/{id}")))
            .send()
            .await?;

        let envelope: Envelope<serde_json::Value> = decode(response).await?;
        Ok(envelope.message.unwrap_or_default())
    }

    #[instrument(skip(self))]
    pub async fn count(&self) -> ClientResult<u64> {
        let response = self.client.get(self.api("/users/stats/count")).send().await?;
        let envelope: Envelope<serde_json::Value> = decode(response).await?;
        envelope
            .count
            .ok_or_else(|| ClientError::Decode("missing `count`".to_string()))
    }

    /// Liveness endpoint at the server root
    #[instrument(skip(self))]
    pub async fn health(&self) -> ClientResult<HealthStatus> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        decode(response).await
    }

    #[instrument(skip(self))]
    pub async fn db_test(&self) -> ClientResult<DbTestResult> {
        let response = self.client.get(self.api("/db-test")).send().await?;
        decode(response).await
    }
}

fn data<T>(envelope: Envelope<T>) -> ClientResult<T> {
    envelope
        .data
        .ok_or_else(|| ClientError::Decode("missing `data`".to_string()))
}

/// Decode a 2xx body as `T`, or turn the error envelope into
/// [`ClientError::Api`].
async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let status = response.status();
    let bytes = response.bytes().await?;

    if status.is_success() {
        debug!(status = %status, "Users API response");
        return serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()));
    }

    let err = api_error(status, &bytes);
    warn!(status = %status, error = %err, "Users API request failed");
    Err(err)
}

fn api_error(status: StatusCode, body: &[u8]) -> ClientError {
    match serde_json::from_slice::<ErrorBody>(body) {
        Ok(ErrorBody { error, message }) => ClientError::Api {
            status,
            error,
            message,
        },
        Err(_) => ClientError::Api {
            status,
            error: status
                .canonical_reason()
                .unwrap_or("Unexpected status")
                .to_string(),
            message: (!body.is_empty()).then(|| String::from_utf8_lossy(body).into_owned()),
        },
    }
}
