use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationErrors};

use crate::error::{UserError, messages};

/// `local@domain.tld`, no whitespace, exactly one `@`
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

pub const USERNAME_MIN_CHARS: u64 = 3;
pub const USERNAME_MAX_CHARS: u64 = 50;

/// Listing limit used when `?limit=` is absent or not a positive integer
pub const DEFAULT_LIST_LIMIT: u64 = 100;

/// User entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Generated by storage, never reused
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "bob123")]
    pub username: String,
    #[schema(example = "bob@example.com")]
    pub email: String,
    pub created_at: DateTime<Utc>,
    /// Absent until the first update
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body of `POST /users`
///
/// Both fields are optional at the wire level so that a missing field is
/// reported with the same message as an empty one.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    #[schema(example = "bob123")]
    pub username: Option<String>,
    #[schema(example = "bob@example.com")]
    pub email: Option<String>,
}

/// Body of `PUT /users/{id}`; empty strings are treated as absent
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
}

/// Validated input for [`crate::UserRepository::create`]
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct NewUser {
    #[validate(length(min = USERNAME_MIN_CHARS, max = USERNAME_MAX_CHARS))]
    pub username: String,
    #[validate(regex(path = *EMAIL_RE))]
    pub email: String,
}

/// Validated partial update; `None` leaves the column untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct UserChanges {
    #[validate(length(min = USERNAME_MIN_CHARS, max = USERNAME_MAX_CHARS))]
    pub username: Option<String>,
    #[validate(regex(path = *EMAIL_RE))]
    pub email: Option<String>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.email.is_none()
    }
}

/// Query string of `GET /users`
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListUsersQuery {
    /// Maximum number of users returned (default 100)
    #[param(value_type = Option<u64>, example = 20)]
    pub limit: Option<String>,
}

impl ListUsersQuery {
    /// The requested limit when it is a positive integer, else
    /// [`DEFAULT_LIST_LIMIT`].
    ///
    /// Postgres binds `LIMIT` as a signed bigint, so values above `i64::MAX`
    /// count as invalid.
    pub fn effective_limit(&self) -> u64 {
        self.limit
            .as_deref()
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .filter(|limit| *limit > 0)
            .map_or(DEFAULT_LIST_LIMIT, |limit| limit as u64)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Email problems are reported before username length problems.
fn first_violation(errors: &ValidationErrors) -> UserError {
    if errors.field_errors().contains_key("email") {
        UserError::validation(messages::INVALID_EMAIL)
    } else {
        UserError::validation(messages::INVALID_USERNAME_LENGTH)
    }
}

impl TryFrom<CreateUserRequest> for NewUser {
    type Error = UserError;

    fn try_from(request: CreateUserRequest) -> Result<Self, Self::Error> {
        let (Some(username), Some(email)) =
            (non_empty(request.username), non_empty(request.email))
        else {
            return Err(UserError::validation(messages::REQUIRED_FIELDS));
        };

        let new_user = NewUser { username, email };
        new_user.validate().map_err(|e| first_violation(&e))?;
        Ok(new_user)
    }
}

impl TryFrom<UpdateUserRequest> for UserChanges {
    type Error = UserError;

    fn try_from(request: UpdateUserRequest) -> Result<Self, Self::Error> {
        let changes = UserChanges {
            username: non_empty(request.username),
            email: non_empty(request.email),
        };

        if changes.is_empty() {
            return Err(UserError::NoFieldsProvided);
        }

        changes.validate().map_err(|e| first_violation(&e))?;
        Ok(changes)
    }
}
