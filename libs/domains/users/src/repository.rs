use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};
use tokio::sync::RwLock;

use crate::error::{UserError, UserResult};
use crate::models::{NewUser, User, UserChanges};

/// Repository trait for User persistence
///
/// Each call is a single round trip; nothing is retried.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Newest first, at most `limit` users
    async fn list(&self, limit: u64) -> UserResult<Vec<User>>;

    async fn get_by_id(&self, id: i32) -> UserResult<Option<User>>;

    /// Exact, case-sensitive match
    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>>;

    /// Insert a user; fails with `DuplicateUsername` / `DuplicateEmail`
    async fn create(&self, input: NewUser) -> UserResult<User>;

    /// Apply `changes` and refresh `updated_at`; `None` when `id` is unknown
    async fn update(&self, id: i32, changes: UserChanges) -> UserResult<Option<User>>;

    /// `true` iff a row was removed
    async fn delete(&self, id: i32) -> UserResult<bool>;

    async fn count(&self) -> UserResult<u64>;
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<i32, User>>>,
    next_id: Arc<AtomicI32>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicI32::new(1)),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn check_unique<'a>(
    mut others: impl Iterator<Item = &'a User>,
    username: Option<&str>,
    email: Option<&str>,
) -> UserResult<()> {
    others.try_for_each(|u| {
        if username == Some(u.username.as_str()) {
            return Err(UserError::DuplicateUsername(u.username.clone()));
        }
        if email == Some(u.email.as_str()) {
            return Err(UserError::DuplicateEmail(u.email.clone()));
        }
        Ok(())
    })
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list(&self, limit: u64) -> UserResult<Vec<User>> {
        let users = self.users.read().await;

        let mut result: Vec<User> = users.values().cloned().collect();
        result.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        result.truncate(usize::try_from(limit).unwrap_or(usize::MAX));

        Ok(result)
    }

    async fn get_by_id(&self, id: i32) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn create(&self, input: NewUser) -> UserResult<User> {
        let mut users = self.users.write().await;

        check_unique(
            users.values(),
            Some(input.username.as_str()),
            Some(input.email.as_str()),
        )?;

        let user = User {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            username: input.username,
            email: input.email,
            created_at: Utc::now(),
            updated_at: None,
        };
        users.insert(user.id, user.clone());

        tracing::info!(user_id = user.id, "Created user");
        Ok(user)
    }

    async fn update(&self, id: i32, changes: UserChanges) -> UserResult<Option<User>> {
        if changes.is_empty() {
            return Err(UserError::NoFieldsProvided);
        }

        let mut users = self.users.write().await;
        if !users.contains_key(&id) {
            return Ok(None);
        }

        check_unique(
            users.values().filter(|u| u.id != id),
            changes.username.as_deref(),
            changes.email.as_deref(),
        )?;

        let Some(user) = users.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(username) = changes.username {
            user.username = username;
        }
        if let Some(email) = changes.email {
            user.email = email;
        }
        user.updated_at = Some(Utc::now());

        tracing::info!(user_id = id, "Updated user");
        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: i32) -> UserResult<bool> {
        let mut users = self.users.write().await;

        if users.remove(&id).is_some() {
            tracing::info!(user_id = id, "Deleted user");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn count(&self) -> UserResult<u64> {
        let users = self.users.read().await;
        Ok(users.len() as u64)
    }
}
