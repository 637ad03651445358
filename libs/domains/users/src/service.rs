use std::sync::Arc;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUserRequest, ListUsersQuery, NewUser, UpdateUserRequest, User, UserChanges};
use crate::repository::UserRepository;

/// Service layer for User business logic
///
/// Requests are validated here; the repository only ever sees `NewUser` and
/// `UserChanges` that passed validation.
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub async fn list_users(&self, query: &ListUsersQuery) -> UserResult<Vec<User>> {
        self.repository.list(query.effective_limit()).await
    }

    pub async fn get_user(&self, id: i32) -> UserResult<User> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    pub async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        self.repository.get_by_email(email).await
    }

    pub async fn create_user(&self, request: CreateUserRequest) -> UserResult<User> {
        let input = NewUser::try_from(request)?;
        self.repository.create(input).await
    }

    pub async fn update_user(&self, id: i32, request: UpdateUserRequest) -> UserResult<User> {
        let changes = UserChanges::try_from(request)?;
        self.repository
            .update(id, changes)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    pub async fn delete_user(&self, id: i32) -> UserResult<()> {
        if !self.repository.delete(id).await? {
            return Err(UserError::NotFound(id));
        }
        Ok(())
    }

    pub async fn count_users(&self) -> UserResult<u64> {
        self.repository.count().await
    }
}
