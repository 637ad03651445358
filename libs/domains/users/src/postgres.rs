use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, SqlErr,
};

use crate::{
    entity,
    error::{UserError, UserResult},
    models::{NewUser, User, UserChanges},
    repository::UserRepository,
};

const USERNAME_CONSTRAINT: &str = "users_username_key";
const EMAIL_CONSTRAINT: &str = "users_email_key";

/// Postgres-backed [`UserRepository`] over an injected connection pool.
#[derive(Clone)]
pub struct PgUserRepository {
    db: DatabaseConnection,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn storage(e: DbErr) -> UserError {
    tracing::error!(error = %e, "User query failed");
    UserError::Storage(e.to_string())
}

/// Map a unique-violation message to the domain conflict it names.
fn conflict_for(message: &str, username: Option<&str>, email: Option<&str>) -> Option<UserError> {
    if message.contains(USERNAME_CONSTRAINT) {
        Some(UserError::DuplicateUsername(
            username.unwrap_or_default().to_string(),
        ))
    } else if message.contains(EMAIL_CONSTRAINT) {
        Some(UserError::DuplicateEmail(email.unwrap_or_default().to_string()))
    } else {
        None
    }
}

fn write_error(e: DbErr, username: Option<&str>, email: Option<&str>) -> UserError {
    if let Some(SqlErr::UniqueConstraintViolation(message)) = e.sql_err() {
        if let Some(conflict) = conflict_for(&message, username, email) {
            tracing::info!(constraint = %message, "Unique constraint violated");
            return conflict;
        }
    }
    storage(e)
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn list(&self, limit: u64) -> UserResult<Vec<User>> {
        let models = entity::Entity::find()
            .order_by_desc(entity::Column::CreatedAt)
            .order_by_desc(entity::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(storage)?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn get_by_id(&self, id: i32) -> UserResult<Option<User>> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(storage)?;

        Ok(model.map(User::from))
    }

    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let model = entity::Entity::find()
            .filter(entity::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(storage)?;

        Ok(model.map(User::from))
    }

    async fn create(&self, input: NewUser) -> UserResult<User> {
        let username = input.username.clone();
        let email = input.email.clone();
        let active_model: entity::ActiveModel = input.into();

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, Some(&username), Some(&email)))?;

        tracing::info!(user_id = model.id, "Created user");
        Ok(model.into())
    }

    async fn update(&self, id: i32, changes: UserChanges) -> UserResult<Option<User>> {
        if changes.is_empty() {
            return Err(UserError::NoFieldsProvided);
        }

        let username = changes.username.clone();
        let email = changes.email.clone();

        match entity::ActiveModel::for_changes(id, changes)
            .update(&self.db)
            .await
        {
            Ok(model) => {
                tracing::info!(user_id = id, "Updated user");
                Ok(Some(model.into()))
            }
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(write_error(e, username.as_deref(), email.as_deref())),
        }
    }

    async fn delete(&self, id: i32) -> UserResult<bool> {
        let result = entity::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(storage)?;

        let deleted = result.rows_affected > 0;
        if deleted {
            tracing::info!(user_id = id, "Deleted user");
        }
        Ok(deleted)
    }

    async fn count(&self) -> UserResult<u64> {
        entity::Entity::find()
            .count(&self.db)
            .await
            .map_err(storage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Value};
    use std::collections::BTreeMap;

    fn model(id: i32, username: &str) -> entity::Model {
        entity::Model {
            id,
            username: username.to_string(),
            email: format!("{username}@x.com"),
            created_at: chrono::Utc::now().into(),
            updated_at: None,
        }
    }

    fn repo(db: MockDatabase) -> PgUserRepository {
        PgUserRepository::new(db.into_connection())
    }

    #[tokio::test]
    async fn test_list_maps_rows() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(2, "alice"), model(1, "bob123")]]);

        let users = repo(db).list(10).await.unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].id, 2);
        assert_eq!(users[1].email, "bob123@x.com");
    }

    #[tokio::test]
    async fn test_get_by_id_missing() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<entity::Model>::new()]);

        assert!(repo(db).get_by_id(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_returns_generated_fields() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(7, "bob123")]]);

        let user = repo(db)
            .create(NewUser {
                username: "bob123".to_string(),
                email: "bob123@x.com".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(user.id, 7);
        assert!(user.updated_at.is_none());
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<entity::Model>::new()]);

        let result = repo(db)
            .update(
                99,
                UserChanges {
                    username: Some("ghost".to_string()),
                    email: None,
                },
            )
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_update_empty_changes_skips_query() {
        // No results queued: any query would fail the test
        let db = MockDatabase::new(DatabaseBackend::Postgres);

        let result = repo(db).update(1, UserChanges::default()).await;
        assert!(matches!(result, Err(UserError::NoFieldsProvided)));
    }

    #[tokio::test]
    async fn test_delete_reports_rows_affected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).append_exec_results([
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            },
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            },
        ]);
        let repo = repo(db);

        assert!(repo.delete(1).await.unwrap());
        assert!(!repo.delete(1).await.unwrap());
    }

    #[tokio::test]
    async fn test_count() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).append_query_results([vec![
            BTreeMap::from([("num_items", Value::from(3i64))]),
        ]]);

        assert_eq!(repo(db).count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_query_error_becomes_storage() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection reset".to_string())]);

        let result = repo(db).list(10).await;
        assert!(matches!(result, Err(UserError::Storage(msg)) if msg.contains("connection reset")));
    }

    #[test]
    fn test_conflict_for_constraint_names() {
        let username = conflict_for(
            "duplicate key value violates unique constraint \"users_username_key\"",
            Some("bob123"),
            Some("bob@x.com"),
        );
        assert!(matches!(username, Some(UserError::DuplicateUsername(u)) if u == "bob123"));

        let email = conflict_for(
            "duplicate key value violates unique constraint \"users_email_key\"",
            None,
            Some("bob@x.com"),
        );
        assert!(matches!(email, Some(UserError::DuplicateEmail(e)) if e == "bob@x.com"));

        assert!(conflict_for("users_pkey", None, None).is_none());
    }
}
