use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;

use crate::models::{NewUser, User, UserChanges};

/// Sea-ORM Entity for the users table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for User {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            email: model.email,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.map(Into::into),
        }
    }
}

// id and created_at come from the column defaults
impl From<NewUser> for ActiveModel {
    fn from(input: NewUser) -> Self {
        ActiveModel {
            id: NotSet,
            username: Set(input.username),
            email: Set(input.email),
            created_at: NotSet,
            updated_at: NotSet,
        }
    }
}

impl ActiveModel {
    /// Update model for `id`: only the supplied columns are written and
    /// `updated_at` is always refreshed.
    pub fn for_changes(id: i32, changes: UserChanges) -> Self {
        ActiveModel {
            id: Set(id),
            username: changes.username.map_or(NotSet, Set),
            email: changes.email.map_or(NotSet, Set),
            created_at: NotSet,
            updated_at: Set(Some(chrono::Utc::now().into())),
        }
    }
}
