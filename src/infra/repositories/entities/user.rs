//! Account database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{Account, Role};
use crate::errors::AppError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub phone_number: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl TryFrom<Model> for Account {
    type Error = AppError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Account {
            id: model.id,
            phone_number: model.phone_number,
            password_hash: model.password_hash,
            role: Role::try_from(model.role.as_str())?,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
