//! Consumer profile entity. `type` tells customers and organisations apart.

use sea_orm::entity::prelude::*;

use crate::domain::{ConsumerProfile, ConsumerType};
use crate::errors::AppError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "consumers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub user_id: Uuid,
    #[sea_orm(column_name = "type")]
    pub kind: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for ConsumerProfile {
    type Error = AppError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(ConsumerProfile {
            id: model.id,
            user_id: model.user_id,
            kind: ConsumerType::try_from(model.kind.as_str())?,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
