//! Profile repository - one store for both profile variants.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use super::entities::{consumer, provider};
use crate::domain::{ConsumerProfile, NewProfile, Profile, ProviderProfile, Role};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Profile store for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Insert the profile variant described by `profile`
    async fn create(&self, profile: NewProfile) -> AppResult<Profile>;

    /// Find the profile of an account, looking in the table its role selects
    async fn find_by_account(&self, account_id: Uuid, role: Role) -> AppResult<Option<Profile>>;
}

/// SeaORM-backed profile store
pub struct ProfileStore {
    db: DatabaseConnection,
}

impl ProfileStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProfileRepository for ProfileStore {
    async fn create(&self, profile: NewProfile) -> AppResult<Profile> {
        let now = chrono::Utc::now();

        match profile {
            NewProfile::Consumer { account_id, kind } => {
                let model = consumer::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    user_id: Set(account_id),
                    kind: Set(kind.as_str().to_string()),
                    created_at: Set(now),
                    updated_at: Set(now),
                }
                .insert(&self.db)
                .await
                .map_err(AppError::from)?;

                Ok(Profile::Consumer(ConsumerProfile::try_from(model)?))
            }
            NewProfile::Provider { account_id } => {
                let model = provider::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    user_id: Set(account_id),
                    created_at: Set(now),
                    updated_at: Set(now),
                }
                .insert(&self.db)
                .await
                .map_err(AppError::from)?;

                Ok(Profile::Provider(ProviderProfile::from(model)))
            }
        }
    }

    async fn find_by_account(&self, account_id: Uuid, role: Role) -> AppResult<Option<Profile>> {
        match role {
            Role::Consumer => consumer::Entity::find()
                .filter(consumer::Column::UserId.eq(account_id))
                .one(&self.db)
                .await?
                .map(|model| ConsumerProfile::try_from(model).map(Profile::Consumer))
                .transpose(),
            Role::Provider => Ok(provider::Entity::find()
                .filter(provider::Column::UserId.eq(account_id))
                .one(&self.db)
                .await?
                .map(|model| Profile::Provider(ProviderProfile::from(model)))),
        }
    }
}
