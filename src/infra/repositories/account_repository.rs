//! Account repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::domain::{Account, AccountChanges, NewAccount};
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Account store for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find account by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Account>>;

    /// Find account by phone number
    async fn find_by_phone_number(&self, phone_number: &str) -> AppResult<Option<Account>>;

    /// Insert a new account
    async fn create(&self, account: NewAccount) -> AppResult<Account>;

    /// Apply a partial update; fails with `NotFound` for unknown IDs
    async fn update(&self, id: Uuid, changes: AccountChanges) -> AppResult<Account>;

    /// Delete account by ID; profiles are removed by the database cascade
    async fn delete(&self, id: Uuid) -> AppResult<()>;

    /// List all accounts, oldest first
    async fn list(&self) -> AppResult<Vec<Account>>;

    /// List one page of accounts together with the total count
    async fn list_paginated(&self, params: &PaginationParams) -> AppResult<(Vec<Account>, u64)>;
}

/// SeaORM-backed account store
pub struct AccountStore {
    db: DatabaseConnection,
}

impl AccountStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AccountRepository for AccountStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Account>> {
        UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Account::try_from)
            .transpose()
    }

    async fn find_by_phone_number(&self, phone_number: &str) -> AppResult<Option<Account>> {
        UserEntity::find()
            .filter(user::Column::PhoneNumber.eq(phone_number))
            .one(&self.db)
            .await?
            .map(Account::try_from)
            .transpose()
    }

    async fn create(&self, account: NewAccount) -> AppResult<Account> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            phone_number: Set(account.phone_number),
            password_hash: Set(account.password_hash),
            role: Set(account.role.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Account::try_from(model)
    }

    async fn update(&self, id: Uuid, changes: AccountChanges) -> AppResult<Account> {
        let account = UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = account.into();

        if let Some(phone_number) = changes.phone_number {
            active.phone_number = Set(phone_number);
        }
        if let Some(password_hash) = changes.password_hash {
            active.password_hash = Set(password_hash);
        }
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Account::try_from(model)
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = UserEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    async fn list(&self) -> AppResult<Vec<Account>> {
        UserEntity::find()
            .order_by_asc(user::Column::CreatedAt)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Account::try_from)
            .collect()
    }

    async fn list_paginated(&self, params: &PaginationParams) -> AppResult<(Vec<Account>, u64)> {
        let paginator = UserEntity::find()
            .order_by_asc(user::Column::CreatedAt)
            .paginate(&self.db, params.limit());
        let total = paginator.num_items().await?;
        let accounts = paginator
            .fetch_page(params.page.saturating_sub(1))
            .await?
            .into_iter()
            .map(Account::try_from)
            .collect::<AppResult<Vec<_>>>()?;

        Ok((accounts, total))
    }
}
