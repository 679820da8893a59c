//! Account service - account creation with role-specific profiles and
//! the plain account lookups around it.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::domain::{
    Account, AccountChanges, AccountView, CreateAccount, NewAccount, NewProfile, PasswordHasher,
    Role, RoleSelector, UpdateAccount,
};
use crate::errors::{AppError, AppResult, ErrorKind, OptionExt};
use crate::infra::UnitOfWork;
use crate::types::{Paginated, PaginationParams};

/// Account service trait for dependency injection.
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Create an account together with the profile its role requires
    async fn create_account(&self, payload: CreateAccount) -> AppResult<AccountView>;

    /// Get an account merged with its profile
    async fn get_account(&self, id: Uuid) -> AppResult<AccountView>;

    /// List all accounts
    async fn list_accounts(&self) -> AppResult<Vec<Account>>;

    /// List one page of accounts
    async fn list_accounts_paginated(
        &self,
        params: PaginationParams,
    ) -> AppResult<Paginated<Account>>;

    /// Update account details (the role is fixed at creation)
    async fn update_account(&self, id: Uuid, payload: UpdateAccount) -> AppResult<Account>;

    /// Delete an account and, through the store, its profile
    async fn delete_account(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of AccountService using Unit of Work.
pub struct AccountManager<U: UnitOfWork> {
    uow: Arc<U>,
    hasher: Arc<dyn PasswordHasher>,
}

impl<U: UnitOfWork> AccountManager<U> {
    /// Create new account service instance
    pub fn new(uow: Arc<U>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { uow, hasher }
    }

    #[tracing::instrument(skip_all, fields(role = %payload.role))]
    async fn create(&self, payload: CreateAccount) -> AppResult<AccountView> {
        payload.validate()?;
        let (role, consumer_type) = RoleSelector::try_from(payload.role.as_str())?.normalize();

        let accounts = self.uow.accounts();
        if accounts
            .find_by_phone_number(&payload.phone_number)
            .await?
            .is_some()
        {
            return Err(AppError::user_creation("Phone number is already registered"));
        }

        let password_hash = self.hasher.hash(&payload.password).await?;
        let account = accounts
            .create(NewAccount {
                phone_number: payload.phone_number,
                password_hash,
                role,
            })
            .await?;
        tracing::info!(account_id = %account.id, role = %account.role, "Account created");

        let new_profile = match account.role {
            Role::Consumer => NewProfile::Consumer {
                account_id: account.id,
                kind: consumer_type.ok_or_else(|| {
                    AppError::internal(format!(
                        "Account {} stored as consumer without a consumer type",
                        account.id
                    ))
                })?,
            },
            Role::Provider => NewProfile::Provider {
                account_id: account.id,
            },
        };

        // No compensating delete: the account stays behind without a profile.
        let profile = self
            .uow
            .profiles()
            .create(new_profile)
            .await
            .inspect_err(|e| {
                tracing::error!(
                    account_id = %account.id,
                    error = %e,
                    "Profile creation failed, account left without a profile"
                );
            })?;
        tracing::info!(account_id = %account.id, "Profile created");

        AccountView::new(account, profile)
    }
}

#[async_trait]
impl<U: UnitOfWork> AccountService for AccountManager<U> {
    async fn create_account(&self, payload: CreateAccount) -> AppResult<AccountView> {
        self.create(payload)
            .await
            .map_err(|e| e.classify(ErrorKind::Server))
    }

    async fn get_account(&self, id: Uuid) -> AppResult<AccountView> {
        let account = self
            .uow
            .accounts()
            .find_by_id(id)
            .await?
            .ok_or_not_found()?;

        let profile = self
            .uow
            .profiles()
            .find_by_account(account.id, account.role)
            .await?
            .ok_or_else(|| AppError::internal(format!("Account {} has no profile", account.id)))?;

        AccountView::new(account, profile)
    }

    async fn list_accounts(&self) -> AppResult<Vec<Account>> {
        self.uow.accounts().list().await
    }

    async fn list_accounts_paginated(
        &self,
        params: PaginationParams,
    ) -> AppResult<Paginated<Account>> {
        let (accounts, total) = self.uow.accounts().list_paginated(&params).await?;
        Ok(Paginated::new(accounts, &params, total))
    }

    async fn update_account(&self, id: Uuid, payload: UpdateAccount) -> AppResult<Account> {
        payload.validate()?;

        if let Some(ref phone_number) = payload.phone_number {
            let taken = self
                .uow
                .accounts()
                .find_by_phone_number(phone_number)
                .await?
                .is_some_and(|existing| existing.id != id);
            if taken {
                return Err(AppError::validation("Phone number is already registered"));
            }
        }

        let changes = AccountChanges {
            phone_number: payload.phone_number,
            ..AccountChanges::default()
        };
        self.uow.accounts().update(id, changes).await
    }

    async fn delete_account(&self, id: Uuid) -> AppResult<()> {
        self.uow.accounts().delete(id).await?;
        tracing::info!(account_id = %id, "Account deleted");
        Ok(())
    }
}
