//! In-memory stores shared by the integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use account_service::domain::{
    Account, AccountChanges, ConsumerProfile, NewAccount, NewProfile, PasswordHasher, Profile,
    ProviderProfile, Role,
};
use account_service::errors::{AppError, AppResult};
use account_service::infra::{AccountRepository, ProfileRepository, UnitOfWork};
use account_service::types::PaginationParams;

pub const TEST_SECRET: &str = "test-secret-key-for-testing-only-32chars";

#[derive(Default)]
pub struct InMemoryAccounts {
    rows: Mutex<HashMap<Uuid, Account>>,
    writes: Mutex<usize>,
}

impl InMemoryAccounts {
    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    /// Inserts, updates and deletes seen so far
    pub fn writes(&self) -> usize {
        *self.writes.lock().unwrap()
    }

    pub fn get(&self, id: Uuid) -> Option<Account> {
        self.rows.lock().unwrap().get(&id).cloned()
    }

    fn record_write(&self) {
        *self.writes.lock().unwrap() += 1;
    }

    fn sorted(&self) -> Vec<Account> {
        let mut accounts: Vec<Account> = self.rows.lock().unwrap().values().cloned().collect();
        accounts.sort_by_key(|a| a.created_at);
        accounts
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccounts {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Account>> {
        Ok(self.get(id))
    }

    async fn find_by_phone_number(&self, phone_number: &str) -> AppResult<Option<Account>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .find(|a| a.phone_number == phone_number)
            .cloned())
    }

    async fn create(&self, account: NewAccount) -> AppResult<Account> {
        self.record_write();
        let now = Utc::now();
        let account = Account {
            id: Uuid::new_v4(),
            phone_number: account.phone_number,
            password_hash: account.password_hash,
            role: account.role,
            created_at: now,
            updated_at: now,
        };
        self.rows
            .lock()
            .unwrap()
            .insert(account.id, account.clone());
        Ok(account)
    }

    async fn update(&self, id: Uuid, changes: AccountChanges) -> AppResult<Account> {
        self.record_write();
        let mut rows = self.rows.lock().unwrap();
        let account = rows.get_mut(&id).ok_or(AppError::NotFound)?;
        if let Some(phone_number) = changes.phone_number {
            account.phone_number = phone_number;
        }
        if let Some(password_hash) = changes.password_hash {
            account.password_hash = password_hash;
        }
        account.updated_at = Utc::now();
        Ok(account.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.record_write();
        self.rows
            .lock()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or(AppError::NotFound)
    }

    async fn list(&self) -> AppResult<Vec<Account>> {
        Ok(self.sorted())
    }

    async fn list_paginated(&self, params: &PaginationParams) -> AppResult<(Vec<Account>, u64)> {
        let accounts = self.sorted();
        let total = accounts.len() as u64;
        let skip = (params.page.max(1) - 1) * params.limit();
        let page = accounts
            .into_iter()
            .skip(skip as usize)
            .take(params.limit() as usize)
            .collect();
        Ok((page, total))
    }
}

#[derive(Default)]
pub struct InMemoryProfiles {
    rows: Mutex<Vec<Profile>>,
    fail_creates: AtomicBool,
}

impl InMemoryProfiles {
    /// Make every following profile insert fail
    pub fn fail_creates(&self) {
        self.fail_creates.store(true, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfiles {
    async fn create(&self, profile: NewProfile) -> AppResult<Profile> {
        if self.fail_creates.load(Ordering::SeqCst) {
            return Err(AppError::internal("profile insert failed"));
        }

        let now = Utc::now();
        let profile = match profile {
            NewProfile::Consumer { account_id, kind } => Profile::Consumer(ConsumerProfile {
                id: Uuid::new_v4(),
                user_id: account_id,
                kind,
                created_at: now,
                updated_at: now,
            }),
            NewProfile::Provider { account_id } => Profile::Provider(ProviderProfile {
                id: Uuid::new_v4(),
                user_id: account_id,
                created_at: now,
                updated_at: now,
            }),
        };
        self.rows.lock().unwrap().push(profile.clone());
        Ok(profile)
    }

    async fn find_by_account(&self, account_id: Uuid, role: Role) -> AppResult<Option<Profile>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.user_id() == account_id && p.role() == role)
            .cloned())
    }
}

#[derive(Default)]
pub struct TestUnitOfWork {
    pub accounts: Arc<InMemoryAccounts>,
    pub profiles: Arc<InMemoryProfiles>,
}

impl UnitOfWork for TestUnitOfWork {
    fn accounts(&self) -> Arc<dyn AccountRepository> {
        self.accounts.clone()
    }

    fn profiles(&self) -> Arc<dyn ProfileRepository> {
        self.profiles.clone()
    }
}

/// Reversible stand-in for Argon2, for tests that do not exercise hashing.
pub struct PlainHasher;

#[async_trait]
impl PasswordHasher for PlainHasher {
    async fn hash(&self, plain_text: &str) -> AppResult<String> {
        Ok(format!("plain:{}", plain_text))
    }

    async fn verify(&self, plain_text: &str, hash: &str) -> AppResult<bool> {
        Ok(hash.strip_prefix("plain:") == Some(plain_text))
    }
}
