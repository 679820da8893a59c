//! Unit of Work pattern implementation.
//!
//! Centralizes access to the account and profile repositories so services
//! depend on one abstraction instead of wiring each store separately.
//!
//! Account creation writes the account and its profile as two separate
//! statements. A failure between them leaves an account without a profile;
//! the creation workflow logs that account's ID for manual repair.

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use super::repositories::{AccountRepository, AccountStore, ProfileRepository, ProfileStore};

/// Unit of Work trait for dependency injection.
pub trait UnitOfWork: Send + Sync {
    /// Get account repository
    fn accounts(&self) -> Arc<dyn AccountRepository>;

    /// Get profile repository
    fn profiles(&self) -> Arc<dyn ProfileRepository>;
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    account_repo: Arc<AccountStore>,
    profile_repo: Arc<ProfileStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            account_repo: Arc::new(AccountStore::new(db.clone())),
            profile_repo: Arc::new(ProfileStore::new(db)),
        }
    }
}

impl UnitOfWork for Persistence {
    fn accounts(&self) -> Arc<dyn AccountRepository> {
        self.account_repo.clone()
    }

    fn profiles(&self) -> Arc<dyn ProfileRepository> {
        self.profile_repo.clone()
    }
}
