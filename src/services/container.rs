//! Service Container - Centralized service access.
//!
//! Handlers and commands reach every application service through one
//! container instead of wiring stores and hashers themselves.

use std::sync::Arc;

use super::{AccountManager, AccountService, CredentialManager, CredentialService};
use crate::config::Config;
use crate::domain::{Argon2Hasher, PasswordHasher};
use crate::infra::Persistence;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    /// Get account service
    fn accounts(&self) -> Arc<dyn AccountService>;

    /// Get credential service
    fn credentials(&self) -> Arc<dyn CredentialService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    account_service: Arc<dyn AccountService>,
    credential_service: Arc<dyn CredentialService>,
}

impl Services {
    /// Create a new service container from already built services
    pub fn new(
        account_service: Arc<dyn AccountService>,
        credential_service: Arc<dyn CredentialService>,
    ) -> Self {
        Self {
            account_service,
            credential_service,
        }
    }

    /// Create service container from database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        let uow = Arc::new(Persistence::new(db));
        let hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2Hasher::new());

        Self {
            account_service: Arc::new(AccountManager::new(uow.clone(), hasher.clone())),
            credential_service: Arc::new(CredentialManager::new(uow, hasher, config)),
        }
    }
}

impl ServiceContainer for Services {
    fn accounts(&self) -> Arc<dyn AccountService> {
        self.account_service.clone()
    }

    fn credentials(&self) -> Arc<dyn CredentialService> {
        self.credential_service.clone()
    }
}
