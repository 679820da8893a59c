//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::Database;
use crate::services::{AccountService, CredentialService, ServiceContainer, Services};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Account creation and lookups
    pub accounts: Arc<dyn AccountService>,
    /// Password rotation and token verification
    pub credentials: Arc<dyn CredentialService>,
    /// Database connection, used by the health check
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from database connection and config.
    pub fn from_config(database: Arc<Database>, config: Config) -> Self {
        let container = Services::from_connection(database.get_connection(), config);

        Self {
            accounts: container.accounts(),
            credentials: container.credentials(),
            database,
        }
    }

    /// Create new application state with manually injected services.
    pub fn new(
        accounts: Arc<dyn AccountService>,
        credentials: Arc<dyn CredentialService>,
        database: Arc<Database>,
    ) -> Self {
        Self {
            accounts,
            credentials,
            database,
        }
    }
}
