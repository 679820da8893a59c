//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.
//!
//! All services reach the stores through the Unit of Work.

mod account_service;
pub mod container;
mod credential_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use account_service::{AccountManager, AccountService};
pub use credential_service::{Claims, CredentialManager, CredentialService, TokenResponse};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
