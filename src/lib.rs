//! Account service - consumer, organisation and provider accounts.
//!
//! Every account owns exactly one role-specific profile. Organisations
//! are consumers whose profile type is `organisation`.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Accounts, profiles and password hashing
//! - **services**: Account creation and credential rotation workflows
//! - **infra**: Database, migrations and repositories
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Shared types (pagination, responses)
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//!
//! # Issue a bearer token for an account
//! cargo run -- token 550e8400-e29b-41d4-a716-446655440000
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Account, AccountView, Profile, Role};
pub use errors::{AppError, AppResult, ErrorKind};
