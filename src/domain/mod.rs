//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.
//!
//! An account owns exactly one profile, and the account's role decides
//! which profile variant that is.

pub mod account;
pub mod password;
pub mod profile;

pub use account::{
    Account, AccountChanges, AccountResponse, ChangePassword, CreateAccount, NewAccount,
    PasswordUpdated, Role, UpdateAccount,
};
pub use password::{Argon2Hasher, PasswordHasher};
pub use profile::{
    AccountView, ConsumerProfile, ConsumerType, NewProfile, Profile, ProviderProfile,
    RoleSelector,
};
