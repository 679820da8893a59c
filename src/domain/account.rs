//! Account domain entity and related types.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::config::{ROLE_CONSUMER, ROLE_PROVIDER};
use crate::errors::AppError;

/// Phone numbers are plain digit strings.
static PHONE_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").unwrap());

/// Role selectors accepted on account creation.
static ROLE_SELECTOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(organisation|provider|consumer)$").unwrap());

/// Stored account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Consumer,
    Provider,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Consumer => ROLE_CONSUMER,
            Role::Provider => ROLE_PROVIDER,
        }
    }
}

impl TryFrom<&str> for Role {
    type Error = AppError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            ROLE_CONSUMER => Ok(Role::Consumer),
            ROLE_PROVIDER => Ok(Role::Provider),
            other => Err(AppError::internal(format!("Unknown stored role: {}", other))),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Account domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub phone_number: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to insert an account. The credential is already hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub phone_number: String,
    pub password_hash: String,
    pub role: Role,
}

/// Partial account update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountChanges {
    pub phone_number: Option<String>,
    pub password_hash: Option<String>,
}

impl AccountChanges {
    /// Changes replacing only the credential hash.
    pub fn password(password_hash: String) -> Self {
        Self {
            password_hash: Some(password_hash),
            ..Self::default()
        }
    }
}

/// Account creation request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateAccount {
    /// Phone number, digits only
    #[validate(
        length(min = 1, message = "Phone number is required"),
        regex(path = *PHONE_NUMBER, message = "Phone number must contain digits only")
    )]
    #[schema(example = "2547000000")]
    pub phone_number: String,
    /// Password (minimum 4 characters)
    #[validate(length(min = 4, message = "Password must be at least 4 characters"))]
    #[schema(example = "abcd", min_length = 4)]
    pub password: String,
    /// One of `organisation`, `provider`, `consumer`
    #[validate(regex(
        path = *ROLE_SELECTOR,
        message = "Role must be one of organisation, provider, consumer"
    ))]
    #[schema(example = "organisation")]
    pub role: String,
}

/// Account update request
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateAccount {
    /// New phone number, digits only
    #[validate(
        length(min = 1, message = "Phone number cannot be empty"),
        regex(path = *PHONE_NUMBER, message = "Phone number must contain digits only")
    )]
    #[schema(example = "2547000001")]
    pub phone_number: Option<String>,
}

/// Credential rotation request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ChangePassword {
    /// Current password
    #[validate(length(min = 1, message = "Old password is required"))]
    pub old_password: String,
    /// Replacement password
    #[validate(length(min = 1, message = "New password is required"))]
    pub new_password: String,
}

/// Result of a successful credential rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PasswordUpdated {
    #[schema(example = true)]
    pub updated: bool,
}

/// Account response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AccountResponse {
    /// Unique account identifier
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    #[schema(example = "2547000000")]
    pub phone_number: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            phone_number: account.phone_number,
            role: account.role,
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}
