//! Role-specific profiles and the composite account view.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::account::{Account, AccountResponse, Role};
use crate::config::{
    CONSUMER_TYPE_CUSTOMER, CONSUMER_TYPE_ORGANISATION, ROLE_CONSUMER, ROLE_ORGANISATION,
    ROLE_PROVIDER, VALID_ROLE_SELECTORS,
};
use crate::errors::AppError;

/// Role requested on account creation.
///
/// `Organisation` is a consumer sub-kind and is never stored as a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleSelector {
    Organisation,
    Provider,
    Consumer,
}

impl RoleSelector {
    /// Split the selector into the stored role and, for the consumer
    /// family, the consumer profile type.
    pub fn normalize(self) -> (Role, Option<ConsumerType>) {
        match self {
            RoleSelector::Organisation => (Role::Consumer, Some(ConsumerType::Organisation)),
            RoleSelector::Consumer => (Role::Consumer, Some(ConsumerType::Customer)),
            RoleSelector::Provider => (Role::Provider, None),
        }
    }
}

impl TryFrom<&str> for RoleSelector {
    type Error = AppError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            ROLE_ORGANISATION => Ok(RoleSelector::Organisation),
            ROLE_PROVIDER => Ok(RoleSelector::Provider),
            ROLE_CONSUMER => Ok(RoleSelector::Consumer),
            _ => Err(AppError::validation(format!(
                "Role must be one of {}",
                VALID_ROLE_SELECTORS.join(", ")
            ))),
        }
    }
}

/// Kind of consumer behind a consumer profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ConsumerType {
    Customer,
    Organisation,
}

impl ConsumerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConsumerType::Customer => CONSUMER_TYPE_CUSTOMER,
            ConsumerType::Organisation => CONSUMER_TYPE_ORGANISATION,
        }
    }
}

impl TryFrom<&str> for ConsumerType {
    type Error = AppError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            CONSUMER_TYPE_CUSTOMER => Ok(ConsumerType::Customer),
            CONSUMER_TYPE_ORGANISATION => Ok(ConsumerType::Organisation),
            other => Err(AppError::internal(format!("Unknown consumer type: {}", other))),
        }
    }
}

/// Profile of a consumer account (customer or organisation).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ConsumerProfile {
    pub id: Uuid,
    /// Owning account
    pub user_id: Uuid,
    #[serde(rename = "type")]
    pub kind: ConsumerType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Profile of a provider account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProviderProfile {
    pub id: Uuid,
    /// Owning account
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Role-specific profile. Serializes under a key named after the role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    Consumer(ConsumerProfile),
    Provider(ProviderProfile),
}

impl Profile {
    /// Role whose accounts own this variant.
    pub fn role(&self) -> Role {
        match self {
            Profile::Consumer(_) => Role::Consumer,
            Profile::Provider(_) => Role::Provider,
        }
    }

    pub fn user_id(&self) -> Uuid {
        match self {
            Profile::Consumer(p) => p.user_id,
            Profile::Provider(p) => p.user_id,
        }
    }
}

/// Profile to insert for a freshly created account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewProfile {
    Consumer { account_id: Uuid, kind: ConsumerType },
    Provider { account_id: Uuid },
}

impl NewProfile {
    pub fn account_id(&self) -> Uuid {
        match self {
            NewProfile::Consumer { account_id, .. } | NewProfile::Provider { account_id } => {
                *account_id
            }
        }
    }
}

/// Account fields merged with the account's profile.
///
/// ```json
/// { "id": "...", "phone_number": "2547000000", "role": "consumer",
///   "consumer": { "id": "...", "user_id": "...", "type": "organisation" } }
/// ```
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AccountView {
    #[serde(flatten)]
    pub account: AccountResponse,
    #[serde(flatten)]
    pub profile: Profile,
}

impl AccountView {
    /// Merge an account with its profile.
    ///
    /// # Errors
    /// Returns an internal error if the profile does not belong to the
    /// account or its variant does not match the account's role.
    pub fn new(account: Account, profile: Profile) -> Result<Self, AppError> {
        if profile.role() != account.role || profile.user_id() != account.id {
            return Err(AppError::internal(format!(
                "Profile of account {} does not match role {}",
                account.id, account.role
            )));
        }

        Ok(Self {
            account: AccountResponse::from(account),
            profile,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(role: Role) -> Account {
        Account {
            id: Uuid::new_v4(),
            phone_number: "2547000000".to_string(),
            password_hash: "hash".to_string(),
            role,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn consumer_profile(user_id: Uuid, kind: ConsumerType) -> Profile {
        Profile::Consumer(ConsumerProfile {
            id: Uuid::new_v4(),
            user_id,
            kind,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        })
    }

    #[test]
    fn test_organisation_is_stored_as_consumer() {
        assert_eq!(
            RoleSelector::Organisation.normalize(),
            (Role::Consumer, Some(ConsumerType::Organisation))
        );
        assert_eq!(
            RoleSelector::Consumer.normalize(),
            (Role::Consumer, Some(ConsumerType::Customer))
        );
        assert_eq!(RoleSelector::Provider.normalize(), (Role::Provider, None));
    }

    #[test]
    fn test_unknown_selector_is_validation_error() {
        let err = RoleSelector::try_from("manager").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_view_embeds_profile_under_role_key() {
        let account = account(Role::Consumer);
        let profile = consumer_profile(account.id, ConsumerType::Organisation);
        let view = AccountView::new(account, profile).unwrap();

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["role"], "consumer");
        assert_eq!(json["consumer"]["type"], "organisation");
        assert!(json.get("password_hash").is_none());
        assert!(json.get("provider").is_none());
    }

    #[test]
    fn test_provider_view() {
        let account = account(Role::Provider);
        let profile = Profile::Provider(ProviderProfile {
            id: Uuid::new_v4(),
            user_id: account.id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        });
        let id = account.id;
        let json = serde_json::to_value(AccountView::new(account, profile).unwrap()).unwrap();
        assert_eq!(json["provider"]["user_id"], id.to_string());
    }

    #[test]
    fn test_mismatched_profile_rejected() {
        let account = account(Role::Provider);
        let profile = consumer_profile(account.id, ConsumerType::Customer);
        let err = AccountView::new(account, profile).unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[test]
    fn test_foreign_profile_rejected() {
        let account = account(Role::Consumer);
        let profile = consumer_profile(Uuid::new_v4(), ConsumerType::Customer);
        assert!(AccountView::new(account, profile).is_err());
    }
}
