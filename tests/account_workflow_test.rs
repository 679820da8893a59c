//! Account creation and credential rotation against in-memory stores.

mod common;

use std::sync::Arc;

use uuid::Uuid;

use account_service::config::Config;
use account_service::domain::{
    Argon2Hasher, ChangePassword, ConsumerType, CreateAccount, PasswordHasher, Profile, Role,
    UpdateAccount,
};
use account_service::errors::{AppError, ErrorKind};
use account_service::services::{
    AccountManager, AccountService, CredentialManager, CredentialService,
};
use account_service::types::PaginationParams;

use common::{PlainHasher, TestUnitOfWork, TEST_SECRET};

struct Harness {
    uow: Arc<TestUnitOfWork>,
    hasher: Arc<dyn PasswordHasher>,
    accounts: AccountManager<TestUnitOfWork>,
    credentials: CredentialManager<TestUnitOfWork>,
}

fn harness(hasher: Arc<dyn PasswordHasher>) -> Harness {
    let uow = Arc::new(TestUnitOfWork::default());
    Harness {
        accounts: AccountManager::new(uow.clone(), hasher.clone()),
        credentials: CredentialManager::new(
            uow.clone(),
            hasher.clone(),
            Config::with_secret(TEST_SECRET).unwrap(),
        ),
        uow,
        hasher,
    }
}

fn request(phone_number: &str, password: &str, role: &str) -> CreateAccount {
    CreateAccount {
        phone_number: phone_number.to_string(),
        password: password.to_string(),
        role: role.to_string(),
    }
}

fn rotation(old: &str, new: &str) -> ChangePassword {
    ChangePassword {
        old_password: old.to_string(),
        new_password: new.to_string(),
    }
}

// =============================================================================
// Account creation
// =============================================================================

#[tokio::test]
async fn test_consumer_gets_customer_profile() {
    let h = harness(Arc::new(PlainHasher));

    for phone in ["2547000001", "2547000002", "2547000003"] {
        let view = h
            .accounts
            .create_account(request(phone, "abcd", "consumer"))
            .await
            .unwrap();

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["role"], "consumer");
        assert_eq!(json["consumer"]["type"], "customer");
        assert_eq!(json["consumer"]["user_id"], view.account.id.to_string());
    }
}

#[tokio::test]
async fn test_organisation_scenario() {
    let h = harness(Arc::new(PlainHasher));

    let view = h
        .accounts
        .create_account(request("2547000000", "abcd", "organisation"))
        .await
        .unwrap();

    let stored = h.uow.accounts.get(view.account.id).unwrap();
    assert_eq!(stored.role, Role::Consumer);
    assert_eq!(stored.phone_number, "2547000000");
    match &view.profile {
        Profile::Consumer(profile) => assert_eq!(profile.kind, ConsumerType::Organisation),
        other => panic!("unexpected profile {:?}", other),
    }

    // The profile is embedded under the stored role
    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["consumer"]["type"], "organisation");
    assert!(json.get("organisation").is_none());
}

#[tokio::test]
async fn test_provider_profile_references_account() {
    let h = harness(Arc::new(PlainHasher));

    let view = h
        .accounts
        .create_account(request("2547000000", "abcd", "provider"))
        .await
        .unwrap();

    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["role"], "provider");
    assert_eq!(json["provider"]["user_id"], view.account.id.to_string());
    assert!(json.get("consumer").is_none());
}

#[tokio::test]
async fn test_get_after_create_matches_selector() {
    let h = harness(Arc::new(PlainHasher));
    let cases = [
        ("2547000001", "consumer", Role::Consumer, Some(ConsumerType::Customer)),
        ("2547000002", "organisation", Role::Consumer, Some(ConsumerType::Organisation)),
        ("2547000003", "provider", Role::Provider, None),
    ];

    for (phone, selector, role, kind) in cases {
        let created = h
            .accounts
            .create_account(request(phone, "abcd", selector))
            .await
            .unwrap();
        let fetched = h.accounts.get_account(created.account.id).await.unwrap();

        assert_eq!(fetched.account.role, role);
        assert_eq!(fetched.profile, created.profile);
        match fetched.profile {
            Profile::Consumer(profile) => assert_eq!(Some(profile.kind), kind),
            Profile::Provider(_) => assert!(kind.is_none()),
        }
    }
}

#[tokio::test]
async fn test_unknown_role_rejected_before_any_write() {
    let h = harness(Arc::new(PlainHasher));

    let err = h
        .accounts
        .create_account(request("2547000000", "abcd", "manager"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(h.uow.accounts.writes(), 0);
    assert_eq!(h.uow.profiles.len(), 0);
}

#[tokio::test]
async fn test_short_password_rejected() {
    let h = harness(Arc::new(PlainHasher));

    let err = h
        .accounts
        .create_account(request("2547000000", "abc", "consumer"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(h.uow.accounts.len(), 0);
}

#[tokio::test]
async fn test_duplicate_phone_number_rejected() {
    let h = harness(Arc::new(PlainHasher));
    h.accounts
        .create_account(request("2547000000", "abcd", "consumer"))
        .await
        .unwrap();

    let err = h
        .accounts
        .create_account(request("2547000000", "efgh", "provider"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::UserCreation);
    assert_eq!(h.uow.accounts.len(), 1);
}

#[tokio::test]
async fn test_profile_failure_leaves_account_behind() {
    let h = harness(Arc::new(PlainHasher));
    h.uow.profiles.fail_creates();

    let err = h
        .accounts
        .create_account(request("2547000000", "abcd", "consumer"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Server);
    assert_eq!(h.uow.accounts.len(), 1);
    assert_eq!(h.uow.profiles.len(), 0);
}

#[tokio::test]
async fn test_password_is_hashed_before_storage() {
    let h = harness(Arc::new(PlainHasher));

    let view = h
        .accounts
        .create_account(request("2547000000", "abcd", "provider"))
        .await
        .unwrap();

    let stored = h.uow.accounts.get(view.account.id).unwrap();
    assert_eq!(stored.password_hash, "plain:abcd");
    let json = serde_json::to_string(&view).unwrap();
    assert!(!json.contains("plain:abcd"));
}

// =============================================================================
// Listing, update and delete
// =============================================================================

#[tokio::test]
async fn test_list_and_paginate() {
    let h = harness(Arc::new(PlainHasher));
    for i in 0..5 {
        h.accounts
            .create_account(request(&format!("254700000{}", i), "abcd", "consumer"))
            .await
            .unwrap();
    }

    assert_eq!(h.accounts.list_accounts().await.unwrap().len(), 5);

    let page = h
        .accounts
        .list_accounts_paginated(PaginationParams { page: 2, per_page: 2 })
        .await
        .unwrap();
    assert_eq!(page.data.len(), 2);
    assert_eq!(page.meta.total, 5);
    assert_eq!(page.meta.total_pages, 3);
}

#[tokio::test]
async fn test_update_phone_number_keeps_role() {
    let h = harness(Arc::new(PlainHasher));
    let view = h
        .accounts
        .create_account(request("2547000000", "abcd", "organisation"))
        .await
        .unwrap();

    let updated = h
        .accounts
        .update_account(
            view.account.id,
            UpdateAccount {
                phone_number: Some("2547000009".to_string()),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.phone_number, "2547000009");
    assert_eq!(updated.role, Role::Consumer);
}

#[tokio::test]
async fn test_delete_account() {
    let h = harness(Arc::new(PlainHasher));
    let view = h
        .accounts
        .create_account(request("2547000000", "abcd", "provider"))
        .await
        .unwrap();

    h.accounts.delete_account(view.account.id).await.unwrap();

    assert!(matches!(
        h.accounts.get_account(view.account.id).await,
        Err(AppError::NotFound)
    ));
    assert!(matches!(
        h.accounts.delete_account(view.account.id).await,
        Err(AppError::NotFound)
    ));
}

// =============================================================================
// Credential rotation
// =============================================================================

#[tokio::test]
async fn test_rotation_scenario() {
    let h = harness(Arc::new(Argon2Hasher::new()));
    let view = h
        .accounts
        .create_account(request("2547000000", "right", "consumer"))
        .await
        .unwrap();
    let id = view.account.id;
    let before = h.uow.accounts.get(id).unwrap();

    let result = h
        .credentials
        .change_password(id, rotation("right", "newpass"))
        .await
        .unwrap();
    assert!(result.updated);

    let after = h.uow.accounts.get(id).unwrap();
    assert!(h.hasher.verify("newpass", &after.password_hash).await.unwrap());
    assert!(!h.hasher.verify("right", &after.password_hash).await.unwrap());
    assert_eq!(after.phone_number, before.phone_number);
    assert_eq!(after.role, before.role);
}

#[tokio::test]
async fn test_wrong_old_password_leaves_hash_unchanged() {
    let h = harness(Arc::new(Argon2Hasher::new()));
    let view = h
        .accounts
        .create_account(request("2547000000", "right", "provider"))
        .await
        .unwrap();
    let id = view.account.id;
    let before = h.uow.accounts.get(id).unwrap().password_hash;

    let err = h
        .credentials
        .change_password(id, rotation("wrong", "newpass"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::PasswordUpdate);
    assert_eq!(h.uow.accounts.get(id).unwrap().password_hash, before);
}

#[tokio::test]
async fn test_rotation_for_missing_account() {
    let h = harness(Arc::new(PlainHasher));

    let err = h
        .credentials
        .change_password(Uuid::new_v4(), rotation("right", "newpass"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::PasswordUpdate);
    assert_eq!(err.user_message(), "User cannot be found");
}

#[tokio::test]
async fn test_token_round_trip() {
    let h = harness(Arc::new(PlainHasher));
    let view = h
        .accounts
        .create_account(request("2547000000", "abcd", "organisation"))
        .await
        .unwrap();

    let token = h.credentials.issue_token(view.account.id).await.unwrap();
    let claims = h.credentials.verify_token(&token.access_token).unwrap();

    assert_eq!(claims.sub, view.account.id);
    assert_eq!(claims.role, "consumer");
    assert!(claims.exp > claims.iat);
}
