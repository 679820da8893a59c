//! Credential service - password rotation and bearer token handling.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::config::{Config, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};
use crate::domain::{Account, AccountChanges, ChangePassword, PasswordHasher, PasswordUpdated};
use crate::errors::{AppError, AppResult, ErrorKind, OptionExt};
use crate::infra::UnitOfWork;

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

/// Bearer token issued for an account
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token expiration time in seconds
    #[schema(example = 86400)]
    pub expires_in: i64,
}

/// Credential service trait for dependency injection.
#[async_trait]
pub trait CredentialService: Send + Sync {
    /// Replace the password of an account after checking the current one.
    ///
    /// Every failure is reported as a password update error, except
    /// request validation failures.
    async fn change_password(
        &self,
        account_id: Uuid,
        payload: ChangePassword,
    ) -> AppResult<PasswordUpdated>;

    /// Issue a bearer token for an existing account
    async fn issue_token(&self, account_id: Uuid) -> AppResult<TokenResponse>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

fn generate_token(account: &Account, config: &Config) -> AppResult<TokenResponse> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.jwt_expiration_hours);

    let claims = Claims {
        sub: account.id,
        role: account.role.to_string(),
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok(TokenResponse {
        access_token: token,
        token_type: TOKEN_TYPE_BEARER.to_string(),
        expires_in: config.jwt_expiration_hours * SECONDS_PER_HOUR,
    })
}

/// Concrete implementation of CredentialService using Unit of Work.
pub struct CredentialManager<U: UnitOfWork> {
    uow: Arc<U>,
    hasher: Arc<dyn PasswordHasher>,
    config: Config,
}

impl<U: UnitOfWork> CredentialManager<U> {
    pub fn new(uow: Arc<U>, hasher: Arc<dyn PasswordHasher>, config: Config) -> Self {
        Self {
            uow,
            hasher,
            config,
        }
    }

    #[tracing::instrument(skip(self, payload))]
    async fn rotate(&self, account_id: Uuid, payload: ChangePassword) -> AppResult<PasswordUpdated> {
        payload.validate()?;

        let accounts = self.uow.accounts();
        let account = accounts
            .find_by_id(account_id)
            .await?
            .ok_or_not_found()?;

        if !self
            .hasher
            .verify(&payload.old_password, &account.password_hash)
            .await?
        {
            tracing::warn!(%account_id, "Password rotation rejected: old password mismatch");
            return Err(AppError::password_update("Old password is incorrect"));
        }

        let password_hash = self.hasher.hash(&payload.new_password).await?;
        accounts
            .update(account.id, AccountChanges::password(password_hash))
            .await?;
        tracing::info!(%account_id, "Password updated");

        Ok(PasswordUpdated { updated: true })
    }
}

#[async_trait]
impl<U: UnitOfWork> CredentialService for CredentialManager<U> {
    async fn change_password(
        &self,
        account_id: Uuid,
        payload: ChangePassword,
    ) -> AppResult<PasswordUpdated> {
        self.rotate(account_id, payload)
            .await
            .map_err(|e| e.classify(ErrorKind::PasswordUpdate))
    }

    async fn issue_token(&self, account_id: Uuid) -> AppResult<TokenResponse> {
        let account = self
            .uow
            .accounts()
            .find_by_id(account_id)
            .await?
            .ok_or_not_found()?;

        generate_token(&account, &self.config)
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}
