//! Password hashing - one-way hash and verification of credentials.
//!
//! Centralized Argon2 configuration behind the `PasswordHasher` port.

use argon2::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString,
    },
    Argon2,
};
use async_trait::async_trait;

use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// One-way credential hashing.
///
/// Both operations are CPU-heavy and may suspend the calling request.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash a plain text password into a self-describing PHC string.
    async fn hash(&self, plain_text: &str) -> AppResult<String>;

    /// Check a plain text password against a stored hash.
    ///
    /// # Errors
    /// Fails if the stored hash cannot be parsed.
    async fn verify(&self, plain_text: &str, hash: &str) -> AppResult<bool>;
}

/// Argon2id hasher with a random salt per hash.
///
/// Work runs on tokio's blocking pool so other requests keep progressing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Hasher;

impl Argon2Hasher {
    pub fn new() -> Self {
        Self
    }

    fn hash_blocking(plain_text: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Self::argon2()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hash failed: {}", e)))?;
        Ok(hash.to_string())
    }

    fn verify_blocking(plain_text: &str, hash: &str) -> AppResult<bool> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| AppError::internal(format!("Invalid hash format: {}", e)))?;
        Ok(Self::argon2()
            .verify_password(plain_text.as_bytes(), &parsed)
            .is_ok())
    }

    #[inline]
    fn argon2() -> Argon2<'static> {
        Argon2::default()
    }
}

#[async_trait]
impl PasswordHasher for Argon2Hasher {
    async fn hash(&self, plain_text: &str) -> AppResult<String> {
        let plain_text = plain_text.to_owned();
        tokio::task::spawn_blocking(move || Self::hash_blocking(&plain_text))
            .await
            .map_err(|e| AppError::internal(format!("Hashing task failed: {}", e)))?
    }

    async fn verify(&self, plain_text: &str, hash: &str) -> AppResult<bool> {
        let plain_text = plain_text.to_owned();
        let hash = hash.to_owned();
        tokio::task::spawn_blocking(move || Self::verify_blocking(&plain_text, &hash))
            .await
            .map_err(|e| AppError::internal(format!("Verification task failed: {}", e)))?
    }
}
