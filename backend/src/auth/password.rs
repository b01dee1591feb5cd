//! Password hashing using argon2
//!
//! New hashes are argon2id PHC strings. Bcrypt hashes (`$2a$`, `$2b$`,
//! `$2y$`) from accounts imported out of the previous user store are still
//! accepted for verification. Both comparisons are constant-time.
//!
//! Hashing is CPU-intensive; the `_async` variants move the work onto the
//! blocking thread pool.

use anyhow::Result;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use once_cell::sync::Lazy;

/// Hash verified when a login names an unknown user, so that both failure
/// paths do the same amount of work
static DUMMY_HASH: Lazy<String> =
    Lazy::new(|| PasswordService::hash("not-a-real-password").unwrap_or_default());

/// Password hashing service
pub struct PasswordService;

impl PasswordService {
    /// Hash a password using argon2id (blocking operation)
    pub fn hash(password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;
        Ok(hash.to_string())
    }

    /// Hash a password on the blocking thread pool
    pub async fn hash_async(password: String) -> Result<String> {
        tokio::task::spawn_blocking(move || Self::hash(&password))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }

    /// Verify a password against a stored hash (blocking operation)
    pub fn verify(password: &str, hash: &str) -> Result<bool> {
        if Self::is_bcrypt(hash) {
            return bcrypt::verify(password, hash)
                .map_err(|e| anyhow::anyhow!("Invalid bcrypt hash: {}", e));
        }

        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| anyhow::anyhow!("Invalid hash format: {}", e))?;
        let argon2 = Argon2::default();
        Ok(argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Verify a password on the blocking thread pool
    pub async fn verify_async(password: String, hash: String) -> Result<bool> {
        tokio::task::spawn_blocking(move || Self::verify(&password, &hash))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }

    /// Burn one verification for a login against an unknown username
    pub async fn verify_unknown_user(password: String) {
        let _ = tokio::task::spawn_blocking(move || Self::verify(&password, &DUMMY_HASH)).await;
    }

    fn is_bcrypt(hash: &str) -> bool {
        ["$2a$", "$2b$", "$2y$"]
            .iter()
            .any(|prefix| hash.starts_with(prefix))
    }
}
