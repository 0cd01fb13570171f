//! Argon2 password hasher
//!
//! Hashing is CPU-bound, so both operations run on tokio's blocking pool
//! instead of the async worker threads.

use crate::core::PasswordHasher;
use anyhow::{Result, anyhow};
use ::argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};
use async_trait::async_trait;

/// Argon2id hasher with default parameters and a random salt per hash
///
/// Produces PHC strings (`$argon2id$v=19$...`).
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Hasher;

impl Argon2Hasher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PasswordHasher for Argon2Hasher {
    async fn hash_password(&self, plaintext: &str) -> Result<String> {
        let password = plaintext.to_owned();

        tokio::task::spawn_blocking(move || -> Result<String> {
            let salt = SaltString::generate(&mut OsRng);
            let hash = Argon2::default()
                .hash_password(password.as_bytes(), &salt)
                .map_err(|e| anyhow!("Password hashing failed: {}", e))?;
            Ok(hash.to_string())
        })
        .await?
    }

    async fn verify_password(&self, plaintext: &str, hash: &str) -> Result<bool> {
        let password = plaintext.to_owned();
        let hash = hash.to_owned();

        tokio::task::spawn_blocking(move || -> Result<bool> {
            let parsed =
                PasswordHash::new(&hash).map_err(|e| anyhow!("Invalid password hash: {}", e))?;
            Ok(Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok())
        })
        .await?
    }
}
