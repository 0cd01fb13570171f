//! Service traits consumed by the write guard

use crate::core::request::WriteParams;
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Executes a write against persistence
///
/// This is the last hop of a write pipeline. Implementations receive only
/// the write parameters; per-call guard options never reach them.
#[async_trait]
pub trait WriteExecutor: Send + Sync {
    /// Perform the write and return its result
    async fn execute(&self, params: WriteParams) -> Result<Value>;
}

/// Turns plaintext passwords into stored hashes
///
/// The guard treats hashing as opaque; errors are propagated unchanged.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password
    async fn hash_password(&self, plaintext: &str) -> Result<String>;

    /// Check a plaintext password against a stored hash
    async fn verify_password(&self, plaintext: &str, hash: &str) -> Result<bool>;
}
