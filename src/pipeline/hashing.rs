//! Password hashing stage

use super::WriteStage;
use crate::config::GuardConfig;
use crate::core::field::WriteData;
use crate::core::request::{WriteArgs, WriteRequest};
use crate::core::service::PasswordHasher;
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Replaces plaintext passwords with their hash before persistence
///
/// Never inspects password content; that is the validation stage's job.
pub struct HashingStage {
    config: GuardConfig,
    hasher: Arc<dyn PasswordHasher>,
}

impl HashingStage {
    pub fn new(config: GuardConfig, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { config, hasher }
    }

    async fn hash_field(&self, data: &mut WriteData) -> Result<()> {
        let field = self.config.password_field.as_str();
        let Some(value) = data.get(field) else {
            return Ok(());
        };

        let Value::String(plaintext) = value else {
            anyhow::bail!("{} must be a string", field);
        };

        let hashed = self.hasher.hash_password(plaintext).await?;
        data.set(field, hashed);

        tracing::debug!(field = %field, "Password hashed");
        Ok(())
    }
}

#[async_trait]
impl WriteStage for HashingStage {
    fn name(&self) -> &'static str {
        "password_hashing"
    }

    async fn apply(&self, mut request: WriteRequest) -> Result<WriteRequest> {
        if !self.config.governs(request.model()) {
            return Ok(request);
        }

        match &mut request.params.args {
            WriteArgs::Data(data) => self.hash_field(data).await?,
            WriteArgs::Upsert { create, update } => {
                self.hash_field(create).await?;
                self.hash_field(update).await?;
            }
        }

        Ok(request)
    }
}
