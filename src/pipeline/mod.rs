//! Write pipeline: ordered stages in front of a persistence executor
//!
//! Every write goes through the registered stages in order. Each stage
//! receives the request and returns a (possibly transformed) request; an
//! error from any stage aborts the write before persistence is reached.
//!
//! ```text
//! WriteRequest ──▶ ValidationStage ──▶ HashingStage ──▶ WriteExecutor
//!                       │                   │
//!                       └── AuthError       └── hasher error
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! let pipeline = WritePipeline::builder(InMemoryUserStore::new())
//!     .with_auth_guard(GuardConfig::default(), Arc::new(Argon2Hasher::new()))
//!     .build();
//!
//! let user = pipeline
//!     .execute(WriteRequest::create("User", data))
//!     .await?;
//! ```

pub mod hashing;
pub mod validation;

pub use hashing::HashingStage;
pub use validation::ValidationStage;

use crate::config::GuardConfig;
use crate::core::request::WriteRequest;
use crate::core::service::{PasswordHasher, WriteExecutor};
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// A named step that inspects or transforms a write before persistence
#[async_trait]
pub trait WriteStage: Send + Sync {
    /// Stage name, used in logs
    fn name(&self) -> &'static str;

    /// Transform the request, or fail to abort the write
    async fn apply(&self, request: WriteRequest) -> Result<WriteRequest>;
}

/// Ordered stages followed by the persistence executor
#[derive(Clone)]
pub struct WritePipeline {
    stages: Vec<Arc<dyn WriteStage>>,
    executor: Arc<dyn WriteExecutor>,
}

impl WritePipeline {
    /// Start building a pipeline in front of `executor`
    pub fn builder(executor: impl WriteExecutor + 'static) -> WritePipelineBuilder {
        WritePipelineBuilder::new(Arc::new(executor))
    }

    /// Names of the registered stages, in execution order
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Run `request` through every stage, then persist it
    pub async fn execute(&self, request: WriteRequest) -> Result<Value> {
        let model = request.model().to_string();
        let action = request.action();

        let mut request = request;
        for stage in &self.stages {
            tracing::debug!(
                stage = stage.name(),
                model = %model,
                action = %action,
                "Applying write stage"
            );
            request = stage.apply(request).await?;
        }

        self.executor.execute(request.params).await
    }
}

/// Builder for [`WritePipeline`]
pub struct WritePipelineBuilder {
    stages: Vec<Arc<dyn WriteStage>>,
    executor: Arc<dyn WriteExecutor>,
}

impl WritePipelineBuilder {
    pub fn new(executor: Arc<dyn WriteExecutor>) -> Self {
        Self {
            stages: Vec::new(),
            executor,
        }
    }

    /// Append a stage; stages run in the order they are added
    pub fn with_stage(mut self, stage: impl WriteStage + 'static) -> Self {
        self.stages.push(Arc::new(stage));
        self
    }

    /// Install the user-entity guard (validation, then hashing)
    pub fn with_auth_guard(self, config: GuardConfig, hasher: Arc<dyn PasswordHasher>) -> Self {
        register_auth_stages(self, config, hasher)
    }

    pub fn build(self) -> WritePipeline {
        WritePipeline {
            stages: self.stages,
            executor: self.executor,
        }
    }
}

/// Register the validation and hashing stages for the configured user entity
///
/// Validation must precede hashing so that rules such as the minimum
/// password length see the plaintext, not the hash.
pub fn register_auth_stages(
    builder: WritePipelineBuilder,
    config: GuardConfig,
    hasher: Arc<dyn PasswordHasher>,
) -> WritePipelineBuilder {
    tracing::info!(entity = %config.user_entity, "Registering auth write stages");

    builder
        .with_stage(ValidationStage::new(config.clone()))
        .with_stage(HashingStage::new(config, hasher))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::field::WriteData;
    use crate::core::request::WriteParams;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<WriteParams>>,
    }

    #[async_trait]
    impl WriteExecutor for Arc<Recorder> {
        async fn execute(&self, params: WriteParams) -> Result<Value> {
            self.calls.lock().unwrap().push(params);
            Ok(Value::Null)
        }
    }

    struct Tag(&'static str, Arc<Mutex<Vec<&'static str>>>);

    #[async_trait]
    impl WriteStage for Tag {
        fn name(&self) -> &'static str {
            self.0
        }

        async fn apply(&self, request: WriteRequest) -> Result<WriteRequest> {
            self.1.lock().unwrap().push(self.0);
            Ok(request)
        }
    }

    struct Reject;

    #[async_trait]
    impl WriteStage for Reject {
        fn name(&self) -> &'static str {
            "reject"
        }

        async fn apply(&self, _: WriteRequest) -> Result<WriteRequest> {
            anyhow::bail!("rejected")
        }
    }

    #[tokio::test]
    async fn test_stages_run_in_registration_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let recorder = Arc::new(Recorder::default());
        let pipeline = WritePipeline::builder(recorder.clone())
            .with_stage(Tag("first", seen.clone()))
            .with_stage(Tag("second", seen.clone()))
            .build();

        pipeline
            .execute(WriteRequest::create("Task", WriteData::new()))
            .await
            .unwrap();

        assert_eq!(*seen.lock().unwrap(), vec!["first", "second"]);
        assert_eq!(pipeline.stage_names(), vec!["first", "second"]);
        assert_eq!(recorder.calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_stage_error_short_circuits() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let recorder = Arc::new(Recorder::default());
        let pipeline = WritePipeline::builder(recorder.clone())
            .with_stage(Reject)
            .with_stage(Tag("after", seen.clone()))
            .build();

        let err = pipeline
            .execute(WriteRequest::create("Task", WriteData::new()))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "rejected");
        assert!(seen.lock().unwrap().is_empty());
        assert!(recorder.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_auth_guard_registers_validation_before_hashing() {
        struct NoopHasher;

        #[async_trait]
        impl PasswordHasher for NoopHasher {
            async fn hash_password(&self, plaintext: &str) -> Result<String> {
                Ok(plaintext.to_string())
            }

            async fn verify_password(&self, _: &str, _: &str) -> Result<bool> {
                Ok(true)
            }
        }

        let pipeline = WritePipeline::builder(Arc::new(Recorder::default()))
            .with_auth_guard(GuardConfig::default(), Arc::new(NoopHasher))
            .build();

        assert_eq!(
            pipeline.stage_names(),
            vec!["validation", "password_hashing"]
        );
    }
}
