//! # This-Auth
//!
//! Write-guard stages for the user entity of a this-rs backend.
//!
//! Every write to the configured user model passes through two stages
//! before it reaches persistence:
//!
//! 1. **Validation**: the default rules (email present, password present,
//!    at least 8 characters, contains a number) followed by any per-call
//!    custom rules. The first failing rule aborts the write with an
//!    [`AuthError`](crate::core::AuthError).
//! 2. **Password hashing**: every password field present in the payload is
//!    replaced with its hash.
//!
//! Validation always runs first so that rules see the plaintext password.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use this_auth::prelude::*;
//!
//! let store = InMemoryUserStore::new();
//! let pipeline = WritePipeline::builder(store.clone())
//!     .with_auth_guard(GuardConfig::default(), Arc::new(Argon2Hasher::new()))
//!     .build();
//!
//! let user = pipeline
//!     .execute(WriteRequest::create(
//!         "User",
//!         WriteData::new()
//!             .with("email", "ann@example.com")
//!             .with("password", "correcthorse1"),
//!     ))
//!     .await?;
//!
//! // Per-call options
//! pipeline
//!     .execute(
//!         WriteRequest::create("User", WriteData::new().with("email", "bot@example.com"))
//!             .skip_default_validations()
//!             .with_custom_validation(ValidationRule::new(
//!                 "email",
//!                 "email must be valid",
//!                 validators::email_format(),
//!             )),
//!     )
//!     .await?;
//! ```

pub mod config;
pub mod core;
pub mod hashers;
pub mod pipeline;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Types ===
    pub use crate::core::{
        AuthError, PasswordHasher, ValidationRule, WriteAction, WriteArgs, WriteData,
        WriteExecutor, WriteOptions, WriteParams, WriteRequest,
        validation::validators,
    };

    // === Pipeline ===
    pub use crate::pipeline::{
        HashingStage, ValidationStage, WritePipeline, WritePipelineBuilder, WriteStage,
        register_auth_stages,
    };

    // === Implementations ===
    pub use crate::hashers::Argon2Hasher;
    pub use crate::storage::InMemoryUserStore;

    // === Config ===
    pub use crate::config::GuardConfig;

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use serde_json::{Value, json};
    pub use std::sync::Arc;
}
