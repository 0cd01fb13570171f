//! Shared test harness for write-guard integration tests
//!
//! Provides a `RecordingExecutor` that captures every `WriteParams` it
//! receives, a `CountingHasher` that tags plaintext deterministically, and
//! helpers for building guarded pipelines.
//!
//! # Usage
//!
//! ```rust,ignore
//! mod guard_harness;
//! use guard_harness::*;
//! ```

#![allow(dead_code)]

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};

use this_auth::prelude::*;

pub const HASH_PREFIX: &str = "hashed:";

/// Install a test subscriber once per test binary (`RUST_LOG` controls output)
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

// ---------------------------------------------------------------------------
// RecordingExecutor
// ---------------------------------------------------------------------------

/// Executor that records what persistence would have received
#[derive(Clone, Default)]
pub struct RecordingExecutor {
    calls: Arc<Mutex<Vec<WriteParams>>>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<WriteParams> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// The single payload of the only recorded call
    pub fn last_data(&self) -> WriteData {
        let calls = self.calls.lock().unwrap();
        match &calls.last().expect("no write reached persistence").args {
            WriteArgs::Data(data) => data.clone(),
            WriteArgs::Upsert { .. } => panic!("expected a single payload"),
        }
    }
}

#[async_trait]
impl WriteExecutor for RecordingExecutor {
    async fn execute(&self, params: WriteParams) -> Result<Value> {
        self.calls.lock().unwrap().push(params);
        Ok(json!({ "ok": true }))
    }
}

// ---------------------------------------------------------------------------
// CountingHasher
// ---------------------------------------------------------------------------

/// Deterministic hasher that counts invocations
#[derive(Default)]
pub struct CountingHasher {
    calls: AtomicUsize,
}

impl CountingHasher {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PasswordHasher for CountingHasher {
    async fn hash_password(&self, plaintext: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("{}{}", HASH_PREFIX, plaintext))
    }

    async fn verify_password(&self, plaintext: &str, hash: &str) -> Result<bool> {
        Ok(hash == format!("{}{}", HASH_PREFIX, plaintext))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Pipeline guarding "User" in front of a recording executor
pub fn guarded_pipeline() -> (WritePipeline, RecordingExecutor, Arc<CountingHasher>) {
    init_tracing();

    let executor = RecordingExecutor::new();
    let hasher = CountingHasher::new();
    let pipeline = WritePipeline::builder(executor.clone())
        .with_auth_guard(GuardConfig::default(), hasher.clone())
        .build();

    (pipeline, executor, hasher)
}

pub fn user(email: &str, password: &str) -> WriteData {
    WriteData::new()
        .with("email", email)
        .with("password", password)
}

/// Message of the validation error behind `err`
pub fn auth_message(err: &anyhow::Error) -> String {
    err.downcast_ref::<AuthError>()
        .expect("expected a validation error")
        .message()
        .to_string()
}
