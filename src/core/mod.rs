//! Core module containing fundamental traits and types for the guard

pub mod error;
pub mod field;
pub mod request;
pub mod service;
pub mod validation;

pub use error::AuthError;
pub use field::{WriteData, is_truthy};
pub use request::{WriteAction, WriteArgs, WriteOptions, WriteParams, WriteRequest};
pub use service::{PasswordHasher, WriteExecutor};
pub use validation::{ValidationRule, default_rules, validate_payload};
