//! Error type produced by the write guard
//!
//! The guard only ever produces one kind of error: a validation failure
//! carrying the message of the rule that rejected the write. Errors from the
//! password hasher or the persistence executor are never wrapped; they travel
//! through the pipeline as the `anyhow::Error` they were raised as.
//!
//! # Example
//!
//! ```rust,ignore
//! match pipeline.execute(request).await {
//!     Ok(row) => println!("stored {row}"),
//!     Err(e) => match e.downcast_ref::<AuthError>() {
//!         Some(auth) => println!("rejected: {}", auth.message()),
//!         None => return Err(e),
//!     },
//! }
//! ```

use thiserror::Error;

/// Error raised when a write is rejected by a validation rule
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// A validation rule failed
    #[error("{message}")]
    Validation { message: String },
}

impl AuthError {
    /// Create a validation error with the given message
    pub fn validation(message: impl Into<String>) -> Self {
        AuthError::Validation {
            message: message.into(),
        }
    }

    /// The human-readable message
    pub fn message(&self) -> &str {
        match self {
            AuthError::Validation { message } => message,
        }
    }

    /// Error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::Validation { .. } => "VALIDATION_ERROR",
        }
    }
}
