//! Configuration loading and management

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Configuration of the guarded user entity
///
/// Every key is optional in YAML; missing keys take the defaults below.
///
/// ```yaml
/// user_entity: User
/// email_field: email
/// password_field: password
/// min_password_length: 8
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardConfig {
    /// Model name whose writes are guarded (exact match)
    pub user_entity: String,

    /// Field holding the user's email
    pub email_field: String,

    /// Field holding the user's password
    pub password_field: String,

    /// Minimum password length, in characters
    pub min_password_length: usize,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            user_entity: "User".to_string(),
            email_field: "email".to_string(),
            password_field: "password".to_string(),
            min_password_length: 8,
        }
    }
}

impl GuardConfig {
    /// Default configuration for a differently named user model
    pub fn for_entity(user_entity: impl Into<String>) -> Self {
        Self {
            user_entity: user_entity.into(),
            ..Self::default()
        }
    }

    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Whether writes to `model` are guarded
    pub fn governs(&self, model: &str) -> bool {
        self.user_entity == model
    }
}
