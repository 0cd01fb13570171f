//! Validation rules and the built-in rule set

use super::validators;
use crate::config::GuardConfig;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

type Predicate = Arc<dyn Fn(Option<&Value>) -> bool + Send + Sync>;

/// A (field, message, predicate) triple checked against write data
#[derive(Clone)]
pub struct ValidationRule {
    field: String,
    message: String,
    predicate: Predicate,
}

impl ValidationRule {
    pub fn new<F>(field: impl Into<String>, message: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(Option<&Value>) -> bool + Send + Sync + 'static,
    {
        Self {
            field: field.into(),
            message: message.into(),
            predicate: Arc::new(predicate),
        }
    }

    /// Field this rule validates
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Message reported when the rule fails
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Evaluate the predicate (`None` means the field is absent)
    pub fn check(&self, value: Option<&Value>) -> bool {
        (self.predicate)(value)
    }
}

impl fmt::Debug for ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationRule")
            .field("field", &self.field)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// The built-in rules, in evaluation order
///
/// 1. email present
/// 2. password present
/// 3. password long enough
/// 4. password contains a number
pub fn default_rules(config: &GuardConfig) -> Vec<ValidationRule> {
    let email = config.email_field.as_str();
    let password = config.password_field.as_str();

    vec![
        ValidationRule::new(
            email,
            format!("{} must be present", email),
            validators::present(),
        ),
        ValidationRule::new(
            password,
            format!("{} must be present", password),
            validators::present(),
        ),
        ValidationRule::new(
            password,
            format!(
                "{} must be at least {} characters",
                password, config.min_password_length
            ),
            validators::min_length(config.min_password_length),
        ),
        ValidationRule::new(
            password,
            format!("{} must contain a number", password),
            validators::contains_digit(),
        ),
    ]
}
