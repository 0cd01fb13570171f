//! Validation of write payloads
//!
//! Rules are evaluated in order against a single payload and the first
//! failing rule rejects the whole write. Under create semantics every rule
//! runs; under update semantics a rule only runs when its field is present,
//! so fields that are not being changed are not re-validated.

pub mod rules;
pub mod validators;

pub use rules::{ValidationRule, default_rules};

use crate::core::error::AuthError;
use crate::core::field::WriteData;

/// Check `data` against `rules`, stopping at the first failure
pub fn validate_payload(
    data: &WriteData,
    rules: &[ValidationRule],
    validate_all_fields: bool,
) -> Result<(), AuthError> {
    for rule in rules {
        if !validate_all_fields && !data.contains_field(rule.field()) {
            continue;
        }

        if !rule.check(data.get(rule.field())) {
            return Err(AuthError::validation(rule.message()));
        }
    }

    Ok(())
}
