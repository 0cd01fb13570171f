//! Reusable field predicates
//!
//! Each predicate receives the field value, or `None` when the field is
//! absent from the payload, and returns whether the value is acceptable.

use crate::core::field::is_truthy;
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

/// Predicate: value is truthy
pub fn present() -> impl Fn(Option<&Value>) -> bool + Send + Sync + Clone {
    |value: Option<&Value>| is_truthy(value)
}

/// Predicate: string has at least `min` characters
///
/// Non-string values never satisfy a length requirement.
pub fn min_length(min: usize) -> impl Fn(Option<&Value>) -> bool + Send + Sync + Clone {
    move |value: Option<&Value>| match value {
        Some(Value::String(s)) => s.chars().count() >= min,
        _ => false,
    }
}

/// Predicate: string has at most `max` characters
pub fn max_length(max: usize) -> impl Fn(Option<&Value>) -> bool + Send + Sync + Clone {
    move |value: Option<&Value>| match value {
        Some(Value::String(s)) => s.chars().count() <= max,
        _ => false,
    }
}

/// Predicate: value contains at least one ASCII digit
///
/// Numbers are checked on their decimal rendering.
pub fn contains_digit() -> impl Fn(Option<&Value>) -> bool + Send + Sync + Clone {
    |value: Option<&Value>| match value {
        Some(Value::String(s)) => has_ascii_digit(s),
        Some(Value::Number(n)) => has_ascii_digit(&n.to_string()),
        _ => false,
    }
}

fn has_ascii_digit(s: &str) -> bool {
    s.bytes().any(|b| b.is_ascii_digit())
}

/// Predicate: string matches `pattern`
pub fn matches_pattern(pattern: Regex) -> impl Fn(Option<&Value>) -> bool + Send + Sync + Clone {
    move |value: Option<&Value>| match value {
        Some(Value::String(s)) => pattern.is_match(s),
        _ => false,
    }
}

/// Predicate: string looks like an email address
pub fn email_format() -> impl Fn(Option<&Value>) -> bool + Send + Sync + Clone {
    |value: Option<&Value>| {
        static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = EMAIL_REGEX.get_or_init(|| {
            Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
        });

        match value {
            Some(Value::String(s)) => regex.is_match(s),
            _ => false,
        }
    }
}

/// Predicate: string is one of `allowed`
pub fn one_of(allowed: Vec<String>) -> impl Fn(Option<&Value>) -> bool + Send + Sync + Clone {
    move |value: Option<&Value>| match value {
        Some(Value::String(s)) => allowed.iter().any(|a| a == s),
        _ => false,
    }
}
