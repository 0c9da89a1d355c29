//! Reusable field validators
//!
//! Each validator returns `Result<(), String>` with a message that does not
//! repeat the field name; callers collect failures into [`FieldErrors`],
//! keyed by the wire-level (camelCase) field name.

use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::LazyLock;

static CONTACT_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{10}$").expect("contact number pattern is valid"));

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid"));

/// Field-keyed validation messages, serialized as a JSON object.
///
/// One message per field; the first failure recorded for a field wins.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    /// Record a failure for `field` unless one is already present.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    /// Run a validator against `field`, recording its failure if any.
    pub fn check(&mut self, field: &str, result: Result<(), String>) {
        if let Err(message) = result {
            self.insert(field, message);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }
}

/// Validator: value present and non-empty after trimming
pub fn required(value: Option<&str>) -> Result<(), String> {
    match value {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err("is required".to_string()),
    }
}

/// Validator: exactly ten ASCII digits, no separators
pub fn contact_number(value: &str) -> Result<(), String> {
    if CONTACT_NUMBER.is_match(value) {
        Ok(())
    } else {
        Err("must be a 10-digit number".to_string())
    }
}

/// Validator: basic address shape, local@domain.tld
pub fn email(value: &str) -> Result<(), String> {
    if EMAIL.is_match(value) {
        Ok(())
    } else {
        Err("must be a valid email address".to_string())
    }
}

/// Validator: number present and strictly greater than zero
pub fn positive(value: Option<f64>) -> Result<(), String> {
    match value {
        Some(n) if n > 0.0 => Ok(()),
        Some(_) => Err("must be a positive number".to_string()),
        None => Err("is required".to_string()),
    }
}
