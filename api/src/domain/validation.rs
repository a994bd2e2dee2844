//! Field validation
//!
//! Collects per-field error messages the way the HTTP layer reports them:
//! a map of field name to a list of messages.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::DomainError;

/// International phone format: optional `+`, optional leading `1`, 9 to 15 digits
static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?1?\d{9,15}$").expect("phone pattern is valid"));

pub const PHONE_FORMAT_MESSAGE: &str =
    "Phone number must be in the format: '+999999999'. Up to 15 digits allowed.";

/// Maximum stored length of a phone number
pub const PHONE_MAX_LEN: usize = 15;

/// Field name -> messages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a single-field failure
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// `Ok(())` when nothing was recorded, otherwise a validation error
    pub fn into_result(self) -> Result<(), DomainError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(self))
        }
    }

    /// Required, non-blank text with a length cap
    pub fn require_text(&mut self, field: &str, value: &str, max_len: usize) {
        if value.trim().is_empty() {
            self.add(field, "This field may not be blank.");
        } else {
            self.max_len(field, value, max_len);
        }
    }

    pub fn max_len(&mut self, field: &str, value: &str, max_len: usize) {
        if value.chars().count() > max_len {
            self.add(
                field,
                format!("Ensure this field has no more than {} characters.", max_len),
            );
        }
    }

    pub fn non_negative_int(&mut self, field: &str, value: i32) {
        if value < 0 {
            self.add(field, "Ensure this value is greater than or equal to 0.");
        }
    }

    /// Non-negative decimal that fits a `NUMERIC(max_digits, decimal_places)` column
    pub fn money(&mut self, field: &str, value: Decimal) {
        const MAX_DIGITS: u32 = 10;
        const DECIMAL_PLACES: u32 = 2;

        if value.is_sign_negative() && !value.is_zero() {
            self.add(field, "Ensure this value is greater than or equal to 0.");
            return;
        }

        let normalized = value.normalize();
        if normalized.scale() > DECIMAL_PLACES {
            self.add(
                field,
                format!(
                    "Ensure that there are no more than {} decimal places.",
                    DECIMAL_PLACES
                ),
            );
            return;
        }

        let whole_digits = normalized.trunc().abs().to_string().trim_start_matches('0').len() as u32;
        if whole_digits > MAX_DIGITS - DECIMAL_PLACES {
            self.add(
                field,
                format!(
                    "Ensure that there are no more than {} digits before the decimal point.",
                    MAX_DIGITS - DECIMAL_PLACES
                ),
            );
        }
    }

    /// Phone number: length cap plus the international format pattern
    pub fn phone(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.add(field, "This field may not be blank.");
            return;
        }
        self.max_len(field, value, PHONE_MAX_LEN);
        if !is_valid_phone(value) {
            self.add(field, PHONE_FORMAT_MESSAGE);
        }
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, messages)| format!("{}: {}", field, messages.join(" ")))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Check a phone number against the international format pattern
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_PATTERN.is_match(phone)
}
