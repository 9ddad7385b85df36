//! Field-local validators
//!
//! Each validator looks at one raw input value and returns a human-readable
//! message on failure. Validators never consult other fields.

use once_cell::sync::Lazy;
use regex::Regex;

static NAME_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z\s'-]+$").expect("static pattern"));

static EMAIL_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static pattern"));

pub const NAME_TOO_SHORT: &str = "Must be at least 2 characters";
pub const NAME_BAD_CHARS: &str = "Only letters, spaces, hyphens and apostrophes allowed";
pub const PHONE_REQUIRED: &str = "Phone number is required";
pub const PHONE_INVALID: &str = "Enter a valid 10-digit phone number";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Enter a valid email address";

/// Validator for a person's name part. `subject` names the field in the
/// required message, e.g. "First name" -> "First name is required".
pub fn person_name(subject: &str) -> impl Fn(&str) -> Option<String> + Send + Sync + 'static {
    let required = format!("{subject} is required");
    move |value: &str| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Some(required.clone());
        }
        if trimmed.chars().count() < 2 {
            return Some(NAME_TOO_SHORT.to_string());
        }
        if !NAME_CHARS.is_match(trimmed) {
            return Some(NAME_BAD_CHARS.to_string());
        }
        None
    }
}

/// Ten digits once whitespace, hyphens and parentheses are stripped
pub fn phone(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        return Some(PHONE_REQUIRED.to_string());
    }

    let digits: String = value
        .chars()
        .filter(|c| !(c.is_whitespace() || matches!(c, '-' | '(' | ')')))
        .collect();

    if digits.len() == 10 && digits.bytes().all(|b| b.is_ascii_digit()) {
        None
    } else {
        Some(PHONE_INVALID.to_string())
    }
}

/// `local@domain.tld` shape with no whitespace and a single `@`
pub fn email(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(EMAIL_REQUIRED.to_string());
    }
    if !EMAIL_SHAPE.is_match(trimmed) {
        return Some(EMAIL_INVALID.to_string());
    }
    None
}
