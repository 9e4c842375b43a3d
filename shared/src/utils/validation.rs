//! Common validation utilities

use once_cell::sync::Lazy;
use regex::Regex;

/// Permissive email shape check; real validation happens on delivery
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
        .expect("email regex must compile")
});

/// Check if a string looks like a valid email address
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value)
}

/// Check if a string is not empty after trimming
pub fn not_empty(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Check if a string length is within bounds (inclusive)
pub fn length_between(value: &str, min: usize, max: usize) -> bool {
    let len = value.chars().count();
    len >= min && len <= max
}
