//! Email validation

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::FieldError;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern compiles")
});

/// Validate email format
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Blur-time email rule: empty passes, otherwise `local@domain.tld`.
pub fn validate_email(value: &str) -> Result<(), FieldError> {
    let value = value.trim();
    if value.is_empty() || is_valid_email(value) {
        Ok(())
    } else {
        Err(FieldError::InvalidEmail)
    }
}
