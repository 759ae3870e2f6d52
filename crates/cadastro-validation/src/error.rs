//! Validation error messages

use serde::Serialize;
use thiserror::Error;

/// A failed field check. The `Display` text is the message shown next to the
/// field; the set of messages is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldError {
    #[error("phone must include area code + 9 digits")]
    InvalidPhone,

    #[error("invalid identifier")]
    InvalidCpf,

    #[error("invalid birth date")]
    InvalidBirthDate,

    #[error("invalid email address")]
    InvalidEmail,

    #[error("this field is required")]
    Required,

    #[error("consent is required")]
    ConsentRequired,
}

/// A field name that does not belong to the registration form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown field: {0}")]
pub struct UnknownField(pub String);
