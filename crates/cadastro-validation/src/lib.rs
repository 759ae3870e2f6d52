//! Cadastro Validation Core
//!
//! Pure functions that turn raw keystrokes into display-formatted values
//! (masks) and decide whether a formatted value is acceptable.
//!
//! Nothing in this crate performs I/O or keeps state: the same input always
//! yields the same output, which is what lets the form layer re-run these
//! functions at any time (blur, submit) without side effects.
//!
//! # Example
//!
//! ```
//! use cadastro_validation::{format, validate, FieldKind};
//!
//! let value = format(FieldKind::Phone, "11 98765 4321");
//! assert_eq!(value, "(11) 98765-4321");
//! assert!(validate(FieldKind::Phone, &value).is_ok());
//! ```

pub mod cpf;
pub mod date;
pub mod email;
pub mod error;
pub mod field;
pub mod mask;
pub mod phone;

pub use cpf::{is_valid_cpf, validate_cpf};
pub use date::{is_leap_year, parse_birth_date, validate_birth_date, BirthDate};
pub use email::{is_valid_email, validate_email};
pub use error::{FieldError, UnknownField};
pub use field::FieldKind;
pub use mask::{digits_only, format_birth_date, format_cpf, format_phone};
pub use phone::validate_phone;

/// Apply the field's display mask to a raw edit.
///
/// Masked fields keep only ASCII digits, truncate to the mask capacity and
/// re-insert separators. Text fields pass through unchanged.
pub fn format(field: FieldKind, raw: &str) -> String {
    match field {
        FieldKind::Phone => format_phone(raw),
        FieldKind::Cpf => format_cpf(raw),
        FieldKind::BirthDate => format_birth_date(raw),
        FieldKind::Name | FieldKind::Email | FieldKind::Consent => raw.to_string(),
    }
}

/// Blur-time validation. Empty values are accepted so a user who has not
/// typed anything yet is never flagged.
pub fn validate(field: FieldKind, value: &str) -> Result<(), FieldError> {
    match field {
        FieldKind::Phone => validate_phone(value),
        FieldKind::Cpf => validate_cpf(value),
        FieldKind::BirthDate => validate_birth_date(value),
        FieldKind::Email => validate_email(value),
        FieldKind::Name | FieldKind::Consent => Ok(()),
    }
}

/// Submit-time validation for text fields: the value must be present, then
/// the blur rules apply.
pub fn validate_required(field: FieldKind, value: &str) -> Result<(), FieldError> {
    if value.trim().is_empty() {
        return Err(FieldError::Required);
    }
    validate(field, value)
}

/// Submit-time check for the consent checkbox.
pub fn validate_consent(accepted: bool) -> Result<(), FieldError> {
    if accepted {
        Ok(())
    } else {
        Err(FieldError::ConsentRequired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(FieldKind::Phone, "11987654321", "(11) 98765-4321")]
    #[case(FieldKind::Cpf, "52998224725", "529.982.247-25")]
    #[case(FieldKind::BirthDate, "01011990", "01/01/1990")]
    #[case(FieldKind::Name, "  Maria da Silva ", "  Maria da Silva ")]
    #[case(FieldKind::Email, "maria@example.com", "maria@example.com")]
    fn test_format_dispatch(#[case] field: FieldKind, #[case] raw: &str, #[case] expected: &str) {
        assert_eq!(format(field, raw), expected);
    }

    #[rstest]
    #[case(FieldKind::Phone, "(11) 98765-4321")]
    #[case(FieldKind::Cpf, "529.982.247-25")]
    #[case(FieldKind::BirthDate, "29/02/2020")]
    #[case(FieldKind::Email, "maria@example.com")]
    #[case(FieldKind::Name, "Maria")]
    fn test_format_is_idempotent(#[case] field: FieldKind, #[case] formatted: &str) {
        assert_eq!(format(field, formatted), formatted);
        assert_eq!(format(field, &format(field, formatted)), formatted);
    }

    #[test]
    fn test_blur_validation_accepts_empty() {
        for field in FieldKind::TEXT_FIELDS {
            assert!(validate(field, "").is_ok(), "{field} should accept empty input");
        }
    }

    #[test]
    fn test_required_rejects_empty() {
        assert_eq!(validate_required(FieldKind::Name, ""), Err(FieldError::Required));
        assert_eq!(validate_required(FieldKind::Name, "   "), Err(FieldError::Required));
        assert_eq!(validate_required(FieldKind::Phone, ""), Err(FieldError::Required));
        assert!(validate_required(FieldKind::Name, "Maria").is_ok());
    }

    #[test]
    fn test_required_still_applies_field_rules() {
        assert_eq!(
            validate_required(FieldKind::Phone, "119876"),
            Err(FieldError::InvalidPhone)
        );
        assert_eq!(
            validate_required(FieldKind::Cpf, "529.982.247-24"),
            Err(FieldError::InvalidCpf)
        );
    }

    #[test]
    fn test_consent() {
        assert!(validate_consent(true).is_ok());
        assert_eq!(validate_consent(false), Err(FieldError::ConsentRequired));
    }
}
