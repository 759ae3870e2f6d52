//! Phone (WhatsApp) validation

use crate::error::FieldError;
use crate::mask::PHONE_DIGITS;

/// Blur-time phone rule: empty passes, otherwise exactly 11 digits
/// (area code + 9-digit mobile number).
pub fn validate_phone(value: &str) -> Result<(), FieldError> {
    if value.trim().is_empty() {
        return Ok(());
    }

    let digits = value.chars().filter(char::is_ascii_digit).count();
    if digits == PHONE_DIGITS {
        Ok(())
    } else {
        Err(FieldError::InvalidPhone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("(11) 98765-4321")]
    #[case("11987654321")]
    fn test_phone_accepted(#[case] value: &str) {
        assert_eq!(validate_phone(value), Ok(()));
    }

    #[rstest]
    #[case("119876")]
    #[case("1198765432")]
    #[case("119876543210")]
    #[case("abc")]
    fn test_phone_rejected(#[case] value: &str) {
        assert_eq!(validate_phone(value), Err(FieldError::InvalidPhone));
    }

    #[test]
    fn test_phone_message() {
        let err = validate_phone("1234").unwrap_err();
        assert!(err.to_string().contains("area code + 9 digits"));
    }
}
