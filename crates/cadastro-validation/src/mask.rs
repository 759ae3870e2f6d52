//! Input masks
//!
//! Every mask works the same way: keep the ASCII digits, truncate to the
//! mask's capacity, then insert separators in front of fixed digit positions.
//! A separator only appears once a digit follows it, so partially typed values
//! render progressively.

/// Digits in a full phone number (2 area code + 9 subscriber).
pub const PHONE_DIGITS: usize = 11;

/// Digits in a CPF.
pub const CPF_DIGITS: usize = 11;

/// Digits in a `dd/mm/yyyy` date.
pub const BIRTH_DATE_DIGITS: usize = 8;

const CPF_SEPARATORS: &[(usize, char)] = &[(3, '.'), (6, '.'), (9, '-')];
const BIRTH_DATE_SEPARATORS: &[(usize, char)] = &[(2, '/'), (4, '/')];

/// Keep only ASCII digits.
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

fn capped_digits(raw: &str, capacity: usize) -> String {
    raw.chars().filter(char::is_ascii_digit).take(capacity).collect()
}

/// Insert `separators` (digit index, char) in front of the matching digits.
fn apply_mask(digits: &str, separators: &[(usize, char)]) -> String {
    let mut masked = String::with_capacity(digits.len() + separators.len());

    for (index, digit) in digits.chars().enumerate() {
        if let Some((_, separator)) = separators.iter().find(|(at, _)| *at == index) {
            masked.push(*separator);
        }
        masked.push(digit);
    }

    masked
}

/// `(DD) DDDDD-DDDD` once all 11 digits are present, bare digits before that.
pub fn format_phone(raw: &str) -> String {
    let digits = capped_digits(raw, PHONE_DIGITS);

    if digits.len() == PHONE_DIGITS {
        format!("({}) {}-{}", &digits[..2], &digits[2..7], &digits[7..])
    } else {
        digits
    }
}

/// Progressive `DDD.DDD.DDD-DD`.
pub fn format_cpf(raw: &str) -> String {
    apply_mask(&capped_digits(raw, CPF_DIGITS), CPF_SEPARATORS)
}

/// Progressive `DD/DD/DDDD`.
pub fn format_birth_date(raw: &str) -> String {
    apply_mask(&capped_digits(raw, BIRTH_DATE_DIGITS), BIRTH_DATE_SEPARATORS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_digits_only() {
        assert_eq!(digits_only("(11) 98765-4321"), "11987654321");
        assert_eq!(digits_only("abc"), "");
        // Non-ASCII digits are not digits for the mask
        assert_eq!(digits_only("١٢3"), "3");
    }

    #[rstest]
    #[case("11987654321", "(11) 98765-4321")]
    #[case("(11) 98765-4321", "(11) 98765-4321")]
    #[case("119876", "119876")]
    #[case("11 9876", "119876")]
    #[case("1198765432199", "(11) 98765-4321")]
    #[case("", "")]
    #[case("abc", "")]
    fn test_format_phone(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(format_phone(raw), expected);
    }

    #[rstest]
    #[case("1", "1")]
    #[case("123", "123")]
    #[case("1234", "123.4")]
    #[case("123456", "123.456")]
    #[case("1234567", "123.456.7")]
    #[case("123456789", "123.456.789")]
    #[case("1234567890", "123.456.789-0")]
    #[case("12345678901", "123.456.789-01")]
    #[case("123456789012345", "123.456.789-01")]
    #[case("123.456.789-01", "123.456.789-01")]
    fn test_format_cpf_progressive(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(format_cpf(raw), expected);
    }

    #[test]
    fn test_format_cpf_never_exceeds_mask_width() {
        let formatted = format_cpf("99999999999999999999");
        assert_eq!(formatted.len(), 14);
    }

    #[rstest]
    #[case("0", "0")]
    #[case("01", "01")]
    #[case("010", "01/0")]
    #[case("0101", "01/01")]
    #[case("01011", "01/01/1")]
    #[case("010119", "01/01/19")]
    #[case("01011990", "01/01/1990")]
    #[case("0101199012", "01/01/1990")]
    #[case("01/01/1990", "01/01/1990")]
    #[case("01-01-1990", "01/01/1990")]
    fn test_format_birth_date_breakpoints(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(format_birth_date(raw), expected);
    }
}
