//! CPF check-digit validation
//!
//! A CPF is 11 digits: nine base digits followed by two check digits. Each
//! check digit is derived from the digits before it with descending weights
//! (10..2 for the first, 11..2 for the second):
//!
//! ```text
//! r = (Σ digit × weight) × 10 mod 11,  r ∈ {10, 11} → 0
//! ```
//!
//! Sequences of a single repeated digit satisfy the equations but are not
//! issued, so they are rejected up front.

use crate::error::FieldError;
use crate::mask::CPF_DIGITS;

/// Whether `value` (formatted or bare) carries a CPF with valid check digits.
pub fn is_valid_cpf(value: &str) -> bool {
    let digits: Vec<u32> = value.chars().filter_map(|c| c.to_digit(10)).collect();

    if digits.len() != CPF_DIGITS || digits.iter().all(|&d| d == digits[0]) {
        return false;
    }

    check_digit(&digits[..9]) == digits[9] && check_digit(&digits[..10]) == digits[10]
}

/// Check digit for `digits`; the first digit gets weight `len + 1`, the last
/// gets weight 2.
fn check_digit(digits: &[u32]) -> u32 {
    let top_weight = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .zip((2..=top_weight).rev())
        .map(|(digit, weight)| digit * weight)
        .sum();

    match (sum * 10) % 11 {
        10 | 11 => 0,
        remainder => remainder,
    }
}

/// Blur-time CPF rule: empty passes, anything else must checksum.
pub fn validate_cpf(value: &str) -> Result<(), FieldError> {
    if value.trim().is_empty() || is_valid_cpf(value) {
        Ok(())
    } else {
        Err(FieldError::InvalidCpf)
    }
}
