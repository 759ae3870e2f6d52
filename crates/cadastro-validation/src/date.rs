//! Birth date validation (`dd/mm/yyyy`)

use std::fmt;

use crate::error::FieldError;

/// A calendar date read from the `dd/mm/yyyy` mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct BirthDate {
    pub year: u32,
    pub month: u32,
    pub day: u32,
}

impl fmt::Display for BirthDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}/{:04}", self.day, self.month, self.year)
    }
}

/// Gregorian leap year rule.
pub fn is_leap_year(year: u32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Days in `month` of `year`, or `None` for a month outside 1..=12.
pub fn days_in_month(year: u32, month: u32) -> Option<u32> {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Some(31),
        4 | 6 | 9 | 11 => Some(30),
        2 if is_leap_year(year) => Some(29),
        2 => Some(28),
        _ => None,
    }
}

fn parse_part(part: &str, width: usize) -> Option<u32> {
    if part.len() != width || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// Parse a complete `dd/mm/yyyy` value into a real calendar date.
///
/// Partial mask states (`01/01/19`) and impossible dates (`31/04/2020`,
/// `29/02/2021`) return `None`. Year zero is rejected.
pub fn parse_birth_date(value: &str) -> Option<BirthDate> {
    let mut parts = value.split('/');
    let day = parse_part(parts.next()?, 2)?;
    let month = parse_part(parts.next()?, 2)?;
    let year = parse_part(parts.next()?, 4)?;
    if parts.next().is_some() || year == 0 {
        return None;
    }

    let max_day = days_in_month(year, month)?;
    if day == 0 || day > max_day {
        return None;
    }

    Some(BirthDate { year, month, day })
}

/// Blur-time birth date rule: empty passes, otherwise a real date.
pub fn validate_birth_date(value: &str) -> Result<(), FieldError> {
    if value.trim().is_empty() || parse_birth_date(value).is_some() {
        Ok(())
    } else {
        Err(FieldError::InvalidBirthDate)
    }
}
