//! Field identifiers

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownField;

/// The fields of the registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Name,
    Email,
    Phone,
    Cpf,
    BirthDate,
    Consent,
}

impl FieldKind {
    /// Every field, in form order.
    pub const ALL: [FieldKind; 6] = [
        FieldKind::Name,
        FieldKind::Email,
        FieldKind::Phone,
        FieldKind::Cpf,
        FieldKind::BirthDate,
        FieldKind::Consent,
    ];

    /// Fields that hold text (everything except the consent checkbox).
    pub const TEXT_FIELDS: [FieldKind; 5] = [
        FieldKind::Name,
        FieldKind::Email,
        FieldKind::Phone,
        FieldKind::Cpf,
        FieldKind::BirthDate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Name => "name",
            FieldKind::Email => "email",
            FieldKind::Phone => "phone",
            FieldKind::Cpf => "cpf",
            FieldKind::BirthDate => "birth_date",
            FieldKind::Consent => "consent",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKind {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldKind::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_field_names() {
        for field in FieldKind::ALL {
            assert_eq!(field.as_str().parse::<FieldKind>(), Ok(field));
        }
        assert_eq!(
            "whatsapp".parse::<FieldKind>(),
            Err(UnknownField("whatsapp".to_string()))
        );
    }

    #[test]
    fn test_display_matches_wire_name() {
        assert_eq!(FieldKind::BirthDate.to_string(), "birth_date");
        assert_eq!(FieldKind::Cpf.to_string(), "cpf");
    }
}
