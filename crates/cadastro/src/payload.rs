// File: src/payload.rs
// Purpose: Outbound registration body, built once per submit from the form record

use cadastro_validation::digits_only;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::form::FormRecord;
use crate::route::EntryRoute;

/// Country calling code prepended to the phone digits.
pub const PHONE_COUNTRY_CODE: &str = "55";

/// Extension appended to each image number.
pub const IMAGE_EXTENSION: &str = "png";

/// JSON body posted to the registration endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SubmissionPayload {
    /// Day the form was submitted (`YYYY-MM-DD`), not the birth date.
    pub register_date: NaiveDate,
    pub person_name: String,
    /// Digits only.
    pub cpf: String,
    /// Country code followed by digits only.
    pub phone: String,
    /// As typed, `dd/mm/yyyy`.
    pub birth_date: String,
    pub mail: String,
    pub has_accepted_participation: bool,
    pub image_ids: Vec<String>,
    pub authentication_id: String,
    /// Always `true`; the form has no control for it.
    pub has_accepted_promotion: bool,
}

impl SubmissionPayload {
    pub fn build(record: &FormRecord, route: &EntryRoute, register_date: NaiveDate) -> Self {
        Self {
            register_date,
            person_name: record.name.clone(),
            cpf: digits_only(&record.cpf),
            phone: format!("{}{}", PHONE_COUNTRY_CODE, digits_only(&record.phone)),
            birth_date: record.birth_date.clone(),
            mail: record.email.clone(),
            has_accepted_participation: record.consent,
            image_ids: route
                .image_numbers
                .iter()
                .map(|n| format!("{}.{}", n, IMAGE_EXTENSION))
                .collect(),
            authentication_id: route.session_id.clone(),
            has_accepted_promotion: true,
        }
    }
}
