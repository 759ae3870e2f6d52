// File: src/field.rs
// Purpose: Per-field controller - masking on edit, validation on the configured trigger

use cadastro_validation::{self as validation, FieldError, FieldKind};
use serde::{Deserialize, Serialize};

use crate::error::FormError;

/// When a field runs its validator outside of submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationTrigger {
    /// Every edit and every blur.
    OnChange,
    /// Blur only; edits never touch the error.
    #[default]
    OnBlur,
    /// Only when the whole form is submitted.
    OnSubmit,
}

/// Which rule set an evaluation uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Empty values pass.
    Blur,
    /// Every field is required and consent must be given.
    Submit,
}

/// An edit event as delivered by the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldInput {
    Text(String),
    Toggle(bool),
}

/// The stored value of a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl FieldValue {
    pub fn as_text(&self) -> &str {
        match self {
            FieldValue::Text(text) => text,
            FieldValue::Flag(_) => "",
        }
    }

    pub fn as_flag(&self) -> bool {
        matches!(self, FieldValue::Flag(true))
    }
}

/// A single form field: its formatted value and its current error.
///
/// The controller has two observable states, clean (`error() == None`) and
/// invalid. Only [`FieldController::evaluate`] moves between them; edits
/// reformat the value and, unless the trigger is
/// [`ValidationTrigger::OnChange`], leave the error exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldController {
    kind: FieldKind,
    value: FieldValue,
    error: Option<FieldError>,
    trigger: ValidationTrigger,
    touched: bool,
}

impl FieldController {
    pub fn new(kind: FieldKind, trigger: ValidationTrigger) -> Self {
        let value = match kind {
            FieldKind::Consent => FieldValue::Flag(false),
            _ => FieldValue::Text(String::new()),
        };

        Self {
            kind,
            value,
            error: None,
            trigger,
            touched: false,
        }
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    pub fn error(&self) -> Option<FieldError> {
        self.error
    }

    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    pub fn trigger(&self) -> ValidationTrigger {
        self.trigger
    }

    /// Whether the field has been blurred at least once.
    pub fn touched(&self) -> bool {
        self.touched
    }

    /// Apply a keystroke (or checkbox toggle). Text is run through the field's mask.
    pub fn edit(&mut self, input: FieldInput) -> Result<(), FormError> {
        self.value = match (self.kind, input) {
            (FieldKind::Consent, FieldInput::Toggle(checked)) => FieldValue::Flag(checked),
            (FieldKind::Consent, FieldInput::Text(_)) | (_, FieldInput::Toggle(_)) => {
                return Err(FormError::InputMismatch { field: self.kind });
            }
            (kind, FieldInput::Text(raw)) => FieldValue::Text(validation::format(kind, &raw)),
        };

        if self.trigger == ValidationTrigger::OnChange {
            self.evaluate(Phase::Blur);
        }
        Ok(())
    }

    /// The field lost focus.
    pub fn blur(&mut self) {
        self.touched = true;
        if self.trigger != ValidationTrigger::OnSubmit {
            self.evaluate(Phase::Blur);
        }
    }

    /// Recompute the error from scratch.
    pub fn evaluate(&mut self, phase: Phase) -> Option<FieldError> {
        self.error = match (&self.value, phase) {
            (FieldValue::Text(text), Phase::Blur) => validation::validate(self.kind, text).err(),
            (FieldValue::Text(text), Phase::Submit) => {
                validation::validate_required(self.kind, text).err()
            }
            (FieldValue::Flag(_), Phase::Blur) => None,
            (FieldValue::Flag(accepted), Phase::Submit) => {
                validation::validate_consent(*accepted).err()
            }
        };
        self.error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> FieldInput {
        FieldInput::Text(value.to_string())
    }

    #[test]
    fn test_edit_applies_mask() {
        let mut field = FieldController::new(FieldKind::Phone, ValidationTrigger::OnBlur);
        field.edit(text("11987654321")).unwrap();
        assert_eq!(field.value(), &FieldValue::Text("(11) 98765-4321".to_string()));
    }

    #[test]
    fn test_edit_does_not_validate_on_blur_trigger() {
        let mut field = FieldController::new(FieldKind::Phone, ValidationTrigger::OnBlur);
        field.edit(text("119")).unwrap();
        assert_eq!(field.error(), None);

        field.blur();
        assert_eq!(field.error(), Some(FieldError::InvalidPhone));
        assert!(field.touched());
    }

    #[test]
    fn test_edit_leaves_existing_error_until_blur() {
        let mut field = FieldController::new(FieldKind::Phone, ValidationTrigger::OnBlur);
        field.edit(text("119")).unwrap();
        field.blur();
        assert_eq!(field.error(), Some(FieldError::InvalidPhone));

        // Completing the number does not clear the error mid-edit
        field.edit(text("11987654321")).unwrap();
        assert_eq!(field.error(), Some(FieldError::InvalidPhone));

        field.blur();
        assert_eq!(field.error(), None);
    }

    #[test]
    fn test_on_change_trigger_validates_every_edit() {
        let mut field = FieldController::new(FieldKind::Cpf, ValidationTrigger::OnChange);
        field.edit(text("5299822472")).unwrap();
        assert_eq!(field.error(), Some(FieldError::InvalidCpf));

        field.edit(text("52998224725")).unwrap();
        assert_eq!(field.error(), None);
        assert_eq!(field.value().as_text(), "529.982.247-25");
    }

    #[test]
    fn test_on_submit_trigger_ignores_blur() {
        let mut field = FieldController::new(FieldKind::BirthDate, ValidationTrigger::OnSubmit);
        field.edit(text("31042020")).unwrap();
        field.blur();
        assert_eq!(field.error(), None);

        assert_eq!(field.evaluate(Phase::Submit), Some(FieldError::InvalidBirthDate));
    }

    #[test]
    fn test_blur_accepts_empty_but_submit_requires() {
        let mut field = FieldController::new(FieldKind::Name, ValidationTrigger::OnBlur);
        field.blur();
        assert_eq!(field.error(), None);
        assert_eq!(field.evaluate(Phase::Submit), Some(FieldError::Required));
    }

    #[test]
    fn test_consent_toggle() {
        let mut consent = FieldController::new(FieldKind::Consent, ValidationTrigger::OnBlur);
        assert!(!consent.value().as_flag());
        assert_eq!(consent.evaluate(Phase::Submit), Some(FieldError::ConsentRequired));

        consent.edit(FieldInput::Toggle(true)).unwrap();
        assert!(consent.value().as_flag());
        assert_eq!(consent.evaluate(Phase::Submit), None);
    }

    #[test]
    fn test_input_mismatch() {
        let mut consent = FieldController::new(FieldKind::Consent, ValidationTrigger::OnBlur);
        assert_eq!(
            consent.edit(text("yes")),
            Err(FormError::InputMismatch { field: FieldKind::Consent })
        );

        let mut name = FieldController::new(FieldKind::Name, ValidationTrigger::OnBlur);
        assert_eq!(
            name.edit(FieldInput::Toggle(true)),
            Err(FormError::InputMismatch { field: FieldKind::Name })
        );
    }
}
