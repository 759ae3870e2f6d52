// File: src/error.rs
// Purpose: Error types for form events, submission gating and entry routes

use std::collections::BTreeMap;

use cadastro_validation::{FieldError, FieldKind};
use thiserror::Error;

/// An event the form cannot apply.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// Text sent to the consent checkbox, or a toggle sent to a text field.
    #[error("field {field} does not accept this kind of input")]
    InputMismatch { field: FieldKind },
}

/// Why `begin_submit` refused to build a payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitBlocked {
    #[error("a submission is already in progress")]
    InFlight,

    #[error("{} field(s) failed validation", errors.len())]
    Invalid { errors: BTreeMap<FieldKind, FieldError> },
}

/// Failure to seed the form from its entry route.
#[derive(Debug, Error)]
pub enum RouteError {
    /// The path has no session segment and nothing was persisted earlier.
    #[error("entry route carries no session identifier")]
    MissingSessionId,

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}
