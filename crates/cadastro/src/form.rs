// File: src/form.rs
// Purpose: Form state, the event reducer, and submission gating

use std::collections::BTreeMap;
use std::sync::Arc;

use cadastro_validation::{FieldError, FieldKind};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::ValidationConfig;
use crate::error::{FormError, SubmitBlocked};
use crate::field::{FieldController, FieldInput, FieldValue, Phase};
use crate::notification::Notification;
use crate::payload::SubmissionPayload;
use crate::route::EntryRoute;
use crate::transport::{Transport, TransportError, TransportResponse, UNPROCESSABLE_ENTITY};

/// UI callbacks, reduced into [`FormState`] one at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    Edit { field: FieldKind, input: FieldInput },
    Blur { field: FieldKind },
    DismissNotification,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
}

/// Current formatted values, as read at submit time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormRecord {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub cpf: String,
    pub birth_date: String,
    pub consent: bool,
}

/// What happened to a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Nothing was sent.
    Blocked(SubmitBlocked),
    /// 2xx.
    Accepted,
    /// 422, with the server's messages joined.
    Rejected { detail: String },
    /// Any other status.
    Failed { status: u16 },
    /// No response at all.
    NetworkError { cause: String },
}

#[derive(Deserialize)]
struct RejectionBody {
    #[serde(rename = "Errors", default)]
    errors: Option<Vec<String>>,
}

/// Detail shown for a 422. The status alone settles that the server rejected
/// the registration, so a body that is not `{"Errors": [...]}` still counts as
/// a rejection and reads `unknown error`; it is never reported as a transport
/// failure.
fn rejection_detail(body: &str) -> String {
    serde_json::from_str::<RejectionBody>(body)
        .ok()
        .and_then(|rejection| rejection.errors)
        .map(|errors| errors.join(", "))
        .unwrap_or_else(|| "unknown error".to_string())
}

impl SubmitOutcome {
    /// Classify the transport's answer.
    pub fn from_transport(result: Result<TransportResponse, TransportError>) -> Self {
        match result {
            Ok(response) if response.is_success() => SubmitOutcome::Accepted,
            Ok(response) if response.status == UNPROCESSABLE_ENTITY => SubmitOutcome::Rejected {
                detail: rejection_detail(&response.body),
            },
            Ok(response) => SubmitOutcome::Failed {
                status: response.status,
            },
            Err(err) => SubmitOutcome::NetworkError {
                cause: err.to_string(),
            },
        }
    }

    /// Banner for this outcome. A submit that found one already in flight
    /// leaves the current banner alone.
    pub fn notification(&self) -> Option<Notification> {
        match self {
            SubmitOutcome::Blocked(SubmitBlocked::InFlight) => None,
            SubmitOutcome::Blocked(SubmitBlocked::Invalid { .. }) => Some(Notification::fix_errors()),
            SubmitOutcome::Accepted => Some(Notification::submitted()),
            SubmitOutcome::Rejected { detail } => Some(Notification::rejected(detail)),
            SubmitOutcome::Failed { .. } => Some(Notification::failed()),
            SubmitOutcome::NetworkError { cause } => Some(Notification::network(cause)),
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmitOutcome::Accepted)
    }
}

/// Serializable view of one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSnapshot {
    pub value: FieldValue,
    pub error: Option<String>,
    pub touched: bool,
}

/// Serializable view of the whole form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormSnapshot {
    pub fields: BTreeMap<FieldKind, FieldSnapshot>,
    pub submitting: bool,
    pub notification: Option<Notification>,
}

/// Everything the form shows: field values and errors, whether a submission
/// is in flight, and the current banner.
///
/// State only changes through [`FormState::apply`] and the two submit
/// halves, so every transition is a plain function of (state, event).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    // One controller per FieldKind, indexed by discriminant
    fields: Vec<FieldController>,
    status: SubmissionStatus,
    notification: Option<Notification>,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new(&ValidationConfig::default())
    }
}

impl FormState {
    pub fn new(validation: &ValidationConfig) -> Self {
        let fields = FieldKind::ALL
            .into_iter()
            .map(|kind| FieldController::new(kind, validation.trigger_for(kind)))
            .collect();

        Self {
            fields,
            status: SubmissionStatus::Idle,
            notification: None,
        }
    }

    pub fn apply(&mut self, event: FormEvent) -> Result<(), FormError> {
        match event {
            FormEvent::Edit { field, input } => self.field_mut(field).edit(input)?,
            FormEvent::Blur { field } => self.field_mut(field).blur(),
            FormEvent::DismissNotification => self.notification = None,
        }
        Ok(())
    }

    pub fn field(&self, kind: FieldKind) -> &FieldController {
        &self.fields[kind as usize]
    }

    fn field_mut(&mut self, kind: FieldKind) -> &mut FieldController {
        &mut self.fields[kind as usize]
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldController> {
        self.fields.iter()
    }

    pub fn text(&self, kind: FieldKind) -> &str {
        self.field(kind).value().as_text()
    }

    pub fn consent(&self) -> bool {
        self.field(FieldKind::Consent).value().as_flag()
    }

    /// Fields currently holding an error.
    pub fn errors(&self) -> BTreeMap<FieldKind, FieldError> {
        self.fields
            .iter()
            .filter_map(|field| field.error().map(|error| (field.kind(), error)))
            .collect()
    }

    pub fn has_errors(&self) -> bool {
        self.fields.iter().any(|field| !field.is_valid())
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    pub fn is_submitting(&self) -> bool {
        self.status == SubmissionStatus::Submitting
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn record(&self) -> FormRecord {
        FormRecord {
            name: self.text(FieldKind::Name).to_string(),
            email: self.text(FieldKind::Email).to_string(),
            phone: self.text(FieldKind::Phone).to_string(),
            cpf: self.text(FieldKind::Cpf).to_string(),
            birth_date: self.text(FieldKind::BirthDate).to_string(),
            consent: self.consent(),
        }
    }

    /// Evaluate every field with submit rules, whatever its trigger or focus
    /// history. Returns the resulting errors.
    pub fn validate_all(&mut self) -> BTreeMap<FieldKind, FieldError> {
        for field in &mut self.fields {
            field.evaluate(Phase::Submit);
        }
        self.errors()
    }

    /// First half of a submit: gate on validation, enter `Submitting`, and
    /// build the payload. Nothing is sent from here.
    pub fn begin_submit(
        &mut self,
        route: &EntryRoute,
        register_date: NaiveDate,
    ) -> Result<SubmissionPayload, SubmitBlocked> {
        if self.is_submitting() {
            warn!("submit ignored: a submission is already in flight");
            return Err(SubmitBlocked::InFlight);
        }

        let errors = self.validate_all();
        if !errors.is_empty() {
            let invalid: Vec<&str> = errors.keys().map(FieldKind::as_str).collect();
            warn!(?invalid, "submit blocked by validation errors");
            self.notification = Some(Notification::fix_errors());
            return Err(SubmitBlocked::Invalid { errors });
        }

        self.status = SubmissionStatus::Submitting;
        self.notification = None;
        info!(images = route.image_numbers.len(), "submitting registration");

        Ok(SubmissionPayload::build(&self.record(), route, register_date))
    }

    /// Second half of a submit: leave `Submitting` and show the outcome.
    ///
    /// A result that arrives with no submission in flight is classified but
    /// otherwise discarded.
    pub fn complete_submit(
        &mut self,
        result: Result<TransportResponse, TransportError>,
    ) -> SubmitOutcome {
        let outcome = SubmitOutcome::from_transport(result);

        if !self.is_submitting() {
            warn!(?outcome, "discarding transport result with no submission in flight");
            return outcome;
        }

        match &outcome {
            SubmitOutcome::Accepted => info!("registration accepted"),
            SubmitOutcome::Rejected { detail } => warn!(%detail, "registration rejected"),
            SubmitOutcome::Failed { status } => warn!(status, "registration endpoint failed"),
            SubmitOutcome::NetworkError { cause } => warn!(%cause, "registration not delivered"),
            SubmitOutcome::Blocked(_) => {}
        }

        self.status = SubmissionStatus::Idle;
        self.notification = outcome.notification();
        outcome
    }

    pub fn snapshot(&self) -> FormSnapshot {
        let fields = self
            .fields
            .iter()
            .map(|field| {
                let snapshot = FieldSnapshot {
                    value: field.value().clone(),
                    error: field.error().map(|error| error.to_string()),
                    touched: field.touched(),
                };
                (field.kind(), snapshot)
            })
            .collect();

        FormSnapshot {
            fields,
            submitting: self.is_submitting(),
            notification: self.notification.clone(),
        }
    }
}

/// Source of the registration date.
pub type Clock = Arc<dyn Fn() -> NaiveDate + Send + Sync>;

/// The form aggregator: state plus the identifiers it was seeded with and the
/// transport it submits through.
pub struct RegistrationForm {
    state: FormState,
    route: EntryRoute,
    transport: Arc<dyn Transport>,
    clock: Clock,
}

impl RegistrationForm {
    pub fn new(route: EntryRoute, transport: Arc<dyn Transport>, validation: &ValidationConfig) -> Self {
        Self {
            state: FormState::new(validation),
            route,
            transport,
            clock: Arc::new(|| Utc::now().date_naive()),
        }
    }

    /// Replace the UTC-today clock used for `RegisterDate`.
    pub fn with_clock(mut self, clock: impl Fn() -> NaiveDate + Send + Sync + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn route(&self) -> &EntryRoute {
        &self.route
    }

    pub fn transport(&self) -> Arc<dyn Transport> {
        Arc::clone(&self.transport)
    }

    pub fn apply(&mut self, event: FormEvent) -> Result<(), FormError> {
        self.state.apply(event)
    }

    pub fn begin_submit(&mut self) -> Result<SubmissionPayload, SubmitBlocked> {
        let today = (self.clock)();
        self.state.begin_submit(&self.route, today)
    }

    pub fn complete_submit(
        &mut self,
        result: Result<TransportResponse, TransportError>,
    ) -> SubmitOutcome {
        self.state.complete_submit(result)
    }

    /// Validate, send once, and report.
    pub async fn submit(&mut self) -> SubmitOutcome {
        let payload = match self.begin_submit() {
            Ok(payload) => payload,
            Err(blocked) => return SubmitOutcome::Blocked(blocked),
        };

        let result = self.transport.send(&payload).await;
        self.complete_submit(result)
    }
}
