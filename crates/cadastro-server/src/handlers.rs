// File: src/handlers.rs
// Purpose: HTTP handlers translating requests into form events

use axum::{
    extract::{Path, State},
    http::Uri,
    response::Json,
};
use std::sync::Arc;

use cadastro::{
    EntryRoute, FieldInput, FieldKind, FormEvent, FormSnapshot, RegistrationForm, TransportError,
    TransportResponse,
};
use serde::{Deserialize, Serialize};
use tokio::runtime::Handle;
use tracing::{debug, info, warn};

use crate::error::ErrorResponse;
use crate::state::{AppState, SharedForm};

/// Response body for every form route
#[derive(Debug, Serialize)]
pub struct FormView {
    pub session: String,
    pub images: Vec<i64>,
    #[serde(flatten)]
    pub form: FormSnapshot,
}

impl FormView {
    fn of(form: &RegistrationForm) -> Self {
        Self {
            session: form.route().session_id.clone(),
            images: form.route().image_numbers.clone(),
            form: form.state().snapshot(),
        }
    }
}

/// Request body for POST /forms/:session/edit
#[derive(Debug, Deserialize, Serialize)]
pub struct EditRequest {
    pub field: String,
    pub value: FieldInput,
}

/// Request body for POST /forms/:session/blur
#[derive(Debug, Deserialize, Serialize)]
pub struct BlurRequest {
    pub field: String,
}

/// GET /:prefix/:session/:n...
/// Seed a fresh form from the entry path, or from the identifiers a previous
/// visit persisted when the path carries no session
pub async fn seed_handler(
    State(state): State<AppState>,
    uri: Uri,
) -> Result<Json<FormView>, ErrorResponse> {
    let route = EntryRoute::resolve(uri.path(), state.storage()).await?;
    let form = state.seed(route).await;

    let form = form.lock().await;
    Ok(Json(FormView::of(&form)))
}

/// POST /forms/:session/edit
pub async fn edit_handler(
    State(state): State<AppState>,
    Path(session): Path<String>,
    Json(request): Json<EditRequest>,
) -> Result<Json<FormView>, ErrorResponse> {
    let field: FieldKind = request.field.parse()?;
    apply(&state, &session, FormEvent::Edit {
        field,
        input: request.value,
    })
    .await
}

/// POST /forms/:session/blur
pub async fn blur_handler(
    State(state): State<AppState>,
    Path(session): Path<String>,
    Json(request): Json<BlurRequest>,
) -> Result<Json<FormView>, ErrorResponse> {
    let field: FieldKind = request.field.parse()?;
    apply(&state, &session, FormEvent::Blur { field }).await
}

/// POST /forms/:session/notification/dismiss
pub async fn dismiss_handler(
    State(state): State<AppState>,
    Path(session): Path<String>,
) -> Result<Json<FormView>, ErrorResponse> {
    apply(&state, &session, FormEvent::DismissNotification).await
}

/// POST /forms/:session/submit
///
/// The form lock is released while the request is in flight, so edits and a
/// second submit are still answered. The second submit sees `submitting` and
/// is refused. An accepted form is forgotten; the response still carries its
/// final state.
pub async fn submit_handler(
    State(state): State<AppState>,
    Path(session): Path<String>,
) -> Result<Json<FormView>, ErrorResponse> {
    let form = state.form(&session).await?;

    let (payload, transport) = {
        let mut form = form.lock().await;
        match form.begin_submit() {
            Ok(payload) => (payload, form.transport()),
            Err(blocked) => {
                debug!(%session, %blocked, "submit refused");
                return Ok(Json(FormView::of(&form)));
            }
        }
    };

    let pending = PendingSubmit::new(Arc::clone(&form), &session);
    let result = transport.send(&payload).await;

    let mut guard = form.lock().await;
    pending.settled();
    let outcome = guard.complete_submit(result);
    let view = FormView::of(&guard);
    drop(guard);

    if outcome.is_accepted() {
        info!(%session, "registration stored");
        state.release(&session, &form).await;
    }

    Ok(Json(view))
}

/// Completes a submission whose request was dropped (client gone) before the
/// endpoint answered, so the form does not stay in `Submitting`.
struct PendingSubmit {
    form: SharedForm,
    session: String,
    armed: bool,
}

impl PendingSubmit {
    fn new(form: SharedForm, session: &str) -> Self {
        Self {
            form,
            session: session.to_string(),
            armed: true,
        }
    }

    /// The transport answered; the caller completes the submit itself.
    fn settled(mut self) {
        self.armed = false;
    }
}

impl Drop for PendingSubmit {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        warn!(session = %self.session, "submit request dropped before the endpoint answered");

        if let Ok(mut form) = self.form.try_lock() {
            form.complete_submit(cancelled());
            return;
        }

        // Waiters queued ahead of this task all still see `Submitting`, so
        // none of them can start a new submission before it runs.
        let form = Arc::clone(&self.form);
        if let Ok(runtime) = Handle::try_current() {
            runtime.spawn(async move {
                form.lock().await.complete_submit(cancelled());
            });
        }
    }
}

fn cancelled() -> Result<TransportResponse, TransportError> {
    Err(TransportError::Unavailable("request cancelled".to_string()))
}

async fn apply(
    state: &AppState,
    session: &str,
    event: FormEvent,
) -> Result<Json<FormView>, ErrorResponse> {
    let form = state.form(session).await?;
    let mut form = form.lock().await;
    form.apply(event)?;

    Ok(Json(FormView::of(&form)))
}
