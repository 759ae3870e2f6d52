// File: src/state.rs
// Purpose: Shared server state, one registration form per session

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use cadastro::{EntryRoute, RegistrationForm, ServerConfig, Storage, Transport, ValidationConfig};
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;
use tracing::debug;

use crate::error::ErrorResponse;

pub type SharedForm = Arc<Mutex<RegistrationForm>>;

/// Bounds on the session map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionLimits {
    /// At capacity, seeding evicts the least recently used form
    pub max_sessions: usize,
    /// Forms untouched for longer are dropped
    pub idle_ttl: Duration,
}

impl SessionLimits {
    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            max_sessions: config.max_sessions.max(1),
            idle_ttl: Duration::from_secs(config.session_idle_secs),
        }
    }
}

impl Default for SessionLimits {
    fn default() -> Self {
        Self::from_config(&ServerConfig::default())
    }
}

struct Session {
    form: SharedForm,
    last_seen: Instant,
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    storage: Arc<dyn Storage>,
    transport: Arc<dyn Transport>,
    validation: ValidationConfig,
    limits: SessionLimits,
    forms: Arc<RwLock<HashMap<String, Session>>>,
}

impl AppState {
    pub fn new(
        storage: Arc<dyn Storage>,
        transport: Arc<dyn Transport>,
        validation: ValidationConfig,
    ) -> Self {
        Self {
            storage,
            transport,
            validation,
            limits: SessionLimits::default(),
            forms: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn with_limits(mut self, limits: SessionLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    /// Start a fresh form for `route`, replacing any earlier one for the same session.
    pub async fn seed(&self, route: EntryRoute) -> SharedForm {
        let session = route.session_id.clone();
        let form = RegistrationForm::new(route, Arc::clone(&self.transport), &self.validation);
        let form = Arc::new(Mutex::new(form));

        let now = Instant::now();
        let mut forms = self.forms.write().await;
        forms.retain(|_, entry| now.duration_since(entry.last_seen) < self.limits.idle_ttl);
        forms.remove(&session);

        while forms.len() >= self.limits.max_sessions {
            let Some(oldest) = forms
                .iter()
                .min_by_key(|(_, entry)| entry.last_seen)
                .map(|(key, _)| key.clone())
            else {
                break;
            };
            forms.remove(&oldest);
            debug!(session = %oldest, "evicted least recently used form");
        }

        forms.insert(
            session,
            Session {
                form: Arc::clone(&form),
                last_seen: now,
            },
        );
        debug!(sessions = forms.len(), "form seeded");
        form
    }

    pub async fn form(&self, session: &str) -> Result<SharedForm, ErrorResponse> {
        let now = Instant::now();
        let mut forms = self.forms.write().await;

        let expired = match forms.get_mut(session) {
            Some(entry) if now.duration_since(entry.last_seen) < self.limits.idle_ttl => {
                entry.last_seen = now;
                return Ok(Arc::clone(&entry.form));
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            forms.remove(session);
            debug!(%session, "idle form dropped");
        }

        Err(ErrorResponse::not_found(format!("no form for session {}", session)))
    }

    /// Forget `form` once it is done with. A newer form seeded under the same
    /// session is left alone.
    pub async fn release(&self, session: &str, form: &SharedForm) {
        let mut forms = self.forms.write().await;
        if forms
            .get(session)
            .is_some_and(|entry| Arc::ptr_eq(&entry.form, form))
        {
            forms.remove(session);
        }
    }
}
