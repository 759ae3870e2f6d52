// File: src/route.rs
// Purpose: Seed the form from its entry URL and persist the seeded identifiers

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::RouteError;
use crate::storage::Storage;

/// Storage key for the session identifier.
pub const SESSION_KEY: &str = "cadastroUUID";

/// Storage key for the image numbers (JSON array).
pub const NUMBERS_KEY: &str = "cadastroNumbers";

/// Identifiers carried from the entry URL through to submission.
///
/// Entry paths look like `/cadastro/<session>/<n>/<n>/...`. The session
/// segment is opaque and kept verbatim; the rest are image numbers.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EntryRoute {
    pub session_id: String,
    pub image_numbers: Vec<i64>,
}

impl EntryRoute {
    pub fn new(session_id: impl Into<String>, image_numbers: Vec<i64>) -> Self {
        Self {
            session_id: session_id.into(),
            image_numbers,
        }
    }

    /// Parse an entry path.
    ///
    /// The path is split on `/` and the first two pieces (the empty piece in
    /// front of the leading slash and the route prefix) are skipped. Number
    /// segments that do not start with an integer are dropped.
    pub fn parse(path: &str) -> Result<Self, RouteError> {
        let mut segments = path.split('/').skip(2);

        let session_id = match segments.next() {
            Some(session) if !session.is_empty() => session.to_string(),
            _ => return Err(RouteError::MissingSessionId),
        };
        let image_numbers = segments.filter_map(parse_leading_int).collect();

        Ok(Self {
            session_id,
            image_numbers,
        })
    }

    /// Write both identifiers to storage.
    pub async fn persist(&self, storage: &dyn Storage) -> anyhow::Result<()> {
        storage.set(SESSION_KEY, self.session_id.clone()).await?;
        storage
            .set(NUMBERS_KEY, serde_json::to_string(&self.image_numbers)?)
            .await?;

        debug!(backend = storage.name(), images = self.image_numbers.len(), "entry route persisted");
        Ok(())
    }

    /// Read identifiers persisted by an earlier visit.
    pub async fn restore(storage: &dyn Storage) -> anyhow::Result<Option<Self>> {
        let Some(session_id) = storage.get(SESSION_KEY).await? else {
            return Ok(None);
        };

        let image_numbers = match storage.get(NUMBERS_KEY).await? {
            Some(json) => serde_json::from_str(&json)?,
            None => Vec::new(),
        };

        Ok(Some(Self {
            session_id,
            image_numbers,
        }))
    }

    /// Parse `path` and persist the result; when the path has no session
    /// segment, fall back to whatever an earlier visit persisted.
    pub async fn resolve(path: &str, storage: &dyn Storage) -> Result<Self, RouteError> {
        match Self::parse(path) {
            Ok(route) => {
                route.persist(storage).await?;
                info!(images = route.image_numbers.len(), "form seeded from entry route");
                Ok(route)
            }
            Err(RouteError::MissingSessionId) => {
                let route = Self::restore(storage)
                    .await?
                    .ok_or(RouteError::MissingSessionId)?;
                info!(images = route.image_numbers.len(), "form seeded from stored route");
                Ok(route)
            }
            Err(err) => Err(err),
        }
    }
}

/// Leading-integer parse: optional whitespace, optional sign, then digits up
/// to the first non-digit (`"12abc"` is 12). `None` when no digit leads or the
/// value overflows.
fn parse_leading_int(segment: &str) -> Option<i64> {
    let trimmed = segment.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }

    let magnitude: i64 = rest[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}
