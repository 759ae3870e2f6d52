// File: src/notification.rs
// Purpose: The single user-facing banner that reports submission results

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

/// Banner shown after a submit attempt. At most one exists at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }

    pub fn fix_errors() -> Self {
        Self::error("please fix the errors before submitting")
    }

    pub fn submitted() -> Self {
        Self::success("registration submitted successfully")
    }

    /// Server-side rejection with the detail it sent back.
    pub fn rejected(detail: &str) -> Self {
        Self::error(format!("failed to submit registration: {}", detail))
    }

    pub fn failed() -> Self {
        Self::error("failed to submit registration, please try again")
    }

    pub fn network(cause: &str) -> Self {
        Self::error(format!("network error: {}", cause))
    }
}
