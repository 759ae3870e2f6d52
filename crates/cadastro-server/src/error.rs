// File: src/error.rs
// Purpose: JSON error responses for the form API

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use cadastro::{FormError, RouteError, UnknownField};
use serde::Serialize;

#[derive(Debug)]
pub struct ErrorResponse {
    status: StatusCode,
    message: String,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.message,
        });

        (self.status, body).into_response()
    }
}

impl From<UnknownField> for ErrorResponse {
    fn from(err: UnknownField) -> Self {
        ErrorResponse::bad_request(err.to_string())
    }
}

impl From<FormError> for ErrorResponse {
    fn from(err: FormError) -> Self {
        ErrorResponse::bad_request(err.to_string())
    }
}

impl From<RouteError> for ErrorResponse {
    fn from(err: RouteError) -> Self {
        match err {
            RouteError::MissingSessionId => ErrorResponse::bad_request(err.to_string()),
            RouteError::Storage(err) => ErrorResponse::internal(err.to_string()),
        }
    }
}
