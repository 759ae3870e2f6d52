//! Delivery of the submission payload to the registration endpoint
//!
//! The form only needs "send this payload once and tell me what came back",
//! so [`Transport`] is a single async call. [`HttpTransport`] is the real
//! implementation; tests and embedders can supply their own.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::config::EndpointConfig;
use crate::payload::SubmissionPayload;

/// HTTP status used by the endpoint for semantic validation failures.
pub const UNPROCESSABLE_ENTITY: u16 = 422;

/// Status and raw body of the endpoint's answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The request never produced a response.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request to {endpoint} failed: {source}")]
    Http {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{0}")]
    Unavailable(String),
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the payload once. No retries.
    async fn send(&self, payload: &SubmissionPayload) -> Result<TransportResponse, TransportError>;
}

/// POSTs the payload as JSON with reqwest.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(config: &EndpointConfig) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|source| TransportError::Http {
                endpoint: "client_init".into(),
                source,
            })?;

        Ok(Self {
            http,
            endpoint: config.url.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, payload: &SubmissionPayload) -> Result<TransportResponse, TransportError> {
        let http_error = |source| TransportError::Http {
            endpoint: self.endpoint.clone(),
            source,
        };

        let response = self
            .http
            .post(&self.endpoint)
            .json(payload)
            .send()
            .await
            .map_err(http_error)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(http_error)?;
        debug!(endpoint = %self.endpoint, status, "registration endpoint responded");

        Ok(TransportResponse { status, body })
    }
}
