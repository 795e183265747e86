//! Error types for the forms proxy
//!
//! Provides unified error handling using thiserror. Every variant renders as
//! the `{ "error": .. }` envelope; upstream details stay in the logs.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::models::ErrorResponse;
use thiserror::Error;

// == Proxy Error Enum ==
/// Unified error type for the forms proxy.
#[derive(Error, Debug)]
pub enum ProxyError {
    /// No upstream credential available
    #[error("{0}")]
    Configuration(String),

    /// Upstream answered with a non-success status
    #[error("HubSpot API error: {status}")]
    Upstream { status: u16 },

    /// Request to the upstream API failed before a usable response arrived
    #[error("HubSpot request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Endpoint called with a method other than GET
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ProxyError {
    /// Builds the error returned when no credential is configured.
    pub fn missing_credential() -> Self {
        ProxyError::Configuration("HubSpot API key not configured".to_string())
    }

    /// HTTP status this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ProxyError::Configuration(_)
            | ProxyError::Upstream { .. }
            | ProxyError::Transport(_)
            | ProxyError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message exposed to callers.
    pub fn public_message(&self) -> String {
        match self {
            ProxyError::Configuration(msg) => msg.clone(),
            ProxyError::Upstream { .. } | ProxyError::Transport(_) => {
                "Failed to fetch forms".to_string()
            }
            ProxyError::MethodNotAllowed => "Method not allowed".to_string(),
            ProxyError::Internal(_) => "Internal server error".to_string(),
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse::new(self.public_message()));
        (self.status_code(), body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the forms proxy.
pub type Result<T> = std::result::Result<T, ProxyError>;
