//! Error types for the Zendesk connector.
//!
//! This module defines `ConnectorError`, the unified error type used
//! throughout the crate for consistent error handling and propagation.
//!
//! # Security
//!
//! Credential tokens must never appear in logs or error messages. Response
//! bodies that end up in errors are passed through `sanitize_message()`
//! before being surfaced.

use thiserror::Error;

use crate::render::RenderError;

/// Unified error type for all connector operations.
///
/// Every invocation either creates a ticket or fails with exactly one of
/// these variants; nothing is retried and there is no partial success.
#[derive(Error, Debug)]
pub enum ConnectorError {
    /// Neither a basic-auth token nor an OAuth token was supplied.
    /// No request is sent in this case.
    #[error("authentication details are missing - provide either username/token or oauth_token")]
    AuthenticationMissing,

    /// The server answered with a status other than 201 Created.
    /// Carries the raw response body for diagnostics.
    #[error("unexpected response status {status}: {body}")]
    UnexpectedStatus {
        /// The HTTP status code returned.
        status: reqwest::StatusCode,
        /// The response body, potentially containing error details.
        body: String,
    },

    /// The response body could not be interpreted as a ticket envelope.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// A dynamic property could not be rendered or parsed.
    #[error("rendering failed: {0}")]
    Rendering(#[from] RenderError),

    /// JSON serialization of the outgoing payload failed.
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP request failed during transmission.
    #[error("HTTP request failed: {0}")]
    Http(#[source] reqwest::Error),

    /// HTTP client initialization failed.
    #[error("HTTP client error: {0}")]
    HttpClient(#[source] reqwest::Error),
}

impl ConnectorError {
    /// Creates a malformed-response error.
    pub fn malformed(message: impl Into<String>) -> Self {
        ConnectorError::MalformedResponse(message.into())
    }

    /// Sanitizes a message to remove any occurrence of a secret.
    ///
    /// Applied to response bodies before they are embedded in errors, so
    /// a server echoing the Authorization token back cannot leak it.
    #[must_use]
    pub fn sanitize_message(message: &str, secret: &str) -> String {
        if secret.is_empty() {
            return message.to_string();
        }
        message.replace(secret, "[REDACTED]")
    }
}
