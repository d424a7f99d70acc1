//! HTTP client for the Zendesk tickets API.
//!
//! This module provides the `ZendeskClient` struct for performing the
//! single authenticated POST that creates a ticket.
//!
//! A client is scoped to one invocation: it is constructed, used for
//! exactly one request, and dropped. There is no pooling or shared state
//! across invocations, and no retry - any status other than 201 fails the
//! call.
//!
//! # Security
//!
//! The credential token is never logged. Response bodies embedded in
//! errors are sanitized before being surfaced.

use std::time::Duration;

use reqwest::{header, Client, StatusCode};

use crate::connection::Credentials;
use crate::error::ConnectorError;
use crate::models::{TicketRequest, TicketResponse};

/// Request timeout in seconds.
///
/// The upstream behavior inherited the transport's unbounded default; a
/// finite deadline is used here instead.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Fixed path of the ticket-creation endpoint.
const TICKETS_PATH: &str = "/api/v2/tickets.json";

/// Content type sent with every create request.
const CONTENT_TYPE_JSON_UTF8: &str = "application/json; charset=UTF-8";

/// HTTP client for the Zendesk tickets API.
///
/// # Example
///
/// ```ignore
/// let client = ZendeskClient::new("https://acme.zendesk.com", credentials)?;
/// let response = client.create_ticket(&request).await?;
/// ```
pub struct ZendeskClient {
    /// The underlying HTTP client.
    http: Client,

    /// Normalized base URL (e.g. `https://acme.zendesk.com`).
    base_url: String,

    /// Resolved authorization scheme for this invocation.
    credentials: Credentials,
}

impl ZendeskClient {
    /// Creates a client for one invocation.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Normalized base URL from [`normalize_domain`](crate::connection::normalize_domain)
    /// * `credentials` - Resolved authorization scheme
    ///
    /// # Errors
    ///
    /// Returns `ConnectorError::HttpClient` if the HTTP client fails to
    /// initialize.
    pub fn new(
        base_url: impl Into<String>,
        credentials: Credentials,
    ) -> Result<Self, ConnectorError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(ConnectorError::HttpClient)?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            credentials,
        })
    }

    /// Creates a ticket with a single POST to `/api/v2/tickets.json`.
    ///
    /// The success condition is a status of exactly 201 Created; any other
    /// status, including other 2xx codes, fails with
    /// `ConnectorError::UnexpectedStatus` carrying the response body.
    ///
    /// # Errors
    ///
    /// - `UnexpectedStatus` for any non-201 response
    /// - `MalformedResponse` if a 201 body does not parse as the envelope
    /// - `Http` for transport failures
    pub async fn create_ticket(
        &self,
        request: &TicketRequest,
    ) -> Result<TicketResponse, ConnectorError> {
        let url = format!("{}{}", self.base_url, TICKETS_PATH);
        let body = serde_json::to_string(request)?;

        tracing::debug!(url = %url, "creating Zendesk ticket");

        let response = self
            .http
            .post(&url)
            .header(header::AUTHORIZATION, self.credentials.header_value())
            .header(header::CONTENT_TYPE, CONTENT_TYPE_JSON_UTF8)
            .body(body)
            .send()
            .await
            .map_err(ConnectorError::Http)?;

        let status = response.status();
        if status != StatusCode::CREATED {
            let body = response.text().await.unwrap_or_default();
            let body = ConnectorError::sanitize_message(&body, self.credentials.secret());
            return Err(ConnectorError::UnexpectedStatus { status, body });
        }

        let body = response.text().await.map_err(ConnectorError::Http)?;

        tracing::trace!(body = %body, "Zendesk API response");

        serde_json::from_str(&body).map_err(|e| ConnectorError::malformed(e.to_string()))
    }

    /// Returns the canonical URL of a ticket on this instance.
    ///
    /// Used when the server response omits the `url` field.
    pub fn ticket_url(&self, id: i64) -> String {
        format!("{}/api/v2/tickets/{}.json", self.base_url, id)
    }
}
