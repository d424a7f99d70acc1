//! # Zendesk connector
//!
//! A connector that opens support tickets in Zendesk over its HTTP JSON
//! API, designed to run as one step inside a host workflow engine. The
//! engine supplies templated field values through a
//! [`RunContext`](render::RunContext) and consumes a structured
//! `{id, url}` result.
//!
//! ## Features
//!
//! - **Domain normalization**: raw domains become canonical scheme-qualified
//!   base URLs with no trailing slash
//! - **Two credential schemes**: email/API-token (Basic) and OAuth (Bearer),
//!   with a defined precedence - a non-empty API token always wins
//! - **Typed payloads**: closed priority/type enumerations with a stable
//!   lowercase wire form, and precise null-vs-omitted field handling
//! - **Strict response classification**: only HTTP 201 counts as success;
//!   anything else surfaces the response body in the error
//! - **Security**: credential tokens are never logged and are redacted from
//!   error messages
//!
//! ## Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`render`] - Dynamic property rendering against the run context
//! - [`connection`] - Domain normalization and credential resolution
//! - [`zendesk_client`] - HTTP client for the tickets endpoint
//! - [`models`] - Wire types for tickets and their envelopes
//! - [`tickets`] - The `Create` operation
//! - [`error`] - Unified error type
//!
//! Each invocation is a straight-line pipeline with no persistent state:
//! the ticket payload is built from rendered fields, one POST is sent with
//! a per-invocation client, and the response is mapped to the result.
//! Invocations running on parallel workers share nothing.
//!
//! ## Example
//!
//! ```ignore
//! use zendesk_connector::connection::Connection;
//! use zendesk_connector::models::{Priority, TicketType};
//! use zendesk_connector::render::{Property, RunContext};
//! use zendesk_connector::tickets::Create;
//!
//! async fn example() -> Result<(), zendesk_connector::error::ConnectorError> {
//!     let ctx = RunContext::new().with_var("service", "Demo");
//!
//!     let connection = Connection {
//!         username: Some(Property::from("my_email@example.com".to_string())),
//!         token: Some(Property::expr("{{ secrets.zendesk_token }}")),
//!         ..Connection::new("mycompany.zendesk.com".to_string())
//!     };
//!
//!     let output = Create::new(connection)
//!         .with_subject(Property::expr("Increased 5xx in {{ service }} Service"))
//!         .with_priority(Priority::Normal)
//!         .with_ticket_type(TicketType::Incident)
//!         .with_tags(vec!["bug".to_string(), "workflow".to_string()])
//!         .run(&ctx)
//!         .await?;
//!
//!     println!("created ticket #{} at {}", output.id, output.url);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod connection;
pub mod error;
pub mod models;
pub mod render;
pub mod tickets;
pub mod zendesk_client;
