//! Data models for the Zendesk tickets API.
//!
//! This module contains the wire types for ticket creation: the ticket
//! entity itself, the request/response envelopes, and the closed priority
//! and type enumerations.

mod ticket;

pub use ticket::*;
