//! Ticket models for the Zendesk API.
//!
//! The Zendesk tickets endpoint wraps every ticket in a `{"ticket": ...}`
//! envelope, on both requests and responses. Field presence matters on the
//! wire: `subject`, `description`, `priority`, `type` and `tags` are always
//! sent (null when unset), while `assignee_id`, `id` and `url` are omitted
//! entirely when absent.

use serde::{Deserialize, Serialize};

use crate::render::{FromRendered, RenderError};

/// Ticket priority, serialized lowercase on the wire.
///
/// Configuration accepts the uppercase names (`NORMAL`), matching the
/// documented property surface; parsing is case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Needs immediate attention.
    Urgent,
    /// High priority.
    High,
    /// Default priority.
    Normal,
    /// Low priority.
    Low,
}

impl Priority {
    /// Returns the wire form of this priority.
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Urgent => "urgent",
            Priority::High => "high",
            Priority::Normal => "normal",
            Priority::Low => "low",
        }
    }
}

impl FromRendered for Priority {
    const EXPECTED: &'static str = "priority (URGENT, HIGH, NORMAL, LOW)";

    fn from_rendered(rendered: &str) -> Result<Self, RenderError> {
        match rendered.trim().to_ascii_uppercase().as_str() {
            "URGENT" => Ok(Priority::Urgent),
            "HIGH" => Ok(Priority::High),
            "NORMAL" => Ok(Priority::Normal),
            "LOW" => Ok(Priority::Low),
            _ => Err(RenderError::parse(rendered, Self::EXPECTED)),
        }
    }
}

/// Ticket type, serialized lowercase on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketType {
    /// A problem affecting multiple users.
    Problem,
    /// An incident report.
    Incident,
    /// A question from a user.
    Question,
    /// A task to be performed.
    Task,
}

impl TicketType {
    /// Returns the wire form of this ticket type.
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketType::Problem => "problem",
            TicketType::Incident => "incident",
            TicketType::Question => "question",
            TicketType::Task => "task",
        }
    }
}

impl FromRendered for TicketType {
    const EXPECTED: &'static str = "ticket type (PROBLEM, INCIDENT, QUESTION, TASK)";

    fn from_rendered(rendered: &str) -> Result<Self, RenderError> {
        match rendered.trim().to_ascii_uppercase().as_str() {
            "PROBLEM" => Ok(TicketType::Problem),
            "INCIDENT" => Ok(TicketType::Incident),
            "QUESTION" => Ok(TicketType::Question),
            "TASK" => Ok(TicketType::Task),
            _ => Err(RenderError::parse(rendered, Self::EXPECTED)),
        }
    }
}

/// A support ticket as it appears on the wire.
///
/// Outgoing create requests never carry `id` or `url`; those are assigned
/// by the server and only ever populated from a response. A `Ticket` is
/// built fresh per invocation and discarded after the call completes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ticket {
    /// Server-assigned ticket id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Server-assigned ticket URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Ticket subject. Sent as null when unset.
    #[serde(default)]
    pub subject: Option<String>,

    /// Ticket description. Sent as null when unset.
    #[serde(default)]
    pub description: Option<String>,

    /// Ticket priority. Sent as null when unset.
    #[serde(default)]
    pub priority: Option<Priority>,

    /// Ticket type. Sent as null when unset.
    #[serde(rename = "type", default)]
    pub ticket_type: Option<TicketType>,

    /// Id of the assignee. Omitted from the payload entirely when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<i64>,

    /// Tags, in the order supplied. May be empty; duplicates allowed.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Request envelope: exactly one ticket under the `ticket` key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketRequest {
    /// The ticket to create.
    pub ticket: Ticket,
}

impl TicketRequest {
    /// Wraps a ticket in the request envelope.
    pub fn new(ticket: Ticket) -> Self {
        Self { ticket }
    }
}

/// Response envelope returned by the server on creation.
#[derive(Debug, Clone, Deserialize)]
pub struct TicketResponse {
    /// The created ticket, source of truth for id and URL.
    pub ticket: Ticket,

    /// Audit record, tolerated during parsing but otherwise unused.
    #[serde(default)]
    pub audit: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_priority_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Priority::Normal).unwrap(), r#""normal""#);
        assert_eq!(serde_json::to_string(&Priority::Urgent).unwrap(), r#""urgent""#);
        assert_eq!(Priority::Normal.as_str(), "normal");
    }

    #[test]
    fn test_ticket_type_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&TicketType::Incident).unwrap(),
            r#""incident""#
        );
        assert_eq!(TicketType::Incident.as_str(), "incident");
    }

    #[test]
    fn test_priority_parses_case_insensitive() {
        assert_eq!(Priority::from_rendered("NORMAL").unwrap(), Priority::Normal);
        assert_eq!(Priority::from_rendered("low").unwrap(), Priority::Low);
        assert_eq!(Priority::from_rendered(" High ").unwrap(), Priority::High);
        assert!(Priority::from_rendered("critical").is_err());
    }

    #[test]
    fn test_ticket_type_parses_case_insensitive() {
        assert_eq!(
            TicketType::from_rendered("INCIDENT").unwrap(),
            TicketType::Incident
        );
        assert_eq!(TicketType::from_rendered("task").unwrap(), TicketType::Task);
        assert!(TicketType::from_rendered("epic").is_err());
    }

    #[test]
    fn test_outgoing_payload_shape() {
        let request = TicketRequest::new(Ticket {
            subject: Some("Increased 5xx in Demo Service".to_string()),
            description: None,
            priority: Some(Priority::Normal),
            ticket_type: Some(TicketType::Incident),
            assignee_id: Some(1),
            tags: vec!["bug".to_string(), "workflow".to_string()],
            ..Ticket::default()
        });

        let json: serde_json::Value = serde_json::to_value(&request).unwrap();
        let ticket = &json["ticket"];

        // Unset description goes out as an explicit null.
        assert_eq!(ticket["description"], serde_json::Value::Null);
        assert_eq!(ticket["priority"], "normal");
        assert_eq!(ticket["type"], "incident");
        assert_eq!(ticket["assignee_id"], 1);
        // id/url are never supplied outgoing.
        assert!(ticket.get("id").is_none());
        assert!(ticket.get("url").is_none());
    }

    #[test]
    fn test_unset_assignee_is_omitted_not_null() {
        let json = serde_json::to_value(TicketRequest::new(Ticket::default())).unwrap();
        let ticket = &json["ticket"];
        assert!(ticket.get("assignee_id").is_none());
        // Tags are always present, even when empty.
        assert_eq!(ticket["tags"], serde_json::json!([]));
    }

    #[test]
    fn test_tag_order_preserved_in_payload() {
        let ticket = Ticket {
            tags: vec!["bug".to_string(), "workflow".to_string(), "bug".to_string()],
            ..Ticket::default()
        };
        let body = serde_json::to_string(&TicketRequest::new(ticket)).unwrap();
        assert!(body.contains(r#""tags":["bug","workflow","bug"]"#));
    }

    #[test]
    fn test_response_tolerates_unknown_fields() {
        let body = r#"{
            "ticket": {"id": 123, "url": "https://acme.zendesk.com/api/v2/tickets/123.json",
                       "status": "new", "requester_id": 9},
            "audit": {"events": []},
            "unknown_top_level": true
        }"#;
        let response: TicketResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.ticket.id, Some(123));
        assert!(response.audit.is_some());
    }

    #[test]
    fn test_response_without_audit_or_url() {
        let response: TicketResponse = serde_json::from_str(r#"{"ticket":{"id":42}}"#).unwrap();
        assert_eq!(response.ticket.id, Some(42));
        assert_eq!(response.ticket.url, None);
        assert!(response.audit.is_none());
    }
}
