//! Open a new ticket in Zendesk.
//!
//! [`Create`] is the connector's single operation: it renders the caller's
//! field set, resolves credentials, performs one POST against the tickets
//! endpoint, and exposes `{id, url}` of the created ticket.

use serde::{Deserialize, Serialize};

use crate::connection::Connection;
use crate::error::ConnectorError;
use crate::models::{Priority, Ticket, TicketRequest, TicketType};
use crate::render::{Property, RunContext};
use crate::zendesk_client::ZendeskClient;

/// Ticket-creation task.
///
/// All fields besides the connection's `domain` are optional; absent
/// `subject`, `description`, `priority` and `ticketType` go out as null
/// fields, an absent `assigneeId` is omitted from the payload entirely,
/// and absent `tags` become an empty list.
///
/// # Example
///
/// ```ignore
/// let task = Create::new(connection)
///     .with_subject(Property::expr("Increased 5xx in {{ service }}"))
///     .with_priority(Priority::Normal)
///     .with_ticket_type(TicketType::Incident)
///     .with_tags(vec!["bug".into(), "workflow".into()]);
///
/// let output = task.run(&ctx).await?;
/// println!("created ticket #{} at {}", output.id, output.url);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Create {
    /// Domain and credential properties.
    #[serde(flatten)]
    pub connection: Connection,

    /// Ticket subject.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<Property<String>>,

    /// Ticket description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Property<String>>,

    /// Priority: URGENT, HIGH, NORMAL or LOW.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Property<Priority>>,

    /// Ticket type: PROBLEM, INCIDENT, QUESTION or TASK.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_type: Option<Property<TicketType>>,

    /// Id of the assignee.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<Property<i64>>,

    /// Tags for the ticket, in order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Property<Vec<String>>>,
}

/// Result of a successful ticket creation.
///
/// These are the only response fields surfaced to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Output {
    /// Id of the created ticket.
    pub id: i64,

    /// URL of the created ticket. Taken from the response when present,
    /// otherwise derived from the base URL and id.
    pub url: String,
}

impl Create {
    /// Creates a task with only connection settings; all ticket fields unset.
    pub fn new(connection: Connection) -> Self {
        Self {
            connection,
            subject: None,
            description: None,
            priority: None,
            ticket_type: None,
            assignee_id: None,
            tags: None,
        }
    }

    /// Sets the subject.
    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<Property<String>>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<Property<String>>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the priority.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<Property<Priority>>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Sets the ticket type.
    #[must_use]
    pub fn with_ticket_type(mut self, ticket_type: impl Into<Property<TicketType>>) -> Self {
        self.ticket_type = Some(ticket_type.into());
        self
    }

    /// Sets the assignee id.
    #[must_use]
    pub fn with_assignee_id(mut self, assignee_id: impl Into<Property<i64>>) -> Self {
        self.assignee_id = Some(assignee_id.into());
        self
    }

    /// Sets the tags.
    #[must_use]
    pub fn with_tags(mut self, tags: impl Into<Property<Vec<String>>>) -> Self {
        self.tags = Some(tags.into());
        self
    }

    /// Runs the task: build the payload, send one request, extract the result.
    ///
    /// # Errors
    ///
    /// - `Rendering` if a dynamic property fails to resolve
    /// - `AuthenticationMissing` if no credential scheme applies (no
    ///   request is sent)
    /// - `UnexpectedStatus` for any non-201 response
    /// - `MalformedResponse` if the response envelope cannot be parsed or
    ///   lacks a ticket id
    pub async fn run(&self, ctx: &RunContext) -> Result<Output, ConnectorError> {
        let base_url = self.connection.base_url(ctx)?;
        let credentials = self.connection.credentials(ctx)?;

        let ticket = Ticket {
            subject: render_opt(&self.subject, ctx)?,
            description: render_opt(&self.description, ctx)?,
            priority: render_opt(&self.priority, ctx)?,
            ticket_type: render_opt(&self.ticket_type, ctx)?,
            assignee_id: render_opt(&self.assignee_id, ctx)?,
            tags: render_opt(&self.tags, ctx)?.unwrap_or_default(),
            ..Ticket::default()
        };

        tracing::debug!(
            subject = ticket.subject.as_deref().unwrap_or(""),
            "opening Zendesk ticket"
        );

        // The client lives for exactly this invocation.
        let client = ZendeskClient::new(&base_url, credentials)?;
        let response = client.create_ticket(&TicketRequest::new(ticket)).await?;

        let created = response.ticket;
        let id = created
            .id
            .ok_or_else(|| ConnectorError::malformed("created ticket has no id"))?;
        let url = created.url.unwrap_or_else(|| client.ticket_url(id));

        tracing::debug!(ticket_id = id, url = %url, "Zendesk ticket created");

        Ok(Output { id, url })
    }
}

/// Renders an optional property, keeping absence as `None`.
fn render_opt<T>(
    prop: &Option<Property<T>>,
    ctx: &RunContext,
) -> Result<Option<T>, crate::render::RenderError>
where
    T: Clone + crate::render::FromRendered,
{
    prop.as_ref().map(|p| p.render(ctx)).transpose()
}
