//! Connection settings shared by Zendesk operations.
//!
//! A [`Connection`] carries the instance domain and the credential
//! properties, all of which may be dynamic. It knows how to normalize the
//! domain into a base URL and how to resolve exactly one authorization
//! scheme per invocation.

use base64::prelude::{Engine as _, BASE64_STANDARD};
use serde::{Deserialize, Serialize};

use crate::error::ConnectorError;
use crate::render::{Property, RenderError, RunContext};

/// Normalizes a raw domain or URL into a scheme-qualified base URL with no
/// trailing slash.
///
/// Inputs that already carry an `http://` or `https://` scheme keep it,
/// with exactly one trailing `/` stripped if present; anything else gets
/// `https://` prepended unchanged. Host syntax is not validated here -
/// malformed input surfaces later as an HTTP-layer failure. Idempotent for
/// already-normalized input.
pub fn normalize_domain(raw: &str) -> String {
    if raw.starts_with("http://") || raw.starts_with("https://") {
        raw.strip_suffix('/').unwrap_or(raw).to_string()
    } else {
        format!("https://{raw}")
    }
}

/// Resolved authorization scheme for one invocation.
///
/// Exactly one scheme is active per call, never both and never neither.
#[derive(Debug, Clone)]
pub enum Credentials {
    /// Email/API-token pair, sent as `Basic base64("<username>/token:<token>")`.
    Basic {
        /// Account email. Empty when the caller omitted it.
        username: String,
        /// The API token.
        token: String,
    },

    /// OAuth access token, sent as `Bearer <token>`.
    Bearer {
        /// The OAuth token.
        token: String,
    },
}

impl Credentials {
    /// Builds the Authorization header value for this scheme.
    pub fn header_value(&self) -> String {
        match self {
            Credentials::Basic { username, token } => {
                let payload = format!("{username}/token:{token}");
                format!("Basic {}", BASE64_STANDARD.encode(payload))
            }
            Credentials::Bearer { token } => format!("Bearer {token}"),
        }
    }

    /// Returns the secret token for error-message sanitization.
    ///
    /// This must ONLY be used for sanitizing, never for logging.
    pub(crate) fn secret(&self) -> &str {
        match self {
            Credentials::Basic { token, .. } => token,
            Credentials::Bearer { token } => token,
        }
    }
}

/// Zendesk connection properties supplied by the caller.
///
/// `domain` is required; the credential fields are optional individually,
/// but an invocation fails with `AuthenticationMissing` unless at least one
/// non-empty scheme resolves.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    /// Zendesk domain, e.g. `mycompany.zendesk.com` or a full URL.
    pub domain: Property<String>,

    /// Account email used with the API token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<Property<String>>,

    /// API token. When non-empty this takes precedence over `oauth_token`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<Property<String>>,

    /// OAuth token, used only when no API token is supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oauth_token: Option<Property<String>>,
}

impl Connection {
    /// Creates a connection with only a domain; credentials unset.
    pub fn new(domain: impl Into<Property<String>>) -> Self {
        Self {
            domain: domain.into(),
            username: None,
            token: None,
            oauth_token: None,
        }
    }

    /// Renders the domain and normalizes it into the base URL.
    pub fn base_url(&self, ctx: &RunContext) -> Result<String, ConnectorError> {
        let domain = self.domain.render(ctx)?;
        Ok(normalize_domain(&domain))
    }

    /// Resolves the authorization scheme for this invocation.
    ///
    /// Precedence is a business rule, not a fallback: a non-empty API
    /// token always selects the Basic scheme, even when an OAuth token was
    /// also supplied. Only when no usable API token exists is a non-empty
    /// OAuth token considered.
    ///
    /// # Errors
    ///
    /// Returns `ConnectorError::AuthenticationMissing` when neither scheme
    /// yields a non-empty token.
    pub fn credentials(&self, ctx: &RunContext) -> Result<Credentials, ConnectorError> {
        if let Some(token) = render_opt(&self.token, ctx)?.filter(|t| !t.is_empty()) {
            let username = render_opt(&self.username, ctx)?.unwrap_or_default();
            return Ok(Credentials::Basic { username, token });
        }

        if let Some(token) = render_opt(&self.oauth_token, ctx)?.filter(|t| !t.is_empty()) {
            return Ok(Credentials::Bearer { token });
        }

        Err(ConnectorError::AuthenticationMissing)
    }
}

/// Renders an optional property, keeping absence as `None`.
fn render_opt(
    prop: &Option<Property<String>>,
    ctx: &RunContext,
) -> Result<Option<String>, RenderError> {
    prop.as_ref().map(|p| p.render(ctx)).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize_bare_domain_gets_https() {
        assert_eq!(normalize_domain("example.com"), "https://example.com");
    }

    #[test]
    fn test_normalize_strips_single_trailing_slash() {
        assert_eq!(normalize_domain("http://example.com/"), "http://example.com");
        assert_eq!(normalize_domain("https://example.com/"), "https://example.com");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize_domain("https://example.com");
        assert_eq!(once, "https://example.com");
        assert_eq!(normalize_domain(&once), once);
    }

    #[test]
    fn test_normalize_passes_malformed_input_through() {
        // No host validation; the HTTP layer surfaces the failure later.
        assert_eq!(normalize_domain("not a domain"), "https://not a domain");
    }

    #[test]
    fn test_basic_header_encodes_username_slash_token() {
        let creds = Credentials::Basic {
            username: "u".to_string(),
            token: "abc".to_string(),
        };
        let header = creds.header_value();
        let encoded = header.strip_prefix("Basic ").unwrap();
        let decoded = BASE64_STANDARD.decode(encoded).unwrap();
        assert_eq!(String::from_utf8(decoded).unwrap(), "u/token:abc");
    }

    #[test]
    fn test_bearer_header_carries_token_directly() {
        let creds = Credentials::Bearer {
            token: "xyz".to_string(),
        };
        assert_eq!(creds.header_value(), "Bearer xyz");
    }

    fn connection(
        username: Option<&str>,
        token: Option<&str>,
        oauth_token: Option<&str>,
    ) -> Connection {
        Connection {
            domain: Property::from("acme.zendesk.com".to_string()),
            username: username.map(|v| Property::from(v.to_string())),
            token: token.map(|v| Property::from(v.to_string())),
            oauth_token: oauth_token.map(|v| Property::from(v.to_string())),
        }
    }

    #[test]
    fn test_api_token_takes_precedence_over_oauth() {
        let conn = connection(Some("u"), Some("abc"), Some("xyz"));
        let creds = conn.credentials(&RunContext::new()).unwrap();
        assert!(matches!(creds, Credentials::Basic { .. }));
    }

    #[test]
    fn test_empty_api_token_falls_through_to_oauth() {
        let conn = connection(Some("u"), Some(""), Some("xyz"));
        let creds = conn.credentials(&RunContext::new()).unwrap();
        assert_eq!(creds.header_value(), "Bearer xyz");
    }

    #[test]
    fn test_absent_api_token_uses_oauth() {
        let conn = connection(None, None, Some("xyz"));
        let creds = conn.credentials(&RunContext::new()).unwrap();
        assert_eq!(creds.header_value(), "Bearer xyz");
    }

    #[test]
    fn test_missing_username_defaults_to_empty() {
        let conn = connection(None, Some("abc"), None);
        let creds = conn.credentials(&RunContext::new()).unwrap();
        match creds {
            Credentials::Basic { username, token } => {
                assert_eq!(username, "");
                assert_eq!(token, "abc");
            }
            Credentials::Bearer { .. } => panic!("expected basic scheme"),
        }
    }

    #[test]
    fn test_no_credentials_is_authentication_missing() {
        let conn = connection(Some("u"), None, None);
        let err = conn.credentials(&RunContext::new()).unwrap_err();
        assert!(matches!(err, ConnectorError::AuthenticationMissing));
    }

    #[test]
    fn test_both_empty_is_authentication_missing() {
        let conn = connection(None, Some(""), Some(""));
        let err = conn.credentials(&RunContext::new()).unwrap_err();
        assert!(matches!(err, ConnectorError::AuthenticationMissing));
    }

    #[test]
    fn test_templated_credentials_render() {
        let ctx = RunContext::new().with_var("zendesk_token", "s3cret");
        let conn = Connection {
            token: Some(Property::expr("{{ zendesk_token }}")),
            ..Connection::new("acme.zendesk.com".to_string())
        };
        let creds = conn.credentials(&ctx).unwrap();
        assert_eq!(creds.secret(), "s3cret");
    }

    #[test]
    fn test_base_url_renders_and_normalizes() {
        let ctx = RunContext::new().with_var("company", "acme");
        let conn = Connection::new(Property::<String>::expr("{{ company }}.zendesk.com/"));
        // Trailing slash only gets stripped behind a scheme; bare domains
        // are prepended unchanged.
        assert_eq!(conn.base_url(&ctx).unwrap(), "https://acme.zendesk.com/");
    }

    #[test]
    fn test_connection_deserializes_camel_case() {
        let conn: Connection = serde_json::from_str(
            r#"{"domain": "acme.zendesk.com", "oauthToken": "xyz"}"#,
        )
        .unwrap();
        let creds = conn.credentials(&RunContext::new()).unwrap();
        assert_eq!(creds.header_value(), "Bearer xyz");
    }
}
