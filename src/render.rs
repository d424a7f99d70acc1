//! Dynamic property rendering.
//!
//! The connector runs as one step inside a host workflow engine, and most
//! of its configuration surface may be templated ("dynamic") rather than
//! concrete. This module defines the seam to the engine's rendering
//! collaborator: a [`RunContext`] carrying the invocation's variables, and
//! a [`Property`] type that is either a concrete value or a template
//! expression evaluated against those variables.
//!
//! Template syntax and semantics are minijinja's; this crate only calls
//! into it and propagates failures unchanged.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error produced while resolving a dynamic property.
///
/// Propagated to the caller as `ConnectorError::Rendering` without being
/// swallowed or retried.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The template expression failed to evaluate.
    #[error("template evaluation failed: {0}")]
    Template(#[from] minijinja::Error),

    /// The rendered string could not be parsed into the property's type.
    #[error("cannot parse rendered value {value:?} as {expected}")]
    Parse {
        /// The rendered string that failed to parse.
        value: String,
        /// Human-readable name of the expected type.
        expected: &'static str,
    },
}

impl RenderError {
    /// Creates a parse error for a rendered value.
    pub fn parse(value: impl Into<String>, expected: &'static str) -> Self {
        RenderError::Parse {
            value: value.into(),
            expected,
        }
    }
}

/// Per-invocation context supplied by the host engine.
///
/// Holds the variables available to template expressions. A context is
/// created fresh for each invocation and discarded afterwards; nothing is
/// shared across calls.
#[derive(Debug, Clone, Default)]
pub struct RunContext {
    /// Variables visible to template expressions.
    vars: serde_json::Map<String, serde_json::Value>,
}

impl RunContext {
    /// Creates a context with no variables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a variable to the context.
    #[must_use]
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    /// Evaluates a template string against this context's variables.
    ///
    /// Plain strings without template markers pass through unchanged.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::Template` if the expression fails to
    /// evaluate, e.g. on a syntax error or strict-mode lookup failure.
    pub fn render(&self, template: &str) -> Result<String, RenderError> {
        let env = minijinja::Environment::new();
        Ok(env.render_str(template, &self.vars)?)
    }
}

/// Parses a value of the target type out of a rendered template string.
///
/// Implemented for each type that can appear as a dynamic property.
pub trait FromRendered: Sized {
    /// Human-readable type name used in parse errors.
    const EXPECTED: &'static str;

    /// Parses the rendered string into the target type.
    fn from_rendered(rendered: &str) -> Result<Self, RenderError>;
}

impl FromRendered for String {
    const EXPECTED: &'static str = "string";

    fn from_rendered(rendered: &str) -> Result<Self, RenderError> {
        Ok(rendered.to_string())
    }
}

impl FromRendered for i64 {
    const EXPECTED: &'static str = "integer";

    fn from_rendered(rendered: &str) -> Result<Self, RenderError> {
        rendered
            .trim()
            .parse()
            .map_err(|_| RenderError::parse(rendered, Self::EXPECTED))
    }
}

impl FromRendered for Vec<String> {
    const EXPECTED: &'static str = "list of strings";

    /// Accepts a JSON array (`["a","b"]`) or a comma-separated list
    /// (`a, b`). Element order is preserved as supplied.
    fn from_rendered(rendered: &str) -> Result<Self, RenderError> {
        let trimmed = rendered.trim();
        if trimmed.starts_with('[') {
            return serde_json::from_str(trimmed)
                .map_err(|_| RenderError::parse(rendered, Self::EXPECTED));
        }
        Ok(trimmed
            .split(',')
            .map(|tag| tag.trim().to_string())
            .filter(|tag| !tag.is_empty())
            .collect())
    }
}

/// A task property that is either a concrete value or a template
/// expression resolved at run time.
///
/// Deserializes untagged, so workflow definitions can supply either the
/// typed value directly or a `"{{ ... }}"` expression string. `Expression`
/// is listed first so that every string-valued input goes through the
/// renderer; plain strings without template markers are unaffected by it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Property<T> {
    /// A template expression evaluated against the [`RunContext`].
    Expression(String),

    /// A concrete value, used as-is.
    Concrete(T),
}

impl<T> Property<T>
where
    T: Clone + FromRendered,
{
    /// Resolves this property against the given context.
    ///
    /// # Errors
    ///
    /// Returns `RenderError` if the expression fails to evaluate or the
    /// rendered string does not parse as `T`.
    pub fn render(&self, ctx: &RunContext) -> Result<T, RenderError> {
        match self {
            Property::Concrete(value) => Ok(value.clone()),
            Property::Expression(template) => T::from_rendered(&ctx.render(template)?),
        }
    }
}

impl<T> Property<T> {
    /// Creates a template-expression property.
    pub fn expr(template: impl Into<String>) -> Self {
        Property::Expression(template.into())
    }
}

impl<T> From<T> for Property<T> {
    fn from(value: T) -> Self {
        Property::Concrete(value)
    }
}
