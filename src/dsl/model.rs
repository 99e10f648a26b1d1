//! Typed document model for agent-service workflows.
//!
//! A parsed document becomes a [`Service`] holding an ordered sequence of
//! [`Step`]s.  Step shapes form a closed tagged union ([`StepKind`]) so every
//! rule site matches exhaustively; a new step variant forces each rule to be
//! revisited by the type checker.

use serde::{Deserialize, Serialize};

/// Reserved top-level key that carries service metadata rather than a step.
pub const DECLARATION_KEY: &str = "declaration";

/// `call` values recognized as HTTP GET invocations.
pub const HTTP_GET_CALLS: &[&str] = &["http.get", "http-get"];

/// `call` values recognized as HTTP POST invocations.
pub const HTTP_POST_CALLS: &[&str] = &["http.post", "http-post"];

/// Argument keys whose presence marks an HTTP call as carrying a body.
pub const BODY_ARG_KEYS: &[&str] = &["body", "plaintext", "content-type"];

/// HTTP method declared for a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    /// Wire-format name, as written in the declaration block.
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// Root entity of one validation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    /// Service name from the declaration block, if any.
    pub name: Option<String>,
    /// Declared HTTP method.  Absent means unset, never "unknown".
    pub method: Option<HttpMethod>,
    /// Steps in document order.
    pub steps: Vec<Step>,
}

/// A single named step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Step {
    /// Step name (the mapping key, unique within the document).
    pub name: String,
    pub kind: StepKind,
}

/// Closed set of step shapes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum StepKind {
    /// An outbound HTTP invocation.
    HttpCall {
        /// Target url; `None` records a missing/blank url fact for the
        /// evaluator rather than a builder failure.
        url: Option<String>,
        /// Whether the call carries a body-like argument.
        uses_body: bool,
    },
    /// The terminating return step.
    Return,
    /// Any step the structural rules do not constrain further.
    Other {
        /// The raw `call` discriminator, when one was present.
        call: Option<String>,
    },
}

impl Service {
    /// Steps that are HTTP calls, in document order.
    pub fn http_calls(&self) -> impl Iterator<Item = &Step> {
        self.steps
            .iter()
            .filter(|s| matches!(s.kind, StepKind::HttpCall { .. }))
    }

    /// Steps that are returns, in document order.
    pub fn returns(&self) -> impl Iterator<Item = &Step> {
        self.steps
            .iter()
            .filter(|s| matches!(s.kind, StepKind::Return))
    }
}
