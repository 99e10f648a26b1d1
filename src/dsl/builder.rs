//! Document Model Builder: generic document tree → [`Service`].
//!
//! The builder is deliberately forgiving: ambiguous step shapes become
//! [`StepKind::Other`] and a missing or blank url is recorded as an absent
//! fact.  Whether an absent fact is a problem is the evaluator's call, not
//! the builder's.  Only shapes that cannot be mapped to a service at all are
//! hard errors.

use serde_json::{Map, Value};

use crate::error::DocumentError;

use super::model::{
    HttpMethod, Service, Step, StepKind, BODY_ARG_KEYS, DECLARATION_KEY, HTTP_GET_CALLS,
    HTTP_POST_CALLS,
};

/// Build the typed service model from a parsed document tree.
///
/// Every top-level entry except the reserved declaration block becomes a
/// [`Step`], in document order.
pub fn build_service(tree: &Value) -> Result<Service, DocumentError> {
    let root = tree.as_object().ok_or(DocumentError::NotAMapping)?;

    let (name, method) = match root.get(DECLARATION_KEY) {
        Some(decl) => parse_declaration(decl)?,
        None => (None, None),
    };

    let mut steps = Vec::new();
    for (step_name, step_body) in root {
        if step_name == DECLARATION_KEY {
            continue;
        }
        steps.push(Step {
            name: step_name.clone(),
            kind: classify_step(step_body),
        });
    }

    Ok(Service {
        name,
        method,
        steps,
    })
}

fn parse_declaration(decl: &Value) -> Result<(Option<String>, Option<HttpMethod>), DocumentError> {
    let decl = decl
        .as_object()
        .ok_or_else(|| DocumentError::InvalidDeclaration("not a mapping".into()))?;

    let name = decl
        .get("name")
        .and_then(Value::as_str)
        .map(|s| s.to_string());

    let method = decl
        .get("httpMethod")
        .or_else(|| decl.get("http_method"))
        .and_then(Value::as_str)
        .and_then(|s| match s.trim().to_ascii_uppercase().as_str() {
            "GET" => Some(HttpMethod::Get),
            "POST" => Some(HttpMethod::Post),
            // Anything else is an absent fact, not a builder failure.
            _ => None,
        });

    Ok((name, method))
}

fn classify_step(body: &Value) -> StepKind {
    let Some(body) = body.as_object() else {
        return StepKind::Other { call: None };
    };

    if body.contains_key("return") {
        return StepKind::Return;
    }

    let call = body.get("call").and_then(Value::as_str).map(str::trim);
    match call {
        Some("return") => StepKind::Return,
        Some(call) if is_http_call(call) => build_http_call(body),
        Some(call) => StepKind::Other {
            call: Some(call.to_string()),
        },
        None => StepKind::Other { call: None },
    }
}

fn is_http_call(call: &str) -> bool {
    let call = call.to_ascii_lowercase();
    HTTP_GET_CALLS.contains(&call.as_str()) || HTTP_POST_CALLS.contains(&call.as_str())
}

fn build_http_call(body: &Map<String, Value>) -> StepKind {
    let args = body.get("args").and_then(Value::as_object);

    let url = args
        .and_then(|a| a.get("url"))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string());

    let uses_body = args
        .map(|a| {
            BODY_ARG_KEYS
                .iter()
                .any(|key| a.get(*key).is_some_and(is_present))
        })
        .unwrap_or(false);

    StepKind::HttpCall { url, uses_body }
}

/// An argument counts as present when it carries an actual value.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
        Value::Bool(_) | Value::Number(_) => true,
    }
}
