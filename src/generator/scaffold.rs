//! Deterministic post-processing of model-generated workflow steps.
//!
//! The language model only drafts the step sequence; everything here is the
//! mechanical half of generation: stripping chat formatting, quoting
//! placeholder urls the YAML parser would otherwise choke on, hoisting
//! model-emitted `prepare` assignments into the template's prepare slot, and
//! substituting the final document template.

use serde_json::Value;

use super::error::GeneratorError;
use super::types::GenerationRequest;

/// Assignment keys the template already owns; model-emitted duplicates are
/// dropped when hoisting.
const RESERVED_ASSIGN_KEYS: &[&str] = &["url", "httpMethod", "input", "serviceInput"];

/// Placeholders substituted by [`render_template`].
const SERVICE_NAME: &str = "{{SERVICE_NAME}}";
const SERVICE_DESCRIPTION: &str = "{{SERVICE_DESCRIPTION}}";
const HTTP_METHOD: &str = "{{HTTP_METHOD}}";
const ADDITIONAL_PARAMS: &str = "{{ADDITIONAL_PARAMS}}";
const PREPARE_ASSIGNMENTS: &str = "{{LLM_GENERATED_PREPARE_ASSIGNMENTS}}";
const WORKFLOW_STEPS: &str = "{{WORKFLOW_STEPS}}";

/// Strip a surrounding markdown code fence from a chat completion.
pub fn strip_markdown_fences(raw: &str) -> String {
    raw.trim()
        .trim_start_matches("```yaml")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim()
        .to_string()
}

/// Quote mapper-placeholder urls so the YAML stays parseable.
///
/// Models tend to emit `url: [#DMAPPER]` verbatim, which YAML reads as a
/// flow sequence.
pub fn quote_placeholder_urls(steps: &str) -> String {
    steps.replace("url: [#DMAPPER]", "url: \"[#DMAPPER]\"")
}

/// Hoist assignments out of a model-emitted `prepare` step.
///
/// Returns the step sequence without the `prepare` block plus the assignment
/// lines destined for the template's prepare slot.  When the model emitted no
/// `prepare` step, the input passes through untouched.
pub fn hoist_prepare_assignments(
    steps: &str,
    service_input: Option<&str>,
) -> Result<(String, String), GeneratorError> {
    let mut parsed: Value = serde_yaml::from_str(steps)
        .map_err(|e| GeneratorError::MalformedOutput(e.to_string()))?;

    let Some(root) = parsed.as_object_mut() else {
        return Ok((steps.to_string(), String::new()));
    };

    let Some(prepare) = root.remove("prepare") else {
        return Ok((steps.to_string(), String::new()));
    };

    let mut assignments = String::new();
    if service_input.is_some() {
        assignments.push_str("    serviceInput: ${incoming.params.serviceInput}\n");
    }
    if let Some(assign) = prepare.get("assign").and_then(Value::as_object) {
        for (key, value) in assign {
            if RESERVED_ASSIGN_KEYS.contains(&key.as_str()) {
                continue;
            }
            assignments.push_str(&format!("    {}: {}\n", key, scalar_to_string(value)));
        }
    }

    let remaining = serde_yaml::to_string(&parsed)
        .map_err(|e| GeneratorError::SerializationError(e.to_string()))?;
    Ok((remaining, assignments))
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => serde_json::to_string(other).unwrap_or_default(),
    }
}

/// Substitute the request and processed steps into the base document
/// template.
pub fn render_template(
    template: &str,
    request: &GenerationRequest,
    prepare_assignments: &str,
    steps: &str,
) -> String {
    template
        .replace(SERVICE_NAME, &request.service_name)
        .replace(SERVICE_DESCRIPTION, &request.description)
        .replace(HTTP_METHOD, &request.http_method)
        .replace(
            ADDITIONAL_PARAMS,
            request.additional_params.as_deref().unwrap_or(""),
        )
        .replace(PREPARE_ASSIGNMENTS, prepare_assignments)
        .replace(WORKFLOW_STEPS, steps)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> GenerationRequest {
        GenerationRequest {
            service_name: "order_lookup".into(),
            description: "Fetch an order".into(),
            http_method: "GET".into(),
            additional_params: None,
            service_input: Some("orderId".into()),
        }
    }

    #[test]
    fn test_strip_markdown_fences() {
        let raw = "```yaml\nfetch:\n  call: http.get\n```";
        assert_eq!(strip_markdown_fences(raw), "fetch:\n  call: http.get");
    }

    #[test]
    fn test_strip_bare_fences() {
        assert_eq!(strip_markdown_fences("```\na: b\n```"), "a: b");
    }

    #[test]
    fn test_strip_leaves_unfenced_text() {
        assert_eq!(strip_markdown_fences("a: b\n"), "a: b");
    }

    #[test]
    fn test_quote_placeholder_urls() {
        let steps = "fetch:\n  call: http.get\n  args:\n    url: [#DMAPPER]\n";
        let quoted = quote_placeholder_urls(steps);
        assert!(quoted.contains("url: \"[#DMAPPER]\""));
        assert!(serde_yaml::from_str::<serde_json::Value>(&quoted).is_ok());
    }

    #[test]
    fn test_hoist_prepare_assignments() {
        let steps = r#"
prepare:
  assign:
    orderId: ${incoming.params.orderId}
    url: https://should-be-dropped
fetch:
  call: http.get
  args:
    url: "https://x"
"#;
        let (remaining, assignments) =
            hoist_prepare_assignments(steps, Some("orderId")).unwrap();
        assert!(assignments.contains("serviceInput: ${incoming.params.serviceInput}"));
        assert!(assignments.contains("orderId: ${incoming.params.orderId}"));
        assert!(!assignments.contains("should-be-dropped"));
        assert!(!remaining.contains("prepare"));
        assert!(remaining.contains("fetch"));
    }

    #[test]
    fn test_hoist_without_prepare_passes_through() {
        let steps = "fetch:\n  call: http.get\n";
        let (remaining, assignments) = hoist_prepare_assignments(steps, None).unwrap();
        assert_eq!(remaining, steps);
        assert!(assignments.is_empty());
    }

    #[test]
    fn test_hoist_rejects_unparseable_steps() {
        let err = hoist_prepare_assignments("fetch: { unclosed", None).unwrap_err();
        assert!(matches!(err, GeneratorError::MalformedOutput(_)));
    }

    #[test]
    fn test_render_template() {
        let template = "\
declaration:
  call: declare
  name: {{SERVICE_NAME}}
  description: {{SERVICE_DESCRIPTION}}
  httpMethod: {{HTTP_METHOD}}
prepare:
  assign:
{{LLM_GENERATED_PREPARE_ASSIGNMENTS}}
{{WORKFLOW_STEPS}}
";
        let rendered = render_template(
            template,
            &request(),
            "    serviceInput: ${incoming.params.serviceInput}\n",
            "done:\n  return: ok\n",
        );
        assert!(rendered.contains("name: order_lookup"));
        assert!(rendered.contains("httpMethod: GET"));
        assert!(rendered.contains("serviceInput: ${incoming.params.serviceInput}"));
        assert!(rendered.contains("done:\n  return: ok"));
        assert!(!rendered.contains("{{"));
    }
}
