//! DSL parser: converts raw YAML/JSON text into a generic document tree.
//!
//! The tree is a plain [`serde_json::Value`]; mapping it into the typed
//! [`Service`](super::model::Service) model is the builder's job.

use serde_json::Value;

use crate::error::DocumentError;

/// Supported DSL input formats.
#[derive(Debug, Clone, Copy)]
pub enum DslFormat {
    /// YAML format (`.yaml` / `.yml`).
    Yaml,
    /// JSON format (`.json`).
    Json,
}

/// Parse DSL content into a generic document tree.
pub fn parse_document(content: &str, format: DslFormat) -> Result<Value, DocumentError> {
    match format {
        DslFormat::Yaml => serde_yaml::from_str(content)
            .map_err(|e| DocumentError::ParseError(e.to_string())),
        DslFormat::Json => serde_json::from_str(content)
            .map_err(|e| DocumentError::ParseError(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
declaration:
  call: declare
  name: order_lookup
  httpMethod: GET
fetch:
  call: http.get
  args:
    url: "https://example.com/orders"
"#;
        let tree = parse_document(yaml, DslFormat::Yaml).unwrap();
        assert!(tree.is_object());
        assert_eq!(tree["declaration"]["httpMethod"], "GET");
        assert_eq!(tree["fetch"]["call"], "http.get");
    }

    #[test]
    fn test_parse_json() {
        let json = r#"{"done":{"return":"${result}"}}"#;
        let tree = parse_document(json, DslFormat::Json).unwrap();
        assert!(tree["done"]["return"].is_string());
    }

    #[test]
    fn test_parse_yaml_invalid() {
        let bad = "fetch:\n  args: { unclosed";
        assert!(parse_document(bad, DslFormat::Yaml).is_err());
    }

    #[test]
    fn test_parse_json_invalid() {
        assert!(parse_document("{{{invalid", DslFormat::Json).is_err());
    }

    #[test]
    fn test_parse_error_message() {
        let err = parse_document("{{{", DslFormat::Json).unwrap_err();
        assert!(err.to_string().starts_with("DSL parse error:"));
    }
}
