//! Structural validation: build a typed model from a document and evaluate
//! the rule catalog against it.
//!
//! Malformed input surfaces as a hard [`DocumentError`]; a parseable but
//! rule-breaking document always yields a complete [`ValidationReport`].

mod evaluator;
mod rules;
mod types;

use serde_json::Value;

use crate::dsl::builder::build_service;
use crate::dsl::model::Service;
use crate::dsl::parser::{parse_document, DslFormat};
use crate::error::DocumentError;

pub use evaluator::evaluate;
pub use rules::{registry, Rule, RuleKind, StepClass};
pub use types::{ValidationReport, Violation};

/// Validate raw DSL text end to end: parse, build, evaluate, report.
pub fn validate_dsl(content: &str, format: DslFormat) -> Result<ValidationReport, DocumentError> {
    let tree = parse_document(content, format)?;
    validate_tree(&tree)
}

/// Validate an already-parsed document tree.
pub fn validate_tree(tree: &Value) -> Result<ValidationReport, DocumentError> {
    let service = build_service(tree)?;
    Ok(validate_service(&service))
}

/// Validate a built service model.  Infallible: the verdict is total.
pub fn validate_service(service: &Service) -> ValidationReport {
    ValidationReport::from_violations(evaluate(service, registry()))
}
