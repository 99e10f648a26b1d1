//! # agentflow — generator and structural validator for agent-service workflows
//!
//! `agentflow` works with a YAML-based workflow DSL describing a sequence of
//! named steps (HTTP calls, a terminating return, and free-form steps).  The
//! crate has two halves:
//!
//! - **Validation core**: maps a parsed document into a typed model
//!   ([`Service`] with a closed [`StepKind`] union) and evaluates a fixed
//!   catalog of structural constraints against it under closed-world
//!   semantics, producing a total pass/fail verdict plus an itemized
//!   violation list.  No I/O, no shared state, deterministic output.
//! - **Generation collaborator**: an LLM backend behind the
//!   [`DslGenerator`](generator::DslGenerator) trait drafts the step
//!   sequence; deterministic scaffolding assembles the final document and
//!   feeds it straight back into the validation core.
//!
//! # Quick start
//!
//! ```rust
//! use agentflow::{validate_dsl, DslFormat};
//!
//! let yaml = r#"
//! declaration:
//!   call: declare
//!   name: order_lookup
//!   httpMethod: GET
//! fetch:
//!   call: http.get
//!   args:
//!     url: "https://example.com/orders"
//! done:
//!   return: "${fetch.body}"
//! "#;
//!
//! let report = validate_dsl(yaml, DslFormat::Yaml).unwrap();
//! assert!(report.valid);
//! ```
//!
//! A rule-breaking document is still a successful validation run; the
//! verdict and diagnostics come back as data:
//!
//! ```rust
//! use agentflow::{validate_dsl, DslFormat};
//!
//! let report = validate_dsl("fetch:\n  call: http.get\n  args: {}\n", DslFormat::Yaml).unwrap();
//! assert!(!report.valid);
//! assert_eq!(
//!     report.messages(),
//!     vec!["No 'return' step found", "Step 'fetch' missing or empty url"],
//! );
//! ```

pub mod dsl;
pub mod error;
pub mod generator;
pub mod validation;

pub use dsl::{build_service, parse_document, DslFormat, HttpMethod, Service, Step, StepKind};
pub use error::{DocumentError, DocumentResult};
pub use generator::{
    generate_service, DslGenerator, GeneratedService, GenerationRequest, GeneratorError,
    OpenAiConfig, OpenAiGenerator,
};
pub use validation::{
    evaluate, registry, validate_dsl, validate_service, validate_tree, Rule, RuleKind,
    ValidationReport, Violation,
};
