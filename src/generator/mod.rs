//! Generation collaborator: drafts a workflow document from a
//! natural-language request, then hands it to the validation core.
//!
//! The core treats the generator as an external collaborator invoked exactly
//! once per request; everything after the draft is deterministic assembly
//! plus structural validation.

use async_trait::async_trait;

pub mod error;
pub mod openai;
pub mod scaffold;
pub mod types;

pub use error::GeneratorError;
pub use openai::{OpenAiConfig, OpenAiGenerator};
pub use types::{GeneratedService, GenerationRequest};

use crate::dsl::parser::DslFormat;
use crate::validation::validate_dsl;

/// A backend that drafts workflow steps as raw DSL text.
#[async_trait]
pub trait DslGenerator: Send + Sync {
    /// Stable backend identifier.
    fn id(&self) -> &str;

    /// Draft the step sequence for one request.
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GeneratorError>;
}

/// Run the full generation pipeline: draft, post-process, assemble into the
/// base template, validate.
///
/// The returned report is the authoritative structural verdict; a document
/// that does not even parse is a [`GeneratorError::MalformedOutput`].
pub async fn generate_service(
    generator: &dyn DslGenerator,
    request: &GenerationRequest,
    template: &str,
) -> Result<GeneratedService, GeneratorError> {
    tracing::debug!(backend = generator.id(), service = %request.service_name, "drafting workflow steps");
    let raw = generator.generate(request).await?;

    let steps = scaffold::strip_markdown_fences(&raw);
    let steps = scaffold::quote_placeholder_urls(&steps);
    let (steps, assignments) =
        scaffold::hoist_prepare_assignments(&steps, request.service_input.as_deref())?;

    let text = scaffold::render_template(template, request, &assignments, &steps);

    let report = validate_dsl(&text, DslFormat::Yaml)
        .map_err(|e| GeneratorError::MalformedOutput(e.to_string()))?;
    tracing::info!(
        service = %request.service_name,
        valid = report.valid,
        violations = report.violations.len(),
        "generated document validated"
    );

    Ok(GeneratedService { text, report })
}
