//! Request/response types for the generation collaborator.

use serde::{Deserialize, Serialize};

use crate::validation::ValidationReport;

/// A natural-language service description driving one generation run.
///
/// Field names mirror the JSON input convention of the generation service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub service_name: String,
    pub description: String,
    /// Requested HTTP method, `GET` or `POST`.
    pub http_method: String,
    #[serde(default)]
    pub additional_params: Option<String>,
    #[serde(default)]
    pub service_input: Option<String>,
}

/// Output of one generation run: the assembled document plus the structural
/// verdict on it.
#[derive(Debug, Clone)]
pub struct GeneratedService {
    /// Final DSL text, ready for downstream execution when valid.
    pub text: String,
    /// Structural verdict from the validation core.
    pub report: ValidationReport,
}
