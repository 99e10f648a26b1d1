//! Error types for the DSL pipeline.
//!
//! - [`DocumentError`] — Fatal errors while mapping raw input into the
//!   document model.
//! - [`crate::generator::error::GeneratorError`] — Errors from the generation
//!   collaborator.

pub mod document_error;

pub use document_error::DocumentError;

/// Convenience alias for parser/builder results.
pub type DocumentResult<T> = Result<T, DocumentError>;
