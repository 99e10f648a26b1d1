//! Fatal document-level errors.
//!
//! These are the only hard failures in the validation core: a document that
//! cannot be mapped into a [`Service`](crate::dsl::model::Service) at all.
//! Rule violations are never errors; they are collected as data by the
//! evaluator.

use thiserror::Error;

/// Errors raised while parsing raw text or building the document model.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("DSL parse error: {0}")]
    ParseError(String),
    #[error("Top-level document must be a mapping")]
    NotAMapping,
    #[error("Invalid 'declaration' block: {0}")]
    InvalidDeclaration(String),
}
