//! Error types for core operations.

use crate::objects::ObjectId;
use thiserror::Error;

/// Errors reported by the mutation surface.
///
/// All variants are recoverable: a failed call leaves the document, the
/// history, and the selection unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    #[error("object not found: {0}")]
    NotFound(ObjectId),
    #[error("duplicate object id: {0}")]
    DuplicateId(ObjectId),
    #[error("invalid state: {0}")]
    InvalidState(String),
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
