//! Content resolution error types.

use thiserror::Error;

/// Errors raised while resolving CMS content into renderable output.
///
/// Missing or partial content is never an error; builders fall back to
/// defaults instead. The only fatal case is a block type with no serializer.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("no serializer implemented for body object: {type_name}")]
    UnmappedContentType { type_name: String },

    #[error("invalid content document: {0}")]
    InvalidDocument(#[from] serde_json::Error),
}

impl ContentError {
    /// The offending type tag, for unmapped content errors.
    pub fn type_name(&self) -> Option<&str> {
        match self {
            ContentError::UnmappedContentType { type_name } => Some(type_name),
            ContentError::InvalidDocument(_) => None,
        }
    }
}

/// Result type alias using ContentError.
pub type ContentResult<T> = Result<T, ContentError>;
