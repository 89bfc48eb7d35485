//! Error types for the lesson library

use lucid_core::CatalogError;
use thiserror::Error;

/// Errors raised while assembling or querying the library
#[derive(Debug, Error)]
pub enum LessonError {
    #[error("Lesson '{slug}' has an invalid catalog: {source}")]
    InvalidCatalog {
        slug: String,
        #[source]
        source: CatalogError,
    },

    #[error("Duplicate lesson slug: {0}")]
    DuplicateSlug(String),

    #[error("Lesson not found: {0}")]
    NotFound(String),
}

/// Result type alias for lesson operations
pub type LessonResult<T> = Result<T, LessonError>;
