//! Error types for Lucid core

use thiserror::Error;

/// Errors raised while building or loading a scene catalog
///
/// These are authoring errors: a lesson with a bad catalog must never start
/// playing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Scene catalog is empty")]
    Empty,

    #[error("Scene ids must be contiguous from 1: expected {expected} at position {position}, found {found}")]
    NonContiguous {
        position: usize,
        expected: u32,
        found: u32,
    },

    #[error("Unsupported catalog format: {0}")]
    UnsupportedFormat(String),

    #[error("Catalog parse error: {0}")]
    Parse(String),

    #[error("Catalog I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for CatalogError {
    fn from(e: std::io::Error) -> Self {
        CatalogError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::Parse(e.to_string())
    }
}

impl From<toml::de::Error> for CatalogError {
    fn from(e: toml::de::Error) -> Self {
        CatalogError::Parse(e.to_string())
    }
}

/// Why a narration request ended without being spoken to the end
///
/// Every variant is non-fatal for sequencing: a failed utterance counts as a
/// finished one.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NarrationFailure {
    #[error("Narration engine error: {0}")]
    Engine(String),

    #[error("Narration is not supported by this host")]
    Unsupported,

    #[error("Narration permission denied")]
    PermissionDenied,
}

/// Result type alias for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;
