//! Error types for the sequencer

use lucid_core::CatalogError;
use thiserror::Error;

/// Errors that can occur while driving a sequencer
#[derive(Debug, Error)]
pub enum SequencerError {
    /// The scenes handed to `activate` do not form a valid catalog
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(#[from] CatalogError),

    /// The sequencer task has shut down
    #[error("Sequencer stopped")]
    Stopped,
}

impl<T> From<tokio::sync::mpsc::error::SendError<T>> for SequencerError {
    fn from(_: tokio::sync::mpsc::error::SendError<T>) -> Self {
        SequencerError::Stopped
    }
}

impl From<tokio::sync::oneshot::error::RecvError> for SequencerError {
    fn from(_: tokio::sync::oneshot::error::RecvError) -> Self {
        SequencerError::Stopped
    }
}

/// Result type alias for sequencer operations
pub type SequencerResult<T> = Result<T, SequencerError>;
