//! Error types for logging setup

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Failed to open log file in {path}: {reason}")]
    LogFile { path: PathBuf, reason: String },

    #[error("A global tracing subscriber is already installed: {0}")]
    AlreadyInitialized(String),
}

pub type LoggingResult<T> = Result<T, LoggingError>;
