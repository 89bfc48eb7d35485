//! Error types for the player

use std::path::PathBuf;

use lucid_core::CatalogError;
use lucid_lessons::LessonError;
use lucid_sequencer::SequencerError;
use thiserror::Error;

/// Problems with the player configuration file or flags
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {reason}")]
    Io { path: PathBuf, reason: String },

    #[error("Invalid config: {0}")]
    Parse(String),

    #[error("Playback speed must be between 0.05 and 50, got {0}")]
    InvalidSpeed(f64),

    #[error("Words per minute must be a positive number, got {0}")]
    InvalidPace(f64),
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e.to_string())
    }
}

/// Errors that can stop playback
#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Lesson error: {0}")]
    Lesson(#[from] LessonError),

    #[error("Sequencer error: {0}")]
    Sequencer(#[from] SequencerError),

    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}

pub type PlayerResult<T> = Result<T, PlayerError>;
