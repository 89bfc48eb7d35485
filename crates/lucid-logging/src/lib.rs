//! Structured logging for Lucid explainers
//!
//! Every crate in the workspace logs through `tracing` with structured fields
//! (`lesson`, `scene_id`, `visit`). This crate installs the subscriber that
//! turns those events into output: pretty or JSONL lines on stderr, plus
//! optional JSONL files rotated by tracing-appender.
//!
//! ```ignore
//! use lucid_logging::{LogConfig, LucidSubscriberBuilder};
//!
//! let _guard = LucidSubscriberBuilder::new()
//!     .with_config(LogConfig::default().with_file_dir("./logs"))
//!     .try_init()?;
//! ```
//!
//! Keep the returned guard alive for as long as file output should be
//! flushed.

pub mod config;
pub mod error;

pub use config::{ConsoleFormat, FileConfig, LogConfig, RotationStrategy};
pub use error::{LoggingError, LoggingResult};

use std::fs::{self, File};

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Builder for configuring and initializing the Lucid logging subscriber
pub struct LucidSubscriberBuilder {
    config: LogConfig,
}

impl LucidSubscriberBuilder {
    /// Create a new subscriber builder with default configuration
    pub fn new() -> Self {
        Self {
            config: LogConfig::default(),
        }
    }

    /// Use a specific configuration
    pub fn with_config(mut self, config: LogConfig) -> Self {
        self.config = config;
        self
    }

    /// Install the subscriber globally
    ///
    /// Returns the file writer guard when file output is configured. Fails if
    /// the log file cannot be opened or a global subscriber is already set.
    pub fn try_init(self) -> LoggingResult<Option<WorkerGuard>> {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.config.level));

        let pretty_console = (self.config.console == ConsoleFormat::Pretty).then(|| {
            fmt::layer()
                .with_ansi(self.config.ansi)
                .with_target(true)
                .with_writer(std::io::stderr)
        });

        let jsonl_console = (self.config.console == ConsoleFormat::Json).then(|| {
            fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .flatten_event(true)
                .with_file(true)
                .with_line_number(true)
                .with_writer(std::io::stderr)
        });

        let (file_layer, guard) = match &self.config.file {
            Some(file_config) => {
                let (writer, guard) = file_writer(file_config)?;
                let layer = fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true)
                    .flatten_event(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_writer(writer);
                (Some(layer), Some(guard))
            }
            None => (None, None),
        };

        Registry::default()
            .with(env_filter)
            .with(pretty_console)
            .with(jsonl_console)
            .with(file_layer)
            .try_init()
            .map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))?;

        Ok(guard)
    }
}

impl Default for LucidSubscriberBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Non-blocking writer for the configured log file
///
/// `Never` rotation truncates a single `<prefix>.log`; the other strategies
/// append to rolling files and prune beyond `max_files`.
fn file_writer(config: &FileConfig) -> LoggingResult<(NonBlocking, WorkerGuard)> {
    let log_file_error = |reason: String| LoggingError::LogFile {
        path: config.directory.clone(),
        reason,
    };

    let rotation = match config.rotation {
        RotationStrategy::Never => {
            fs::create_dir_all(&config.directory).map_err(|e| log_file_error(e.to_string()))?;
            let path = config.directory.join(format!("{}.log", config.prefix));
            let file = File::create(&path).map_err(|e| log_file_error(e.to_string()))?;
            return Ok(tracing_appender::non_blocking(file));
        }
        RotationStrategy::Daily => Rotation::DAILY,
        RotationStrategy::Hourly => Rotation::HOURLY,
    };

    let mut builder = RollingFileAppender::builder()
        .rotation(rotation)
        .filename_prefix(config.prefix.clone())
        .filename_suffix("log");
    if let Some(max_files) = config.max_files {
        builder = builder.max_log_files(max_files);
    }
    let appender = builder
        .build(&config.directory)
        .map_err(|e| log_file_error(e.to_string()))?;
    Ok(tracing_appender::non_blocking(appender))
}

/// Initialize logging for testing (minimal output)
///
/// Safe to call from every test; only the first call installs a subscriber.
pub fn init_testing() {
    let _ = LucidSubscriberBuilder::new().try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_reported() {
        init_testing();
        let err = LucidSubscriberBuilder::new().try_init().unwrap_err();
        assert!(matches!(err, LoggingError::AlreadyInitialized(_)));
    }

    #[test]
    fn test_unwritable_directory_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();
        let config = FileConfig {
            directory: blocker.join("logs"),
            rotation: RotationStrategy::Never,
            ..FileConfig::default()
        };
        let err = file_writer(&config).unwrap_err();
        assert!(matches!(err, LoggingError::LogFile { .. }));
    }

    #[test]
    fn test_single_file_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let config = FileConfig {
            directory: dir.path().join("nested"),
            prefix: "player".to_string(),
            rotation: RotationStrategy::Never,
            max_files: None,
        };
        let (_writer, _guard) = file_writer(&config).unwrap();
        assert!(dir.path().join("nested").join("player.log").exists());
    }

    #[test]
    fn test_rolling_file_directory_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let config = FileConfig {
            directory: dir.path().join("rolling"),
            ..FileConfig::default()
        };
        let (_writer, _guard) = file_writer(&config).unwrap();
        assert!(dir.path().join("rolling").is_dir());
    }

    #[test]
    fn test_init_testing_is_repeatable() {
        init_testing();
        init_testing();
    }
}
