//! Logging settings as they appear in the player's `[logging]` table

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where log events go and how much of them
///
/// The default keeps console output quiet and human-readable so it does not
/// bury the rendered lesson; `RUST_LOG` still wins over `level`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub level: String,
    /// Format of the stderr output
    pub console: ConsoleFormat,
    /// Colour the pretty console output
    pub ansi: bool,
    /// JSONL files, in addition to the console
    pub file: Option<FileConfig>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            console: ConsoleFormat::Pretty,
            ansi: false,
            file: None,
        }
    }
}

impl LogConfig {
    /// Write JSONL files under `directory`, keeping any other file settings
    pub fn with_file_dir(mut self, directory: impl Into<PathBuf>) -> Self {
        let directory = directory.into();
        match &mut self.file {
            Some(file) => file.directory = directory,
            None => {
                self.file = Some(FileConfig {
                    directory,
                    ..FileConfig::default()
                })
            }
        }
        self
    }
}

/// Console output format; console logs always go to stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleFormat {
    /// Human-readable lines
    #[default]
    Pretty,
    /// One JSON object per line
    Json,
    /// No console output
    Off,
}

/// File output configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Directory for log files
    pub directory: PathBuf,
    /// File name prefix
    pub prefix: String,
    /// Rotation strategy
    pub rotation: RotationStrategy,
    /// Maximum files to retain
    pub max_files: Option<usize>,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("./logs"),
            prefix: "lucid".to_string(),
            rotation: RotationStrategy::Daily,
            max_files: Some(7),
        }
    }
}

/// File rotation strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RotationStrategy {
    /// Rotate daily
    #[default]
    Daily,
    /// Rotate hourly
    Hourly,
    /// Never rotate (single file, truncated on start)
    Never,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_keeps_console_quiet() {
        let config = LogConfig::default();
        assert_eq!(config.level, "warn");
        assert_eq!(config.console, ConsoleFormat::Pretty);
        assert!(!config.ansi);
        assert!(config.file.is_none());
    }

    #[test]
    fn test_file_dir_enables_file_output() {
        let config = LogConfig::default().with_file_dir("/tmp/lucid-logs");
        let file = config.file.unwrap();
        assert_eq!(file.directory, PathBuf::from("/tmp/lucid-logs"));
        assert_eq!(file.prefix, "lucid");
        assert_eq!(file.max_files, Some(7));
    }

    #[test]
    fn test_file_dir_keeps_file_settings() {
        let config = LogConfig {
            file: Some(FileConfig {
                rotation: RotationStrategy::Never,
                prefix: "player".to_string(),
                ..FileConfig::default()
            }),
            ..LogConfig::default()
        }
        .with_file_dir("elsewhere");
        let file = config.file.unwrap();
        assert_eq!(file.directory, PathBuf::from("elsewhere"));
        assert_eq!(file.rotation, RotationStrategy::Never);
        assert_eq!(file.prefix, "player");
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: LogConfig = toml::from_str(
            r#"
            level = "lucid_sequencer=debug"
            console = "json"

            [file]
            directory = "/tmp/lucid-logs"
            rotation = "hourly"
            "#,
        )
        .unwrap();
        assert_eq!(config.level, "lucid_sequencer=debug");
        assert_eq!(config.console, ConsoleFormat::Json);
        let file = config.file.unwrap();
        assert_eq!(file.rotation, RotationStrategy::Hourly);
        assert_eq!(file.prefix, "lucid");
    }
}
