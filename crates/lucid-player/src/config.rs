//! Command line and configuration file for the `lucid` binary

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use lucid_core::VoiceSettings;
use lucid_logging::LogConfig;
use lucid_sequencer::DEFAULT_WORDS_PER_MINUTE;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Parser)]
#[command(name = "lucid", about = "Play Lucid explainers in the terminal")]
pub struct Cli {
    /// Player configuration file (TOML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Also write JSONL logs to rotated files in this directory
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the built-in lessons and the gallery
    List,
    /// Play a lesson until it finishes or Ctrl-C is pressed
    Play {
        /// Lesson slug or gallery title; unknown titles get a generated explainer
        #[arg(required_unless_present = "catalog")]
        lesson: Option<String>,
        /// Play a catalog file (JSON or TOML) instead of a built-in lesson
        #[arg(long, conflicts_with = "lesson")]
        catalog: Option<PathBuf>,
        /// Pretend the host has no speech engine
        #[arg(long)]
        no_narration: bool,
        /// Playback speed multiplier for durations and speech
        #[arg(long)]
        speed: Option<f64>,
    },
    /// Check that a catalog file is well formed
    Validate {
        /// Catalog file (JSON or TOML)
        path: PathBuf,
    },
}

/// Settings for the `lucid` binary
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub narration: NarrationConfig,
    pub playback: PlaybackConfig,
    pub logging: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NarrationConfig {
    /// Use the simulated speech engine; when false scenes are timed only
    pub enabled: bool,
    /// Speaking pace of the simulated engine at rate 1.0
    pub words_per_minute: f64,
    /// Replaces the voice of every lesson when set
    pub voice: Option<VoiceSettings>,
}

impl Default for NarrationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            words_per_minute: DEFAULT_WORDS_PER_MINUTE,
            voice: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Divides scene durations and multiplies speech pace
    pub speed: f64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self { speed: 1.0 }
    }
}

/// Playback speeds outside this range are rejected
pub const SPEED_RANGE: (f64, f64) = (0.05, 50.0);

/// Command line flags that take precedence over the config file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerOverrides {
    pub no_narration: bool,
    pub speed: Option<f64>,
    pub log_level: Option<String>,
    pub log_dir: Option<PathBuf>,
}

impl PlayerOverrides {
    /// Collect the overrides given on the command line
    pub fn from_cli(cli: &Cli) -> Self {
        let (no_narration, speed) = match &cli.command {
            Command::Play {
                no_narration,
                speed,
                ..
            } => (*no_narration, *speed),
            _ => (false, None),
        };
        Self {
            no_narration,
            speed,
            log_level: cli.log_level.clone(),
            log_dir: cli.log_dir.clone(),
        }
    }
}

impl PlayerConfig {
    /// Parse a config from TOML text
    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        let config: PlayerConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Read `path`, or use defaults when no path is given or the file is absent
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file absent, using defaults");
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_toml(&contents)
    }

    /// Apply command line flags on top of the file
    pub fn with_overrides(mut self, overrides: PlayerOverrides) -> Result<Self, ConfigError> {
        if overrides.no_narration {
            self.narration.enabled = false;
        }
        if let Some(speed) = overrides.speed {
            self.playback.speed = speed;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if let Some(dir) = overrides.log_dir {
            self.logging = self.logging.with_file_dir(dir);
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let speed = self.playback.speed;
        let (min_speed, max_speed) = SPEED_RANGE;
        if !(min_speed..=max_speed).contains(&speed) {
            return Err(ConfigError::InvalidSpeed(speed));
        }
        let pace = self.narration.words_per_minute;
        if !pace.is_finite() || pace <= 0.0 {
            return Err(ConfigError::InvalidPace(pace));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use lucid_logging::ConsoleFormat;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = PlayerConfig::default();
        assert!(config.narration.enabled);
        assert_eq!(config.narration.words_per_minute, DEFAULT_WORDS_PER_MINUTE);
        assert_eq!(config.playback.speed, 1.0);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_partial_file() {
        let config = PlayerConfig::from_toml(
            r#"
            [narration]
            enabled = false

            [narration.voice]
            rate = 1.2

            [logging]
            level = "debug"
            console = "off"
            "#,
        )
        .unwrap();
        assert!(!config.narration.enabled);
        let voice = config.narration.voice.unwrap();
        assert_eq!(voice.rate, 1.2);
        assert_eq!(voice.lang, "en-US");
        assert_eq!(config.playback.speed, 1.0);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.console, ConsoleFormat::Off);
    }

    #[test]
    fn test_invalid_speed_rejected() {
        let err = PlayerConfig::from_toml("[playback]\nspeed = 0.0").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSpeed(_)));

        for speed in [-2.0, 1e-20, 1e20, f64::NAN] {
            let err = PlayerConfig::default()
                .with_overrides(PlayerOverrides {
                    speed: Some(speed),
                    ..PlayerOverrides::default()
                })
                .unwrap_err();
            assert!(matches!(err, ConfigError::InvalidSpeed(_)), "{speed}");
        }

        let slowest = PlayerConfig::default()
            .with_overrides(PlayerOverrides {
                speed: Some(SPEED_RANGE.0),
                ..PlayerOverrides::default()
            })
            .unwrap();
        assert_eq!(slowest.playback.speed, SPEED_RANGE.0);
    }

    #[test]
    fn test_overrides() {
        let config = PlayerConfig::default()
            .with_overrides(PlayerOverrides {
                no_narration: true,
                speed: Some(4.0),
                log_level: Some("trace".into()),
                log_dir: Some(PathBuf::from("/tmp/lucid-logs")),
            })
            .unwrap();
        assert!(!config.narration.enabled);
        assert_eq!(config.playback.speed, 4.0);
        assert_eq!(config.logging.level, "trace");
        let file = config.logging.file.unwrap();
        assert_eq!(file.directory, PathBuf::from("/tmp/lucid-logs"));
    }

    #[test]
    fn test_missing_file_means_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let config = PlayerConfig::load_or_default(Some(path.as_path())).unwrap();
        assert_eq!(config, PlayerConfig::default());
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lucid.toml");
        std::fs::write(&path, "[playback]\nspeed = 2.5\n").unwrap();
        let config = PlayerConfig::load_or_default(Some(path.as_path())).unwrap();
        assert_eq!(config.playback.speed, 2.5);
    }

    #[test]
    fn test_cli_parses_play() {
        let cli = Cli::try_parse_from(["lucid", "play", "fall-of-rome", "--speed", "8"]).unwrap();
        match cli.command {
            Command::Play { lesson, speed, catalog, no_narration } => {
                assert_eq!(lesson.as_deref(), Some("fall-of-rome"));
                assert_eq!(speed, Some(8.0));
                assert!(catalog.is_none());
                assert!(!no_narration);
            }
            _ => panic!("expected play"),
        }
    }

    #[test]
    fn test_cli_collects_overrides() {
        let cli = Cli::try_parse_from([
            "lucid",
            "play",
            "biogas",
            "--no-narration",
            "--log-dir",
            "logs",
        ])
        .unwrap();
        let overrides = PlayerOverrides::from_cli(&cli);
        assert!(overrides.no_narration);
        assert_eq!(overrides.speed, None);
        assert_eq!(overrides.log_dir, Some(PathBuf::from("logs")));

        let cli = Cli::try_parse_from(["lucid", "--log-level", "debug", "list"]).unwrap();
        let overrides = PlayerOverrides::from_cli(&cli);
        assert_eq!(overrides.log_level.as_deref(), Some("debug"));
        assert!(!overrides.no_narration);
    }

    #[test]
    fn test_cli_requires_lesson_or_catalog() {
        assert!(Cli::try_parse_from(["lucid", "play"]).is_err());
        assert!(Cli::try_parse_from(["lucid", "play", "--catalog", "scenes.json"]).is_ok());
    }
}
