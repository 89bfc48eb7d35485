//! Terminal player for Lucid explainers
//!
//! Library half of the `lucid` binary: configuration, the text renderer and
//! the playback loop that watches a [`lucid_sequencer::SceneSequencer`].

pub mod config;
pub mod error;
pub mod playback;
pub mod render;

pub use config::{
    Cli, Command, NarrationConfig, PlaybackConfig, PlayerConfig, PlayerOverrides, SPEED_RANGE,
};
pub use error::{ConfigError, PlayerError, PlayerResult};
pub use playback::{PlaybackOutcome, Player, ScriptSource, build_script, narration_engine};
pub use render::{TerminalRenderer, lesson_table};
