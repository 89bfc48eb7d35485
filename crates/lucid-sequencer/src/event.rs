//! Events and snapshots published by a running sequencer

use chrono::{DateTime, Utc};
use lucid_core::{NarrationFailure, SceneId};

/// Something that happened while playing a lesson
#[derive(Debug, Clone, PartialEq)]
pub enum SequencerEvent {
    /// A scene became current
    SceneEntered {
        title: String,
        scene_id: SceneId,
        at: DateTime<Utc>,
    },
    /// Narration for a scene failed; the scene still honors its duration
    NarrationFailed {
        scene_id: SceneId,
        failure: NarrationFailure,
        at: DateTime<Utc>,
    },
    /// The final scene finished
    Completed { title: String, at: DateTime<Utc> },
    /// Playback stopped and every timer and utterance was cancelled
    Deactivated { at: DateTime<Utc> },
}

/// What a renderer needs to redraw
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SequencerSnapshot {
    /// Title of the lesson being played, if any
    pub title: Option<String>,
    pub scene_id: SceneId,
    pub is_playing: bool,
}

impl SequencerSnapshot {
    pub fn idle() -> Self {
        Self::default()
    }
}
