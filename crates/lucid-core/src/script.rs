//! A playable lesson: title, catalog and voice bundled together

use std::sync::Arc;

use crate::scene::SceneCatalog;
use crate::voice::VoiceSettings;

/// Everything a sequencer needs to play one lesson
///
/// The catalog sits behind an `Arc` so a script can be cloned freely while
/// the scene data stays shared and immutable.
#[derive(Debug, Clone, PartialEq)]
pub struct Script {
    pub title: String,
    pub catalog: Arc<SceneCatalog>,
    pub voice: VoiceSettings,
}

impl Script {
    pub fn new(title: impl Into<String>, catalog: SceneCatalog) -> Self {
        Self {
            title: title.into(),
            catalog: Arc::new(catalog),
            voice: VoiceSettings::default(),
        }
    }

    pub fn with_voice(mut self, voice: VoiceSettings) -> Self {
        self.voice = voice;
        self
    }
}
