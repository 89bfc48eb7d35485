//! Speech settings handed to the narration engine with every utterance

use serde::{Deserialize, Serialize};

/// Lowest and highest speech rate an engine is asked for
pub const RATE_RANGE: (f32, f32) = (0.1, 10.0);

/// Lowest and highest pitch an engine is asked for
pub const PITCH_RANGE: (f32, f32) = (0.0, 2.0);

/// Speech rate, pitch and language for a lesson
///
/// These are fixed per lesson and never influence sequencing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceSettings {
    /// Speaking rate multiplier (1.0 = engine default)
    pub rate: f32,
    /// Pitch multiplier (1.0 = engine default)
    pub pitch: f32,
    /// BCP 47 language tag
    pub lang: String,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            rate: 0.95,
            pitch: 1.0,
            lang: "en-US".to_string(),
        }
    }
}

impl VoiceSettings {
    pub fn new(rate: f32, pitch: f32, lang: impl Into<String>) -> Self {
        Self {
            rate,
            pitch,
            lang: lang.into(),
        }
        .clamped()
    }

    /// Set the rate, clamped to [`RATE_RANGE`]
    pub fn with_rate(mut self, rate: f32) -> Self {
        self.rate = rate;
        self.clamped()
    }

    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    /// Bring rate and pitch back into their supported ranges
    ///
    /// NaN falls back to the default value.
    pub fn clamped(mut self) -> Self {
        let defaults = Self::default();
        self.rate = if self.rate.is_nan() {
            defaults.rate
        } else {
            self.rate.clamp(RATE_RANGE.0, RATE_RANGE.1)
        };
        self.pitch = if self.pitch.is_nan() {
            defaults.pitch
        } else {
            self.pitch.clamp(PITCH_RANGE.0, PITCH_RANGE.1)
        };
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_lessons() {
        let voice = VoiceSettings::default();
        assert_eq!(voice.rate, 0.95);
        assert_eq!(voice.pitch, 1.0);
        assert_eq!(voice.lang, "en-US");
    }

    #[test]
    fn test_clamping() {
        let voice = VoiceSettings::new(50.0, -1.0, "de-DE");
        assert_eq!(voice.rate, 10.0);
        assert_eq!(voice.pitch, 0.0);
        assert_eq!(voice.with_rate(f32::NAN).rate, 0.95);
    }

    #[test]
    fn test_partial_deserialize_uses_defaults() {
        let voice: VoiceSettings = toml::from_str("lang = \"fr-FR\"").unwrap();
        assert_eq!(voice.lang, "fr-FR");
        assert_eq!(voice.rate, 0.95);
    }
}
