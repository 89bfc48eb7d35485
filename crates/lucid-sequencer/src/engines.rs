//! Narration engines usable outside of tests
//!
//! - [`SimulatedNarrationEngine`]: "speaks" in tokio time at a configurable
//!   pace, for terminal playback and demos
//! - [`UnavailableNarrationEngine`]: stands in for a host without speech

use std::sync::Arc;
use std::time::Duration;

use lucid_core::{
    NarrationEngine, NarrationFailure, NarrationHandle, NarrationOutcome, VoiceSettings,
};
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Default speaking pace at rate 1.0
pub const DEFAULT_WORDS_PER_MINUTE: f64 = 160.0;

/// Called with each utterance as it starts
pub type UtteranceSink = Arc<dyn Fn(&str) + Send + Sync>;

/// Narration engine that takes as long as a speaker would, without audio
///
/// An utterance of `w` words lasts `w / (words_per_minute * rate)` minutes.
/// Only one utterance is in flight at a time.
pub struct SimulatedNarrationEngine {
    words_per_minute: f64,
    /// Extra speed-up applied on top of the voice rate
    speed: f64,
    in_flight: Mutex<Option<JoinHandle<()>>>,
    sink: Option<UtteranceSink>,
}

impl SimulatedNarrationEngine {
    pub fn new(words_per_minute: f64) -> Self {
        let words_per_minute = if words_per_minute.is_finite() && words_per_minute > 0.0 {
            words_per_minute
        } else {
            DEFAULT_WORDS_PER_MINUTE
        };
        Self {
            words_per_minute,
            speed: 1.0,
            in_flight: Mutex::new(None),
            sink: None,
        }
    }

    /// Speak `speed` times faster than the voice asks for
    pub fn with_speed(mut self, speed: f64) -> Self {
        if speed.is_finite() && speed > 0.0 {
            self.speed = speed;
        }
        self
    }

    /// Receive each utterance's text as it starts
    pub fn with_sink(mut self, sink: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.sink = Some(Arc::new(sink));
        self
    }

    /// How long `text` takes to say with `voice`
    ///
    /// Saturates at `Duration::MAX` for paces too slow to represent.
    pub fn speaking_time(&self, text: &str, voice: &VoiceSettings) -> Duration {
        let words = text.split_whitespace().count() as f64;
        let rate = f64::from(voice.rate).max(f64::EPSILON);
        let pace = self.words_per_minute * rate * self.speed;
        Duration::try_from_secs_f64(words * 60.0 / pace).unwrap_or(Duration::MAX)
    }

    fn stop_current(&self) -> bool {
        match self.in_flight.lock().take() {
            Some(task) => {
                task.abort();
                true
            }
            None => false,
        }
    }
}

impl Default for SimulatedNarrationEngine {
    fn default() -> Self {
        Self::new(DEFAULT_WORDS_PER_MINUTE)
    }
}

impl NarrationEngine for SimulatedNarrationEngine {
    fn speak(&self, text: &str, voice: &VoiceSettings) -> NarrationHandle {
        self.stop_current();

        let length = self.speaking_time(text, voice);
        debug!(
            length_ms = length.as_millis() as u64,
            lang = %voice.lang,
            "Speaking"
        );
        if let Some(sink) = &self.sink {
            sink(text);
        }

        let (completer, handle) = NarrationHandle::pair();
        let task = tokio::spawn(async move {
            tokio::time::sleep(length).await;
            completer.complete();
        });
        *self.in_flight.lock() = Some(task);
        handle
    }

    fn cancel_all(&self) {
        if self.stop_current() {
            debug!("Narration cancelled");
        }
    }
}

/// Engine for hosts without text-to-speech
///
/// Reports itself unavailable so the sequencer never asks it to speak; if
/// asked anyway, every utterance fails with
/// [`NarrationFailure::Unsupported`].
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableNarrationEngine;

impl NarrationEngine for UnavailableNarrationEngine {
    fn is_available(&self) -> bool {
        false
    }

    fn speak(&self, _text: &str, _voice: &VoiceSettings) -> NarrationHandle {
        info!("Narration requested from an unavailable engine");
        NarrationHandle::resolved(NarrationOutcome::Failed(NarrationFailure::Unsupported))
    }

    fn cancel_all(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speaking_time_follows_rate() {
        let engine = SimulatedNarrationEngine::new(120.0);
        let voice = VoiceSettings::default().with_rate(1.0);
        // 4 words at 120 wpm = 2 seconds
        assert_eq!(
            engine.speaking_time("one two three four", &voice),
            Duration::from_secs(2)
        );
        let fast = voice.with_rate(2.0);
        assert_eq!(
            engine.speaking_time("one two three four", &fast),
            Duration::from_secs(1)
        );
    }

    #[test]
    fn test_speed_multiplier() {
        let engine = SimulatedNarrationEngine::new(120.0).with_speed(4.0);
        let voice = VoiceSettings::default().with_rate(1.0);
        assert_eq!(
            engine.speaking_time("one two three four", &voice),
            Duration::from_millis(500)
        );
    }

    #[test]
    fn test_invalid_pace_falls_back() {
        let engine = SimulatedNarrationEngine::new(-3.0);
        assert_eq!(engine.words_per_minute, DEFAULT_WORDS_PER_MINUTE);
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_utterance_completes() {
        let engine = SimulatedNarrationEngine::new(120.0);
        let voice = VoiceSettings::default().with_rate(1.0);
        let handle = engine.speak("one two", &voice);
        assert_eq!(handle.outcome().await, Some(NarrationOutcome::Completed));
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_cancel_and_supersede() {
        let engine = SimulatedNarrationEngine::default();
        let voice = VoiceSettings::default();

        let first = engine.speak("a long sentence that takes a while", &voice);
        let second = engine.speak("short", &voice);
        assert_eq!(first.outcome().await, None);

        engine.cancel_all();
        assert_eq!(second.outcome().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_glacial_pace_saturates_instead_of_panicking() {
        let engine = SimulatedNarrationEngine::new(160.0).with_speed(1e-300);
        let voice = VoiceSettings::default();
        assert_eq!(engine.speaking_time("one two", &voice), Duration::MAX);
        assert_eq!(engine.speaking_time("", &voice), Duration::ZERO);

        let handle = engine.speak("one two", &voice);
        engine.cancel_all();
        assert_eq!(handle.outcome().await, None);
    }

    #[tokio::test]
    async fn test_sink_sees_text() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink_seen = Arc::clone(&seen);
        let engine = SimulatedNarrationEngine::default()
            .with_sink(move |text| sink_seen.lock().push(text.to_string()));
        let _handle = engine.speak("hello there", &VoiceSettings::default());
        engine.cancel_all();
        assert_eq!(*seen.lock(), vec!["hello there".to_string()]);
    }

    #[test]
    fn test_unavailable_engine() {
        let engine = UnavailableNarrationEngine;
        assert!(!engine.is_available());
        let outcome = tokio_test::block_on(engine.speak("x", &VoiceSettings::default()).outcome());
        assert_eq!(
            outcome,
            Some(NarrationOutcome::Failed(NarrationFailure::Unsupported))
        );
    }
}
