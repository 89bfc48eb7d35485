//! Mock narration engine for testing
//!
//! Provides a [`NarrationEngine`] whose utterances finish only when a test
//! says so, making sequencing tests independent of real speech.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use lucid_sequencer::{MockNarrationEngine, SceneSequencer, SequencerConfig};
//!
//! let engine = Arc::new(MockNarrationEngine::new());
//! let handle = SceneSequencer::spawn(engine.clone(), SequencerConfig::default());
//!
//! // ... activate a script, then:
//! assert_eq!(engine.in_flight().as_deref(), Some("hello"));
//! engine.complete_current();
//! ```

use lucid_core::{
    NarrationCompleter, NarrationEngine, NarrationFailure, NarrationHandle, NarrationOutcome,
    VoiceSettings,
};
use parking_lot::Mutex;

#[derive(Debug, Default)]
struct MockState {
    /// Every text passed to `speak`, in order
    spoken: Vec<String>,
    /// Voice used for the most recent utterance
    last_voice: Option<VoiceSettings>,
    /// The utterance in flight, if any
    pending: Option<(String, NarrationCompleter)>,
    cancel_count: usize,
}

/// A narration engine driven by the test
#[derive(Debug)]
pub struct MockNarrationEngine {
    available: bool,
    /// Resolve every utterance as soon as it is spoken
    auto_outcome: Option<NarrationOutcome>,
    state: Mutex<MockState>,
}

impl MockNarrationEngine {
    /// An available engine whose utterances stay in flight until resolved
    pub fn new() -> Self {
        Self {
            available: true,
            auto_outcome: None,
            state: Mutex::new(MockState::default()),
        }
    }

    /// An engine that reports itself as missing from the host
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    /// An engine that resolves every utterance immediately with `outcome`
    pub fn resolving(outcome: NarrationOutcome) -> Self {
        Self {
            auto_outcome: Some(outcome),
            ..Self::new()
        }
    }

    /// Every text spoken so far
    pub fn spoken(&self) -> Vec<String> {
        self.state.lock().spoken.clone()
    }

    pub fn last_voice(&self) -> Option<VoiceSettings> {
        self.state.lock().last_voice.clone()
    }

    /// Text of the utterance still waiting for an outcome
    pub fn in_flight(&self) -> Option<String> {
        self.state
            .lock()
            .pending
            .as_ref()
            .map(|(text, _)| text.clone())
    }

    /// Number of `cancel_all` calls
    pub fn cancel_count(&self) -> usize {
        self.state.lock().cancel_count
    }

    /// Finish the utterance in flight; false if there is none
    pub fn complete_current(&self) -> bool {
        self.resolve_current(NarrationOutcome::Completed)
    }

    /// Fail the utterance in flight; false if there is none
    pub fn fail_current(&self, failure: NarrationFailure) -> bool {
        self.resolve_current(NarrationOutcome::Failed(failure))
    }

    fn resolve_current(&self, outcome: NarrationOutcome) -> bool {
        let pending = self.state.lock().pending.take();
        match pending {
            Some((_, completer)) => completer.resolve(outcome),
            None => false,
        }
    }
}

impl Default for MockNarrationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl NarrationEngine for MockNarrationEngine {
    fn is_available(&self) -> bool {
        self.available
    }

    fn speak(&self, text: &str, voice: &VoiceSettings) -> NarrationHandle {
        let mut state = self.state.lock();
        state.spoken.push(text.to_string());
        state.last_voice = Some(voice.clone());

        if let Some(outcome) = &self.auto_outcome {
            state.pending = None;
            return NarrationHandle::resolved(outcome.clone());
        }

        let (completer, handle) = NarrationHandle::pair();
        // Replacing the previous completer drops it, cancelling that utterance.
        state.pending = Some((text.to_string(), completer));
        handle
    }

    fn cancel_all(&self) {
        let mut state = self.state.lock();
        state.pending = None;
        state.cancel_count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speak_then_complete() {
        let engine = MockNarrationEngine::new();
        let handle = engine.speak("hello", &VoiceSettings::default());
        assert_eq!(engine.in_flight().as_deref(), Some("hello"));
        assert!(engine.complete_current());
        assert_eq!(
            tokio_test::block_on(handle.outcome()),
            Some(NarrationOutcome::Completed)
        );
        assert!(!engine.complete_current());
    }

    #[test]
    fn test_new_utterance_supersedes_previous() {
        let engine = MockNarrationEngine::new();
        let first = engine.speak("first", &VoiceSettings::default());
        let _second = engine.speak("second", &VoiceSettings::default());
        assert_eq!(tokio_test::block_on(first.outcome()), None);
        assert_eq!(engine.spoken(), vec!["first", "second"]);
    }

    #[test]
    fn test_cancel_all_suppresses_outcome() {
        let engine = MockNarrationEngine::new();
        let handle = engine.speak("hello", &VoiceSettings::default());
        engine.cancel_all();
        assert!(!engine.complete_current());
        assert_eq!(tokio_test::block_on(handle.outcome()), None);
        assert_eq!(engine.cancel_count(), 1);
    }

    #[test]
    fn test_resolving_engine() {
        let engine = MockNarrationEngine::resolving(NarrationOutcome::Failed(
            NarrationFailure::PermissionDenied,
        ));
        let handle = engine.speak("hello", &VoiceSettings::default());
        assert!(tokio_test::block_on(handle.outcome()).unwrap().is_failure());
        assert!(engine.in_flight().is_none());
    }
}
