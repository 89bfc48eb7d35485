//! Narration engine abstraction
//!
//! A narration engine turns text into speech. Each call to
//! [`NarrationEngine::speak`] returns a [`NarrationHandle`] that resolves to
//! exactly one [`NarrationOutcome`], or to nothing at all if the utterance was
//! cancelled first.
//!
//! ## Contract
//!
//! - `speak` never blocks; speech happens in the background
//! - a new `speak` supersedes whatever the engine was saying before
//! - `cancel_all` stops output and guarantees that no handle issued before the
//!   call ever reports an outcome

use tokio::sync::oneshot;

use crate::error::NarrationFailure;
use crate::voice::VoiceSettings;

/// Terminal result of one utterance
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NarrationOutcome {
    Completed,
    Failed(NarrationFailure),
}

impl NarrationOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, NarrationOutcome::Failed(_))
    }
}

/// Receiving end of an utterance
#[derive(Debug)]
pub struct NarrationHandle {
    rx: oneshot::Receiver<NarrationOutcome>,
}

impl NarrationHandle {
    /// Create a linked completer/handle pair
    ///
    /// Engines keep the completer and resolve it when speech ends. Dropping
    /// the completer without resolving it is how an utterance is cancelled.
    pub fn pair() -> (NarrationCompleter, NarrationHandle) {
        let (tx, rx) = oneshot::channel();
        (NarrationCompleter { tx }, NarrationHandle { rx })
    }

    /// A handle that is already resolved with `outcome`
    pub fn resolved(outcome: NarrationOutcome) -> Self {
        let (completer, handle) = Self::pair();
        completer.resolve(outcome);
        handle
    }

    /// Wait for the utterance to end
    ///
    /// Returns `None` if the utterance was cancelled.
    pub async fn outcome(self) -> Option<NarrationOutcome> {
        self.rx.await.ok()
    }
}

/// Sending end of an utterance, owned by the engine
#[derive(Debug)]
pub struct NarrationCompleter {
    tx: oneshot::Sender<NarrationOutcome>,
}

impl NarrationCompleter {
    /// Report that the utterance was spoken to the end
    ///
    /// Returns false if nobody is waiting any more.
    pub fn complete(self) -> bool {
        self.resolve(NarrationOutcome::Completed)
    }

    /// Report that the utterance failed
    pub fn fail(self, failure: NarrationFailure) -> bool {
        self.resolve(NarrationOutcome::Failed(failure))
    }

    pub fn resolve(self, outcome: NarrationOutcome) -> bool {
        self.tx.send(outcome).is_ok()
    }

    /// Whether the waiting side has gone away
    pub fn is_cancelled(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Text-to-speech capability consumed by the sequencer
pub trait NarrationEngine: Send + Sync {
    /// Whether the host can speak at all
    ///
    /// When this is false the sequencer never calls [`speak`](Self::speak)
    /// and gates scenes on their minimum duration alone.
    fn is_available(&self) -> bool {
        true
    }

    /// Start speaking `text`, superseding any utterance in flight
    fn speak(&self, text: &str, voice: &VoiceSettings) -> NarrationHandle;

    /// Stop all speech and suppress every outstanding outcome
    fn cancel_all(&self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completed_handle() {
        let (completer, handle) = NarrationHandle::pair();
        assert!(completer.complete());
        let outcome = tokio_test::block_on(handle.outcome());
        assert_eq!(outcome, Some(NarrationOutcome::Completed));
    }

    #[test]
    fn test_dropped_completer_means_cancelled() {
        let (completer, handle) = NarrationHandle::pair();
        drop(completer);
        assert_eq!(tokio_test::block_on(handle.outcome()), None);
    }

    #[test]
    fn test_completer_sees_dropped_handle() {
        let (completer, handle) = NarrationHandle::pair();
        drop(handle);
        assert!(completer.is_cancelled());
        assert!(!completer.fail(NarrationFailure::PermissionDenied));
    }

    #[test]
    fn test_resolved_failure() {
        let handle =
            NarrationHandle::resolved(NarrationOutcome::Failed(NarrationFailure::Unsupported));
        let outcome = tokio_test::block_on(handle.outcome()).unwrap();
        assert!(outcome.is_failure());
    }
}
