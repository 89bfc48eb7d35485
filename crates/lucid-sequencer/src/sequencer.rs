//! Async scene sequencer
//!
//! [`SceneSequencer`] runs as a single background task that owns a
//! [`SequencerCore`], the armed duration timer and the outstanding narration
//! request. Commands from [`SequencerHandle`]s and gate signals from timers and
//! the narration engine are processed one at a time, so the core never sees
//! two things happen at once.
//!
//! Every way out of a run (explicit deactivation, activation of another
//! catalog, shutdown, or the last handle being dropped) goes through
//! [`SequencerCore::deactivate`], which cancels both the timer and the
//! narration.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use lucid_core::{NarrationEngine, NarrationOutcome, Scene, SceneCatalog, SceneId, Script};
use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, trace};

use crate::config::SequencerConfig;
use crate::error::SequencerResult;
use crate::event::{SequencerEvent, SequencerSnapshot};
use crate::machine::{ActivateOutcome, Effect, SequencerCore, VisitId};

/// Invoked once when a lesson plays to the end
pub type CompletionCallback = Box<dyn FnOnce() + Send + 'static>;

enum Command {
    Activate {
        script: Script,
        on_complete: Option<CompletionCallback>,
        reply: oneshot::Sender<ActivateOutcome>,
    },
    Deactivate {
        reply: oneshot::Sender<()>,
    },
    Shutdown {
        reply: oneshot::Sender<()>,
    },
}

/// A gate opening, tagged with the visit it belongs to
#[derive(Debug)]
struct GateSignal {
    visit: VisitId,
    kind: SignalKind,
}

#[derive(Debug)]
enum SignalKind {
    Time,
    Speech(NarrationOutcome),
}

/// Background task driving one explainer
pub struct SceneSequencer {
    core: SequencerCore,
    engine: Arc<dyn NarrationEngine>,
    /// Script of the current (or last finished) run
    script: Option<Script>,
    on_complete: Option<CompletionCallback>,
    /// Armed duration timer
    timer: Option<JoinHandle<()>>,
    /// Task waiting on the outstanding utterance
    narration: Option<JoinHandle<()>>,
    commands: mpsc::Receiver<Command>,
    signal_tx: mpsc::UnboundedSender<GateSignal>,
    signal_rx: mpsc::UnboundedReceiver<GateSignal>,
    events: broadcast::Sender<SequencerEvent>,
    snapshot: watch::Sender<SequencerSnapshot>,
}

impl SceneSequencer {
    /// Spawn a sequencer on the current tokio runtime
    ///
    /// The task stops when [`SequencerHandle::shutdown`] is called or when
    /// every handle has been dropped.
    pub fn spawn(engine: Arc<dyn NarrationEngine>, config: SequencerConfig) -> SequencerHandle {
        let (command_tx, commands) = mpsc::channel(config.command_capacity.max(1));
        let (events, _) = broadcast::channel(config.event_channel_capacity.max(1));
        let (snapshot, snapshot_rx) = watch::channel(SequencerSnapshot::idle());
        let (signal_tx, signal_rx) = mpsc::unbounded_channel();

        let narration_available = engine.is_available();
        if !narration_available {
            info!("Narration engine unavailable, scenes are timed by duration only");
        }

        let task = Self {
            core: SequencerCore::new(narration_available),
            engine,
            script: None,
            on_complete: None,
            timer: None,
            narration: None,
            commands,
            signal_tx,
            signal_rx,
            events: events.clone(),
            snapshot,
        };
        tokio::spawn(task.run());

        SequencerHandle {
            commands: command_tx,
            events,
            snapshot: snapshot_rx,
        }
    }

    async fn run(mut self) {
        debug!("Sequencer task started");
        let mut shutdown_reply = None;

        loop {
            tokio::select! {
                biased;
                command = self.commands.recv() => match command {
                    Some(Command::Shutdown { reply }) => {
                        shutdown_reply = Some(reply);
                        break;
                    }
                    Some(command) => self.handle_command(command),
                    None => {
                        debug!("All sequencer handles dropped");
                        break;
                    }
                },
                Some(signal) = self.signal_rx.recv() => self.handle_signal(signal),
            }
        }

        let effects = self.core.deactivate();
        self.apply(effects);
        self.on_complete = None;
        debug!("Sequencer task stopped");

        if let Some(reply) = shutdown_reply {
            let _ = reply.send(());
        }
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Activate {
                script,
                on_complete,
                reply,
            } => {
                let (outcome, effects) = self.core.activate(Arc::clone(&script.catalog));
                if outcome != ActivateOutcome::AlreadyActive {
                    info!(lesson = %script.title, ?outcome, "Playing lesson");
                    self.script = Some(script);
                    self.on_complete = on_complete;
                }
                self.apply(effects);
                let _ = reply.send(outcome);
            }
            Command::Deactivate { reply } => {
                let effects = self.core.deactivate();
                self.apply(effects);
                self.on_complete = None;
                let _ = reply.send(());
            }
            // Handled by the run loop.
            Command::Shutdown { reply } => {
                let _ = reply.send(());
            }
        }
    }

    fn handle_signal(&mut self, signal: GateSignal) {
        trace!(visit = %signal.visit, kind = ?signal.kind, "Gate signal");
        let effects = match signal.kind {
            SignalKind::Time => self.core.on_time_elapsed(signal.visit),
            SignalKind::Speech(outcome) => self.core.on_narration_finished(signal.visit, outcome),
        };
        self.apply(effects);
    }

    fn apply(&mut self, effects: Vec<Effect>) {
        if effects.is_empty() {
            return;
        }
        for effect in effects {
            match effect {
                Effect::SceneEntered { scene, .. } => {
                    self.publish(SequencerEvent::SceneEntered {
                        title: self.title(),
                        scene_id: scene,
                        at: Utc::now(),
                    });
                }
                Effect::StartTimer { visit, after } => self.start_timer(visit, after),
                Effect::CancelTimer => self.cancel_timer(),
                Effect::Speak { visit, text } => self.speak(visit, &text),
                Effect::CancelNarration => self.cancel_narration(),
                Effect::NarrationFailed { scene, failure } => {
                    self.publish(SequencerEvent::NarrationFailed {
                        scene_id: scene,
                        failure,
                        at: Utc::now(),
                    });
                }
                Effect::Complete => {
                    if let Some(on_complete) = self.on_complete.take() {
                        on_complete();
                    }
                    self.publish(SequencerEvent::Completed {
                        title: self.title(),
                        at: Utc::now(),
                    });
                }
                Effect::Deactivated => {
                    self.publish(SequencerEvent::Deactivated { at: Utc::now() });
                }
            }
        }
        self.refresh_snapshot();
    }

    fn start_timer(&mut self, visit: VisitId, after: Duration) {
        self.cancel_timer();
        let signals = self.signal_tx.clone();
        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(after).await;
            let _ = signals.send(GateSignal {
                visit,
                kind: SignalKind::Time,
            });
        }));
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }

    fn speak(&mut self, visit: VisitId, text: &str) {
        let voice = self
            .script
            .as_ref()
            .map(|script| script.voice.clone())
            .unwrap_or_default();
        let handle = self.engine.speak(text, &voice);

        let signals = self.signal_tx.clone();
        self.narration = Some(tokio::spawn(async move {
            // A cancelled utterance resolves to nothing and opens no gate.
            if let Some(outcome) = handle.outcome().await {
                let _ = signals.send(GateSignal {
                    visit,
                    kind: SignalKind::Speech(outcome),
                });
            }
        }));
    }

    fn cancel_narration(&mut self) {
        if let Some(narration) = self.narration.take() {
            narration.abort();
        }
        self.engine.cancel_all();
    }

    fn publish(&self, event: SequencerEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }

    fn title(&self) -> String {
        self.script
            .as_ref()
            .map(|script| script.title.clone())
            .unwrap_or_default()
    }

    fn refresh_snapshot(&self) {
        let is_playing = self.core.is_active();
        let snapshot = SequencerSnapshot {
            title: is_playing.then(|| self.title()),
            scene_id: self.core.current_scene(),
            is_playing,
        };
        self.snapshot.send_if_modified(|current| {
            if *current == snapshot {
                false
            } else {
                *current = snapshot;
                true
            }
        });
    }
}

/// Cloneable handle to a running [`SceneSequencer`]
#[derive(Clone)]
pub struct SequencerHandle {
    commands: mpsc::Sender<Command>,
    events: broadcast::Sender<SequencerEvent>,
    snapshot: watch::Receiver<SequencerSnapshot>,
}

impl SequencerHandle {
    /// Start playing `script` from its first scene
    ///
    /// If the same catalog is already playing this is a no-op and the
    /// existing run keeps its completion callback.
    pub async fn activate(&self, script: Script) -> SequencerResult<ActivateOutcome> {
        self.send_activate(script, None).await
    }

    /// Like [`activate`](Self::activate), calling `on_complete` once when the
    /// last scene finishes
    ///
    /// The callback is dropped without being called if the run is
    /// deactivated first.
    pub async fn activate_with_callback(
        &self,
        script: Script,
        on_complete: impl FnOnce() + Send + 'static,
    ) -> SequencerResult<ActivateOutcome> {
        self.send_activate(script, Some(Box::new(on_complete))).await
    }

    /// Validate `scenes` and play them
    ///
    /// Fails with [`SequencerError::InvalidCatalog`](crate::SequencerError::InvalidCatalog)
    /// without touching the current run if the scenes are empty or their ids
    /// are not contiguous from 1.
    pub async fn activate_scenes(
        &self,
        title: impl Into<String>,
        scenes: Vec<Scene>,
    ) -> SequencerResult<ActivateOutcome> {
        let catalog = SceneCatalog::new(scenes)?;
        self.activate(Script::new(title, catalog)).await
    }

    async fn send_activate(
        &self,
        script: Script,
        on_complete: Option<CompletionCallback>,
    ) -> SequencerResult<ActivateOutcome> {
        let (reply, rx) = oneshot::channel();
        self.commands
            .send(Command::Activate {
                script,
                on_complete,
                reply,
            })
            .await?;
        Ok(rx.await?)
    }

    /// Stop playback, cancelling the timer and any narration
    pub async fn deactivate(&self) -> SequencerResult<()> {
        let (reply, rx) = oneshot::channel();
        self.commands.send(Command::Deactivate { reply }).await?;
        Ok(rx.await?)
    }

    /// Deactivate and stop the background task
    ///
    /// Returns once everything has been cancelled. Calling this on a stopped
    /// sequencer succeeds immediately.
    pub async fn shutdown(&self) -> SequencerResult<()> {
        let (reply, rx) = oneshot::channel();
        if self.commands.send(Command::Shutdown { reply }).await.is_err() {
            return Ok(());
        }
        let _ = rx.await;
        Ok(())
    }

    /// Current scene, or [`SceneId::IDLE`]
    pub fn current_scene(&self) -> SceneId {
        self.snapshot.borrow().scene_id
    }

    pub fn snapshot(&self) -> SequencerSnapshot {
        self.snapshot.borrow().clone()
    }

    /// Receiver that changes whenever the scene or play state does
    pub fn watch(&self) -> watch::Receiver<SequencerSnapshot> {
        self.snapshot.clone()
    }

    /// Subscribe to sequencer events
    pub fn subscribe(&self) -> broadcast::Receiver<SequencerEvent> {
        self.events.subscribe()
    }

    /// Whether the background task is still running
    pub fn is_running(&self) -> bool {
        !self.commands.is_closed()
    }
}
