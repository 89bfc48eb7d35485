//! Sans-IO scene sequencing state machine
//!
//! [`SequencerCore`] owns the current scene and the two gating flags. It never
//! sleeps, spawns or speaks: every operation returns the [`Effect`]s the
//! caller must carry out, which keeps the join logic testable without real
//! timers or real speech.
//!
//! Each scene visit gets a fresh [`VisitId`]. Timer and narration signals carry
//! the visit they were started for; a signal for any other visit is stale and
//! ignored, which is what makes late callbacks after a deactivation harmless.

use std::sync::Arc;
use std::time::Duration;

use derive_more::Display;
use lucid_core::{NarrationFailure, NarrationOutcome, SceneCatalog, SceneId};
use tracing::{debug, info, trace, warn};

/// Token identifying one visit of one scene
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct VisitId(pub u64);

impl VisitId {
    fn next(self) -> Self {
        VisitId(self.0 + 1)
    }
}

/// Observable state of a sequencer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerState {
    Idle,
    Showing {
        scene: SceneId,
        speech_done: bool,
        time_done: bool,
    },
    /// Transient: the final scene finished and the completion effect was
    /// emitted. The core deactivates right after, so callers only ever
    /// observe `Idle` once an operation returns.
    Completed,
}

/// What an `activate` call did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivateOutcome {
    /// Was idle, now showing the first scene
    Started,
    /// Was playing another catalog; that run was cancelled and this one started
    Restarted,
    /// Already playing this catalog; progress kept
    AlreadyActive,
}

/// The two conditions that gate every scene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Time,
    Speech,
}

/// Work the caller must perform on behalf of the core
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// A new scene is showing; redraw
    SceneEntered { scene: SceneId, visit: VisitId },
    /// Arm the minimum-duration timer for `visit`
    StartTimer { visit: VisitId, after: Duration },
    /// Drop any armed timer
    CancelTimer,
    /// Submit narration for `visit`
    Speak { visit: VisitId, text: String },
    /// Stop the narration engine and forget any outstanding utterance
    CancelNarration,
    /// Narration for `scene` failed; sequencing carries on
    NarrationFailed {
        scene: SceneId,
        failure: NarrationFailure,
    },
    /// The catalog is exhausted; fire the completion callback
    Complete,
    /// The sequencer went back to idle
    Deactivated,
}

/// Dual-gate scene sequencer
#[derive(Debug)]
pub struct SequencerCore {
    catalog: Option<Arc<SceneCatalog>>,
    state: SequencerState,
    visit: VisitId,
    narration_available: bool,
}

impl SequencerCore {
    /// Create an idle core
    ///
    /// With `narration_available == false` the speech gate opens on scene
    /// entry and scenes are timed by their minimum duration alone.
    pub fn new(narration_available: bool) -> Self {
        Self {
            catalog: None,
            state: SequencerState::Idle,
            visit: VisitId::default(),
            narration_available,
        }
    }

    pub fn state(&self) -> SequencerState {
        self.state
    }

    /// Current scene, or [`SceneId::IDLE`] when nothing is showing
    pub fn current_scene(&self) -> SceneId {
        match self.state {
            SequencerState::Showing { scene, .. } => scene,
            _ => SceneId::IDLE,
        }
    }

    pub fn current_visit(&self) -> VisitId {
        self.visit
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, SequencerState::Showing { .. })
    }

    pub fn catalog(&self) -> Option<&Arc<SceneCatalog>> {
        self.catalog.as_ref()
    }

    /// Start playing `catalog` from its first scene
    ///
    /// A no-op when the same catalog is already playing.
    pub fn activate(&mut self, catalog: Arc<SceneCatalog>) -> (ActivateOutcome, Vec<Effect>) {
        let mut effects = Vec::new();

        let same_catalog = self.is_active()
            && self
                .catalog
                .as_ref()
                .is_some_and(|current| Arc::ptr_eq(current, &catalog) || **current == *catalog);
        if same_catalog {
            debug!(scene_id = %self.current_scene(), "Already active on this catalog");
            return (ActivateOutcome::AlreadyActive, effects);
        }

        let outcome = if self.is_active() {
            self.deactivate_into(&mut effects);
            ActivateOutcome::Restarted
        } else {
            ActivateOutcome::Started
        };

        info!(scenes = catalog.len(), ?outcome, "Sequencer activated");
        let first = catalog.first().id;
        self.catalog = Some(catalog);
        self.enter(first, &mut effects);

        (outcome, effects)
    }

    /// Cancel everything in flight and return to idle
    ///
    /// Safe to call at any time; returns no effects when already idle.
    pub fn deactivate(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        self.deactivate_into(&mut effects);
        effects
    }

    /// The minimum-duration timer for `visit` fired
    pub fn on_time_elapsed(&mut self, visit: VisitId) -> Vec<Effect> {
        let mut effects = Vec::new();
        if self.open_gate(visit, Gate::Time) {
            self.evaluate_into(&mut effects);
        }
        effects
    }

    /// Narration for `visit` ended, successfully or not
    pub fn on_narration_finished(
        &mut self,
        visit: VisitId,
        outcome: NarrationOutcome,
    ) -> Vec<Effect> {
        let mut effects = Vec::new();
        if !self.is_current(visit) {
            trace!(%visit, current = %self.visit, "Ignoring stale narration signal");
            return effects;
        }

        if let NarrationOutcome::Failed(failure) = outcome {
            let scene = self.current_scene();
            warn!(scene_id = %scene, error = %failure, "Narration failed, continuing without it");
            effects.push(Effect::NarrationFailed { scene, failure });
        }

        if self.open_gate(visit, Gate::Speech) {
            self.evaluate_into(&mut effects);
        }
        effects
    }

    /// Advance if, and only if, both gates of the current scene are open
    pub fn evaluate_advance(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        self.evaluate_into(&mut effects);
        effects
    }

    fn is_current(&self, visit: VisitId) -> bool {
        self.is_active() && visit == self.visit
    }

    /// Flip one gate of the current visit; false if the signal is stale or repeated
    fn open_gate(&mut self, visit: VisitId, gate: Gate) -> bool {
        if !self.is_current(visit) {
            trace!(%visit, current = %self.visit, ?gate, "Ignoring stale gate signal");
            return false;
        }
        let SequencerState::Showing {
            scene,
            speech_done,
            time_done,
        } = &mut self.state
        else {
            return false;
        };

        let flag = match gate {
            Gate::Time => time_done,
            Gate::Speech => speech_done,
        };
        if *flag {
            trace!(scene_id = %scene, ?gate, "Gate already open");
            return false;
        }
        *flag = true;
        debug!(scene_id = %scene, ?gate, "Gate opened");
        true
    }

    fn evaluate_into(&mut self, effects: &mut Vec<Effect>) {
        if let Some(next) = self.step(effects) {
            self.enter(next, effects);
        }
    }

    /// Show `first` and keep advancing while scenes pass their gates on entry
    fn enter(&mut self, first: SceneId, effects: &mut Vec<Effect>) {
        let mut next = Some(first);
        while let Some(scene_id) = next.take() {
            self.show(scene_id, effects);
            next = self.step(effects);
        }
    }

    fn show(&mut self, scene_id: SceneId, effects: &mut Vec<Effect>) {
        let Some(scene) = self
            .catalog
            .as_ref()
            .and_then(|catalog| catalog.get(scene_id))
            .cloned()
        else {
            return;
        };

        self.visit = self.visit.next();
        let visit = self.visit;
        let time_done = scene.min_duration_ms == 0;
        let speech_done = !self.narration_available || !scene.has_narration();
        self.state = SequencerState::Showing {
            scene: scene.id,
            speech_done,
            time_done,
        };

        debug!(
            scene_id = %scene.id,
            %visit,
            min_duration_ms = scene.min_duration_ms,
            narrated = !speech_done,
            "Entering scene"
        );
        effects.push(Effect::SceneEntered {
            scene: scene.id,
            visit,
        });
        if !time_done {
            effects.push(Effect::StartTimer {
                visit,
                after: scene.min_duration(),
            });
        }
        if !speech_done {
            effects.push(Effect::CancelNarration);
            effects.push(Effect::Speak {
                visit,
                text: scene.narration,
            });
        }
    }

    /// Decide what follows a scene whose gates may both be open
    ///
    /// Returns the next scene to enter, finishes the run after the last
    /// scene, or does nothing while a gate is still closed.
    fn step(&mut self, effects: &mut Vec<Effect>) -> Option<SceneId> {
        let SequencerState::Showing {
            scene,
            speech_done: true,
            time_done: true,
        } = self.state
        else {
            return None;
        };
        let catalog = self.catalog.as_ref()?;

        match catalog.next_after(scene) {
            Some(next) => Some(next.id),
            None => {
                self.finish(effects);
                None
            }
        }
    }

    fn finish(&mut self, effects: &mut Vec<Effect>) {
        info!(scenes = self.catalog.as_ref().map_or(0, |c| c.len()), "Catalog complete");
        self.state = SequencerState::Completed;
        effects.push(Effect::Complete);
        self.deactivate_into(effects);
    }

    fn deactivate_into(&mut self, effects: &mut Vec<Effect>) {
        if self.state == SequencerState::Idle {
            return;
        }
        debug!(scene_id = %self.current_scene(), "Deactivating sequencer");
        effects.push(Effect::CancelTimer);
        effects.push(Effect::CancelNarration);
        effects.push(Effect::Deactivated);
        self.state = SequencerState::Idle;
        self.catalog = None;
    }
}
