//! # Lucid Sequencer
//!
//! Drives an explainer through its scenes. A scene ends only once its
//! minimum duration has elapsed *and* its narration has finished, whichever
//! comes last; narration failures and hosts without speech never stall a
//! lesson.
//!
//! ## Layers
//!
//! - [`SequencerCore`]: synchronous state machine, returns [`Effect`]s
//! - [`SceneSequencer`]: tokio task executing those effects, controlled
//!   through a [`SequencerHandle`]
//! - [`ActivationSignal`]: turns an on/off input into activate/deactivate calls
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use lucid_core::{Scene, SceneCatalog, Script};
//! use lucid_sequencer::{SceneSequencer, SequencerConfig, SimulatedNarrationEngine};
//!
//! let engine = Arc::new(SimulatedNarrationEngine::default());
//! let handle = SceneSequencer::spawn(engine, SequencerConfig::default());
//!
//! let catalog = SceneCatalog::new(vec![Scene::new(1, 3000, "Hello.")])?;
//! handle
//!     .activate_with_callback(Script::new("Greeting", catalog), || println!("done"))
//!     .await?;
//! ```

pub mod activation;
pub mod config;
pub mod engines;
pub mod error;
pub mod event;
pub mod machine;
pub mod mock;
pub mod sequencer;

pub use activation::ActivationSignal;
pub use config::SequencerConfig;
pub use engines::{
    DEFAULT_WORDS_PER_MINUTE, SimulatedNarrationEngine, UnavailableNarrationEngine, UtteranceSink,
};
pub use error::{SequencerError, SequencerResult};
pub use event::{SequencerEvent, SequencerSnapshot};
pub use machine::{ActivateOutcome, Effect, Gate, SequencerCore, SequencerState, VisitId};
pub use mock::MockNarrationEngine;
pub use sequencer::{CompletionCallback, SceneSequencer, SequencerHandle};
