//! # Lucid Core
//!
//! Core types, traits, and errors shared by every Lucid explainer.
//!
//! An explainer is a fixed series of timed, narrated scenes. This crate holds
//! the data half of that picture, plus the seams the sequencer talks through:
//!
//! - [`Scene`] / [`SceneCatalog`]: the validated, immutable scene list of a lesson
//! - [`Script`]: a catalog plus the title and voice it is played with
//! - [`VoiceSettings`]: per-lesson speech rate, pitch and language
//! - [`NarrationEngine`]: text-to-speech abstraction with cancellation
//! - [`SceneRenderer`]: pure function from the current scene to visual output
//!
//! The crate performs no I/O of its own beyond reading catalog files on request.

pub mod error;
pub mod narration;
pub mod render;
pub mod scene;
pub mod script;
pub mod voice;

pub use error::*;
pub use narration::*;
pub use render::*;
pub use scene::*;
pub use script::*;
pub use voice::*;
