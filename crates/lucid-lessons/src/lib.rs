//! # Lucid Lessons
//!
//! The lessons shipped with Lucid and the gallery that lists them.
//!
//! Every authored lesson is a [`Lesson`]: a slug, a title, a subject, a voice
//! and a scene catalog. Gallery titles without an authored lesson play the
//! generic explainer instead (see [`generic_script`]).

pub mod builtin;
pub mod error;
pub mod library;

pub use builtin::{GENERIC_SCENE_DURATION_MS, generic_narration, generic_script};
pub use error::{LessonError, LessonResult};
pub use library::{GalleryEntry, Lesson, LessonLibrary};
