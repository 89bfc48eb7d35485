//! Lesson lookup

use std::sync::Arc;
use std::time::Duration;

use lucid_core::{Scene, SceneCatalog, Script, VoiceSettings};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::builtin::{self, generic_script};
use crate::error::{LessonError, LessonResult};

/// An authored explainer
#[derive(Debug, Clone, PartialEq)]
pub struct Lesson {
    /// Short identifier used on the command line, e.g. `fall-of-rome`
    pub slug: String,
    /// Title shown in the gallery
    pub title: String,
    pub subject: String,
    pub voice: VoiceSettings,
    pub catalog: Arc<SceneCatalog>,
}

impl Lesson {
    /// Build a lesson, validating its scenes
    pub fn new(
        slug: impl Into<String>,
        title: impl Into<String>,
        subject: impl Into<String>,
        scenes: Vec<Scene>,
    ) -> LessonResult<Self> {
        let slug = slug.into();
        let catalog = SceneCatalog::new(scenes).map_err(|source| LessonError::InvalidCatalog {
            slug: slug.clone(),
            source,
        })?;
        Ok(Self {
            slug,
            title: title.into(),
            subject: subject.into(),
            voice: VoiceSettings::default(),
            catalog: Arc::new(catalog),
        })
    }

    pub fn with_voice(mut self, voice: VoiceSettings) -> Self {
        self.voice = voice;
        self
    }

    /// The playable form of this lesson; shares the catalog
    pub fn script(&self) -> Script {
        Script {
            title: self.title.clone(),
            catalog: Arc::clone(&self.catalog),
            voice: self.voice.clone(),
        }
    }

    pub fn scene_count(&self) -> usize {
        self.catalog.len()
    }

    pub fn total_min_duration(&self) -> Duration {
        self.catalog.total_min_duration()
    }
}

/// One card of the explore gallery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryEntry {
    pub title: String,
    pub subject: String,
}

impl GalleryEntry {
    pub fn new(title: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subject: subject.into(),
        }
    }
}

/// Authored lessons plus the gallery cards that point at them
#[derive(Debug, Clone, Default)]
pub struct LessonLibrary {
    lessons: Vec<Lesson>,
    gallery: Vec<GalleryEntry>,
}

impl LessonLibrary {
    /// An empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// The lessons and gallery that ship with Lucid
    pub fn builtin() -> LessonResult<Self> {
        let mut library = Self::new();
        for lesson in builtin::lessons()? {
            library.insert(lesson)?;
        }
        library.gallery = builtin::gallery();
        Ok(library)
    }

    /// Add a lesson; slugs must be unique
    pub fn insert(&mut self, lesson: Lesson) -> LessonResult<()> {
        if self.by_slug(&lesson.slug).is_some() {
            return Err(LessonError::DuplicateSlug(lesson.slug));
        }
        debug!(slug = %lesson.slug, scenes = lesson.scene_count(), "Registered lesson");
        self.lessons.push(lesson);
        Ok(())
    }

    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    pub fn gallery(&self) -> &[GalleryEntry] {
        &self.gallery
    }

    pub fn by_slug(&self, slug: &str) -> Option<&Lesson> {
        self.lessons
            .iter()
            .find(|lesson| lesson.slug.eq_ignore_ascii_case(slug))
    }

    pub fn by_title(&self, title: &str) -> Option<&Lesson> {
        let title = title.trim();
        self.lessons
            .iter()
            .find(|lesson| lesson.title.eq_ignore_ascii_case(title))
    }

    /// Find a lesson by slug first, then by title
    pub fn find(&self, query: &str) -> LessonResult<&Lesson> {
        self.by_slug(query)
            .or_else(|| self.by_title(query))
            .ok_or_else(|| LessonError::NotFound(query.to_string()))
    }

    /// What the gallery plays for `query`
    ///
    /// Authored lessons play as written; anything else gets the generic
    /// explainer titled after the query.
    pub fn resolve(&self, query: &str) -> Script {
        match self.find(query) {
            Ok(lesson) => lesson.script(),
            Err(_) => {
                debug!(title = query, "No authored lesson, using generic explainer");
                generic_script(query.trim())
            }
        }
    }

    /// Whether a gallery entry has an authored lesson behind it
    pub fn is_authored(&self, entry: &GalleryEntry) -> bool {
        self.by_title(&entry.title).is_some()
    }
}
