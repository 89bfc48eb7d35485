//! Scene renderer abstraction

use crate::scene::{SceneCatalog, SceneId};

/// Everything a renderer may look at when drawing
#[derive(Debug, Clone, Copy)]
pub struct SceneFrame<'a> {
    /// Lesson title shown above the visuals
    pub title: &'a str,
    pub catalog: &'a SceneCatalog,
    /// Current scene, or [`SceneId::IDLE`]
    pub scene_id: SceneId,
    pub is_playing: bool,
}

/// Draws the visuals of the current scene
///
/// Renderers are pure: the same frame always yields the same output, and
/// nothing they do feeds back into sequencing or timing.
pub trait SceneRenderer: Send + Sync {
    fn render(&self, frame: &SceneFrame<'_>) -> Vec<String>;
}
