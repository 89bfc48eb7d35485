//! Scenes and scene catalogs
//!
//! A [`SceneCatalog`] can only be obtained through validation, so every
//! catalog in circulation is non-empty with ids contiguous from 1.

use std::path::Path;
use std::time::Duration;

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, CatalogResult};

/// Identifier of a scene within its catalog
///
/// `SceneId(0)` is reserved for "no scene" (an idle sequencer).
#[derive(
    Debug,
    Display,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct SceneId(pub u32);

impl SceneId {
    /// The id reported while nothing is playing
    pub const IDLE: SceneId = SceneId(0);

    /// Whether this is the idle id
    pub fn is_idle(self) -> bool {
        self == Self::IDLE
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for SceneId {
    fn from(id: u32) -> Self {
        SceneId(id)
    }
}

/// One timed, narrated step of a lesson
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    pub id: SceneId,
    /// Minimum time the scene stays visible, in milliseconds
    #[serde(rename = "duration")]
    pub min_duration_ms: u64,
    /// Text to speak while the scene is shown; empty means silent
    #[serde(default)]
    pub narration: String,
}

impl Scene {
    pub fn new(id: u32, min_duration_ms: u64, narration: impl Into<String>) -> Self {
        Self {
            id: SceneId(id),
            min_duration_ms,
            narration: narration.into(),
        }
    }

    pub fn min_duration(&self) -> Duration {
        Duration::from_millis(self.min_duration_ms)
    }

    pub fn has_narration(&self) -> bool {
        !self.narration.trim().is_empty()
    }
}

/// On-disk shapes accepted for a catalog: a bare list, or a `scenes` table
#[derive(Deserialize)]
#[serde(untagged)]
enum RawCatalog {
    List(Vec<Scene>),
    Table { scenes: Vec<Scene> },
}

impl TryFrom<RawCatalog> for SceneCatalog {
    type Error = CatalogError;

    fn try_from(raw: RawCatalog) -> CatalogResult<Self> {
        match raw {
            RawCatalog::List(scenes) | RawCatalog::Table { scenes } => SceneCatalog::new(scenes),
        }
    }
}

/// The ordered, immutable scene list of one lesson
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCatalog")]
pub struct SceneCatalog {
    scenes: Vec<Scene>,
}

impl SceneCatalog {
    /// Build a catalog, rejecting empty lists and ids that are not `1..=n`
    pub fn new(scenes: Vec<Scene>) -> CatalogResult<Self> {
        validate(&scenes)?;
        Ok(Self { scenes })
    }

    /// A one-scene catalog; always valid
    pub fn single(min_duration_ms: u64, narration: impl Into<String>) -> Self {
        Self {
            scenes: vec![Scene::new(1, min_duration_ms, narration)],
        }
    }

    /// Parse a catalog from JSON
    ///
    /// Accepts either `[{"id": 1, "duration": 3000, "narration": "..."}]` or
    /// the same list under a `"scenes"` key.
    pub fn from_json(input: &str) -> CatalogResult<Self> {
        let raw: RawCatalog = serde_json::from_str(input)?;
        raw.try_into()
    }

    /// Parse a catalog from TOML (`[[scenes]]` tables)
    pub fn from_toml(input: &str) -> CatalogResult<Self> {
        let raw: RawCatalog = toml::from_str(input)?;
        raw.try_into()
    }

    /// Load a catalog file, picking the parser from the extension
    pub fn from_path(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json(&contents),
            Some("toml") => Self::from_toml(&contents),
            other => Err(CatalogError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }

    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    pub fn first(&self) -> &Scene {
        // Validation guarantees at least one scene.
        &self.scenes[0]
    }

    pub fn last_id(&self) -> SceneId {
        SceneId(self.scenes.len() as u32)
    }

    /// Look up a scene; ids are positions offset by one
    pub fn get(&self, id: SceneId) -> Option<&Scene> {
        if id.is_idle() {
            return None;
        }
        self.scenes.get(id.0 as usize - 1)
    }

    pub fn contains(&self, id: SceneId) -> bool {
        self.get(id).is_some()
    }

    /// The scene that follows `id`, or `None` if `id` is the last one
    pub fn next_after(&self, id: SceneId) -> Option<&Scene> {
        if id.is_idle() {
            return None;
        }
        self.scenes.get(id.0 as usize)
    }

    pub fn is_last(&self, id: SceneId) -> bool {
        id == self.last_id()
    }

    /// Sum of every scene's minimum duration
    pub fn total_min_duration(&self) -> Duration {
        self.scenes
            .iter()
            .map(Scene::min_duration)
            .fold(Duration::ZERO, Duration::saturating_add)
    }

    /// Copy of this catalog with durations divided by `speed`
    ///
    /// Non-positive or non-finite speeds leave durations untouched.
    pub fn scaled(&self, speed: f64) -> Self {
        if !speed.is_finite() || speed <= 0.0 {
            return self.clone();
        }
        let scenes = self
            .scenes
            .iter()
            .map(|scene| Scene {
                min_duration_ms: (scene.min_duration_ms as f64 / speed).round() as u64,
                ..scene.clone()
            })
            .collect();
        Self { scenes }
    }
}

fn validate(scenes: &[Scene]) -> CatalogResult<()> {
    if scenes.is_empty() {
        return Err(CatalogError::Empty);
    }
    for (position, scene) in scenes.iter().enumerate() {
        let expected = position as u32 + 1;
        if scene.id.0 != expected {
            return Err(CatalogError::NonContiguous {
                position,
                expected,
                found: scene.id.0,
            });
        }
    }
    Ok(())
}

impl<'a> IntoIterator for &'a SceneCatalog {
    type Item = &'a Scene;
    type IntoIter = std::slice::Iter<'a, Scene>;

    fn into_iter(self) -> Self::IntoIter {
        self.scenes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_scenes() -> SceneCatalog {
        SceneCatalog::new(vec![Scene::new(1, 0, ""), Scene::new(2, 100, "second")]).unwrap()
    }

    #[test]
    fn test_empty_catalog_rejected() {
        assert_eq!(SceneCatalog::new(vec![]), Err(CatalogError::Empty));
    }

    #[test]
    fn test_ids_must_start_at_one() {
        let err = SceneCatalog::new(vec![Scene::new(0, 10, "a")]).unwrap_err();
        assert_eq!(
            err,
            CatalogError::NonContiguous {
                position: 0,
                expected: 1,
                found: 0
            }
        );
    }

    #[test]
    fn test_gap_in_ids_rejected() {
        let err =
            SceneCatalog::new(vec![Scene::new(1, 10, "a"), Scene::new(3, 10, "b")]).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::NonContiguous {
                position: 1,
                expected: 2,
                found: 3
            }
        ));
    }

    #[test]
    fn test_navigation() {
        let catalog = two_scenes();
        assert_eq!(catalog.first().id, SceneId(1));
        assert_eq!(catalog.next_after(SceneId(1)).map(|s| s.id), Some(SceneId(2)));
        assert!(catalog.next_after(SceneId(2)).is_none());
        assert!(catalog.next_after(SceneId::IDLE).is_none());
        assert!(catalog.is_last(SceneId(2)));
        assert!(!catalog.contains(SceneId::IDLE));
        assert!(!catalog.contains(SceneId(3)));
    }

    #[test]
    fn test_total_duration() {
        assert_eq!(two_scenes().total_min_duration(), Duration::from_millis(100));
    }

    #[test]
    fn test_empty_narration_is_silent() {
        assert!(!Scene::new(1, 0, "   ").has_narration());
        assert!(Scene::new(1, 0, "hello").has_narration());
    }

    #[test]
    fn test_json_bare_list() {
        let json = r#"[
            {"id": 1, "duration": 3000, "narration": "Rome didn't fall in one night."},
            {"id": 2, "duration": 0}
        ]"#;
        let catalog = SceneCatalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.first().min_duration_ms, 3000);
        assert_eq!(catalog.get(SceneId(2)).unwrap().narration, "");
    }

    #[test]
    fn test_json_invalid_ids_fail_validation() {
        let json = r#"{"scenes": [{"id": 2, "duration": 10, "narration": "x"}]}"#;
        assert!(matches!(
            SceneCatalog::from_json(json),
            Err(CatalogError::NonContiguous { .. })
        ));
    }

    #[test]
    fn test_toml_tables() {
        let input = r#"
            [[scenes]]
            id = 1
            duration = 4000
            narration = "Biogas starts with organic material."

            [[scenes]]
            id = 2
            duration = 5000
            narration = "The end."
        "#;
        let catalog = SceneCatalog::from_toml(input).unwrap();
        assert_eq!(catalog.last_id(), SceneId(2));
    }

    #[test]
    fn test_from_path_dispatches_on_extension() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("lesson.json");
        std::fs::write(&json_path, r#"[{"id": 1, "duration": 5, "narration": "hi"}]"#).unwrap();
        assert_eq!(SceneCatalog::from_path(&json_path).unwrap().len(), 1);

        let yaml_path = dir.path().join("lesson.yaml");
        std::fs::write(&yaml_path, "scenes: []").unwrap();
        assert_eq!(
            SceneCatalog::from_path(&yaml_path),
            Err(CatalogError::UnsupportedFormat("yaml".into()))
        );
    }

    #[test]
    fn test_scaled_divides_durations() {
        let catalog = SceneCatalog::new(vec![Scene::new(1, 4000, "a")]).unwrap();
        assert_eq!(catalog.scaled(4.0).first().min_duration_ms, 1000);
        assert_eq!(catalog.scaled(0.0), catalog);
        assert_eq!(catalog.scaled(f64::NAN), catalog);
    }

    #[test]
    fn test_total_duration_saturates() {
        let crawl = SceneCatalog::new(vec![Scene::new(1, 4000, "a"), Scene::new(2, 0, "")])
            .unwrap()
            .scaled(1e-30);
        assert_eq!(crawl.first().min_duration_ms, u64::MAX);

        let scenes = (1..=1001).map(|id| Scene::new(id, u64::MAX, "")).collect();
        let endless = SceneCatalog::new(scenes).unwrap();
        assert_eq!(endless.total_min_duration(), Duration::MAX);
    }
}
