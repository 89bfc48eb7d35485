//! Plain text rendering of scenes and the lesson list

use std::time::Duration;

use lucid_core::{SceneFrame, SceneRenderer};
use lucid_lessons::LessonLibrary;

const PROGRESS_WIDTH: usize = 24;

/// Draws a scene as a header, a progress bar and the wrapped narration
#[derive(Debug, Clone, Copy)]
pub struct TerminalRenderer {
    /// Column at which narration wraps
    pub width: usize,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self { width: 72 }
    }
}

impl TerminalRenderer {
    pub fn new(width: usize) -> Self {
        Self {
            width: width.max(16),
        }
    }
}

impl SceneRenderer for TerminalRenderer {
    fn render(&self, frame: &SceneFrame<'_>) -> Vec<String> {
        let scene = match frame.catalog.get(frame.scene_id) {
            Some(scene) if frame.is_playing => scene,
            _ => return vec![format!("== {} (stopped) ==", frame.title)],
        };

        let total = frame.catalog.len();
        let position = frame.scene_id.get() as usize;
        let filled = position * PROGRESS_WIDTH / total;

        let mut lines = vec![
            String::new(),
            format!("== {} [{position}/{total}] ==", frame.title),
            format!(
                "[{}{}]",
                "#".repeat(filled),
                "-".repeat(PROGRESS_WIDTH - filled)
            ),
        ];
        if scene.has_narration() {
            lines.extend(wrap(&scene.narration, self.width));
        } else {
            lines.push("(silence)".to_string());
        }
        lines
    }
}

/// Greedy word wrap; words longer than `width` get a line of their own
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let needed =
            current.chars().count() + word.chars().count() + usize::from(!current.is_empty());
        if !current.is_empty() && needed > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn seconds(duration: Duration) -> String {
    format!("{:.0}s", duration.as_secs_f64())
}

/// One line per lesson and per gallery card without an authored lesson
pub fn lesson_table(library: &LessonLibrary) -> Vec<String> {
    let mut lines = vec![format!(
        "{:<20} {:<22} {:<18} {:>6} {:>8}",
        "SLUG", "TITLE", "SUBJECT", "SCENES", "MINIMUM"
    )];
    for lesson in library.lessons() {
        lines.push(format!(
            "{:<20} {:<22} {:<18} {:>6} {:>8}",
            lesson.slug,
            lesson.title,
            lesson.subject,
            lesson.scene_count(),
            seconds(lesson.total_min_duration())
        ));
    }
    for entry in library.gallery() {
        if !library.is_authored(entry) {
            lines.push(format!(
                "{:<20} {:<22} {:<18} {:>6} {:>8}",
                "(generated)",
                entry.title,
                entry.subject,
                1,
                seconds(Duration::from_millis(lucid_lessons::GENERIC_SCENE_DURATION_MS))
            ));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use lucid_core::{Scene, SceneCatalog, SceneId};

    fn catalog() -> SceneCatalog {
        SceneCatalog::new(vec![
            Scene::new(1, 100, "one two three four five six"),
            Scene::new(2, 100, ""),
        ])
        .unwrap()
    }

    fn frame<'a>(catalog: &'a SceneCatalog, scene: u32, is_playing: bool) -> SceneFrame<'a> {
        SceneFrame {
            title: "Demo",
            catalog,
            scene_id: SceneId(scene),
            is_playing,
        }
    }

    #[test]
    fn test_scene_frame() {
        let catalog = catalog();
        let lines = TerminalRenderer::new(16).render(&frame(&catalog, 1, true));
        assert_eq!(lines[1], "== Demo [1/2] ==");
        assert_eq!(lines[2], format!("[{}{}]", "#".repeat(12), "-".repeat(12)));
        assert_eq!(&lines[3..], ["one two three", "four five six"]);
    }

    #[test]
    fn test_silent_scene() {
        let catalog = catalog();
        let lines = TerminalRenderer::default().render(&frame(&catalog, 2, true));
        assert_eq!(lines.last().unwrap(), "(silence)");
    }

    #[test]
    fn test_idle_frame() {
        let catalog = catalog();
        let renderer = TerminalRenderer::default();
        assert_eq!(
            renderer.render(&frame(&catalog, 0, false)),
            vec!["== Demo (stopped) ==".to_string()]
        );
        assert_eq!(renderer.render(&frame(&catalog, 1, false)).len(), 1);
    }

    #[test]
    fn test_rendering_is_pure() {
        let catalog = catalog();
        let renderer = TerminalRenderer::default();
        let f = frame(&catalog, 1, true);
        assert_eq!(renderer.render(&f), renderer.render(&f));
    }

    #[test]
    fn test_long_word_gets_own_line() {
        assert_eq!(wrap("a incomprehensibilities b", 5), ["a", "incomprehensibilities", "b"]);
    }

    #[test]
    fn test_lesson_table_lists_generated_entries() {
        let library = LessonLibrary::builtin().unwrap();
        let table = lesson_table(&library);
        assert_eq!(table.len(), 1 + library.lessons().len() + 1);
        assert!(table.last().unwrap().contains("The Chain Rule"));
        assert!(table.iter().any(|line| line.starts_with("biogas") && line.contains("62s")));
    }
}
