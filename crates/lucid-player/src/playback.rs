//! Playing one script to the terminal
//!
//! The [`Player`] only observes the sequencer: it draws every scene named by a
//! `SceneEntered` event and never feeds anything back into timing.

use std::future::Future;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use lucid_core::{NarrationEngine, SceneCatalog, SceneFrame, SceneId, SceneRenderer, Script};
use lucid_lessons::LessonLibrary;
use lucid_sequencer::{
    SequencerError, SequencerEvent, SequencerHandle, SimulatedNarrationEngine,
    UnavailableNarrationEngine,
};
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::oneshot;
use tracing::{info, warn};

use crate::config::PlayerConfig;
use crate::error::{PlayerError, PlayerResult};

/// Where the scenes to play come from
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptSource {
    /// A lesson slug or gallery title
    Lesson(String),
    /// A JSON or TOML catalog file
    Catalog(PathBuf),
}

/// How a playback ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackOutcome {
    /// The last scene finished
    Completed,
    /// Playback was stopped before the end
    Interrupted,
}

/// Build the script for `source`, applying voice and speed from `config`
pub fn build_script(
    library: &LessonLibrary,
    source: &ScriptSource,
    config: &PlayerConfig,
) -> PlayerResult<Script> {
    let mut script = match source {
        ScriptSource::Lesson(query) => library.resolve(query),
        ScriptSource::Catalog(path) => {
            let catalog = SceneCatalog::from_path(path)?;
            let title = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            Script::new(title, catalog)
        }
    };

    if let Some(voice) = &config.narration.voice {
        script = script.with_voice(voice.clone().clamped());
    }

    let speed = config.playback.speed;
    if speed != 1.0 {
        script.catalog = Arc::new(script.catalog.scaled(speed));
    }
    Ok(script)
}

/// The narration engine `config` asks for
pub fn narration_engine(config: &PlayerConfig) -> Arc<dyn NarrationEngine> {
    if config.narration.enabled {
        Arc::new(
            SimulatedNarrationEngine::new(config.narration.words_per_minute)
                .with_speed(config.playback.speed),
        )
    } else {
        Arc::new(UnavailableNarrationEngine)
    }
}

/// Plays scripts on a sequencer and draws each scene as it is entered
pub struct Player<R> {
    handle: SequencerHandle,
    renderer: R,
}

impl<R: SceneRenderer> Player<R> {
    pub fn new(handle: SequencerHandle, renderer: R) -> Self {
        Self { handle, renderer }
    }

    /// Play `script` to the end, or until `interrupt` resolves
    ///
    /// On interruption the sequencer is deactivated, which cancels the
    /// pending timer and any narration in flight.
    pub async fn play<W: Write>(
        &self,
        script: Script,
        out: &mut W,
        interrupt: impl Future<Output = ()>,
    ) -> PlayerResult<PlaybackOutcome> {
        let mut events = self.handle.subscribe();
        let (done_tx, mut done_rx) = oneshot::channel();

        info!(lesson = %script.title, scenes = script.catalog.len(), "Starting playback");
        self.handle
            .activate_with_callback(script.clone(), move || {
                let _ = done_tx.send(());
            })
            .await?;

        let mut drawn = SceneId::IDLE;
        tokio::pin!(interrupt);
        loop {
            tokio::select! {
                biased;
                () = &mut interrupt => {
                    self.handle.deactivate().await?;
                    let frame = SceneFrame {
                        title: &script.title,
                        catalog: &script.catalog,
                        scene_id: SceneId::IDLE,
                        is_playing: false,
                    };
                    write_lines(out, &self.renderer.render(&frame))?;
                    info!(lesson = %script.title, scene_id = %drawn, "Playback interrupted");
                    return Ok(PlaybackOutcome::Interrupted);
                }
                // Drained ahead of `done_rx` so the last scenes are drawn
                // before completion is reported.
                event = events.recv() => match event {
                    Ok(SequencerEvent::SceneEntered { title, scene_id, .. })
                        if title == script.title =>
                    {
                        self.draw(&script, scene_id, out)?;
                        drawn = scene_id;
                    }
                    Ok(_) => {}
                    Err(RecvError::Lagged(missed)) => {
                        warn!(
                            lesson = %script.title,
                            missed,
                            "Renderer fell behind, scenes skipped"
                        );
                    }
                    Err(RecvError::Closed) => return Err(SequencerError::Stopped.into()),
                },
                finished = &mut done_rx => {
                    return Ok(match finished {
                        Ok(()) => {
                            info!(lesson = %script.title, "Playback completed");
                            PlaybackOutcome::Completed
                        }
                        // The run was replaced or stopped by another handle.
                        Err(_) => PlaybackOutcome::Interrupted,
                    });
                }
            }
        }
    }

    fn draw<W: Write>(&self, script: &Script, scene_id: SceneId, out: &mut W) -> PlayerResult<()> {
        let frame = SceneFrame {
            title: &script.title,
            catalog: &script.catalog,
            scene_id,
            is_playing: true,
        };
        write_lines(out, &self.renderer.render(&frame))
    }
}

fn write_lines<W: Write>(out: &mut W, lines: &[String]) -> Result<(), PlayerError> {
    for line in lines {
        writeln!(out, "{line}")?;
    }
    out.flush()?;
    Ok(())
}
