use std::path::Path;

use anyhow::Context;
use clap::Parser;
use lucid_core::SceneCatalog;
use lucid_lessons::LessonLibrary;
use lucid_logging::LucidSubscriberBuilder;
use lucid_player::{
    Cli, Command, PlaybackOutcome, Player, PlayerConfig, PlayerOverrides, ScriptSource,
    TerminalRenderer, build_script, lesson_table, narration_engine,
};
use lucid_sequencer::{SceneSequencer, SequencerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = PlayerConfig::load_or_default(cli.config.as_deref())?
        .with_overrides(PlayerOverrides::from_cli(&cli))?;

    let _log_guard = LucidSubscriberBuilder::new()
        .with_config(config.logging.clone())
        .try_init()?;

    let library = LessonLibrary::builtin()?;

    match cli.command {
        Command::List => {
            for line in lesson_table(&library) {
                println!("{line}");
            }
        }

        Command::Play {
            lesson, catalog, ..
        } => {
            let source = match (lesson, catalog) {
                (_, Some(path)) => ScriptSource::Catalog(path),
                (Some(lesson), None) => ScriptSource::Lesson(lesson),
                (None, None) => anyhow::bail!("Nothing to play: give a lesson or --catalog"),
            };
            let script = build_script(&library, &source, &config)?;

            let handle =
                SceneSequencer::spawn(narration_engine(&config), SequencerConfig::default());
            let player = Player::new(handle.clone(), TerminalRenderer::default());

            let interrupt = async {
                // Without a signal handler, play until the end.
                if tokio::signal::ctrl_c().await.is_err() {
                    std::future::pending::<()>().await;
                }
            };
            let outcome = player
                .play(script, &mut std::io::stdout(), interrupt)
                .await?;
            handle.shutdown().await?;

            match outcome {
                PlaybackOutcome::Completed => println!("\nDone."),
                PlaybackOutcome::Interrupted => println!("\nStopped."),
            }
        }

        Command::Validate { path } => validate(&path)?,
    }

    Ok(())
}

fn validate(path: &Path) -> anyhow::Result<()> {
    let catalog = SceneCatalog::from_path(path)
        .with_context(|| format!("{} is not a valid catalog", path.display()))?;
    let silent = catalog.scenes().iter().filter(|s| !s.has_narration()).count();
    println!(
        "{}: {} scenes, {:.1}s minimum, {} silent",
        path.display(),
        catalog.len(),
        catalog.total_min_duration().as_secs_f64(),
        silent
    );
    Ok(())
}
