//! Marionette - scroll-driven mascot narrative engine
//!
//! Headless driver: loads settings, validates the scene, replays a session
//! script through the engine and prints a summary.

#![warn(missing_docs)]

mod logging_setup;
mod script;
mod settings;

use anyhow::{bail, Context, Result};
use marionette_core::pointer::Viewport;
use marionette_core::{ensure_scene_valid, Catalog, IssueSeverity, SceneEngine, TextureResolver};
use script::SessionScript;
use settings::Settings;
use std::path::PathBuf;
use tracing::{info, warn};

struct Args {
    settings: Option<PathBuf>,
    script: Option<PathBuf>,
    json: bool,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        settings: None,
        script: None,
        json: false,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--settings" => {
                args.settings = Some(PathBuf::from(
                    iter.next().context("--settings requires a path")?,
                ));
            }
            "--script" => {
                args.script = Some(PathBuf::from(
                    iter.next().context("--script requires a path")?,
                ));
            }
            "--json" => args.json = true,
            other => bail!("unknown argument: {other}"),
        }
    }
    Ok(args)
}

fn main() -> Result<()> {
    let args = parse_args()?;

    let settings = match &args.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    let _log_guard = logging_setup::init(&settings.log)?;

    let catalog = Catalog::default();
    let resolver = TextureResolver::with_standard_faces();

    // Refuse to run on integrity errors; log the rest
    let issues = ensure_scene_valid(&catalog.skills, &resolver)
        .context("scene integrity check failed")?;
    for issue in &issues {
        match issue.severity {
            IssueSeverity::Warning => warn!("{}", issue.message),
            _ => info!("{}", issue.message),
        }
    }

    let script = match &args.script {
        Some(path) => SessionScript::load(path)?,
        None => SessionScript::demo(),
    };

    let mut engine = SceneEngine::with_resolver(
        settings.tuning,
        catalog,
        Viewport::new(1920.0, 1080.0),
        resolver,
    );
    engine.set_on_spin_complete(Box::new(|| info!("spin complete callback")));

    info!(
        events = script.events.len(),
        duration = script.duration,
        "replaying session"
    );
    let summary = script::replay(&script, &mut engine, 60.0);
    engine.teardown();

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?
        );
    } else {
        println!("session: {:.1}s simulated", summary.duration);
        println!(
            "skills popped ({}): {}",
            summary.skills_popped.len(),
            summary.skills_popped.join(", ")
        );
        println!(
            "level: {}  expression: {:?}  game complete: {}",
            summary.level, summary.expression, summary.game_complete
        );
        println!(
            "spins completed: {}  final progress: {:.2}",
            summary.spins_completed, summary.progress
        );
    }

    Ok(())
}
