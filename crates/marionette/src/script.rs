//! Session scripts
//!
//! A session script is a RON file of timed commands replayed through the
//! engine at a fixed tick rate — the headless stand-in for the rendering
//! runtime's input callbacks and frame loop.

use anyhow::{Context, Result};
use marionette_core::engine::{EngineEvent, InputEvent, SceneEngine};
use marionette_core::stage::{Section, StageEvent};
use marionette_core::Expression;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// One scripted command.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ScriptCommand {
    /// Deliver an input event
    Input(InputEvent),
    /// Move the narrative to a section
    EnterSection(Section),
    /// Assert the spin request sentinel
    RequestSpin,
}

/// A command scheduled at an absolute session time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScriptedEvent {
    /// Session time in seconds
    pub at: f64,
    /// What to do
    pub command: ScriptCommand,
}

/// A replayable session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionScript {
    /// Total session length in seconds
    pub duration: f64,
    /// Timed commands; replay sorts them by time
    pub events: Vec<ScriptedEvent>,
}

impl SessionScript {
    /// Load a script from a RON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script: {:?}", path))?;
        ron::from_str(&text).with_context(|| format!("Failed to parse script: {:?}", path))
    }

    /// A built-in demo: a welcome spin, the full skills game, a gallery
    /// drag.
    pub fn demo() -> Self {
        let mut events = vec![
            ScriptedEvent {
                at: 0.2,
                command: ScriptCommand::Input(InputEvent::PointerMove {
                    x: 1200.0,
                    y: 400.0,
                    target: marionette_core::HitTarget::MascotHead,
                }),
            },
            ScriptedEvent {
                at: 0.5,
                command: ScriptCommand::RequestSpin,
            },
            ScriptedEvent {
                at: 2.5,
                command: ScriptCommand::EnterSection(Section::Skills),
            },
        ];

        // A baseline sample plus 25 brisk alternating ones: at least 24
        // qualifying shakes, enough to finish the whole game (6 pops + 2
        // level advances)
        for i in 0..26 {
            events.push(ScriptedEvent {
                at: 3.0 + i as f64 * 0.15,
                command: ScriptCommand::Input(InputEvent::PointerMove {
                    x: if i % 2 == 0 { 600.0 } else { 660.0 },
                    y: 400.0,
                    target: marionette_core::HitTarget::None,
                }),
            });
        }

        events.extend([
            ScriptedEvent {
                at: 8.0,
                command: ScriptCommand::EnterSection(Section::Gallery),
            },
            ScriptedEvent {
                at: 8.2,
                command: ScriptCommand::Input(InputEvent::DragStart),
            },
            ScriptedEvent {
                at: 8.3,
                command: ScriptCommand::Input(InputEvent::DragDelta { delta: 700.0 }),
            },
            ScriptedEvent {
                at: 8.6,
                command: ScriptCommand::Input(InputEvent::DragEnd),
            },
        ]);

        Self {
            duration: 10.0,
            events,
        }
    }
}

/// What happened over a replayed session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplaySummary {
    /// Simulated session length in seconds
    pub duration: f64,
    /// Skills revealed, in pop order
    pub skills_popped: Vec<String>,
    /// Final game level
    pub level: u8,
    /// Final mascot expression
    pub expression: Expression,
    /// Completed one-shot spins
    pub spins_completed: usize,
    /// Whether the skills game finished
    pub game_complete: bool,
    /// Final track progress
    pub progress: f32,
}

/// Replay a script through `engine` at `tick_hz` frames per second.
pub fn replay(script: &SessionScript, engine: &mut SceneEngine, tick_hz: f32) -> ReplaySummary {
    let dt = 1.0 / tick_hz;
    let mut pending: Vec<ScriptedEvent> = script.events.clone();
    pending.sort_by(|a, b| a.at.total_cmp(&b.at));
    pending.reverse(); // pop from the back in time order

    let mut skills_popped = Vec::new();
    let mut spins_completed = 0;

    while engine.clock() < script.duration {
        while let Some(ev) = pending.last().copied() {
            if ev.at > engine.clock() {
                break;
            }
            pending.pop();
            match ev.command {
                ScriptCommand::Input(input) => engine.handle_input(input),
                ScriptCommand::EnterSection(section) => engine.enter_section(section),
                ScriptCommand::RequestSpin => engine.request_spin(),
            }
        }

        engine.tick(dt);

        for event in engine.drain_events() {
            match event {
                EngineEvent::SpinCompleted => spins_completed += 1,
                EngineEvent::Stage(StageEvent::SkillPopped { skill_id }) => {
                    skills_popped.push(skill_id);
                }
                EngineEvent::Stage(stage_event) => {
                    info!(?stage_event, t = engine.clock(), "stage event");
                }
            }
        }
    }

    let rig = engine.rig();
    ReplaySummary {
        duration: engine.clock(),
        skills_popped,
        level: rig.level,
        expression: rig.expression,
        spins_completed,
        game_complete: engine.stage().is_complete(),
        progress: rig.progress,
    }
}
