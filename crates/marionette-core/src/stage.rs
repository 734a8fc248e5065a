//! Stage Sequencer
//!
//! Top-level narrative state: which section is active, which level of the
//! skills mini-game is running, which skills have popped, and the mascot
//! expression those transitions imply. Pure routing — the sequencer holds no
//! animation timing of its own; burst lifetimes live on the shared timer set.

use crate::catalog::{SkillCatalog, MAX_SKILL_LEVEL, MIN_SKILL_LEVEL};
use crate::expression::Expression;
use crate::timers::{TimerKind, Timers};
use crate::TimePoint;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

/// Lifetime of a burst visual-effect record, in seconds.
pub const BURST_LIFETIME: f32 = 1.0;

/// Burst effects spawned per pop. Presentation-only.
pub const BURSTS_PER_POP: usize = 2;

/// Narrative sections of the experience, in scroll order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Section {
    /// Landing hero with the mascot front and center
    #[default]
    Hero,
    /// Skills mini-game
    Skills,
    /// Drag-to-scroll project gallery
    Gallery,
    /// Résumé / credentials
    Resume,
    /// Contact / outro
    Contact,
}

/// A short-lived visual effect spawned by a pop. Auto-expires via a
/// scheduled timer; not part of the core contract beyond its lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BurstEffect {
    /// Unique effect id, also carried by its expiry timer
    pub id: Uuid,
    /// Skill that spawned this burst
    pub skill_id: String,
    /// Scene time the burst was spawned at
    pub spawned_at: TimePoint,
}

/// Events published by the sequencer, drained by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StageEvent {
    /// A skill was revealed
    SkillPopped {
        /// Id of the revealed skill
        skill_id: String,
    },
    /// The active game level advanced
    LevelAdvanced {
        /// New level
        level: u8,
    },
    /// The mascot expression should change
    ExpressionChanged {
        /// New expression
        expression: Expression,
    },
    /// Every skill across every level has been revealed. Fires once.
    SectionComplete,
}

/// The fixed level → expression table.
pub fn expression_for_level(level: u8) -> Expression {
    match level {
        1 => Expression::Sad,
        2 => Expression::Neutral,
        _ => Expression::Happy,
    }
}

/// Narrative/game state and event routing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageSequencer {
    section: Section,
    level: u8,
    skills: SkillCatalog,
    expression: Expression,
    complete: bool,
    bursts: Vec<BurstEffect>,
    burst_lifetime: f32,
}

impl StageSequencer {
    /// Create a sequencer over a skill catalogue, starting at the hero
    /// section and level 1.
    pub fn new(skills: SkillCatalog) -> Self {
        Self::with_burst_lifetime(skills, BURST_LIFETIME)
    }

    /// Create a sequencer with a non-default burst lifetime.
    pub fn with_burst_lifetime(skills: SkillCatalog, burst_lifetime: f32) -> Self {
        Self {
            section: Section::default(),
            level: MIN_SKILL_LEVEL,
            skills,
            expression: Expression::default(),
            complete: false,
            bursts: Vec::new(),
            burst_lifetime,
        }
    }

    /// Handle one pop request from the shake detector.
    ///
    /// Pops the first remaining un-popped skill at the current level and
    /// spawns its burst effects. When none remains, advances the level
    /// (capped at 3) and requests the matching expression instead — that
    /// call pops nothing. Once everything is popped the completion signal
    /// latches and later pops are ignored.
    pub fn handle_pop(&mut self, now: TimePoint, timers: &mut Timers) -> Vec<StageEvent> {
        let mut events = Vec::new();

        if self.complete {
            debug!("pop ignored: section already complete");
            return events;
        }

        match self.skills.first_unpopped_at(self.level) {
            Some(id) => {
                let skill_id = id.to_string();
                self.skills.pop(&skill_id);
                info!(skill = %skill_id, level = self.level, "skill popped");
                self.spawn_bursts(&skill_id, now, timers);
                events.push(StageEvent::SkillPopped { skill_id });

                if self.skills.all_popped() {
                    self.complete = true;
                    info!("all skills popped");
                    events.push(StageEvent::SectionComplete);
                }
            }
            None => {
                if self.level < MAX_SKILL_LEVEL {
                    self.level += 1;
                    self.expression = expression_for_level(self.level);
                    info!(level = self.level, "skill level advanced");
                    events.push(StageEvent::LevelAdvanced { level: self.level });
                    events.push(StageEvent::ExpressionChanged {
                        expression: self.expression,
                    });
                }
            }
        }

        events
    }

    fn spawn_bursts(&mut self, skill_id: &str, now: TimePoint, timers: &mut Timers) {
        for _ in 0..BURSTS_PER_POP {
            let id = Uuid::new_v4();
            timers.schedule(
                TimerKind::BurstExpire { effect_id: id },
                now + self.burst_lifetime as TimePoint,
            );
            self.bursts.push(BurstEffect {
                id,
                skill_id: skill_id.to_string(),
                spawned_at: now,
            });
        }
    }

    /// Remove an expired burst effect. Called when its timer fires.
    pub fn expire_burst(&mut self, effect_id: Uuid) {
        self.bursts.retain(|b| b.id != effect_id);
    }

    /// Live burst effects.
    pub fn bursts(&self) -> &[BurstEffect] {
        &self.bursts
    }

    /// Move to a different narrative section. Entering the skills section
    /// seeds the expression from the level table.
    pub fn enter_section(&mut self, section: Section) -> Option<StageEvent> {
        if self.section == section {
            return None;
        }
        self.section = section;
        debug!(?section, "section entered");

        if section == Section::Skills {
            let expression = expression_for_level(self.level);
            if expression != self.expression {
                self.expression = expression;
                return Some(StageEvent::ExpressionChanged { expression });
            }
        }
        None
    }

    /// Active narrative section.
    pub fn section(&self) -> Section {
        self.section
    }

    /// Active skill level.
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Current expression requested by the narrative.
    pub fn expression(&self) -> Expression {
        self.expression
    }

    /// Whether the completion signal has latched.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Read-only view of the skill table.
    pub fn skills(&self) -> &SkillCatalog {
        &self.skills
    }
}
