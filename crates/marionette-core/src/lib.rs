//! Marionette Core - Choreography Domain Model
//!
//! This crate contains the interaction/animation core for the Marionette
//! experience, including:
//! - Scroll/drag progress model with spring smoothing
//! - Shake gesture detection and the skills mini-game
//! - Mascot rotation/spin/expression coordination
//! - Stage sequencing and scene composition
//!
//! Rendering, asset loading and windowing are external collaborators; the
//! engine publishes read-only snapshots and consumes discrete input events.

#![warn(missing_docs)]

pub use glam::{Vec2, Vec3};
use thiserror::Error;

pub mod catalog;
pub mod config;
pub mod diagnostics;
pub mod ease;
pub mod engine;
pub mod expression;
pub mod logging;
pub mod mascot;
pub mod pointer;
pub mod progress;
pub mod shake;
pub mod spring;
pub mod stage;
pub mod timers;

/// Monotonic scene time in seconds.
pub type TimePoint = f64;

// --- Re-exports grouped by category ---

// Catalogue
pub use catalog::{
    Catalog, ProjectEntry, ProjectLink, ResumeEntry, SkillCatalog, SkillEntry, MAX_SKILL_LEVEL,
    MIN_SKILL_LEVEL,
};

// Configuration & Logging
pub use config::Tuning;
pub use logging::LogConfig;

// Diagnostics
pub use diagnostics::{check_scene_integrity, ensure_scene_valid, IssueSeverity, SceneIssue};

// Engine & Events
pub use engine::{EngineEvent, InputEvent, MascotRig, SceneEngine};

// Expression
pub use expression::{Expression, FaceMaterial, TextureHandle, TextureResolver};

// Mascot
pub use mascot::{
    MascotCoordinator, MascotFrame, MascotInputs, SpinState, ROTATION_SMOOTHING,
    SHAKE_JITTER_RAD, SPIN_DURATION, SPIN_SENTINEL_DEG,
};

// Pointer
pub use pointer::{HitTarget, HoverState, PointerSample, PointerTracker, Viewport};

// Progress
pub use progress::{rotation_angle, ProgressModel, TrackGeometry, FULL_RANGE_ROTATION_DEG};

// Shake
pub use shake::{ShakeConfig, ShakeDetector, ShakeSample};

// Smoothing
pub use spring::{Spring, SpringParams};

// Stage
pub use stage::{
    expression_for_level, BurstEffect, Section, StageEvent, StageSequencer, BURSTS_PER_POP,
    BURST_LIFETIME,
};

// Timers
pub use timers::{TimerEvent, TimerId, TimerKind, Timers};

/// Core error types
#[derive(Error, Debug)]
pub enum CoreError {
    /// A tuning value is out of its valid range
    #[error("invalid tuning value for {name}: {value}")]
    InvalidTuning {
        /// Field name
        name: &'static str,
        /// Offending value
        value: f32,
    },

    /// The static catalogue is inconsistent
    #[error("invalid catalogue: {0}")]
    InvalidCatalog(String),

    /// A texture was registered with an empty asset key
    #[error("empty texture key for expression '{}'", .expression.asset_key())]
    EmptyTextureKey {
        /// Expression the registration was for
        expression: Expression,
    },
}
