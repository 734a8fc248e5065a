//! Scene Engine
//!
//! Owns one instance of every component and routes input events between
//! them. Input callbacks apply at most one state transition per component;
//! `tick` advances all time-dependent state once per frame. The rendering
//! runtime reads a [`MascotRig`] snapshot and never touches component state
//! directly.

use crate::catalog::Catalog;
use crate::config::Tuning;
use crate::expression::{Expression, FaceMaterial, TextureResolver};
use crate::mascot::{MascotCoordinator, MascotInputs, SpinState, SPIN_SENTINEL_DEG};
use crate::pointer::{HitTarget, HoverState, PointerTracker, Viewport};
use crate::progress::{ProgressModel, TrackGeometry};
use crate::shake::ShakeDetector;
use crate::stage::{BurstEffect, Section, StageEvent, StageSequencer};
use crate::timers::{TimerKind, Timers};
use crate::TimePoint;
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A discrete input callback from the host runtime.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Pointer moved to absolute pixel coordinates over `target`.
    PointerMove {
        /// Absolute x in pixels
        x: f32,
        /// Absolute y in pixels
        y: f32,
        /// Element under the cursor
        target: HitTarget,
    },
    /// Wheel notch with a signed pixel delta.
    Wheel {
        /// Signed wheel delta
        delta: f32,
    },
    /// A drag began on the gallery track.
    DragStart,
    /// Drag moved by a signed pixel delta.
    DragDelta {
        /// Signed drag delta
        delta: f32,
    },
    /// The drag was released.
    DragEnd,
    /// Click on `target`.
    Click {
        /// Element under the cursor
        target: HitTarget,
    },
}

/// Events drained by the host after input handling and ticking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EngineEvent {
    /// Narrative/game event from the sequencer
    Stage(StageEvent),
    /// A one-shot spin finished
    SpinCompleted,
}

/// Read-only render snapshot published once per frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MascotRig {
    /// Active face expression
    pub expression: Expression,
    /// Logical key of the currently applied face texture
    pub face_texture: Option<String>,
    /// Whether the head is following the pointer
    pub follow_mouse: bool,
    /// Fixed orientation in degrees when not following
    pub fixed_rotation_deg: Vec2,
    /// Spin parameter in degrees (360 while a spin is requested)
    pub spin_y_deg: f32,
    /// Tremor flag
    pub is_shaking: bool,
    /// Smoothed head rotation in radians
    pub rotation_rad: Vec3,
    /// Cursor styling state
    pub hover: HoverState,
    /// Spring-smoothed custom-cursor position in pixels
    pub cursor: (f32, f32),
    /// Smoothed track progress in [0, 1]
    pub progress: f32,
    /// Horizontal gallery offset in pixels (≤ 0)
    pub track_offset: f32,
    /// Progress-driven rotation angle in degrees
    pub rotation_angle_deg: f32,
    /// Progress indicator x position in pixels
    pub indicator_x: f32,
    /// Active narrative section
    pub section: Section,
    /// Active skill level
    pub level: u8,
    /// Live burst effects
    pub bursts: Vec<BurstEffect>,
}

/// The interactive scene: all components plus the routing between them.
pub struct SceneEngine {
    tuning: Tuning,
    clock: TimePoint,
    pointer: PointerTracker,
    progress: ProgressModel,
    shake: ShakeDetector,
    mascot: MascotCoordinator,
    stage: StageSequencer,
    timers: Timers,
    resolver: TextureResolver,
    face: FaceMaterial,
    spin_y_deg: f32,
    dragging: bool,
    events: Vec<EngineEvent>,
    on_spin_complete: Option<Box<dyn FnMut() + Send>>,
}

impl SceneEngine {
    /// Create an engine over a catalogue and viewport, with standard faces
    /// registered.
    pub fn new(tuning: Tuning, catalog: Catalog, viewport: Viewport) -> Self {
        Self::with_resolver(
            tuning,
            catalog,
            viewport,
            TextureResolver::with_standard_faces(),
        )
    }

    /// Create an engine with an explicit texture registry.
    pub fn with_resolver(
        tuning: Tuning,
        catalog: Catalog,
        viewport: Viewport,
        resolver: TextureResolver,
    ) -> Self {
        let mascot = MascotCoordinator::with_timing(
            tuning.spin_duration,
            tuning.rotation_smoothing,
            tuning.shake_jitter_rad,
        );
        let mut face = FaceMaterial::new();
        face.apply(&resolver, Expression::default());

        Self {
            clock: 0.0,
            pointer: PointerTracker::new(viewport, tuning.pointer_spring),
            progress: ProgressModel::new(TrackGeometry::default(), tuning.progress_spring),
            shake: ShakeDetector::new(tuning.shake),
            mascot,
            stage: StageSequencer::with_burst_lifetime(catalog.skills, tuning.burst_lifetime),
            timers: Timers::new(),
            resolver,
            face,
            spin_y_deg: 0.0,
            dragging: false,
            events: Vec::new(),
            on_spin_complete: None,
            tuning,
        }
    }

    /// Register the spin-completion callback. Invoked with no arguments
    /// exactly once per completed spin.
    pub fn set_on_spin_complete(&mut self, callback: Box<dyn FnMut() + Send>) {
        self.on_spin_complete = Some(callback);
    }

    /// Route one input event. At most one state transition per component.
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerMove { x, y, target } => {
                self.pointer.sample(x, y, self.clock, target);

                // The shake game only runs while the skills section is active
                if self.stage.section() == Section::Skills {
                    let sample = self.shake.sample(x, y, self.clock);
                    if sample.qualified {
                        // A fresh qualifying sample supersedes the pending reset
                        self.timers
                            .cancel_where(|k| matches!(k, TimerKind::ShakeFlagClear));
                        self.timers.schedule(
                            TimerKind::ShakeFlagClear,
                            self.clock + self.tuning.shake.flag_duration as TimePoint,
                        );
                    }
                    if sample.pop {
                        let events = self.stage.handle_pop(self.clock, &mut self.timers);
                        self.route_stage_events(events);
                    }
                }
            }
            InputEvent::Wheel { delta } => {
                self.progress.apply_delta(delta, self.tuning.wheel_sensitivity);
            }
            InputEvent::DragStart => {
                self.dragging = true;
            }
            InputEvent::DragDelta { delta } => {
                if self.dragging {
                    self.progress.apply_delta(delta, self.tuning.drag_sensitivity);
                }
            }
            InputEvent::DragEnd => {
                self.dragging = false;
            }
            InputEvent::Click { target } => {
                if target == HitTarget::MascotHead {
                    self.request_spin();
                }
            }
        }
    }

    /// Set the raw spin parameter from the render surface. 360 is the
    /// trigger sentinel; any other value re-arms the edge.
    pub fn set_spin_y(&mut self, degrees: f32) {
        self.spin_y_deg = degrees;
    }

    /// Assert the spin request sentinel.
    pub fn request_spin(&mut self) {
        self.spin_y_deg = SPIN_SENTINEL_DEG;
    }

    /// Move the narrative to `section`.
    pub fn enter_section(&mut self, section: Section) {
        let leaving_skills = self.stage.section() == Section::Skills && section != Section::Skills;
        if leaving_skills {
            // Sample history is meaningless outside the game; drop it along
            // with any pending flag reset.
            self.shake.reset();
            self.timers
                .cancel_where(|k| matches!(k, TimerKind::ShakeFlagClear));
        }

        if let Some(event) = self.stage.enter_section(section) {
            self.route_stage_events(vec![event]);
        }
    }

    /// Advance the scene by one frame of `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        self.clock += dt as TimePoint;

        for fired in self.timers.fire_due(self.clock) {
            match fired.kind {
                TimerKind::ShakeFlagClear => self.shake.clear_shaking(),
                TimerKind::BurstExpire { effect_id } => self.stage.expire_burst(effect_id),
            }
        }

        self.progress.tick(dt);
        self.pointer.tick(dt);

        let inputs = self.mascot_inputs();
        let frame = self.mascot.update(&inputs, self.pointer.normalized(), dt);
        if frame.spin_completed {
            // The sentinel has served its purpose; drop the request so the
            // next assert is a fresh edge.
            self.spin_y_deg = 0.0;
            self.events.push(EngineEvent::SpinCompleted);
            if let Some(callback) = self.on_spin_complete.as_mut() {
                callback();
            }
        }
    }

    fn mascot_inputs(&self) -> MascotInputs {
        // The gallery pins the head to a fixed pose driven by drag progress;
        // every other section follows the pointer.
        let (follow_pointer, fixed_rotation_deg) = match self.stage.section() {
            Section::Gallery => (false, Vec2::new(0.0, self.progress.rotation_angle())),
            _ => (true, Vec2::ZERO),
        };
        MascotInputs {
            follow_pointer,
            fixed_rotation_deg,
            spin_y_deg: self.spin_y_deg,
            is_shaking: self.shake.is_shaking(),
        }
    }

    fn route_stage_events(&mut self, events: Vec<StageEvent>) {
        for event in events {
            if let StageEvent::ExpressionChanged { expression } = &event {
                self.mascot.set_expression(*expression);
                self.face.apply(&self.resolver, *expression);
            }
            self.events.push(EngineEvent::Stage(event));
        }
    }

    /// Drain events accumulated since the last call.
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    /// Publish the per-frame render snapshot.
    pub fn rig(&self) -> MascotRig {
        let inputs = self.mascot_inputs();
        MascotRig {
            expression: self.mascot.expression(),
            face_texture: self.face.texture().map(|t| t.key.clone()),
            follow_mouse: inputs.follow_pointer,
            fixed_rotation_deg: inputs.fixed_rotation_deg,
            spin_y_deg: inputs.spin_y_deg,
            is_shaking: inputs.is_shaking,
            rotation_rad: self.mascot.rotation(),
            hover: self.pointer.hover(),
            cursor: self.pointer.cursor(),
            progress: self.progress.smoothed(),
            track_offset: self.progress.track_offset(),
            rotation_angle_deg: self.progress.rotation_angle(),
            indicator_x: self.progress.indicator_x(),
            section: self.stage.section(),
            level: self.stage.level(),
            bursts: self.stage.bursts().to_vec(),
        }
    }

    /// Current scene clock, seconds since engine creation.
    pub fn clock(&self) -> TimePoint {
        self.clock
    }

    /// Current spin timeline state.
    pub fn spin_state(&self) -> SpinState {
        self.mascot.spin_state()
    }

    /// Read-only sequencer view.
    pub fn stage(&self) -> &StageSequencer {
        &self.stage
    }

    /// Pending timer count (scheduled, not yet fired).
    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    /// Tear the scene down: cancel every pending timer so nothing fires
    /// after the consuming state is gone.
    pub fn teardown(&mut self) {
        debug!(pending = self.timers.pending(), "scene teardown");
        self.timers.clear();
        self.shake.reset();
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn engine() -> SceneEngine {
        SceneEngine::new(
            Tuning::default(),
            Catalog::default(),
            Viewport::new(1920.0, 1080.0),
        )
    }

    #[test]
    fn test_wheel_moves_progress() {
        let mut e = engine();
        e.handle_input(InputEvent::Wheel { delta: 400.0 });
        for _ in 0..240 {
            e.tick(DT);
        }
        let rig = e.rig();
        assert!(rig.progress > 0.0);
        assert!(rig.track_offset <= 0.0);
    }

    #[test]
    fn test_drag_requires_drag_start() {
        let mut e = engine();
        e.handle_input(InputEvent::DragDelta { delta: 500.0 });
        for _ in 0..60 {
            e.tick(DT);
        }
        assert_eq!(e.rig().progress, 0.0);

        e.handle_input(InputEvent::DragStart);
        e.handle_input(InputEvent::DragDelta { delta: 500.0 });
        e.handle_input(InputEvent::DragEnd);
        for _ in 0..240 {
            e.tick(DT);
        }
        assert!(e.rig().progress > 0.0);
    }

    #[test]
    fn test_click_on_head_spins_and_completes_once() {
        let mut e = engine();
        let mut completions = 0;

        e.handle_input(InputEvent::Click {
            target: HitTarget::MascotHead,
        });
        for _ in 0..150 {
            e.tick(DT);
            for event in e.drain_events() {
                if event == EngineEvent::SpinCompleted {
                    completions += 1;
                }
            }
        }

        assert_eq!(completions, 1);
        assert_eq!(e.spin_state(), SpinState::Idle);
        // Request auto-drops on completion, so a new click re-arms cleanly
        assert_eq!(e.rig().spin_y_deg, 0.0);
    }

    #[test]
    fn test_shakes_pop_skills_only_in_skills_section() {
        let mut e = engine();

        // Not in the skills section: shaking does nothing
        shake_three_times(&mut e, 0);
        assert!(e.stage().skills().popped_ids().is_empty());

        e.enter_section(Section::Skills);
        shake_three_times(&mut e, 10);
        assert_eq!(e.stage().skills().popped_ids(), vec!["html"]);
    }

    fn shake_three_times(e: &mut SceneEngine, base_ticks: u32) {
        for _ in 0..base_ticks {
            e.tick(DT);
        }
        // Alternate far-apart positions, >100ms between samples
        for i in 0..4 {
            let x = if i % 2 == 0 { 0.0 } else { 50.0 };
            e.handle_input(InputEvent::PointerMove {
                x,
                y: 0.0,
                target: HitTarget::None,
            });
            for _ in 0..9 {
                e.tick(DT); // 150ms between samples
            }
        }
    }

    #[test]
    fn test_gallery_pins_head_to_progress_rotation() {
        let mut e = engine();
        e.enter_section(Section::Gallery);
        e.handle_input(InputEvent::Wheel { delta: 2000.0 });
        for _ in 0..240 {
            e.tick(DT);
        }
        let rig = e.rig();
        assert!(!rig.follow_mouse);
        assert!((rig.fixed_rotation_deg.y - rig.rotation_angle_deg).abs() < 1e-3);
    }

    #[test]
    fn test_teardown_cancels_pending_timers() {
        let mut e = engine();
        e.enter_section(Section::Skills);
        shake_three_times(&mut e, 0);
        assert!(e.pending_timers() > 0); // burst expiries

        e.teardown();
        assert_eq!(e.pending_timers(), 0);
        // Ticking on never fires stale timers
        for _ in 0..120 {
            e.tick(DT);
        }
        assert!(e.drain_events().is_empty());
    }
}
