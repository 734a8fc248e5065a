//! Mascot Animation Coordinator
//!
//! Owns the mascot head's rotation state: the continuous pointer-follow (or
//! fixed-orientation) target, the per-frame exponential smoothing toward it,
//! the one-shot 360° spin timeline, and the shake tremor. The coordinator is
//! driven once per rendered frame regardless of input event rate.

use crate::ease::cubic_in_out;
use crate::expression::Expression;
use glam::{Vec2, Vec3};
use rand::RngExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// The spin parameter value that triggers a full spin.
///
/// The render surface overloads "target angle" with "command to spin": a
/// caller that wants a static 360° orientation triggers a spin instead. The
/// sentinel decode is confined to [`MascotInputs::spin_requested`].
pub const SPIN_SENTINEL_DEG: f32 = 360.0;

/// Duration of the one-shot spin, in seconds.
pub const SPIN_DURATION: f32 = 1.5;

/// Per-frame exponential smoothing factor toward the rotation target.
pub const ROTATION_SMOOTHING: f32 = 0.12;

/// Tremor amplitude applied per axis while shaking, in radians.
pub const SHAKE_JITTER_RAD: f32 = 0.06;

/// Render-surface inputs consumed by the coordinator each frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MascotInputs {
    /// Follow the pointer instead of the fixed orientation.
    pub follow_pointer: bool,
    /// Fixed orientation (x, y) in degrees, used when not following.
    pub fixed_rotation_deg: Vec2,
    /// Spin parameter in degrees; [`SPIN_SENTINEL_DEG`] requests a spin.
    pub spin_y_deg: f32,
    /// Tremor flag from the shake detector.
    pub is_shaking: bool,
}

impl Default for MascotInputs {
    fn default() -> Self {
        Self {
            follow_pointer: true,
            fixed_rotation_deg: Vec2::ZERO,
            spin_y_deg: 0.0,
            is_shaking: false,
        }
    }
}

impl MascotInputs {
    /// Whether the spin parameter currently carries the trigger sentinel.
    pub fn spin_requested(&self) -> bool {
        self.spin_y_deg == SPIN_SENTINEL_DEG
    }
}

/// Spin timeline state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SpinState {
    /// No spin in flight
    Idle,
    /// A spin is running; `elapsed` seconds into the timeline
    Spinning {
        /// Seconds since the spin started
        elapsed: f32,
    },
}

/// Per-frame output of [`MascotCoordinator::update`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MascotFrame {
    /// A spin finished on this frame. Fires exactly once per spin.
    pub spin_completed: bool,
}

/// State machine driving the mascot head's rotation and expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MascotCoordinator {
    state: SpinState,
    spin_offset_deg: f32,
    actual: Vec3,
    prev_spin_request: bool,
    expression: Expression,
    spin_duration: f32,
    smoothing: f32,
    jitter_rad: f32,
}

impl MascotCoordinator {
    /// Create a coordinator at rest, facing forward, neutral expression.
    pub fn new() -> Self {
        Self::with_timing(SPIN_DURATION, ROTATION_SMOOTHING, SHAKE_JITTER_RAD)
    }

    /// Create a coordinator with explicit timing/tuning values.
    pub fn with_timing(spin_duration: f32, smoothing: f32, jitter_rad: f32) -> Self {
        Self {
            state: SpinState::Idle,
            spin_offset_deg: 0.0,
            actual: Vec3::ZERO,
            prev_spin_request: false,
            expression: Expression::default(),
            spin_duration,
            smoothing,
            jitter_rad,
        }
    }

    /// Advance one rendered frame.
    ///
    /// `pointer` is the normalized pointer offset in `[-0.5, 0.5]` per axis,
    /// `dt` the frame delta in seconds.
    pub fn update(&mut self, inputs: &MascotInputs, pointer: (f32, f32), dt: f32) -> MascotFrame {
        let mut frame = MascotFrame::default();

        // Edge-triggered spin start: the request must drop and re-assert
        // before a second spin can begin.
        let requested = inputs.spin_requested();
        if requested && !self.prev_spin_request && matches!(self.state, SpinState::Idle) {
            self.state = SpinState::Spinning { elapsed: 0.0 };
            debug!("spin started");
        }
        self.prev_spin_request = requested;

        // Advance the spin timeline.
        if let SpinState::Spinning { elapsed } = self.state {
            let elapsed = elapsed + dt;
            let p = (elapsed / self.spin_duration).clamp(0.0, 1.0);
            self.spin_offset_deg = cubic_in_out(p) * 360.0;

            if p >= 1.0 {
                self.state = SpinState::Idle;
                self.spin_offset_deg = 0.0;
                frame.spin_completed = true;
                info!("spin completed");
            } else {
                self.state = SpinState::Spinning { elapsed };
            }
        }

        // Compute the rotation target in radians.
        let spin_rad = self.spin_offset_deg.to_radians();
        let mut target = if inputs.follow_pointer {
            let (x_norm, y_norm) = pointer;
            Vec3::new(
                -y_norm * 0.4,
                x_norm * 0.8 + spin_rad,
                -x_norm * 0.2,
            )
        } else {
            Vec3::new(
                inputs.fixed_rotation_deg.x.to_radians(),
                inputs.fixed_rotation_deg.y.to_radians() + spin_rad,
                0.0,
            )
        };

        // Tremor: additive jitter on the target, never on the stored state.
        if inputs.is_shaking {
            let mut rng = rand::rng();
            target.x += rng.random_range(-self.jitter_rad..=self.jitter_rad);
            target.y += rng.random_range(-self.jitter_rad..=self.jitter_rad);
            target.z += rng.random_range(-self.jitter_rad..=self.jitter_rad);
        }

        // Exponential convergence toward the target, independently per axis.
        self.actual += (target - self.actual) * self.smoothing;

        frame
    }

    /// Current smoothed rotation in radians.
    pub fn rotation(&self) -> Vec3 {
        self.actual
    }

    /// Current spin timeline state.
    pub fn spin_state(&self) -> SpinState {
        self.state
    }

    /// Current additive spin offset in degrees.
    pub fn spin_offset_deg(&self) -> f32 {
        self.spin_offset_deg
    }

    /// Current face expression.
    pub fn expression(&self) -> Expression {
        self.expression
    }

    /// Swap the face expression. Only the face texture changes downstream;
    /// geometry, body color and lighting are untouched.
    pub fn set_expression(&mut self, expression: Expression) {
        if self.expression != expression {
            debug!(from = ?self.expression, to = ?expression, "expression changed");
            self.expression = expression;
        }
    }
}

impl Default for MascotCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn spin_inputs() -> MascotInputs {
        MascotInputs {
            spin_y_deg: SPIN_SENTINEL_DEG,
            ..MascotInputs::default()
        }
    }

    #[test]
    fn test_spin_completes_exactly_once() {
        let mut mascot = MascotCoordinator::new();
        let inputs = spin_inputs();

        let mut completions = 0;
        // 2 simulated seconds at 60 Hz covers the 1.5s timeline
        for _ in 0..120 {
            if mascot.update(&inputs, (0.0, 0.0), DT).spin_completed {
                completions += 1;
            }
        }

        assert_eq!(completions, 1);
        assert_eq!(mascot.spin_state(), SpinState::Idle);
        assert_eq!(mascot.spin_offset_deg(), 0.0);
    }

    #[test]
    fn test_held_request_does_not_restart_spin() {
        let mut mascot = MascotCoordinator::new();
        let inputs = spin_inputs();

        for _ in 0..120 {
            mascot.update(&inputs, (0.0, 0.0), DT);
        }
        // Request still asserted after completion: no new spin
        for _ in 0..30 {
            let frame = mascot.update(&inputs, (0.0, 0.0), DT);
            assert!(!frame.spin_completed);
            assert_eq!(mascot.spin_state(), SpinState::Idle);
        }
    }

    #[test]
    fn test_reasserted_request_spins_again() {
        let mut mascot = MascotCoordinator::new();

        for _ in 0..120 {
            mascot.update(&spin_inputs(), (0.0, 0.0), DT);
        }
        // Drop the request for one frame, then re-assert
        mascot.update(&MascotInputs::default(), (0.0, 0.0), DT);
        mascot.update(&spin_inputs(), (0.0, 0.0), DT);
        assert!(matches!(mascot.spin_state(), SpinState::Spinning { .. }));
    }

    #[test]
    fn test_request_while_spinning_is_ignored() {
        let mut mascot = MascotCoordinator::new();
        let inputs = spin_inputs();

        mascot.update(&inputs, (0.0, 0.0), DT);
        let mid_state = mascot.spin_state();
        assert!(matches!(mid_state, SpinState::Spinning { .. }));

        // Drop and re-assert mid-spin: still only one spin in flight
        mascot.update(&MascotInputs::default(), (0.0, 0.0), DT);
        let mut completions = 0;
        for _ in 0..120 {
            if mascot.update(&inputs, (0.0, 0.0), DT).spin_completed {
                completions += 1;
            }
        }
        // The re-assert lands while Spinning so it is swallowed; after the
        // first spin completes the held request stays edge-blocked.
        assert_eq!(completions, 1);
    }

    #[test]
    fn test_rotation_converges_toward_pointer_target() {
        let mut mascot = MascotCoordinator::new();
        let inputs = MascotInputs::default();

        for _ in 0..300 {
            mascot.update(&inputs, (0.5, -0.5), DT);
        }

        let rot = mascot.rotation();
        assert!((rot.x - 0.2).abs() < 1e-3); // -(-0.5) * 0.4
        assert!((rot.y - 0.4).abs() < 1e-3); // 0.5 * 0.8
        assert!((rot.z - -0.1).abs() < 1e-3); // -0.5 * 0.2
    }

    #[test]
    fn test_fixed_rotation_converges_to_configured_degrees() {
        let mut mascot = MascotCoordinator::new();
        let inputs = MascotInputs {
            follow_pointer: false,
            fixed_rotation_deg: Vec2::new(10.0, 45.0),
            spin_y_deg: 0.0,
            is_shaking: false,
        };

        for _ in 0..300 {
            mascot.update(&inputs, (0.3, 0.3), DT);
        }

        let rot = mascot.rotation();
        assert!((rot.x - 10.0_f32.to_radians()).abs() < 1e-3);
        assert!((rot.y - 45.0_f32.to_radians()).abs() < 1e-3);
        assert!(rot.z.abs() < 1e-3);
    }

    #[test]
    fn test_spin_offset_rises_through_midpoint() {
        let mut mascot = MascotCoordinator::new();
        let inputs = spin_inputs();

        // Step to roughly the middle of the 1.5s timeline
        for _ in 0..45 {
            mascot.update(&inputs, (0.0, 0.0), DT);
        }
        let offset = mascot.spin_offset_deg();
        assert!(offset > 90.0 && offset < 270.0, "offset = {offset}");
    }

    #[test]
    fn test_shake_jitter_perturbs_rotation() {
        let mut calm = MascotCoordinator::new();
        let mut shaky = MascotCoordinator::new();

        let still = MascotInputs::default();
        let shaking = MascotInputs {
            is_shaking: true,
            ..MascotInputs::default()
        };

        let mut diverged = false;
        for _ in 0..20 {
            calm.update(&still, (0.2, 0.2), DT);
            shaky.update(&shaking, (0.2, 0.2), DT);
            if (calm.rotation() - shaky.rotation()).length() > 1e-5 {
                diverged = true;
            }
        }
        assert!(diverged);
    }
}
