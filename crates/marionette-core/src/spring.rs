//! Damped-spring smoothing filter
//!
//! Abrupt input (a wheel notch, a drag release) must never reach consumers as
//! a visual discontinuity. Raw values pass through a spring before anything
//! derived from them is published. Semi-implicit Euler integration keeps the
//! filter stable at the tick rates the engine runs at.

use serde::{Deserialize, Serialize};

/// Stiffness/damping pair for a [`Spring`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringParams {
    /// Spring constant. Higher = snappier tracking.
    pub stiffness: f32,
    /// Velocity damping. Around `2 * sqrt(stiffness)` is critically damped.
    pub damping: f32,
}

impl SpringParams {
    /// Tight pointer-tracking response.
    pub const POINTER: SpringParams = SpringParams {
        stiffness: 520.0,
        damping: 26.0,
    };

    /// Softer progress-bar snapping response.
    pub const SNAP: SpringParams = SpringParams {
        stiffness: 330.0,
        damping: 26.0,
    };
}

/// A scalar value that chases its target with spring dynamics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spring {
    value: f32,
    velocity: f32,
    target: f32,
    params: SpringParams,
}

impl Spring {
    /// Create a spring at rest at `initial`.
    pub fn new(initial: f32, params: SpringParams) -> Self {
        Self {
            value: initial,
            velocity: 0.0,
            target: initial,
            params,
        }
    }

    /// Retarget the spring without disturbing its current motion.
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Jump directly to `value` with no transient.
    pub fn snap_to(&mut self, value: f32) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
    }

    /// Advance the simulation by `dt` seconds. Returns the new value.
    pub fn update(&mut self, dt: f32) -> f32 {
        let force = self.params.stiffness * (self.target - self.value);
        self.velocity += (force - self.params.damping * self.velocity) * dt;
        self.value += self.velocity * dt;
        if self.is_settled() {
            self.value = self.target;
            self.velocity = 0.0;
        }
        self.value
    }

    /// Current smoothed value.
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Current target.
    pub fn target(&self) -> f32 {
        self.target
    }

    /// True when no visible motion remains.
    pub fn is_settled(&self) -> bool {
        (self.target - self.value).abs() < 1e-4 && self.velocity.abs() < 1e-3
    }
}
