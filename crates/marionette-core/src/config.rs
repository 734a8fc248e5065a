//! Runtime tuning
//!
//! Every tunable constant of the choreography layer in one serde-able
//! struct, loadable from the application's settings file. Defaults are the
//! shipped experience; validation rejects values that would make a state
//! machine degenerate (non-finite springs, zero durations).

use crate::mascot::{ROTATION_SMOOTHING, SHAKE_JITTER_RAD, SPIN_DURATION};
use crate::shake::ShakeConfig;
use crate::spring::SpringParams;
use crate::stage::BURST_LIFETIME;
use crate::CoreError;
use serde::{Deserialize, Serialize};

/// Tunable constants for the whole engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Progress change per pixel of drag delta.
    pub drag_sensitivity: f32,
    /// Progress change per wheel-delta unit.
    pub wheel_sensitivity: f32,
    /// Shake detector thresholds.
    pub shake: ShakeConfig,
    /// Burst effect lifetime in seconds.
    pub burst_lifetime: f32,
    /// One-shot spin duration in seconds.
    pub spin_duration: f32,
    /// Per-frame exponential smoothing factor for mascot rotation, in (0, 1].
    pub rotation_smoothing: f32,
    /// Shake tremor amplitude in radians.
    pub shake_jitter_rad: f32,
    /// Spring for pointer-derived smoothing.
    pub pointer_spring: SpringParams,
    /// Spring for progress smoothing/snapping.
    pub progress_spring: SpringParams,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            drag_sensitivity: 0.0015,
            wheel_sensitivity: 0.0005,
            shake: ShakeConfig::default(),
            burst_lifetime: BURST_LIFETIME,
            spin_duration: SPIN_DURATION,
            rotation_smoothing: ROTATION_SMOOTHING,
            shake_jitter_rad: SHAKE_JITTER_RAD,
            pointer_spring: SpringParams::POINTER,
            progress_spring: SpringParams::SNAP,
        }
    }
}

impl Tuning {
    /// Validate every field. Returns the first offending value.
    pub fn validate(&self) -> Result<(), CoreError> {
        let positives = [
            ("drag_sensitivity", self.drag_sensitivity),
            ("wheel_sensitivity", self.wheel_sensitivity),
            ("shake.distance_px", self.shake.distance_px),
            ("shake.cooldown", self.shake.cooldown),
            ("shake.flag_duration", self.shake.flag_duration),
            ("burst_lifetime", self.burst_lifetime),
            ("spin_duration", self.spin_duration),
            ("rotation_smoothing", self.rotation_smoothing),
            ("pointer_spring.stiffness", self.pointer_spring.stiffness),
            ("pointer_spring.damping", self.pointer_spring.damping),
            ("progress_spring.stiffness", self.progress_spring.stiffness),
            ("progress_spring.damping", self.progress_spring.damping),
        ];
        for (name, value) in positives {
            if !value.is_finite() || value <= 0.0 {
                return Err(CoreError::InvalidTuning { name, value });
            }
        }

        if !self.shake_jitter_rad.is_finite() || self.shake_jitter_rad < 0.0 {
            return Err(CoreError::InvalidTuning {
                name: "shake_jitter_rad",
                value: self.shake_jitter_rad,
            });
        }
        if self.rotation_smoothing > 1.0 {
            return Err(CoreError::InvalidTuning {
                name: "rotation_smoothing",
                value: self.rotation_smoothing,
            });
        }
        if self.shake.pop_run == 0 {
            return Err(CoreError::InvalidTuning {
                name: "shake.pop_run",
                value: 0.0,
            });
        }
        Ok(())
    }
}
