//! Scroll/Drag Progress Model
//!
//! A single clamped scalar in `[0, 1]` drives the whole horizontal narrative
//! track. Drag deltas and wheel deltas mutate it; everything consumers read
//! (track offset, mascot rotation angle, indicator position) is a pure
//! function of progress and recomputes identically regardless of call order.
//! A spring filter smooths raw progress before it reaches consumers.

use crate::spring::{Spring, SpringParams};
use serde::{Deserialize, Serialize};

/// Degrees of mascot rotation across the full drag range: two full turns.
pub const FULL_RANGE_ROTATION_DEG: f32 = 720.0;

/// Static geometry of the horizontal track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackGeometry {
    /// Width one item occupies on the track, in pixels
    pub item_width: f32,
    /// Number of items on the track
    pub item_count: usize,
    /// Visible viewport width in pixels
    pub viewport_width: f32,
    /// Trailing padding after the last item, in pixels
    pub padding: f32,
    /// Width of the progress indicator's own track, in pixels
    pub indicator_track_width: f32,
}

impl TrackGeometry {
    /// Total scrollable distance. Never negative, even when the track is
    /// shorter than the viewport.
    pub fn max_scroll(&self) -> f32 {
        (self.item_width * self.item_count as f32 - self.viewport_width + self.padding).max(0.0)
    }

    /// Horizontal track offset for `progress`. Zero at the start, most
    /// negative at the end.
    pub fn track_offset(&self, progress: f32) -> f32 {
        -progress.clamp(0.0, 1.0) * self.max_scroll()
    }

    /// Indicator x position for `progress`.
    pub fn indicator_x(&self, progress: f32) -> f32 {
        progress.clamp(0.0, 1.0) * self.indicator_track_width
    }
}

impl Default for TrackGeometry {
    fn default() -> Self {
        Self {
            item_width: 420.0,
            item_count: 6,
            viewport_width: 1280.0,
            padding: 160.0,
            indicator_track_width: 240.0,
        }
    }
}

/// Mascot rotation angle in degrees for `progress`. Monotonic non-decreasing.
pub fn rotation_angle(progress: f32) -> f32 {
    progress.clamp(0.0, 1.0) * FULL_RANGE_ROTATION_DEG
}

/// Owns the progress scalar and its smoothing spring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressModel {
    progress: f32,
    smoothed: Spring,
    geometry: TrackGeometry,
}

impl ProgressModel {
    /// Create a model at progress 0.
    pub fn new(geometry: TrackGeometry, spring: SpringParams) -> Self {
        Self {
            progress: 0.0,
            smoothed: Spring::new(0.0, spring),
            geometry,
        }
    }

    /// Apply a raw drag or wheel delta scaled by `sensitivity`.
    /// Returns the new raw progress.
    pub fn apply_delta(&mut self, raw_delta: f32, sensitivity: f32) -> f32 {
        self.set_progress(self.progress + raw_delta * sensitivity)
    }

    /// Set progress directly (animated wheel-scroll path). Clamped to [0, 1].
    pub fn set_progress(&mut self, p: f32) -> f32 {
        self.progress = p.clamp(0.0, 1.0);
        self.smoothed.set_target(self.progress);
        self.progress
    }

    /// Advance the smoothing spring. Call once per frame.
    pub fn tick(&mut self, dt: f32) {
        self.smoothed.update(dt);
    }

    /// Raw, unsmoothed progress.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Spring-smoothed progress, the value consumers derive from.
    pub fn smoothed(&self) -> f32 {
        self.smoothed.value().clamp(0.0, 1.0)
    }

    /// Track geometry the derived values are computed against.
    pub fn geometry(&self) -> &TrackGeometry {
        &self.geometry
    }

    /// Smoothed horizontal track offset.
    pub fn track_offset(&self) -> f32 {
        self.geometry.track_offset(self.smoothed())
    }

    /// Smoothed mascot rotation angle in degrees.
    pub fn rotation_angle(&self) -> f32 {
        rotation_angle(self.smoothed())
    }

    /// Smoothed indicator x position.
    pub fn indicator_x(&self) -> f32 {
        self.geometry.indicator_x(self.smoothed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> ProgressModel {
        ProgressModel::new(TrackGeometry::default(), SpringParams::SNAP)
    }

    #[test]
    fn test_progress_clamps_both_ends() {
        let mut m = model();
        assert_eq!(m.apply_delta(-500.0, 0.01), 0.0);
        assert_eq!(m.apply_delta(500.0, 0.01), 1.0);
        assert_eq!(m.set_progress(3.0), 1.0);
        assert_eq!(m.set_progress(-3.0), 0.0);
    }

    #[test]
    fn test_delta_round_trip_away_from_edges() {
        let mut m = model();
        m.set_progress(0.5);
        m.apply_delta(40.0, 0.001);
        m.apply_delta(-40.0, 0.001);
        assert!((m.progress() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_track_offset_is_never_positive() {
        let g = TrackGeometry::default();
        assert_eq!(g.track_offset(0.0), 0.0);
        for i in 0..=10 {
            assert!(g.track_offset(i as f32 / 10.0) <= 0.0);
        }
        assert_eq!(g.track_offset(1.0), -g.max_scroll());
    }

    #[test]
    fn test_rotation_angle_spans_two_turns() {
        assert_eq!(rotation_angle(0.0), 0.0);
        assert_eq!(rotation_angle(0.5), 360.0);
        assert_eq!(rotation_angle(1.0), 720.0);
    }

    #[test]
    fn test_short_track_has_zero_scroll() {
        let g = TrackGeometry {
            item_width: 100.0,
            item_count: 2,
            viewport_width: 1920.0,
            padding: 0.0,
            indicator_track_width: 240.0,
        };
        assert_eq!(g.max_scroll(), 0.0);
        assert_eq!(g.track_offset(1.0), 0.0);
    }

    #[test]
    fn test_smoothed_value_lags_then_settles() {
        let mut m = model();
        m.set_progress(1.0);
        m.tick(1.0 / 60.0);
        let early = m.smoothed();
        assert!(early > 0.0 && early < 1.0);

        for _ in 0..180 {
            m.tick(1.0 / 60.0);
        }
        assert!((m.smoothed() - 1.0).abs() < 1e-3);
    }
}
