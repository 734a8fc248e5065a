//! Shake Gesture Detection
//!
//! A state machine over pointer samples. A sample qualifies when it moved far
//! enough from the previous one and the cooldown since the last qualifying
//! sample has elapsed. Three qualifying samples in a run emit a pop request
//! and reset the counter.
//!
//! The counter has no time-based decay: a slow drip of samples just past the
//! cooldown, indefinitely, will eventually pop. Any persistent motion counts;
//! tune the distance and cooldown to change the difficulty, not the shape of
//! the machine.

use crate::TimePoint;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Tuning knobs for the detector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShakeConfig {
    /// Minimum displacement between samples to qualify, in pixels.
    pub distance_px: f32,
    /// Minimum time between qualifying samples, in seconds.
    pub cooldown: f32,
    /// How long the transient shaking flag stays set, in seconds.
    pub flag_duration: f32,
    /// Qualifying-sample run length that emits a pop.
    pub pop_run: u8,
}

impl Default for ShakeConfig {
    fn default() -> Self {
        Self {
            distance_px: 30.0,
            cooldown: 0.1,
            flag_duration: 0.2,
            pop_run: 3,
        }
    }
}

/// Outcome of feeding one pointer sample to the detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShakeSample {
    /// The sample qualified as a shake (schedule the flag reset).
    pub qualified: bool,
    /// The qualifying run completed; a pop is requested.
    pub pop: bool,
}

/// Pointer-velocity shake detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShakeDetector {
    config: ShakeConfig,
    last_pos: Option<(f32, f32)>,
    last_qualifying: Option<TimePoint>,
    counter: u8,
    shaking: bool,
}

impl ShakeDetector {
    /// Create a detector.
    pub fn new(config: ShakeConfig) -> Self {
        Self {
            config,
            last_pos: None,
            last_qualifying: None,
            counter: 0,
            shaking: false,
        }
    }

    /// Feed one pointer-move sample at monotonic time `now`.
    pub fn sample(&mut self, x: f32, y: f32, now: TimePoint) -> ShakeSample {
        let mut out = ShakeSample::default();

        if let Some((px, py)) = self.last_pos {
            let distance = ((x - px).powi(2) + (y - py).powi(2)).sqrt();
            let cooled = match self.last_qualifying {
                Some(t) => now - t > self.config.cooldown as TimePoint,
                None => true,
            };

            if distance > self.config.distance_px && cooled {
                self.last_qualifying = Some(now);
                self.counter += 1;
                self.shaking = true;
                out.qualified = true;
                debug!(counter = self.counter, distance, "shake sample qualified");

                if self.counter >= self.config.pop_run {
                    self.counter = 0;
                    out.pop = true;
                }
            }
        }

        self.last_pos = Some((x, y));
        out
    }

    /// Clear the transient shaking flag (scheduled `flag_duration` after the
    /// last qualifying sample).
    pub fn clear_shaking(&mut self) {
        self.shaking = false;
    }

    /// Whether the tremor flag is currently set.
    pub fn is_shaking(&self) -> bool {
        self.shaking
    }

    /// Current qualifying-run count.
    pub fn counter(&self) -> u8 {
        self.counter
    }

    /// Detector configuration.
    pub fn config(&self) -> &ShakeConfig {
        &self.config
    }

    /// Forget all sample history. Used when the skills stage deactivates.
    pub fn reset(&mut self) {
        self.last_pos = None;
        self.last_qualifying = None;
        self.counter = 0;
        self.shaking = false;
    }
}

impl Default for ShakeDetector {
    fn default() -> Self {
        Self::new(ShakeConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> ShakeDetector {
        ShakeDetector::default()
    }

    /// Three well-spaced, far-apart samples after the baseline produce
    /// exactly one pop and reset the counter.
    #[test]
    fn test_three_qualifying_samples_pop_once() {
        let mut d = detector();
        d.sample(0.0, 0.0, 0.0); // baseline, no previous position

        let s1 = d.sample(40.0, 0.0, 0.200);
        assert!(s1.qualified && !s1.pop);
        let s2 = d.sample(0.0, 0.0, 0.400);
        assert!(s2.qualified && !s2.pop);
        let s3 = d.sample(40.0, 0.0, 0.600);
        assert!(s3.qualified && s3.pop);

        assert_eq!(d.counter(), 0);
    }

    #[test]
    fn test_two_qualifying_samples_do_not_pop() {
        let mut d = detector();
        d.sample(0.0, 0.0, 0.0);
        assert!(!d.sample(40.0, 0.0, 0.200).pop);
        assert!(!d.sample(0.0, 0.0, 0.400).pop);
        assert_eq!(d.counter(), 2);
    }

    #[test]
    fn test_small_movement_never_qualifies() {
        let mut d = detector();
        d.sample(0.0, 0.0, 0.0);
        for i in 1..20 {
            let s = d.sample((i % 2) as f32 * 20.0, 0.0, i as f64 * 0.2);
            assert!(!s.qualified);
        }
        assert_eq!(d.counter(), 0);
    }

    #[test]
    fn test_cooldown_suppresses_rapid_samples() {
        let mut d = detector();
        d.sample(0.0, 0.0, 0.0);
        assert!(d.sample(40.0, 0.0, 0.050).qualified);
        // 40ms later: far enough but still inside the 100ms cooldown
        assert!(!d.sample(0.0, 0.0, 0.090).qualified);
        // Exactly at the cooldown boundary is still suppressed (strict >)
        assert!(!d.sample(40.0, 0.0, 0.150).qualified);
        assert!(d.sample(0.0, 0.0, 0.151).qualified);
    }

    #[test]
    fn test_flag_set_and_cleared() {
        let mut d = detector();
        d.sample(0.0, 0.0, 0.0);
        d.sample(40.0, 0.0, 0.2);
        assert!(d.is_shaking());
        d.clear_shaking();
        assert!(!d.is_shaking());
        // Counter untouched by the flag reset
        assert_eq!(d.counter(), 1);
    }

    /// No decay: qualifying samples arbitrarily far apart still accumulate.
    #[test]
    fn test_counter_does_not_decay() {
        let mut d = detector();
        d.sample(0.0, 0.0, 0.0);
        d.sample(40.0, 0.0, 10.0);
        d.sample(0.0, 0.0, 60.0);
        let s = d.sample(40.0, 0.0, 600.0);
        assert!(s.pop);
    }
}
