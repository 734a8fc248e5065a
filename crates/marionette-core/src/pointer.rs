//! Pointer Tracking
//!
//! Samples pointer position, derives normalized viewport offsets and
//! classifies the hover target for cursor styling. Purely derived state; the
//! tracker owns the sample history, nobody else mutates it.

use crate::spring::{Spring, SpringParams};
use crate::TimePoint;
use serde::{Deserialize, Serialize};

/// Viewport dimensions used to normalize pointer coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Width in pixels
    pub width: f32,
    /// Height in pixels
    pub height: f32,
}

impl Viewport {
    /// Create a viewport. Dimensions are floored at 1px to keep
    /// normalization well-defined.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    /// Map absolute pixel coordinates to `[-0.5, 0.5]` offsets from the
    /// viewport center.
    pub fn normalize(&self, x: f32, y: f32) -> (f32, f32) {
        let nx = (x / self.width - 0.5).clamp(-0.5, 0.5);
        let ny = (y / self.height - 0.5).clamp(-0.5, 0.5);
        (nx, ny)
    }
}

/// Kind of element under the cursor, reported by the hit-testing
/// collaborator alongside each pointer sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HitTarget {
    /// Nothing interactive
    #[default]
    None,
    /// A link, button or draggable element
    Interactive,
    /// The mascot head itself
    MascotHead,
}

/// Cursor styling state, recomputed on every pointer sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HoverState {
    /// Standard cursor
    #[default]
    Default,
    /// Pointer cursor over interactive elements
    Pointer,
    /// Custom cursor over the mascot head
    MascotHead,
}

impl HoverState {
    /// Derive the cursor state from the element under the pointer.
    pub fn classify(target: HitTarget) -> Self {
        match target {
            HitTarget::None => HoverState::Default,
            HitTarget::Interactive => HoverState::Pointer,
            HitTarget::MascotHead => HoverState::MascotHead,
        }
    }
}

/// One pointer-move sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    /// Absolute x in pixels
    pub x: f32,
    /// Absolute y in pixels
    pub y: f32,
    /// Monotonic sample time in seconds
    pub at: TimePoint,
}

/// Owns pointer sample state, the derived hover classification and the
/// spring-smoothed cursor position the custom cursor element renders at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointerTracker {
    viewport: Viewport,
    last: Option<PointerSample>,
    hover: HoverState,
    cursor_x: Spring,
    cursor_y: Spring,
}

impl PointerTracker {
    /// Create a tracker for the given viewport.
    pub fn new(viewport: Viewport, cursor_spring: SpringParams) -> Self {
        Self {
            viewport,
            last: None,
            hover: HoverState::Default,
            cursor_x: Spring::new(0.0, cursor_spring),
            cursor_y: Spring::new(0.0, cursor_spring),
        }
    }

    /// Record a pointer-move sample and reclassify the hover state.
    pub fn sample(&mut self, x: f32, y: f32, at: TimePoint, target: HitTarget) {
        if self.last.is_none() {
            // The cursor element appears at the first sample, not at (0, 0)
            self.cursor_x.snap_to(x);
            self.cursor_y.snap_to(y);
        } else {
            self.cursor_x.set_target(x);
            self.cursor_y.set_target(y);
        }
        self.last = Some(PointerSample { x, y, at });
        self.hover = HoverState::classify(target);
    }

    /// Advance the cursor springs. Call once per frame.
    pub fn tick(&mut self, dt: f32) {
        self.cursor_x.update(dt);
        self.cursor_y.update(dt);
    }

    /// Spring-smoothed cursor position in pixels.
    pub fn cursor(&self) -> (f32, f32) {
        (self.cursor_x.value(), self.cursor_y.value())
    }

    /// Resize the normalization viewport.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Normalized `(x, y)` offsets in `[-0.5, 0.5]`, `(0, 0)` until the
    /// first sample arrives.
    pub fn normalized(&self) -> (f32, f32) {
        match self.last {
            Some(s) => self.viewport.normalize(s.x, s.y),
            None => (0.0, 0.0),
        }
    }

    /// Most recent raw sample.
    pub fn last_sample(&self) -> Option<PointerSample> {
        self.last
    }

    /// Current cursor classification.
    pub fn hover(&self) -> HoverState {
        self.hover
    }
}
