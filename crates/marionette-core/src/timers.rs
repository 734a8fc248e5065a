//! Scheduled one-shot timers keyed to the monotonic scene clock
//!
//! All "waiting" in the engine (the 200ms shake-flag reset, the 1000ms burst
//! expiry) is a time-boxed scheduled event. Each entry is cancelable, and the
//! whole set is cleared on teardown so nothing fires after the consuming
//! state is gone.

use crate::TimePoint;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of one scheduled timer.
pub type TimerId = u64;

/// What a timer does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerKind {
    /// Clear the transient shake flag on the detector.
    ShakeFlagClear,
    /// Expire a burst visual-effect record.
    BurstExpire {
        /// Id of the burst effect to remove
        effect_id: Uuid,
    },
}

/// A fired timer, in deadline order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimerEvent {
    /// Id the timer was scheduled under
    pub id: TimerId,
    /// What to do
    pub kind: TimerKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct TimerEntry {
    id: TimerId,
    kind: TimerKind,
    deadline: TimePoint,
}

/// Pending one-shot timers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Timers {
    next_id: TimerId,
    entries: Vec<TimerEntry>,
}

impl Timers {
    /// Create an empty timer set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `kind` to fire at `deadline` (absolute scene time).
    pub fn schedule(&mut self, kind: TimerKind, deadline: TimePoint) -> TimerId {
        self.next_id += 1;
        let id = self.next_id;
        self.entries.push(TimerEntry { id, kind, deadline });
        id
    }

    /// Cancel one timer. Returns `true` if it was still pending.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// Cancel every pending timer matching `pred`. Used when a competing
    /// transition supersedes an earlier schedule.
    pub fn cancel_where(&mut self, pred: impl Fn(&TimerKind) -> bool) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| !pred(&e.kind));
        before - self.entries.len()
    }

    /// Remove and return every timer whose deadline has passed, in deadline
    /// order.
    pub fn fire_due(&mut self, now: TimePoint) -> Vec<TimerEvent> {
        let mut due: Vec<TimerEntry> = Vec::new();
        self.entries.retain(|e| {
            if e.deadline <= now {
                due.push(*e);
                false
            } else {
                true
            }
        });
        due.sort_by(|a, b| a.deadline.total_cmp(&b.deadline));
        due.into_iter()
            .map(|e| TimerEvent {
                id: e.id,
                kind: e.kind,
            })
            .collect()
    }

    /// Number of pending timers.
    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    /// Drop every pending timer. Teardown path.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
