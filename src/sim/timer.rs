//! One-shot expiry timer on session time
//!
//! Arming replaces any pending expiry, so an earlier activation can never
//! clear a later one. Each arm bumps the generation; a handle from a
//! superseded arm is no longer current.

use serde::{Deserialize, Serialize};

/// Identifies one arming of an [`ExpiryTimer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpiryTimer {
    due_at: Option<f64>,
    generation: u64,
}

impl ExpiryTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule expiry at `now + duration`, cancelling any pending one
    pub fn arm(&mut self, now: f64, duration: f64) -> TimerHandle {
        self.generation += 1;
        self.due_at = Some(now + duration);
        TimerHandle(self.generation)
    }

    pub fn cancel(&mut self) {
        if self.due_at.take().is_some() {
            self.generation += 1;
        }
    }

    pub fn is_armed(&self) -> bool {
        self.due_at.is_some()
    }

    pub fn is_current(&self, handle: TimerHandle) -> bool {
        self.is_armed() && handle.0 == self.generation
    }

    /// Seconds left before expiry (0 when disarmed)
    pub fn remaining(&self, now: f64) -> f64 {
        self.due_at.map_or(0.0, |due| (due - now).max(0.0))
    }

    /// Fire if due. Returns true exactly once per arming.
    pub fn poll(&mut self, now: f64) -> bool {
        match self.due_at {
            Some(due) if now >= due => {
                self.due_at = None;
                true
            }
            _ => false,
        }
    }
}
