//! Bounded-attempts counter
//!
//! Two states: `Active` while attempts remain, `Exhausted` at zero. The
//! caller owns every timer and animation around retries; this type only
//! counts, and it refuses to count past zero.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AttemptTrackerError {
    #[error("attempts already exhausted; reset() is required before another submission")]
    AlreadyExhausted,
}

/// Snapshot of the counter after a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptState {
    pub remaining: u32,
    pub max: u32,
}

impl AttemptState {
    /// Terminal for the current question until the next `reset`
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }
}

/// Per-question retry budget
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptTracker {
    remaining: u32,
    max: u32,
}

impl AttemptTracker {
    /// A question always grants at least one attempt; anything else is a
    /// content defect and fails loudly at load time.
    pub fn new(max: u32) -> Self {
        assert!(max >= 1, "attempt budget must be at least 1");
        Self {
            remaining: max,
            max,
        }
    }

    pub fn state(&self) -> AttemptState {
        AttemptState {
            remaining: self.remaining,
            max: self.max,
        }
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    /// Back to `Active` with the full budget, from any state.
    pub fn reset(&mut self) -> AttemptState {
        self.remaining = self.max;
        self.state()
    }

    /// Burn one attempt. When the returned state is exhausted the question
    /// is over: the caller must reveal the answer and advance.
    pub fn on_incorrect(&mut self) -> Result<AttemptState, AttemptTrackerError> {
        if self.remaining == 0 {
            return Err(AttemptTrackerError::AlreadyExhausted);
        }
        self.remaining -= 1;
        Ok(self.state())
    }
}
