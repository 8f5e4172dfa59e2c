//! Autosave Debouncing
//!
//! Coalesces bursts of edits into one local-cache write. Every change pushes
//! the deadline out again; the write fires once the editor has been quiet
//! for the full delay. Time is passed in so the debouncer can be driven by
//! the frame loop or by tests.

use std::time::{Duration, Instant};

/// Quiet period before the cache is written.
pub const AUTOSAVE_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone)]
pub struct AutosaveDebouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Default for AutosaveDebouncer {
    fn default() -> Self {
        Self::new(AUTOSAVE_DELAY)
    }
}

impl AutosaveDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self { delay, deadline: None }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Restart the countdown from `now`.
    pub fn mark_dirty(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns `true` exactly once when the deadline has passed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}
