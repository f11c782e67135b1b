//! Debounce primitive
//!
//! Holds the latest input value behind a deadline. Every update rearms
//! the deadline, so a burst of keystrokes commits exactly once, with the
//! final value. Zero delay and empty values go through the same arm/poll
//! path as everything else.

use std::time::{Duration, Instant};

/// Deadline-based debouncer, polled from the UI tick loop
pub struct Debouncer {
    delay: Duration,
    pending: Option<(String, Instant)>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Record a new input value, superseding any pending one
    pub fn update(&mut self, value: &str, now: Instant) {
        self.pending = Some((value.to_string(), now + self.delay));
    }

    /// Return the committed value once its deadline has passed.
    /// Disarms on fire; returns None while armed-but-early or idle.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some((_, deadline)) if now >= *deadline => {
                self.pending.take().map(|(value, _)| value)
            }
            _ => None,
        }
    }

    /// Drop any pending value without firing
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
