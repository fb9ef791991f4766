//! Debounced commit of search text.
//!
//! Zellij timers cannot be cancelled once set, and `Event::Timer` does not say
//! which timer fired. All debounce timers share the same delay, so they fire in
//! the order they were armed: the debouncer counts outstanding timers and only
//! the last one to fire commits the latest value. Earlier timers, and timers
//! armed before a [`Debouncer::cancel`], fire into nothing.

use std::time::Duration;

/// Default quiet period before search text is committed.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Collapses bursts of input into one commit of the last value.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<String>,
    outstanding: usize,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl Debouncer {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            outstanding: 0,
        }
    }

    /// Replaces the pending value; the caller must arm exactly one host timer.
    pub fn schedule(&mut self, value: String) {
        self.pending = Some(value);
        self.outstanding += 1;
    }

    /// Drops the pending value without committing it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Records one timer firing; returns the value to commit if it was the last.
    pub fn on_timer(&mut self) -> Option<String> {
        self.outstanding = self.outstanding.saturating_sub(1);
        if self.outstanding == 0 {
            self.pending.take()
        } else {
            None
        }
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }
}
