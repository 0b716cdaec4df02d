use std::time::{Duration, Instant};

use super::Clock;

/// Default quiet period between the last edit and the autosave.
pub const DEFAULT_AUTOSAVE_DELAY: Duration = Duration::from_millis(1000);

/// A single pending deadline that every new trigger replaces.
///
/// The debouncer doesn't run timers itself. Callers sleep for the delay
/// returned by [`trigger`](Self::trigger) and then ask
/// [`take_due`](Self::take_due); a caller that wakes for a deadline that was
/// pushed back in the meantime finds nothing due.
#[derive(Debug, Clone)]
pub struct Debouncer<C: Clock> {
    clock: C,
    quiet: Duration,
    deadline: Option<Instant>,
}

impl<C: Clock> Debouncer<C> {
    pub fn new(clock: C, quiet: Duration) -> Self {
        Self {
            clock,
            quiet,
            deadline: None,
        }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet
    }

    /// Restart the quiet period. Returns how long to wait before checking.
    pub fn trigger(&mut self) -> Duration {
        self.deadline = Some(self.clock.now() + self.quiet);
        self.quiet
    }

    /// True exactly once per burst, when the quiet period has elapsed.
    pub fn take_due(&mut self) -> bool {
        match self.deadline {
            Some(deadline) if self.clock.now() >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Time left until the pending deadline, if any.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(self.clock.now()))
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}
