use std::time::{Duration, Instant};

/// Quiet period after the last keystroke before a render + persist cycle runs.
pub const INPUT_QUIET_PERIOD: Duration = Duration::from_millis(300);

/// Trailing-edge debouncer driven by explicit timestamps.
///
/// Every [`poke`](Debouncer::poke) pushes the deadline out; [`poll`](Debouncer::poll) fires once
/// when the deadline has passed and then disarms.
#[derive(Clone, Debug)]
pub struct Debouncer {
    quiet: Duration,
    deadline: Option<Instant>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(INPUT_QUIET_PERIOD)
    }
}

impl Debouncer {
    /// Debouncer with the given quiet period.
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            deadline: None,
        }
    }

    /// Record an event at `now`, restarting the quiet period.
    pub fn poke(&mut self, now: Instant) {
        self.deadline = Some(now + self.quiet);
    }

    /// Whether an event is waiting for its quiet period to elapse.
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// When the pending event fires, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns `true` exactly once per burst, at the first poll at or after the deadline.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Drop any pending event. Returns whether one was pending.
    pub fn take(&mut self) -> bool {
        self.deadline.take().is_some()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/app/debounce.rs"]
mod tests;
