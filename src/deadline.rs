use std::time::Duration;

/// Remaining time budget for a single turn.
///
/// Stored as whole microseconds so repeated decrements never drift; the
/// remaining time never goes below zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Deadline {
    remaining_us: u64,
}

fn as_micros(d: Duration) -> u64 {
    u64::try_from(d.as_micros()).unwrap_or(u64::MAX)
}

impl Deadline {
    pub fn new(budget: Duration) -> Self {
        Self {
            remaining_us: as_micros(budget),
        }
    }

    pub fn remaining(&self) -> Duration {
        Duration::from_micros(self.remaining_us)
    }

    /// Subtract `elapsed` from the budget, clamping at zero.
    pub fn consume(&mut self, elapsed: Duration) {
        self.remaining_us = self.remaining_us.saturating_sub(as_micros(elapsed));
    }

    pub fn reset(&mut self, budget: Duration) {
        self.remaining_us = as_micros(budget);
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_us == 0
    }
}
