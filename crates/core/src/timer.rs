//! Turn timer - the logical per-turn deadline
//!
//! The timer holds no clock of its own. Hosts either schedule their own
//! timeout from [`turn_duration`](crate::scoring::turn_duration) or feed
//! elapsed time through [`TurnTimer::tick`].

use crate::scoring::turn_duration_ms;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnTimer {
    duration_ms: u32,
    remaining_ms: u32,
    running: bool,
}

impl TurnTimer {
    /// A stopped timer sized for `level`
    pub fn for_level(level: u32) -> Self {
        let duration_ms = turn_duration_ms(level);
        Self {
            duration_ms,
            remaining_ms: duration_ms,
            running: false,
        }
    }

    /// Start a fresh turn sized for `level`
    pub fn restart(&mut self, level: u32) {
        self.duration_ms = turn_duration_ms(level);
        self.remaining_ms = self.duration_ms;
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Advance by `elapsed_ms`; true exactly once, when the deadline passes
    ///
    /// The timer stops itself on expiry; the owner decides whether to restart.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if !self.running {
            return false;
        }
        self.remaining_ms = self.remaining_ms.saturating_sub(elapsed_ms);
        if self.remaining_ms == 0 {
            self.running = false;
            return true;
        }
        false
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    pub fn remaining_ms(&self) -> u32 {
        self.remaining_ms
    }
}

impl Default for TurnTimer {
    fn default() -> Self {
        Self::for_level(0)
    }
}
