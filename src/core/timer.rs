//! Countdown timer state.
//!
//! Running and expired are never both set. Every mutation checks its
//! precondition and returns `false` without touching the state when it
//! does not hold.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimerState {
    remaining_seconds: u64,
    running: bool,
    expired: bool,
}

/// Outcome of one countdown tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownTick {
    /// Timer was not running; nothing changed.
    Ignored,
    /// One second removed, still running.
    Counting,
    /// Reached zero: stopped and expired in the same step.
    Expired,
}

impl TimerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A paused timer holding `remaining_seconds`.
    pub fn with_remaining(remaining_seconds: u64) -> Self {
        Self {
            remaining_seconds,
            ..Self::default()
        }
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }

    /// Idle: neither running nor expired, so increments are accepted.
    pub fn is_adjustable(&self) -> bool {
        !self.running && !self.expired
    }

    pub fn can_start(&self) -> bool {
        self.remaining_seconds > 0 && self.is_adjustable()
    }

    pub fn add_time(&mut self, delta_seconds: u64) -> bool {
        if !self.is_adjustable() {
            return false;
        }
        self.remaining_seconds = self.remaining_seconds.saturating_add(delta_seconds);
        true
    }

    pub fn start(&mut self) -> bool {
        if !self.can_start() {
            return false;
        }
        self.running = true;
        true
    }

    pub fn pause(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.running = false;
        true
    }

    pub fn dismiss(&mut self) -> bool {
        if !self.expired {
            return false;
        }
        self.expired = false;
        self.remaining_seconds = 0;
        true
    }

    /// Leave the alert without resetting, used when switching to clock mode.
    /// Expiry always happens at zero, so nothing is lost.
    pub fn clear_expired(&mut self) -> bool {
        std::mem::replace(&mut self.expired, false)
    }

    /// Remove one second. At one second or less the timer stops and
    /// expires with zero remaining.
    pub fn tick(&mut self) -> CountdownTick {
        if !self.running {
            return CountdownTick::Ignored;
        }

        if self.remaining_seconds <= 1 {
            self.remaining_seconds = 0;
            self.running = false;
            self.expired = true;
            CountdownTick::Expired
        } else {
            self.remaining_seconds -= 1;
            CountdownTick::Counting
        }
    }
}
