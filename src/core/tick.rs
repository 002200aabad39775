//! Periodic tick sources owned by the clock controller.
//!
//! A tick source is a plain handle: armed with a next-due instant or
//! cancelled. Arming always replaces the previous schedule, so a source can
//! never fire twice per period.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickKind {
    /// Re-read the wall clock.
    Clock,
    /// Decrement the running timer.
    Countdown,
    /// Alternate the expiry alert frame.
    Blink,
}

impl TickKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TickKind::Clock => "clock",
            TickKind::Countdown => "countdown",
            TickKind::Blink => "blink",
        }
    }
}

#[derive(Debug, Clone)]
pub struct TickSource {
    kind: TickKind,
    period: Duration,
    next_due: Option<Instant>,
}

impl TickSource {
    pub fn new(kind: TickKind, period: Duration) -> Self {
        Self {
            kind,
            period,
            next_due: None,
        }
    }

    pub fn kind(&self) -> TickKind {
        self.kind
    }

    /// Schedule the first tick one period after `now`, dropping any pending one.
    pub fn arm(&mut self, now: Instant) {
        self.next_due = Some(now + self.period);
    }

    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.next_due
    }

    /// The pending tick instant if it is at or before `now`.
    pub fn due_at(&self, now: Instant) -> Option<Instant> {
        self.next_due.filter(|due| *due <= now)
    }

    /// Consume the pending tick and schedule the next one a period later.
    /// Returns the instant the consumed tick was due.
    pub fn fire(&mut self) -> Option<Instant> {
        let due = self.next_due?;
        self.next_due = Some(due + self.period);
        Some(due)
    }
}
