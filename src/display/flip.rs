//! Per-card split-flap animation.
//!
//! A card shows one committed symbol. When a different target arrives the
//! card enters `Transitioning`: the upper flap falls away revealing the new
//! symbol on top while the old one is still visible below. After an
//! uninterrupted settle window the new symbol is committed and the card is
//! idle again.
//!
//! Settlement is a single deadline per card. A newer target cancels and
//! reschedules it, so a burst of targets faster than the settle window only
//! ever commits the last one.

use std::time::{Duration, Instant};

use crate::common::constants::FLIP_SETTLE_DELAY;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipPhase {
    Idle,
    Transitioning,
}

/// The four visual layers of a card for one render.
///
/// While idle all layers carry the committed symbol. While transitioning
/// the front layers hold the outgoing symbol and the back layers the
/// incoming one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlipFrame<T> {
    pub top_front: T,
    pub top_back: T,
    pub bottom_front: T,
    pub bottom_back: T,
    pub phase: FlipPhase,
}

impl<T: Clone> FlipFrame<&T> {
    pub fn cloned(&self) -> FlipFrame<T> {
        FlipFrame {
            top_front: self.top_front.clone(),
            top_back: self.top_back.clone(),
            bottom_front: self.bottom_front.clone(),
            bottom_back: self.bottom_back.clone(),
            phase: self.phase,
        }
    }
}

/// Flip state machine for a single display slot.
#[derive(Debug, Clone)]
pub struct DigitFlipAnimator<T> {
    displayed: T,
    incoming: T,
    settle_at: Option<Instant>,
    settle_delay: Duration,
}

impl<T: Clone + PartialEq> DigitFlipAnimator<T> {
    /// A card already showing `initial`, with no animation pending.
    pub fn new(initial: T) -> Self {
        Self::with_settle_delay(initial, FLIP_SETTLE_DELAY)
    }

    pub fn with_settle_delay(initial: T, settle_delay: Duration) -> Self {
        Self {
            displayed: initial.clone(),
            incoming: initial,
            settle_at: None,
            settle_delay,
        }
    }

    /// Offer the value the card should show.
    ///
    /// Returns `true` when the call changed the animation state.
    pub fn set_target(&mut self, target: T, now: Instant) -> bool {
        if target == self.displayed {
            // Back to the committed value before the flip settled.
            if self.settle_at.take().is_some() {
                self.incoming = target;
                return true;
            }
            return false;
        }

        if self.settle_at.is_some() && target == self.incoming {
            return false;
        }

        self.incoming = target;
        self.settle_at = Some(now + self.settle_delay);
        true
    }

    /// Commit the incoming value if its settle deadline has passed.
    ///
    /// Returns `true` when a value was committed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.settle_at {
            Some(deadline) if deadline <= now => {
                self.settle_at = None;
                self.displayed = self.incoming.clone();
                true
            }
            _ => false,
        }
    }

    /// Drop any pending settlement and keep the committed value.
    pub fn cancel(&mut self) {
        if self.settle_at.take().is_some() {
            self.incoming = self.displayed.clone();
        }
    }

    /// Show `value` immediately, without a flip.
    pub fn reset(&mut self, value: T) {
        self.displayed = value.clone();
        self.incoming = value;
        self.settle_at = None;
    }

    pub fn phase(&self) -> FlipPhase {
        if self.settle_at.is_some() {
            FlipPhase::Transitioning
        } else {
            FlipPhase::Idle
        }
    }

    pub fn is_transitioning(&self) -> bool {
        self.settle_at.is_some()
    }

    /// The committed value.
    pub fn displayed(&self) -> &T {
        &self.displayed
    }

    /// The value being flipped to (equal to `displayed` while idle).
    pub fn incoming(&self) -> &T {
        &self.incoming
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.settle_at
    }

    pub fn frame(&self) -> FlipFrame<&T> {
        FlipFrame {
            top_front: &self.displayed,
            top_back: &self.incoming,
            bottom_front: &self.displayed,
            bottom_back: &self.incoming,
            phase: self.phase(),
        }
    }
}
