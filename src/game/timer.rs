//! Countdown Timer
//!
//! Polled, not scheduled: the owner feeds elapsed time once per frame and
//! reacts when `check_timer` reports expiry.

use std::time::Duration;

use serde::{Serialize, Deserialize};

/// A countdown that expires once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownTimer {
    duration: Duration,
    remaining: Duration,
    active: bool,
}

impl CountdownTimer {
    /// Create a running timer.
    pub fn started(duration: Duration) -> Self {
        Self {
            duration,
            remaining: duration,
            active: true,
        }
    }

    /// Rewind to the full duration and run again.
    pub fn restart(&mut self) {
        self.remaining = self.duration;
        self.active = true;
    }

    /// Still counting down.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Time left before expiry.
    #[inline]
    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    /// Advance by `elapsed`. Returns true only on the call that expires it.
    pub fn check_timer(&mut self, elapsed: Duration) -> bool {
        if !self.active {
            return false;
        }
        self.remaining = self.remaining.saturating_sub(elapsed);
        if self.remaining.is_zero() {
            self.active = false;
            return true;
        }
        false
    }
}
