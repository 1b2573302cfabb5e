// SPDX-License-Identifier: MIT OR Apache-2.0
//! Single-slot cancellable timer.
//!
//! Timers run on the owning machine's clock rather than the wall clock: the
//! machine feeds elapsed time through [`Timer::advance`]. Scheduling always
//! cancels the previous deadline first, so a timer can never fire twice for
//! one schedule or fire for a stale one.

use std::time::Duration;

/// Handle for one scheduled deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

impl TimerId {
    /// Get the raw generation value
    pub fn value(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    id: TimerId,
    remaining: Duration,
}

/// A timer with at most one pending deadline
#[derive(Debug, Clone, Default)]
pub struct Timer {
    generation: u64,
    pending: Option<Pending>,
}

impl Timer {
    /// Create a timer with nothing scheduled
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the timer to fire after `after`, replacing any pending deadline.
    pub fn schedule(&mut self, after: Duration) -> TimerId {
        self.cancel();
        self.generation += 1;
        let id = TimerId(self.generation);
        self.pending = Some(Pending {
            id,
            remaining: after,
        });
        id
    }

    /// Cancel the pending deadline. Returns true if one was pending.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Whether a deadline is pending
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// ID of the pending deadline, if any
    pub fn pending_id(&self) -> Option<TimerId> {
        self.pending.map(|p| p.id)
    }

    /// Time left until the pending deadline fires
    pub fn remaining(&self) -> Option<Duration> {
        self.pending.map(|p| p.remaining)
    }

    /// Advance the timer's clock.
    ///
    /// If the pending deadline is reached, the timer disarms itself and returns
    /// the time left over past the deadline. Otherwise returns `None`.
    pub fn advance(&mut self, dt: Duration) -> Option<Duration> {
        let pending = self.pending.as_mut()?;
        if dt >= pending.remaining {
            let overshoot = dt - pending.remaining;
            self.pending = None;
            Some(overshoot)
        } else {
            pending.remaining -= dt;
            None
        }
    }
}
