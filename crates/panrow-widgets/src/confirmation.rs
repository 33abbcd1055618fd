#![forbid(unsafe_code)]

//! Cancellable confirmation timeout.
//!
//! Hosts either schedule a callback for [`ConfirmationTimer::pending`] and
//! hand the token back through [`ConfirmationTimer::fire`], or poll
//! [`ConfirmationTimer::expired`] on every tick. A callback that was queued
//! before a cancel, re-arm or row reuse carries an old generation and is
//! ignored.

use web_time::{Duration, Instant};

use crate::glyph::ActionSide;

/// Handle for one armed confirmation window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken {
    generation: u64,
}

#[derive(Debug, Clone, Copy)]
struct PendingConfirmation {
    side: ActionSide,
    deadline: Instant,
}

/// Tracks at most one armed confirmation.
#[derive(Debug, Clone, Default)]
pub struct ConfirmationTimer {
    generation: u64,
    pending: Option<PendingConfirmation>,
}

impl ConfirmationTimer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a window for `side`, replacing any previous one.
    pub fn arm(&mut self, side: ActionSide, now: Instant, timeout: Duration) -> TimerToken {
        self.generation = self.generation.wrapping_add(1);
        self.pending = Some(PendingConfirmation {
            side,
            deadline: now + timeout,
        });
        TimerToken {
            generation: self.generation,
        }
    }

    /// Disarm and invalidate every outstanding token.
    pub fn cancel(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.pending = None;
    }

    /// Resolve a scheduled callback.
    ///
    /// Returns the side whose confirmation timed out, or `None` if the token
    /// is stale or the deadline has not been reached.
    pub fn fire(&mut self, token: TimerToken, now: Instant) -> Option<ActionSide> {
        if token.generation != self.generation {
            return None;
        }
        self.expired(now)
    }

    /// Resolve by polling: disarms and returns the side once `now` reaches
    /// the deadline.
    pub fn expired(&mut self, now: Instant) -> Option<ActionSide> {
        let pending = self.pending?;
        if now < pending.deadline {
            return None;
        }
        self.pending = None;
        Some(pending.side)
    }

    /// Armed side, if any.
    #[must_use]
    pub fn armed_side(&self) -> Option<ActionSide> {
        self.pending.map(|p| p.side)
    }

    /// Token and deadline of the armed window, for hosts that schedule
    /// callbacks.
    #[must_use]
    pub fn pending(&self) -> Option<(TimerToken, Instant)> {
        self.pending.map(|p| {
            (
                TimerToken {
                    generation: self.generation,
                },
                p.deadline,
            )
        })
    }

    /// Whether `now` is still inside the armed window.
    #[must_use]
    pub fn is_open(&self, now: Instant) -> bool {
        self.pending.is_some_and(|p| now < p.deadline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMEOUT: Duration = Duration::from_millis(1500);

    #[test]
    fn fires_at_deadline() {
        let mut timer = ConfirmationTimer::new();
        let t = Instant::now();
        let token = timer.arm(ActionSide::Right, t, TIMEOUT);

        assert_eq!(timer.fire(token, t + Duration::from_millis(1499)), None);
        assert_eq!(timer.armed_side(), Some(ActionSide::Right));
        assert_eq!(timer.fire(token, t + TIMEOUT), Some(ActionSide::Right));
        assert_eq!(timer.armed_side(), None);
        // Second delivery of the same callback is a no-op.
        assert_eq!(timer.fire(token, t + TIMEOUT), None);
    }

    #[test]
    fn cancelled_token_is_stale() {
        let mut timer = ConfirmationTimer::new();
        let t = Instant::now();
        let token = timer.arm(ActionSide::Left, t, TIMEOUT);
        timer.cancel();

        assert_eq!(timer.fire(token, t + TIMEOUT * 2), None);
        assert!(timer.pending().is_none());
    }

    #[test]
    fn rearm_invalidates_previous_token() {
        let mut timer = ConfirmationTimer::new();
        let t = Instant::now();
        let old = timer.arm(ActionSide::Left, t, TIMEOUT);
        let new = timer.arm(ActionSide::Right, t + TIMEOUT, TIMEOUT);

        assert_ne!(old, new);
        assert_eq!(timer.fire(old, t + TIMEOUT * 3), None);
        assert_eq!(timer.armed_side(), Some(ActionSide::Right));
        assert_eq!(timer.fire(new, t + TIMEOUT * 3), Some(ActionSide::Right));
    }

    #[test]
    fn polling_expiry() {
        let mut timer = ConfirmationTimer::new();
        let t = Instant::now();
        timer.arm(ActionSide::Left, t, TIMEOUT);

        assert!(timer.is_open(t));
        assert_eq!(timer.expired(t + Duration::from_millis(10)), None);
        assert!(!timer.is_open(t + TIMEOUT));
        assert_eq!(timer.expired(t + TIMEOUT), Some(ActionSide::Left));
        assert_eq!(timer.expired(t + TIMEOUT), None);
    }

    #[test]
    fn pending_reports_deadline() {
        let mut timer = ConfirmationTimer::new();
        let t = Instant::now();
        let token = timer.arm(ActionSide::Left, t, TIMEOUT);
        assert_eq!(timer.pending(), Some((token, t + TIMEOUT)));
    }
}
