//! Refresh timing.
//!
//! The scheduler owns no timer of its own: the UI loop calls [`RefreshScheduler::poll`]
//! every frame and sleeps for [`RefreshScheduler::time_until_due`] in between, so the
//! same code runs unchanged under test with synthetic instants.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// Idle until `due`
    Waiting { due: Instant },
    /// A refresh is in flight
    Fetching { since: Instant },
}

#[derive(Debug, Clone)]
pub struct RefreshScheduler {
    state: SchedulerState,
    interval: Duration,
}

impl RefreshScheduler {
    /// First refresh fires `initial_delay` after `now`, then every
    /// `interval` after the previous one completes.
    pub fn new(now: Instant, initial_delay: Duration, interval: Duration) -> Self {
        Self {
            state: SchedulerState::Waiting {
                due: now + initial_delay,
            },
            interval,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn is_fetching(&self) -> bool {
        matches!(self.state, SchedulerState::Fetching { .. })
    }

    /// Returns true exactly once per cycle, when the deadline has passed.
    /// The caller must start a refresh and later call [`RefreshScheduler::complete`].
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.state {
            SchedulerState::Waiting { due } if now >= due => {
                tracing::debug!("Refresh due");
                self.state = SchedulerState::Fetching { since: now };
                true
            }
            _ => false,
        }
    }

    /// Re-arm the timer after a refresh finished, whether it produced data or not.
    pub fn complete(&mut self, now: Instant) {
        match self.state {
            SchedulerState::Fetching { since } => {
                tracing::debug!(
                    "Refresh finished after {:?}, next in {:?}",
                    now.saturating_duration_since(since),
                    self.interval
                );
                self.state = SchedulerState::Waiting {
                    due: now + self.interval,
                };
            }
            SchedulerState::Waiting { .. } => {
                tracing::warn!("Refresh completion received while no refresh was running");
            }
        }
    }

    /// How long the UI may sleep before polling again; `None` while fetching.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        match self.state {
            SchedulerState::Waiting { due } => Some(due.saturating_duration_since(now)),
            SchedulerState::Fetching { .. } => None,
        }
    }
}
