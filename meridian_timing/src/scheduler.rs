// Copyright 2025 the Meridian Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A scheduler holding at most one pending timer.

use core::fmt;
use core::time::Duration;

/// Identity of one arming of a [`Scheduler`].
///
/// Every call to [`Scheduler::schedule`] yields a fresh id, so a host can tell
/// a re-armed timer from the one it saw earlier.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer {}", self.0)
    }
}

#[derive(Debug)]
struct Pending<T> {
    id: TimerId,
    deadline: Duration,
    task: T,
}

/// Single-slot deferred task.
///
/// Arming replaces whatever was pending: only the latest timer can fire, which
/// is what a "settle after the last move" transition wants. The scheduler
/// does not own a clock; callers pass the current time to [`schedule`] and
/// [`poll`], and the host's event loop decides when to poll.
///
/// Dropping the scheduler drops a pending task without running it.
///
/// [`schedule`]: Scheduler::schedule
/// [`poll`]: Scheduler::poll
pub struct Scheduler<T> {
    pending: Option<Pending<T>>,
    next_id: u64,
}

impl<T> Scheduler<T> {
    /// Create a scheduler with nothing pending.
    pub const fn new() -> Self {
        Self {
            pending: None,
            next_id: 0,
        }
    }

    /// Arm the timer to fire `delay` after `now`.
    ///
    /// A previously pending task is dropped without running.
    pub fn schedule(&mut self, now: Duration, delay: Duration, task: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        let deadline = now.saturating_add(delay);
        if let Some(old) = self.pending.replace(Pending { id, deadline, task }) {
            tracing::trace!(replaced = %old.id, armed = %id, "timer re-armed");
        } else {
            tracing::trace!(armed = %id, ?deadline, "timer armed");
        }
        id
    }

    /// Disarm the timer, handing back its task. Calling again returns `None`.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|p| {
            tracing::trace!(cancelled = %p.id, "timer cancelled");
            p.task
        })
    }

    /// Take the task if its deadline has been reached.
    ///
    /// A task is handed out at most once per arming.
    pub fn poll(&mut self, now: Duration) -> Option<T> {
        if self.pending.as_ref().is_some_and(|p| p.deadline <= now) {
            self.pending.take().map(|p| p.task)
        } else {
            None
        }
    }

    /// Whether a timer is armed.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Deadline of the armed timer.
    pub fn deadline(&self) -> Option<Duration> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    /// Id of the armed timer.
    pub fn pending_id(&self) -> Option<TimerId> {
        self.pending.as_ref().map(|p| p.id)
    }

    /// Time left until the armed timer is due, zero if it already is.
    pub fn remaining(&self, now: Duration) -> Option<Duration> {
        self.deadline().map(|d| d.saturating_sub(now))
    }
}

impl<F: FnOnce()> Scheduler<F> {
    /// Run the pending callback if it is due. Returns whether it ran.
    ///
    /// The callback runs on the caller's thread, inside this call.
    pub fn fire_due(&mut self, now: Duration) -> bool {
        match self.poll(now) {
            Some(callback) => {
                callback();
                true
            }
            None => false,
        }
    }
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Scheduler<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("pending", &self.pending_id())
            .field("deadline", &self.deadline())
            .finish_non_exhaustive()
    }
}
