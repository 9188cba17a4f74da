//! In-memory deterministic `Timer`.
//!
//! Entries are kept in a small queue and only "fire" when a driver pops them.
//! Clones share the queue, so the stepper can own one handle while the driver
//! (the `runner`, a test, a UI loop) keeps another to pump due ticks.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use stepper_traits::{Clock, SessionId, Timer, TimerHandle};

/// A scheduled, not yet fired, tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pending {
    pub handle: TimerHandle,
    pub session: SessionId,
    pub deadline: Instant,
}

#[derive(Debug, Default)]
struct Queue {
    entries: Vec<Pending>,
    next_id: u64,
}

impl Queue {
    /// Index of the earliest entry; ties go to the first scheduled.
    fn earliest(&self) -> Option<usize> {
        self.entries
            .iter()
            .enumerate()
            .min_by_key(|(_, p)| (p.deadline, p.handle.0))
            .map(|(i, _)| i)
    }
}

#[derive(Debug, Clone)]
pub struct ManualTimer<C: Clock> {
    clock: C,
    queue: Arc<Mutex<Queue>>,
}

impl<C: Clock> ManualTimer<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            queue: Arc::new(Mutex::new(Queue::default())),
        }
    }

    fn with_queue<R>(&self, f: impl FnOnce(&mut Queue) -> R) -> R {
        let mut q = self.queue.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut q)
    }

    /// Number of pending entries.
    pub fn pending(&self) -> usize {
        self.with_queue(|q| q.entries.len())
    }

    /// Deadline of the next entry to fire, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.with_queue(|q| q.earliest().map(|i| q.entries[i].deadline))
    }

    /// Remove and return the earliest entry if its deadline is at or before `now`.
    pub fn pop_due(&self, now: Instant) -> Option<Pending> {
        self.with_queue(|q| {
            let i = q.earliest()?;
            if q.entries[i].deadline <= now {
                Some(q.entries.remove(i))
            } else {
                None
            }
        })
    }

    /// Remove and return the earliest entry regardless of its deadline.
    ///
    /// Models a host that has already dequeued a callback for execution.
    pub fn take_next(&self) -> Option<Pending> {
        self.with_queue(|q| {
            let i = q.earliest()?;
            Some(q.entries.remove(i))
        })
    }
}

impl<C: Clock> Timer for ManualTimer<C> {
    fn schedule(&mut self, delay: Duration, session: SessionId) -> TimerHandle {
        let deadline = self.clock.now() + delay;
        self.with_queue(|q| {
            let handle = TimerHandle(q.next_id);
            q.next_id = q.next_id.wrapping_add(1);
            q.entries.push(Pending {
                handle,
                session,
                deadline,
            });
            handle
        })
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.with_queue(|q| {
            let before = q.entries.len();
            q.entries.retain(|p| p.handle != handle);
            q.entries.len() != before
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepper_traits::ManualClock;

    #[test]
    fn fires_in_deadline_order() {
        let clock = ManualClock::new();
        let mut timer = ManualTimer::new(clock.clone());
        let late = timer.schedule(Duration::from_millis(50), SessionId(1));
        let early = timer.schedule(Duration::from_millis(10), SessionId(2));
        assert_eq!(timer.pending(), 2);

        assert!(timer.pop_due(clock.now()).is_none());
        clock.advance(Duration::from_millis(10));
        assert_eq!(timer.pop_due(clock.now()).map(|p| p.handle), Some(early));
        clock.advance(Duration::from_millis(40));
        assert_eq!(timer.pop_due(clock.now()).map(|p| p.handle), Some(late));
        assert_eq!(timer.pending(), 0);
    }

    #[test]
    fn cancel_reports_whether_pending() {
        let clock = ManualClock::new();
        let mut timer = ManualTimer::new(clock);
        let h = timer.schedule(Duration::from_millis(5), SessionId(1));
        assert!(timer.cancel(h));
        assert!(!timer.cancel(h));
        assert!(timer.next_deadline().is_none());
    }

    #[test]
    fn clones_share_the_queue() {
        let clock = ManualClock::new();
        let mut a = ManualTimer::new(clock);
        let b = a.clone();
        a.schedule(Duration::from_millis(1), SessionId(7));
        assert_eq!(b.take_next().map(|p| p.session), Some(SessionId(7)));
        assert_eq!(a.pending(), 0);
    }
}
