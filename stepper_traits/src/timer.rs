//! One-shot, cancellable scheduling.

use std::fmt;
use std::time::Duration;

/// Identity of one hold session. Every scheduled tick carries the id of the
/// session that scheduled it, so a tick that outlives its session can be
/// recognised and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Opaque handle to a single scheduled callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub u64);

/// Host timer facility.
///
/// `schedule` arranges for the host to call back into the stepper with
/// `session` once `delay` has passed. `cancel` returns `false` when the entry
/// already fired (or never existed); callers must not assume cancellation
/// prevents a callback that is already queued for execution.
pub trait Timer {
    fn schedule(&mut self, delay: Duration, session: SessionId) -> TimerHandle;
    fn cancel(&mut self, handle: TimerHandle) -> bool;
}

impl<T: Timer + ?Sized> Timer for Box<T> {
    fn schedule(&mut self, delay: Duration, session: SessionId) -> TimerHandle {
        (**self).schedule(delay, session)
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        (**self).cancel(handle)
    }
}
