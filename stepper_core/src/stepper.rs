//! The hold state machine (`Stepper`).
//!
//! Idle → Holding → Idle. While holding, every fired tick reads the caller's
//! current value, adds the ramped delta in the hold direction, normalizes,
//! reports, and schedules the next tick. Each tick carries the `SessionId` of
//! the hold that scheduled it; ticks for any other session are dropped.

use std::time::{Duration, Instant};

use stepper_traits::{Clock, SessionId, Timer, TimerHandle};

use crate::config::StepperCfg;
use crate::normalize::normalize;
use crate::ramp::compute_tick_delta;

/// Callback receiving every normalized value the stepper reports.
pub type ValueSink = Box<dyn FnMut(f64)>;

/// Which control is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Direction::Up => 1.0,
            Direction::Down => -1.0,
        }
    }
}

/// State of one active hold. Exists only between `begin_hold` and `end_hold`.
#[derive(Debug, Clone)]
pub struct HoldSession {
    pub id: SessionId,
    pub direction: Direction,
    pub started_at: Instant,
    /// Next scheduled tick; owned exclusively by this session.
    pub(crate) timer: Option<TimerHandle>,
    /// Ticks applied so far.
    pub ticks: u32,
}

/// Result of delivering a fired tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// The tick changed the value and reported it.
    Applied(f64),
    /// The tick ran but the candidate was not a number; nothing reported.
    Ignored,
    /// The tick belonged to a session that no longer exists.
    Stale,
}

/// Press-and-hold numeric stepper.
pub struct Stepper<C: Clock, T: Timer> {
    pub(crate) cfg: StepperCfg,
    pub(crate) clock: C,
    pub(crate) timer: T,
    pub(crate) session: Option<HoldSession>,
    pub(crate) next_session: u64,
    pub(crate) on_value_changed: ValueSink,
}

impl<C: Clock, T: Timer> core::fmt::Debug for Stepper<C, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Stepper")
            .field("cfg", &self.cfg)
            .field("session", &self.session)
            .field("next_session", &self.next_session)
            .finish_non_exhaustive()
    }
}

impl<C: Clock, T: Timer> Stepper<C, T> {
    pub(crate) fn from_parts(cfg: StepperCfg, clock: C, timer: T, sink: ValueSink) -> Self {
        Self {
            cfg,
            clock,
            timer,
            session: None,
            next_session: 1,
            on_value_changed: sink,
        }
    }

    pub fn config(&self) -> &StepperCfg {
        &self.cfg
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn is_holding(&self) -> bool {
        self.session.is_some()
    }

    pub fn active_session(&self) -> Option<&HoldSession> {
        self.session.as_ref()
    }

    /// Start a hold. Any session already active is torn down first, and its
    /// pending tick cancelled, before the new one is created.
    pub fn begin_hold(&mut self, direction: Direction) -> SessionId {
        if let Some(prev) = self.session.take() {
            tracing::debug!(session = %prev.id, ticks = prev.ticks, "hold superseded");
            self.teardown(&prev);
        }

        let id = SessionId(self.next_session);
        self.next_session = self.next_session.wrapping_add(1);
        let handle = self
            .timer
            .schedule(Duration::from_millis(self.cfg.first_tick_ms), id);
        self.session = Some(HoldSession {
            id,
            direction,
            started_at: self.clock.now(),
            timer: Some(handle),
            ticks: 0,
        });
        tracing::debug!(
            session = %id,
            ?direction,
            first_tick_ms = self.cfg.first_tick_ms,
            "hold start"
        );
        id
    }

    /// Deliver a fired tick.
    ///
    /// `current` is the latest externally owned value, so corrections made
    /// between ticks are honored. Ticks for anything but the active session
    /// are no-ops: cancellation cannot always stop a callback that was already
    /// queued when the hold ended.
    pub fn on_tick(&mut self, session: SessionId, current: f64) -> TickOutcome {
        let (elapsed_ms, direction) = match self.session.as_mut() {
            Some(active) if active.id == session => {
                active.ticks = active.ticks.saturating_add(1);
                active.timer = None;
                (self.clock.ms_since(active.started_at), active.direction)
            }
            _ => {
                tracing::debug!(session = %session, "stale tick ignored");
                return TickOutcome::Stale;
            }
        };

        let delta = compute_tick_delta(elapsed_ms, &self.cfg) * direction.sign();
        let next = normalize(current + delta, &self.cfg);
        if let Some(v) = next {
            tracing::trace!(session = %session, elapsed_ms, delta, value = v, "tick");
            (self.on_value_changed)(v);
        }

        let handle = self
            .timer
            .schedule(Duration::from_millis(self.cfg.tick_ms), session);
        if let Some(active) = self.session.as_mut() {
            active.timer = Some(handle);
        }

        match next {
            Some(v) => TickOutcome::Applied(v),
            None => TickOutcome::Ignored,
        }
    }

    /// End the active hold.
    ///
    /// A release before the first tick delay, or before any tick fired, is a
    /// click: exactly one `min_change` step is applied in the held direction.
    /// Returns the click value, or `None` when idle or when ticks already
    /// carried the change.
    pub fn end_hold(&mut self, current: f64) -> Option<f64> {
        let session = self.session.take()?;
        let elapsed_ms = self.clock.ms_since(session.started_at);
        self.teardown(&session);

        let is_click = elapsed_ms < self.cfg.first_tick_ms || session.ticks == 0;
        if !is_click {
            tracing::debug!(session = %session.id, ticks = session.ticks, elapsed_ms, "hold end");
            return None;
        }

        let candidate = current + self.cfg.min_change * session.direction.sign();
        let v = normalize(candidate, &self.cfg)?;
        tracing::debug!(session = %session.id, elapsed_ms, value = v, "click");
        (self.on_value_changed)(v);
        Some(v)
    }

    /// Drop the active hold without applying a click step.
    pub fn cancel_hold(&mut self) -> bool {
        match self.session.take() {
            Some(session) => {
                tracing::debug!(session = %session.id, "hold cancelled");
                self.teardown(&session);
                true
            }
            None => false,
        }
    }

    /// Commit a directly entered value. Independent of hold state.
    pub fn set_direct(&mut self, raw: f64) -> Option<f64> {
        let v = normalize(raw, &self.cfg)?;
        tracing::debug!(raw, value = v, "direct entry");
        (self.on_value_changed)(v);
        Some(v)
    }

    fn teardown(&mut self, session: &HoldSession) {
        if let Some(handle) = session.timer
            && !self.timer.cancel(handle)
        {
            tracing::trace!(session = %session.id, "pending tick already fired");
        }
    }
}

impl<C: Clock, T: Timer> Drop for Stepper<C, T> {
    fn drop(&mut self) {
        if let Some(session) = self.session.take() {
            self.teardown(&session);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_signs() {
        assert_eq!(Direction::Up.sign(), 1.0);
        assert_eq!(Direction::Down.sign(), -1.0);
    }
}
