//! Single-threaded driver that replays press/release/set interactions.
//!
//! The runner plays the role of the host event loop: between interactions it
//! fires due ticks in deadline order, sleeping the clock up to each deadline.
//! With `ManualClock` the sleeps are virtual and a multi-second hold replays
//! instantly; with `MonotonicClock` they are real.

use std::time::{Duration, Instant};

use stepper_traits::Clock;

use crate::error::{Result, StepperError};
use crate::stepper::{Direction, Stepper, TickOutcome};
use crate::timer::ManualTimer;

/// One scripted interaction, timestamped from the start of the replay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Interaction {
    Press { at_ms: u64, direction: Direction },
    Release { at_ms: u64 },
    Set { at_ms: u64, value: f64 },
}

impl Interaction {
    pub fn at_ms(&self) -> u64 {
        match *self {
            Interaction::Press { at_ms, .. }
            | Interaction::Release { at_ms }
            | Interaction::Set { at_ms, .. } => at_ms,
        }
    }
}

/// What produced a reported value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeCause {
    Tick,
    Click,
    Direct,
}

impl ChangeCause {
    pub fn name(self) -> &'static str {
        match self {
            ChangeCause::Tick => "tick",
            ChangeCause::Click => "click",
            ChangeCause::Direct => "direct",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueChange {
    pub at_ms: u64,
    pub value: f64,
    pub cause: ChangeCause,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplayReport {
    pub changes: Vec<ValueChange>,
    pub final_value: f64,
    pub ticks: usize,
    pub clicks: usize,
    pub stale_ticks: usize,
    pub elapsed_ms: u64,
}

impl ReplayReport {
    /// Values reported by ticks, in order.
    pub fn tick_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.changes
            .iter()
            .filter(|c| c.cause == ChangeCause::Tick)
            .map(|c| c.value)
    }
}

struct Replay<'a, C: Clock> {
    stepper: &'a mut Stepper<C, ManualTimer<C>>,
    timer: &'a ManualTimer<C>,
    epoch: Instant,
    current: f64,
    report: ReplayReport,
}

impl<C: Clock> Replay<'_, C> {
    fn now_ms(&self) -> u64 {
        self.stepper.clock().ms_since(self.epoch)
    }

    fn record(&mut self, value: f64, cause: ChangeCause) {
        self.current = value;
        let at_ms = self.now_ms();
        self.report.changes.push(ValueChange {
            at_ms,
            value,
            cause,
        });
    }

    fn sleep_until(&self, at: Instant) {
        let clock = self.stepper.clock();
        let wait = at.saturating_duration_since(clock.now());
        clock.sleep(wait);
    }

    /// Fire every tick due at or before `until`, then advance to `until`.
    fn pump(&mut self, until: Instant) {
        while let Some(deadline) = self.timer.next_deadline() {
            if deadline > until {
                break;
            }
            self.sleep_until(deadline);
            let Some(due) = self.timer.pop_due(self.stepper.clock().now()) else {
                continue;
            };
            self.deliver(due.session);
        }
        self.sleep_until(until);
    }

    fn deliver(&mut self, session: stepper_traits::SessionId) {
        match self.stepper.on_tick(session, self.current) {
            TickOutcome::Applied(v) => {
                self.report.ticks += 1;
                self.record(v, ChangeCause::Tick);
            }
            TickOutcome::Ignored => self.report.ticks += 1,
            TickOutcome::Stale => self.report.stale_ticks += 1,
        }
    }

    fn apply(&mut self, event: Interaction) {
        match event {
            Interaction::Press { direction, .. } => {
                self.stepper.begin_hold(direction);
            }
            Interaction::Release { .. } => {
                if let Some(v) = self.stepper.end_hold(self.current) {
                    self.report.clicks += 1;
                    self.record(v, ChangeCause::Click);
                }
            }
            Interaction::Set { value, .. } => {
                if let Some(v) = self.stepper.set_direct(value) {
                    self.record(v, ChangeCause::Direct);
                }
            }
        }
    }
}

/// Replay `events` against `stepper`, starting from `start_value`.
///
/// `timer` must be a clone of the `ManualTimer` the stepper was built with.
/// Events must be in non-decreasing time order and must not leave a hold
/// active at the end.
pub fn replay<C: Clock>(
    stepper: &mut Stepper<C, ManualTimer<C>>,
    timer: &ManualTimer<C>,
    start_value: f64,
    events: &[Interaction],
) -> Result<ReplayReport> {
    if let Some(w) = events.windows(2).find(|w| w[1].at_ms() < w[0].at_ms()) {
        return Err(eyre::Report::new(StepperError::Script(format!(
            "event at {} ms comes after event at {} ms",
            w[1].at_ms(),
            w[0].at_ms()
        ))));
    }

    let epoch = stepper.clock().now();
    let mut run = Replay {
        stepper,
        timer,
        epoch,
        current: start_value,
        report: ReplayReport::default(),
    };
    tracing::info!(events = events.len(), start_value, "replay start");

    for event in events {
        run.pump(epoch + Duration::from_millis(event.at_ms()));
        run.apply(*event);
    }

    if run.stepper.is_holding() {
        run.stepper.cancel_hold();
        return Err(eyre::Report::new(StepperError::Script(
            "script ends while a hold is still active".into(),
        )));
    }

    // Anything left belongs to a finished session and must be a no-op.
    while let Some(p) = run.timer.take_next() {
        run.deliver(p.session);
    }

    run.report.final_value = run.current;
    run.report.elapsed_ms = run.now_ms();
    tracing::info!(
        final_value = run.report.final_value,
        ticks = run.report.ticks,
        clicks = run.report.clicks,
        "replay complete"
    );
    Ok(run.report)
}

/// Press at 0 ms, release after `hold_ms`.
pub fn hold_for<C: Clock>(
    stepper: &mut Stepper<C, ManualTimer<C>>,
    timer: &ManualTimer<C>,
    start_value: f64,
    direction: Direction,
    hold_ms: u64,
) -> Result<ReplayReport> {
    replay(
        stepper,
        timer,
        start_value,
        &[
            Interaction::Press {
                at_ms: 0,
                direction,
            },
            Interaction::Release { at_ms: hold_ms },
        ],
    )
}

/// `count` instantaneous press/release pairs, `gap_ms` apart.
pub fn clicks<C: Clock>(
    stepper: &mut Stepper<C, ManualTimer<C>>,
    timer: &ManualTimer<C>,
    start_value: f64,
    direction: Direction,
    count: usize,
    gap_ms: u64,
) -> Result<ReplayReport> {
    let mut events = Vec::with_capacity(count * 2);
    let mut at_ms = 0u64;
    for _ in 0..count {
        events.push(Interaction::Press { at_ms, direction });
        events.push(Interaction::Release { at_ms });
        at_ms = at_ms.saturating_add(gap_ms);
    }
    replay(stepper, timer, start_value, &events)
}

/// Sample the delta ramp at `samples + 1` evenly spaced points over
/// `[0, ramp_ms]`: `(elapsed_ms, delta)`.
pub fn ramp_table(cfg: &crate::config::StepperCfg, samples: u32) -> Vec<(u64, f64)> {
    let samples = samples.max(1);
    (0..=samples)
        .map(|i| {
            let elapsed = cfg.ramp_ms * u64::from(i) / u64::from(samples);
            (elapsed, crate::ramp::compute_tick_delta(elapsed, cfg))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ramp_table_spans_the_ramp() {
        let cfg = crate::config::StepperCfg::preset(crate::config::Preset::Rapid);
        let table = ramp_table(&cfg, 4);
        assert_eq!(table.len(), 5);
        assert_eq!(table[0], (0, cfg.min_change));
        assert_eq!(table[4].0, cfg.ramp_ms);
        assert!((table[4].1 - cfg.max_change).abs() < 1e-9);
    }

    #[test]
    fn ramp_table_zero_samples_is_one_interval() {
        let cfg = crate::config::StepperCfg::default();
        assert_eq!(ramp_table(&cfg, 0).len(), 2);
    }
}
