#![allow(clippy::approx_constant)]

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use stepper_core::{Direction, ManualTimer, Preset, Stepper, StepperCfg, TickOutcome};
use stepper_traits::{Clock, ManualClock};

type TestStepper = Stepper<ManualClock, ManualTimer<ManualClock>>;

// Build a stepper on a virtual clock and record every reported value.
fn rig(cfg: StepperCfg) -> (TestStepper, ManualTimer<ManualClock>, ManualClock, Rc<RefCell<Vec<f64>>>) {
    let clock = ManualClock::new();
    let timer = ManualTimer::new(clock.clone());
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    let stepper = Stepper::builder()
        .with_config(cfg)
        .with_clock(clock.clone())
        .with_timer(timer.clone())
        .on_value_changed(move |v| sink.borrow_mut().push(v))
        .build()
        .unwrap();
    (stepper, timer, clock, seen)
}

// Advance to the next deadline and deliver that tick.
fn fire_next(
    stepper: &mut TestStepper,
    timer: &ManualTimer<ManualClock>,
    clock: &ManualClock,
    current: f64,
) -> TickOutcome {
    let deadline = timer.next_deadline().expect("a tick should be pending");
    clock.sleep(deadline.saturating_duration_since(clock.now()));
    let due = timer.pop_due(clock.now()).expect("tick should be due");
    stepper.on_tick(due.session, current)
}

#[test]
fn quick_press_release_is_one_step() {
    let (mut stepper, timer, clock, seen) = rig(StepperCfg::preset(Preset::Smooth));
    stepper.begin_hold(Direction::Up);
    clock.advance(Duration::from_millis(50));
    assert_eq!(stepper.end_hold(5.0), Some(6.0));
    assert_eq!(*seen.borrow(), vec![6.0]);
    assert!(!stepper.is_holding());
    assert_eq!(timer.pending(), 0);
}

#[test]
fn click_down_floors_below_zero() {
    let (mut stepper, _timer, _clock, seen) = rig(StepperCfg::default());
    stepper.begin_hold(Direction::Down);
    assert_eq!(stepper.end_hold(0.0), Some(-1.0));
    assert_eq!(*seen.borrow(), vec![-1.0]);
}

#[test]
fn release_after_late_first_tick_still_steps_once() {
    // The host never delivered the first tick; the release must still change the value.
    let (mut stepper, _timer, clock, seen) = rig(StepperCfg::default());
    stepper.begin_hold(Direction::Up);
    clock.advance(Duration::from_millis(500));
    assert_eq!(stepper.end_hold(5.0), Some(6.0));
    assert_eq!(seen.borrow().len(), 1);
}

#[test]
fn release_after_ticks_applies_no_extra_step() {
    let (mut stepper, timer, clock, seen) = rig(StepperCfg::preset(Preset::Rapid));
    stepper.begin_hold(Direction::Up);
    let first = fire_next(&mut stepper, &timer, &clock, 0.0);
    assert_eq!(first, TickOutcome::Applied(1.0));
    assert_eq!(stepper.end_hold(1.0), None);
    assert_eq!(*seen.borrow(), vec![1.0]);
    assert_eq!(timer.pending(), 0);
}

#[test]
fn first_tick_waits_for_first_delay() {
    let (mut stepper, timer, clock, _seen) = rig(StepperCfg::preset(Preset::Smooth));
    let epoch = clock.now();
    stepper.begin_hold(Direction::Up);
    let first = timer.next_deadline().unwrap();
    assert_eq!(first.duration_since(epoch), Duration::from_millis(190));

    fire_next(&mut stepper, &timer, &clock, 0.0);
    let second = timer.next_deadline().unwrap();
    assert_eq!(second.duration_since(epoch), Duration::from_millis(200));
}

#[test]
fn each_tick_reads_the_callers_current_value() {
    let (mut stepper, timer, clock, _seen) = rig(StepperCfg::preset(Preset::Rapid));
    stepper.begin_hold(Direction::Up);
    assert_eq!(fire_next(&mut stepper, &timer, &clock, 0.0), TickOutcome::Applied(1.0));
    // External correction between ticks.
    match fire_next(&mut stepper, &timer, &clock, 100.0) {
        TickOutcome::Applied(v) => assert_eq!(v, 101.0),
        other => panic!("unexpected outcome {other:?}"),
    }
    stepper.end_hold(101.0);
}

#[test]
fn holding_past_max_clamps_and_stays() {
    let cfg = StepperCfg {
        max_value: 10.0,
        min_change: 5.0,
        ..StepperCfg::preset(Preset::Rapid)
    };
    let (mut stepper, timer, clock, seen) = rig(cfg);
    stepper.begin_hold(Direction::Up);
    let mut current = 9.0;
    for _ in 0..10 {
        if let TickOutcome::Applied(v) = fire_next(&mut stepper, &timer, &clock, current) {
            current = v;
        }
    }
    stepper.end_hold(current);
    let seen = seen.borrow();
    assert_eq!(seen.first(), Some(&10.0));
    assert!(seen.iter().all(|v| *v <= 10.0));
}

#[test]
fn second_hold_cancels_first_sessions_tick() {
    let (mut stepper, timer, clock, seen) = rig(StepperCfg::preset(Preset::Rapid));
    let s1 = stepper.begin_hold(Direction::Up);
    clock.advance(Duration::from_millis(20));
    let s2 = stepper.begin_hold(Direction::Down);
    assert_ne!(s1, s2);
    assert_eq!(timer.pending(), 1);

    let due = timer.take_next().unwrap();
    assert_eq!(due.session, s2);
    assert_eq!(stepper.on_tick(due.session, 0.0), TickOutcome::Applied(-1.0));
    assert_eq!(*seen.borrow(), vec![-1.0]);
    assert_eq!(stepper.active_session().map(|s| s.id), Some(s2));
}

#[test]
fn tick_already_dequeued_before_new_hold_is_ignored() {
    let (mut stepper, timer, _clock, seen) = rig(StepperCfg::default());
    let s1 = stepper.begin_hold(Direction::Up);
    // Host has already pulled s1's callback off its queue when the new hold starts.
    let in_flight = timer.take_next().unwrap();
    assert_eq!(in_flight.session, s1);
    stepper.begin_hold(Direction::Up);

    assert_eq!(stepper.on_tick(in_flight.session, 0.0), TickOutcome::Stale);
    assert!(seen.borrow().is_empty());
}

#[test]
fn tick_after_release_is_ignored() {
    let (mut stepper, _timer, _clock, seen) = rig(StepperCfg::default());
    let s = stepper.begin_hold(Direction::Up);
    stepper.end_hold(0.0);
    seen.borrow_mut().clear();
    assert_eq!(stepper.on_tick(s, 0.0), TickOutcome::Stale);
    assert!(seen.borrow().is_empty());
}

#[test]
fn end_hold_when_idle_is_noop() {
    let (mut stepper, _timer, _clock, seen) = rig(StepperCfg::default());
    assert_eq!(stepper.end_hold(3.0), None);
    assert!(!stepper.cancel_hold());
    assert!(seen.borrow().is_empty());
}

#[test]
fn cancel_hold_skips_click_step() {
    let (mut stepper, timer, _clock, seen) = rig(StepperCfg::default());
    stepper.begin_hold(Direction::Up);
    assert!(stepper.cancel_hold());
    assert_eq!(timer.pending(), 0);
    assert!(seen.borrow().is_empty());
}

#[test]
fn set_direct_normalizes_and_reports() {
    let cfg = StepperCfg {
        precision: 2,
        min_value: -5.0,
        max_value: 5.0,
        ..StepperCfg::default()
    };
    let (mut stepper, _timer, _clock, seen) = rig(cfg);
    assert_eq!(stepper.set_direct(3.14159), Some(3.14));
    assert_eq!(stepper.set_direct(99.0), Some(5.0));
    assert_eq!(stepper.set_direct(f64::NAN), None);
    assert_eq!(*seen.borrow(), vec![3.14, 5.0]);
}

#[test]
fn set_direct_during_hold_does_not_end_it() {
    let (mut stepper, _timer, _clock, _seen) = rig(StepperCfg::default());
    stepper.begin_hold(Direction::Up);
    stepper.set_direct(42.0);
    assert!(stepper.is_holding());
}

#[test]
fn nan_current_value_is_ignored_but_hold_continues() {
    let (mut stepper, timer, clock, seen) = rig(StepperCfg::preset(Preset::Rapid));
    stepper.begin_hold(Direction::Up);
    assert_eq!(fire_next(&mut stepper, &timer, &clock, f64::NAN), TickOutcome::Ignored);
    assert!(seen.borrow().is_empty());
    assert_eq!(timer.pending(), 1);
    stepper.cancel_hold();
}

#[test]
fn dropping_stepper_cancels_pending_tick() {
    let (mut stepper, timer, _clock, _seen) = rig(StepperCfg::default());
    stepper.begin_hold(Direction::Up);
    assert_eq!(timer.pending(), 1);
    drop(stepper);
    assert_eq!(timer.pending(), 0);
}
