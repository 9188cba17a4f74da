//! Time and scheduling seams for the hold-to-change stepper.
//!
//! The stepper never touches a real clock or timer directly; hosts inject a
//! `Clock` and a `Timer` so that the same state machine runs under a UI event
//! loop, a blocking simulation, or a fully virtual test harness.
pub mod clock;
pub mod timer;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use timer::{SessionId, Timer, TimerHandle};
