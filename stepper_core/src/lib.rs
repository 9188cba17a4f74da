#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Press-and-hold numeric stepper core (UI-agnostic).
//!
//! A `Stepper` turns pointer/touch press and release events into a stream of
//! bounded, rounded values. Holding a control repeats the change on a fixed
//! cadence while the per-tick amount ramps up along an ease-in-ease-out
//! curve; a quick press-release applies a single step.
//!
//! ## Architecture
//!
//! - **Easing**: cubic Bézier evaluation (`ease` module)
//! - **Ramp**: elapsed time → per-tick delta (`ramp` module)
//! - **Normalize**: round/floor then clamp (`normalize` module)
//! - **Configuration**: `StepperCfg` and the `Smooth`/`Rapid` presets (`config` module)
//! - **State machine**: `Stepper` with hold sessions and stale-tick guarding (`stepper` module)
//! - **Driving**: `ManualTimer` and the `runner` event loop for replays and tests
//!
//! Time and scheduling come from `stepper_traits::Clock` and
//! `stepper_traits::Timer`, so the state machine never reads a wall clock.

pub mod builder;
pub mod config;
pub mod conversions;
pub mod ease;
pub mod error;
pub mod normalize;
pub mod ramp;
pub mod runner;
pub mod stepper;
pub mod timer;

pub use builder::{Missing, StepperBuilder};
pub use config::{Preset, StepperCfg};
pub use ease::{CubicBezier, Easing, cubic_bezier_ease};
pub use error::{BuildError, StepperError};
pub use normalize::{grid_bounds, normalize, round_to_precision};
pub use ramp::compute_tick_delta;
pub use runner::{ChangeCause, Interaction, ReplayReport, ValueChange, replay};
pub use stepper::{Direction, HoldSession, Stepper, TickOutcome, ValueSink};
pub use timer::{ManualTimer, Pending};
