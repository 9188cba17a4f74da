//! Runtime configuration for the stepper.
//!
//! These are the structs used by `Stepper`. They are separate from the
//! TOML-deserialized config in `stepper_config`; see `conversions`.

use crate::ease::Easing;
use crate::error::BuildError;

pub use stepper_config::MAX_PRECISION;

/// Named default sets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Preset {
    /// Slow build-up: 190 ms before the first repeat, then a 10 ms cadence,
    /// ramping to 20 per tick over 8 s. The long first delay keeps ordinary
    /// clicks from double-stepping.
    #[default]
    Smooth,
    /// Faster build-up: 81 ms for the first repeat and every repeat after,
    /// ramping to 30 per tick over 3 s.
    Rapid,
}

impl Preset {
    pub fn name(self) -> &'static str {
        match self {
            Preset::Smooth => "smooth",
            Preset::Rapid => "rapid",
        }
    }
}

/// Stepper configuration: bounds, ramp, cadence, and rounding.
#[derive(Debug, Clone, PartialEq)]
pub struct StepperCfg {
    /// Inclusive lower bound. Default: negative infinity.
    pub min_value: f64,
    /// Inclusive upper bound. Default: `f64::MAX`.
    pub max_value: f64,
    /// Per-tick change at the start of a hold, and the size of a click step.
    pub min_change: f64,
    /// Per-tick change once the ramp has completed.
    pub max_change: f64,
    /// Time for the per-tick change to travel from `min_change` to `max_change`.
    /// 0 means the change saturates immediately.
    pub ramp_ms: u64,
    /// Delay between repeated ticks while held.
    pub tick_ms: u64,
    /// Delay before the first tick. A release before this counts as a click.
    pub first_tick_ms: u64,
    /// Fractional digits kept; 0 floors to an integer.
    pub precision: u32,
    /// Mapping from ramp progress to eased progress.
    pub easing: Easing,
}

impl StepperCfg {
    pub fn preset(preset: Preset) -> Self {
        let (max_change, ramp_ms, tick_ms, first_tick_ms) = match preset {
            Preset::Smooth => (20.0, 8_000, 10, 190),
            Preset::Rapid => (30.0, 3_000, 81, 81),
        };
        Self {
            min_value: f64::NEG_INFINITY,
            max_value: f64::MAX,
            min_change: 1.0,
            max_change,
            ramp_ms,
            tick_ms,
            first_tick_ms,
            precision: 0,
            easing: Easing::Parametric,
        }
    }

    /// Check invariants the state machine relies on.
    pub fn validate(&self) -> Result<(), BuildError> {
        if self.min_value.is_nan() || self.max_value.is_nan() {
            return Err(BuildError::InvalidConfig("bounds must not be NaN"));
        }
        if self.min_value > self.max_value {
            return Err(BuildError::InvalidConfig("min_value must be <= max_value"));
        }
        if !(self.min_change.is_finite() && self.max_change.is_finite()) {
            return Err(BuildError::InvalidConfig("change magnitudes must be finite"));
        }
        if self.min_change.is_sign_negative() {
            return Err(BuildError::InvalidConfig("min_change must be >= 0"));
        }
        if self.min_change > self.max_change {
            return Err(BuildError::InvalidConfig("min_change must be <= max_change"));
        }
        if self.tick_ms == 0 {
            return Err(BuildError::InvalidConfig("tick_ms must be >= 1"));
        }
        if self.first_tick_ms == 0 {
            return Err(BuildError::InvalidConfig("first_tick_ms must be >= 1"));
        }
        if self.precision > MAX_PRECISION {
            return Err(BuildError::InvalidConfig("precision must be <= 15"));
        }
        let (lo, hi) = crate::normalize::grid_bounds(self);
        if lo > hi {
            return Err(BuildError::InvalidConfig(
                "bounds must contain a value at the configured precision",
            ));
        }
        Ok(())
    }
}

impl Default for StepperCfg {
    fn default() -> Self {
        Self::preset(Preset::default())
    }
}

impl From<Preset> for StepperCfg {
    fn from(p: Preset) -> Self {
        Self::preset(p)
    }
}
