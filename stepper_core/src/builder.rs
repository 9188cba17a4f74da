//! Type-state builder for `Stepper`.
//!
//! A clock and a timer must be supplied before `build()` exists; the config
//! defaults to the `Smooth` preset and is validated on `build()`.

use stepper_traits::{Clock, Timer};

use crate::config::{Preset, StepperCfg};
use crate::error::Result;
use crate::stepper::{Stepper, ValueSink};

/// Placeholder for a clock or timer not yet provided.
pub struct Missing;

pub struct StepperBuilder<C, T> {
    cfg: StepperCfg,
    clock: C,
    timer: T,
    sink: Option<ValueSink>,
}

impl Default for StepperBuilder<Missing, Missing> {
    fn default() -> Self {
        Self {
            cfg: StepperCfg::default(),
            clock: Missing,
            timer: Missing,
            sink: None,
        }
    }
}

impl Stepper<stepper_traits::MonotonicClock, Box<dyn Timer>> {
    /// Start building a Stepper.
    pub fn builder() -> StepperBuilder<Missing, Missing> {
        StepperBuilder::default()
    }
}

impl<C, T> StepperBuilder<C, T> {
    pub fn with_config(mut self, cfg: StepperCfg) -> Self {
        self.cfg = cfg;
        self
    }

    /// Replace the whole config with a preset's values.
    pub fn with_preset(mut self, preset: Preset) -> Self {
        self.cfg = StepperCfg::preset(preset);
        self
    }

    /// Register the value-changed callback.
    pub fn on_value_changed<F: FnMut(f64) + 'static>(mut self, f: F) -> Self {
        self.sink = Some(Box::new(f));
        self
    }

    pub fn with_clock<C2: Clock>(self, clock: C2) -> StepperBuilder<C2, T> {
        StepperBuilder {
            cfg: self.cfg,
            clock,
            timer: self.timer,
            sink: self.sink,
        }
    }

    pub fn with_timer<T2: Timer>(self, timer: T2) -> StepperBuilder<C, T2> {
        StepperBuilder {
            cfg: self.cfg,
            clock: self.clock,
            timer,
            sink: self.sink,
        }
    }
}

impl<C: Clock, T: Timer> StepperBuilder<C, T> {
    pub fn build(self) -> Result<Stepper<C, T>> {
        self.cfg.validate().map_err(eyre::Report::new)?;
        let sink = self.sink.unwrap_or_else(|| Box::new(|_| {}));
        Ok(Stepper::from_parts(self.cfg, self.clock, self.timer, sink))
    }
}
