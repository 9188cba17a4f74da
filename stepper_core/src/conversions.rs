//! `From` implementations bridging `stepper_config` types to `stepper_core` types.

use crate::config::{Preset, StepperCfg};
use crate::ease::Easing;
use crate::runner::Interaction;
use crate::stepper::Direction;

// ── Preset / Easing ──────────────────────────────────────────────────────────

impl From<stepper_config::PresetKind> for Preset {
    fn from(p: stepper_config::PresetKind) -> Self {
        match p {
            stepper_config::PresetKind::Smooth => Preset::Smooth,
            stepper_config::PresetKind::Rapid => Preset::Rapid,
        }
    }
}

impl From<stepper_config::EasingKind> for Easing {
    fn from(e: stepper_config::EasingKind) -> Self {
        match e {
            stepper_config::EasingKind::Parametric => Easing::Parametric,
            stepper_config::EasingKind::Solved => Easing::Solved,
        }
    }
}

// ── StepperCfg ───────────────────────────────────────────────────────────────

impl StepperCfg {
    /// Start from `base` and apply every field set in the TOML section.
    pub fn with_overrides(base: Preset, t: &stepper_config::StepperToml) -> Self {
        let mut cfg = StepperCfg::preset(base);
        if let Some(v) = t.min_value {
            cfg.min_value = v;
        }
        if let Some(v) = t.max_value {
            cfg.max_value = v;
        }
        if let Some(v) = t.min_change {
            cfg.min_change = v;
        }
        if let Some(v) = t.max_change {
            cfg.max_change = v;
        }
        if let Some(v) = t.ramp_ms {
            cfg.ramp_ms = v;
        }
        if let Some(v) = t.tick_ms {
            cfg.tick_ms = v;
        }
        if let Some(v) = t.first_tick_ms {
            cfg.first_tick_ms = v;
        }
        if let Some(v) = t.precision {
            cfg.precision = v;
        }
        if let Some(v) = t.easing {
            cfg.easing = v.into();
        }
        cfg
    }
}

impl From<&stepper_config::StepperToml> for StepperCfg {
    fn from(t: &stepper_config::StepperToml) -> Self {
        let base = t.preset.map(Preset::from).unwrap_or_default();
        Self::with_overrides(base, t)
    }
}

// ── Script events ────────────────────────────────────────────────────────────

impl From<stepper_config::ScriptDirection> for Direction {
    fn from(d: stepper_config::ScriptDirection) -> Self {
        match d {
            stepper_config::ScriptDirection::Up => Direction::Up,
            stepper_config::ScriptDirection::Down => Direction::Down,
        }
    }
}

impl From<&stepper_config::ScriptEvent> for Interaction {
    fn from(e: &stepper_config::ScriptEvent) -> Self {
        match *e {
            stepper_config::ScriptEvent::Press { at_ms, direction } => Interaction::Press {
                at_ms,
                direction: direction.into(),
            },
            stepper_config::ScriptEvent::Release { at_ms } => Interaction::Release { at_ms },
            stepper_config::ScriptEvent::Set { at_ms, value } => Interaction::Set { at_ms, value },
        }
    }
}
