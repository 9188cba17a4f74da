#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schemas and interaction-script parsing for the stepper.
//!
//! - `Config` and sub-structs are deserialized from TOML and validated.
//! - Every section and field is optional; absent values fall back to the
//!   selected preset in `stepper_core`.
//! - `parse_script` reads the line-oriented press/release/set format used by
//!   the CLI `replay` command.
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PresetKind {
    /// Long first delay, 10 ms cadence, 8 s ramp to 20 per tick.
    #[default]
    Smooth,
    /// First delay equals the 81 ms cadence, 3 s ramp to 30 per tick.
    Rapid,
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EasingKind {
    /// Progress used directly as the curve parameter.
    #[default]
    Parametric,
    /// Progress solved against the curve's x coordinate.
    Solved,
}

/// `[stepper]` section. `None` means "keep the preset's value".
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct StepperToml {
    pub preset: Option<PresetKind>,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub min_change: Option<f64>,
    pub max_change: Option<f64>,
    /// Time to ramp from min_change to max_change. Also accepts "ramp_duration_ms".
    #[serde(alias = "ramp_duration_ms")]
    pub ramp_ms: Option<u64>,
    /// Delay between repeated ticks. Also accepts "tick_interval_ms".
    #[serde(alias = "tick_interval_ms")]
    pub tick_ms: Option<u64>,
    /// Delay before the first tick of a hold. Also accepts "initial_delay_ms".
    #[serde(alias = "initial_delay_ms")]
    pub first_tick_ms: Option<u64>,
    pub precision: Option<u32>,
    pub easing: Option<EasingKind>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log (JSON lines)
    pub level: Option<String>, // "info","debug"
    /// Log rotation policy: "never" | "daily" | "hourly" (default: never)
    pub rotation: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub stepper: StepperToml,
    pub logging: Logging,
}

/// Largest accepted `precision`; beyond this f64 cannot represent the digits.
pub const MAX_PRECISION: u32 = 15;

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

/// Read, parse, and validate a config file.
pub fn load_file(path: &std::path::Path) -> eyre::Result<Config> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("read config {:?}: {}", path, e))?;
    let cfg = load_toml(&text).map_err(|e| eyre::eyre!("parse config {:?}: {}", path, e))?;
    cfg.validate()?;
    Ok(cfg)
}

impl Config {
    pub fn validate(&self) -> eyre::Result<()> {
        let s = &self.stepper;

        // Bounds
        if s.min_value.is_some_and(f64::is_nan) {
            eyre::bail!("stepper.min_value must be a number");
        }
        if s.max_value.is_some_and(f64::is_nan) {
            eyre::bail!("stepper.max_value must be a number");
        }
        if let (Some(lo), Some(hi)) = (s.min_value, s.max_value)
            && lo > hi
        {
            eyre::bail!("stepper.min_value must be <= stepper.max_value");
        }

        // Change magnitudes
        if let Some(c) = s.min_change
            && !(c.is_finite() && c >= 0.0)
        {
            eyre::bail!("stepper.min_change must be finite and >= 0");
        }
        if let Some(c) = s.max_change
            && !(c.is_finite() && c >= 0.0)
        {
            eyre::bail!("stepper.max_change must be finite and >= 0");
        }
        if let (Some(lo), Some(hi)) = (s.min_change, s.max_change)
            && lo > hi
        {
            eyre::bail!("stepper.min_change must be <= stepper.max_change");
        }

        // Timing
        if s.tick_ms == Some(0) {
            eyre::bail!("stepper.tick_ms must be >= 1");
        }
        if s.first_tick_ms == Some(0) {
            eyre::bail!("stepper.first_tick_ms must be >= 1");
        }
        if s.ramp_ms.is_some_and(|ms| ms > 60 * 60 * 1000) {
            eyre::bail!("stepper.ramp_ms is unreasonably large (>1h)");
        }

        // Rounding
        if s.precision.is_some_and(|p| p > MAX_PRECISION) {
            eyre::bail!("stepper.precision must be <= {MAX_PRECISION}");
        }

        // Logging
        if let Some(r) = self.logging.rotation.as_deref()
            && !matches!(r, "never" | "daily" | "hourly")
        {
            eyre::bail!("logging.rotation must be one of never|daily|hourly, got {r:?}");
        }

        Ok(())
    }
}

/// Direction token as written in scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptDirection {
    Up,
    Down,
}

/// One line of an interaction script.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScriptEvent {
    Press { at_ms: u64, direction: ScriptDirection },
    Release { at_ms: u64 },
    Set { at_ms: u64, value: f64 },
}

impl ScriptEvent {
    pub fn at_ms(&self) -> u64 {
        match *self {
            ScriptEvent::Press { at_ms, .. }
            | ScriptEvent::Release { at_ms }
            | ScriptEvent::Set { at_ms, .. } => at_ms,
        }
    }
}

/// Parse an interaction script.
///
/// Format, one event per line:
/// ```text
/// # comment
/// 0     press up
/// 1500  release
/// 2000  set 12.5
/// ```
/// Timestamps are milliseconds from the start of the script and must not go
/// backwards.
pub fn parse_script(text: &str) -> eyre::Result<Vec<ScriptEvent>> {
    let mut out = Vec::new();
    let mut last_at = 0u64;
    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let mut parts = line.split_whitespace();
        let at_tok = parts.next().unwrap_or("");
        let at_ms: u64 = at_tok
            .parse()
            .map_err(|_| eyre::eyre!("line {line_no}: invalid timestamp {at_tok:?}"))?;
        if at_ms < last_at {
            eyre::bail!("line {line_no}: timestamp {at_ms} goes backwards (previous {last_at})");
        }
        last_at = at_ms;

        let verb = parts
            .next()
            .ok_or_else(|| eyre::eyre!("line {line_no}: missing event"))?;
        let event = match verb.to_ascii_lowercase().as_str() {
            "press" => {
                let dir = parts
                    .next()
                    .ok_or_else(|| eyre::eyre!("line {line_no}: press needs a direction"))?;
                let direction = match dir.to_ascii_lowercase().as_str() {
                    "up" | "+" | "inc" => ScriptDirection::Up,
                    "down" | "-" | "dec" => ScriptDirection::Down,
                    other => eyre::bail!("line {line_no}: unknown direction {other:?}"),
                };
                ScriptEvent::Press { at_ms, direction }
            }
            "release" => ScriptEvent::Release { at_ms },
            "set" => {
                let tok = parts
                    .next()
                    .ok_or_else(|| eyre::eyre!("line {line_no}: set needs a value"))?;
                let value: f64 = tok
                    .parse()
                    .map_err(|_| eyre::eyre!("line {line_no}: invalid number {tok:?}"))?;
                if value.is_nan() {
                    eyre::bail!("line {line_no}: set value must be a number");
                }
                ScriptEvent::Set { at_ms, value }
            }
            other => eyre::bail!("line {line_no}: unknown event {other:?}"),
        };
        if let Some(extra) = parts.next() {
            eyre::bail!("line {line_no}: unexpected trailing token {extra:?}");
        }
        out.push(event);
    }
    Ok(out)
}
