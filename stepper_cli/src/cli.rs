//! CLI argument definitions and shared statics.

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::OnceLock;

/// Whether the user asked for JSON output (controls structured error output).
pub static JSON_MODE: OnceLock<bool> = OnceLock::new();

#[derive(Parser, Debug)]
#[command(name = "stepper", version, about = "Press-and-hold stepper simulator")]
pub struct Cli {
    /// Path to config TOML (typed)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print results (and errors) as JSON instead of text
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Console log level (error|warn|info|debug|trace); overrides RUST_LOG and the config
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Base preset; fields set in the config's [stepper] section still apply on top
    #[arg(long, value_enum, value_name = "PRESET")]
    pub preset: Option<PresetArg>,

    /// Command to execute
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum PresetArg {
    /// 190 ms first delay, 10 ms cadence, 8 s ramp to 20
    Smooth,
    /// 81 ms cadence throughout, 3 s ramp to 30
    Rapid,
}

impl From<PresetArg> for stepper_core::Preset {
    fn from(p: PresetArg) -> Self {
        match p {
            PresetArg::Smooth => stepper_core::Preset::Smooth,
            PresetArg::Rapid => stepper_core::Preset::Rapid,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum DirectionArg {
    /// Increment
    Up,
    /// Decrement
    Down,
}

impl From<DirectionArg> for stepper_core::Direction {
    fn from(d: DirectionArg) -> Self {
        match d {
            DirectionArg::Up => stepper_core::Direction::Up,
            DirectionArg::Down => stepper_core::Direction::Down,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Press a control, hold it, release it
    Hold {
        /// Value before the press
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        start: f64,
        /// Which control to hold
        #[arg(long, value_enum, default_value = "up")]
        direction: DirectionArg,
        /// How long to hold before releasing
        #[arg(long, value_name = "MS")]
        hold_ms: u64,
        /// Wait in real time instead of replaying on a virtual clock
        #[arg(
            long,
            action = ArgAction::SetTrue,
            long_help = "Drive the hold with the real monotonic clock and print each value as it is reported.\n\nWithout this flag the hold is replayed on a virtual clock and finishes immediately with identical results."
        )]
        realtime: bool,
    },
    /// Quick press/release cycles, one step each
    Click {
        /// Value before the first click
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        start: f64,
        /// Which control to click
        #[arg(long, value_enum, default_value = "up")]
        direction: DirectionArg,
        /// Number of clicks
        #[arg(long, default_value_t = 1)]
        count: usize,
    },
    /// Commit a directly entered value (rounded and clamped)
    Set {
        /// Raw entered value
        #[arg(long, allow_negative_numbers = true)]
        value: f64,
    },
    /// Replay a press/release/set script
    Replay {
        /// Script file: one `<at_ms> press up|down`, `<at_ms> release` or `<at_ms> set <n>` per line
        #[arg(long, value_name = "FILE")]
        script: PathBuf,
        /// Value before the first event
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        start: f64,
    },
    /// Print the per-tick delta over the ramp
    Curve {
        /// Number of intervals to sample across the ramp
        #[arg(long, default_value_t = 10)]
        samples: u32,
    },
}
