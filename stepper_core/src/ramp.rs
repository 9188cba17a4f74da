//! Elapsed-time to per-tick delta.

use crate::config::StepperCfg;

/// Per-tick change magnitude after `elapsed_ms` of holding.
///
/// Starts at `min_change`, follows the configured easing, and saturates at
/// `max_change` once `ramp_ms` has passed. Always within
/// `[min_change, max_change]` and non-decreasing in `elapsed_ms`.
pub fn compute_tick_delta(elapsed_ms: u64, cfg: &StepperCfg) -> f64 {
    if cfg.ramp_ms == 0 {
        return cfg.max_change;
    }
    let x = elapsed_ms as f64 / cfg.ramp_ms as f64;
    if x > 1.0 {
        return cfg.max_change;
    }
    let y = cfg.easing.apply(x);
    cfg.min_change + (cfg.max_change - cfg.min_change) * y
}
