//! Rounding and clamping of candidate values.

use crate::config::{MAX_PRECISION, StepperCfg};

/// Round `x` to `digits` fractional digits, half away from zero.
///
/// `digits == 0` rounds to the nearest integer; `normalize` floors at
/// precision 0 and does not come through here.
///
/// Returns `x` unchanged when scaling would overflow or lose the integer part,
/// which only happens for magnitudes where the digits are not representable
/// anyway.
#[inline]
pub fn round_to_precision(x: f64, digits: u32) -> f64 {
    if digits == 0 {
        return x.round();
    }
    let scale = grid_scale(digits);
    let scaled = x * scale;
    if !scaled.is_finite() {
        return x;
    }
    scaled.round() / scale
}

#[inline]
fn grid_scale(precision: u32) -> f64 {
    10f64.powi(precision.min(MAX_PRECISION) as i32)
}

/// Nearest grid point at or above `x` (`up`) or at or below it.
fn snap(x: f64, precision: u32, up: bool) -> f64 {
    let scale = grid_scale(precision);
    let scaled = x * scale;
    if !scaled.is_finite() {
        return x;
    }
    let k = scaled.round();
    let on_grid = k / scale;
    if up && on_grid < x {
        (k + 1.0) / scale
    } else if !up && on_grid > x {
        (k - 1.0) / scale
    } else {
        on_grid
    }
}

/// `[min_value, max_value]` shrunk onto the precision grid.
///
/// Clamping to an off-grid bound would produce a value the next rounding
/// pass moves, so the lower bound is snapped up and the upper bound down.
/// The result is empty (`lo > hi`) when no grid point lies between them.
pub fn grid_bounds(cfg: &StepperCfg) -> (f64, f64) {
    (
        snap(cfg.min_value, cfg.precision, true),
        snap(cfg.max_value, cfg.precision, false),
    )
}

/// Round (or floor), then clamp into the grid-snapped `[min_value, max_value]`.
///
/// - `precision > 0`: rounds to that many fractional digits.
/// - `precision == 0`: floors toward negative infinity, so `-3.5` becomes `-4`.
/// - `NaN` yields `None`; callers treat it as "no change".
/// - `±inf` clamps to the matching bound.
///
/// Rounding happens before clamping, always in that order. The output is a
/// fixed point: `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(raw: f64, cfg: &StepperCfg) -> Option<f64> {
    if raw.is_nan() {
        return None;
    }
    let rounded = if cfg.precision > 0 {
        round_to_precision(raw, cfg.precision)
    } else {
        raw.floor()
    };
    let (lo, hi) = grid_bounds(cfg);
    let clamped = if rounded < lo {
        lo
    } else if rounded > hi {
        hi
    } else {
        rounded
    };
    Some(clamped)
}
