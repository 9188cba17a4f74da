//! Cubic Bézier easing for the delta ramp.
//!
//! Two evaluations of the same ease-in-ease-out curve are offered:
//!
//! - [`Easing::Parametric`] feeds the ramp progress straight in as the curve
//!   parameter `t` and returns the y coordinate. This is not a true eased-x
//!   lookup, but it is the historical behavior and the default.
//! - [`Easing::Solved`] first solves for the `t` whose x coordinate equals the
//!   progress, then returns y at that `t`, which is what CSS
//!   `cubic-bezier(0.42, 0, 0.58, 1)` produces.

/// A cubic Bézier with fixed endpoints `(0,0)` and `(1,1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub p1: (f64, f64),
    pub p2: (f64, f64),
}

/// Newton iterations before falling back to bisection.
const NEWTON_ITERATIONS: usize = 8;
const SOLVE_EPSILON: f64 = 1e-7;

impl CubicBezier {
    /// Standard ease-in-ease-out control points.
    pub const EASE_IN_OUT: CubicBezier = CubicBezier {
        p1: (0.42, 0.0),
        p2: (0.58, 1.0),
    };

    pub const fn new(p1: (f64, f64), p2: (f64, f64)) -> Self {
        Self { p1, p2 }
    }

    #[inline]
    fn component(c1: f64, c2: f64, t: f64) -> f64 {
        let mt = 1.0 - t;
        // p0 = 0 and p3 = 1 drop out of the Bernstein sum
        3.0 * mt * mt * t * c1 + 3.0 * mt * t * t * c2 + t * t * t
    }

    #[inline]
    fn component_slope(c1: f64, c2: f64, t: f64) -> f64 {
        let mt = 1.0 - t;
        3.0 * mt * mt * c1 + 6.0 * mt * t * (c2 - c1) + 3.0 * t * t * (1.0 - c2)
    }

    /// x coordinate at parameter `t`.
    #[inline]
    pub fn sample_x(&self, t: f64) -> f64 {
        Self::component(self.p1.0, self.p2.0, t)
    }

    /// y coordinate at parameter `t`.
    #[inline]
    pub fn sample_y(&self, t: f64) -> f64 {
        Self::component(self.p1.1, self.p2.1, t)
    }

    /// Find `t` in `[0,1]` with `sample_x(t) ≈ x`.
    ///
    /// Newton's method from `t = x`, then bisection if the slope flattens
    /// out or Newton fails to converge. Requires x to be monotonic in t,
    /// which holds whenever both control x values lie in `[0,1]`.
    pub fn solve_t(&self, x: f64) -> f64 {
        let x = x.clamp(0.0, 1.0);
        let mut t = x;
        for _ in 0..NEWTON_ITERATIONS {
            let err = self.sample_x(t) - x;
            if err.abs() < SOLVE_EPSILON {
                return t;
            }
            let slope = Self::component_slope(self.p1.0, self.p2.0, t);
            if slope.abs() < 1e-6 {
                break;
            }
            t = (t - err / slope).clamp(0.0, 1.0);
        }

        let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
        t = x;
        while lo < hi {
            let sx = self.sample_x(t);
            if (sx - x).abs() < SOLVE_EPSILON {
                return t;
            }
            if x > sx {
                lo = t;
            } else {
                hi = t;
            }
            let mid = (hi - lo) * 0.5 + lo;
            if mid == t {
                break;
            }
            t = mid;
        }
        t
    }

    /// True eased lookup: y at the `t` whose x equals `x`.
    pub fn ease(&self, x: f64) -> f64 {
        self.sample_y(self.solve_t(x))
    }
}

/// How ramp progress is mapped through the curve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Easing {
    /// Progress used directly as the Bézier parameter.
    #[default]
    Parametric,
    /// Progress solved against the curve's x coordinate first.
    Solved,
}

impl Easing {
    /// Map progress `x` (clamped to `[0,1]`) to eased progress in `[0,1]`.
    pub fn apply(self, x: f64) -> f64 {
        match self {
            Easing::Parametric => cubic_bezier_ease(x),
            Easing::Solved => CubicBezier::EASE_IN_OUT.ease(x),
        }
    }
}

/// Ease-in-ease-out with `x` used directly as the curve parameter `t`.
///
/// y = 3(1-t)²t·0 + 3(1-t)t²·1 + t³·1
#[inline]
pub fn cubic_bezier_ease(x: f64) -> f64 {
    CubicBezier::EASE_IN_OUT.sample_y(x.clamp(0.0, 1.0))
}
