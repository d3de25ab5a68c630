/* ************************************************************************ **
** This file is part of springnet, and is licensed under EITHER the MIT     **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
**                                                                          **
** Be aware that not all of springnet is provided under this permissive     **
** license, and that the project as a whole is licensed under the GPL 3.0.  **
** ************************************************************************ */

//! A linesearch for a point that satisfies the strong Wolfe conditions,
//! narrowing a bracket with cubic (or failing that, quadratic) interpolation.

use either::{Either, Left, Right};
use failure::Error;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Maximum number of trial points after the one at `alpha = 0`.
    pub iteration_limit: u32,
    /// Sufficient decrease coefficient.
    pub armijo_coeff: f64,
    /// Strong curvature coefficient.  Smaller is a more exact line minimization.
    pub curvature_coeff: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            iteration_limit: 8,
            armijo_coeff: 1e-4,
            curvature_coeff: 1e-1,
        }
    }
}

impl Settings {
    pub fn new() -> Settings { Default::default() }

    pub fn with_curvature(curvature_coeff: f64) -> Settings {
        Settings { curvature_coeff, ..Default::default() }
    }

    pub fn validate(&self) -> Result<(), Error> {
        ensure!(self.iteration_limit > 0, "linesearch needs at least one iteration");
        ensure!(
            0.0 < self.armijo_coeff && self.armijo_coeff < self.curvature_coeff && self.curvature_coeff < 1.0,
            "linesearch coefficients must satisfy 0 < armijo ({}) < curvature ({}) < 1",
            self.armijo_coeff, self.curvature_coeff,
        );
        Ok(())
    }
}

/// Holds information about linesearch boundaries
#[derive(Debug, Copy, Clone)]
struct Bound { alpha: f64, value: f64, slope: f64 }

/// `linesearch` error type
#[derive(Debug, Fail)]
pub enum LinesearchError {
    #[fail(display = "Initial slope was positive: {}", slope)]
    Uphill { slope: f64 },
}

/// Search along a line for a step satisfying the strong Wolfe conditions.
///
/// `compute(alpha)` returns the value and the slope (directional derivative)
/// at distance `alpha` along the line.  `alpha` is the first trial step.
///
/// If no point satisfies the conditions within the iteration limit, the best
/// point seen is returned instead.  That can be `0.0`, which the caller should
/// treat as a failure.
pub fn linesearch<E, F>(
    settings: &Settings,
    mut alpha: f64,
    mut compute: F,
) -> Result<f64, Either<LinesearchError, E>>
where F: FnMut(f64) -> Result<(f64, f64), E>,
{
    assert!(alpha > 0.0, "non-positive initial alpha: {}", alpha);

    let mut compute = |alpha| compute(alpha).map_err(Right);

    let (initial_value, initial_slope) = compute(0.0)?;
    if initial_slope > 0.0 {
        return Err(Left(LinesearchError::Uphill { slope: initial_slope }));
    }

    // Right hand sides of the wolfe conditions.
    let armijo = settings.armijo_coeff * initial_slope.abs();
    let curvature = settings.curvature_coeff * initial_slope.abs();

    // hard lower bound, soft upper bound
    let mut low = Bound { alpha: 0.0, value: initial_value, slope: initial_slope };
    let mut high = Bound { alpha: 0.0, value: 0.0, slope: 0.0 };

    // (value, alpha) of the lowest point so far
    let mut best = (initial_value, 0.0);

    for _ in 0..settings.iteration_limit {
        if !alpha.is_finite() {
            break;
        }

        let (value, slope) = compute(alpha)?;
        trace!("linesearch  alpha: {:e}  value: {:e}  slope: {:e}", alpha, value, slope);

        let sufficient_decrease = value <= initial_value - alpha * armijo;
        if sufficient_decrease && slope.abs() <= curvature {
            return Ok(alpha);
        }

        if value < best.0 {
            best = (value, alpha);
        }

        if value < low.value && slope < 0.0 && alpha < high.alpha {
            low = Bound { alpha, value, slope };
        } else {
            high = Bound { alpha, value, slope };
        }

        alpha = guess_min(low, high);
    }

    Ok(best.1)
}

/// guess a minimum from two input bounds
fn guess_min(low: Bound, high: Bound) -> f64 {
    match cubic_min(low, high) {
        a if a.is_normal() => a,
        _ => quadratic_min(low, high),
    }
}

/// Minimum of the cubic matching the values and slopes at both bounds.
///
/// Produces NaN or garbage as the cubic coefficient approaches zero.
fn cubic_min(low: Bound, high: Bound) -> f64 {
    let d_value = high.value - low.value;
    let d_alpha = high.alpha - low.alpha;
    let d_alpha2 = d_alpha * d_alpha;
    let d_alpha3 = d_alpha * d_alpha2;

    // f(x) = ax^3 + bx^2 + cx + d,  with x measured from low.alpha
    let a = ((high.slope + low.slope) * d_alpha - 2.0 * d_value) / d_alpha3;
    let b = (3.0 * d_value - (high.slope + 2.0 * low.slope) * d_alpha) / d_alpha2;
    let c = low.slope;

    // For real a, b, c, the + root of f' is always the minimum
    low.alpha + ((b * b - 3.0 * a * c).sqrt() - b) / (3.0 * a)
}

/// Minimum of the quadratic matching both values and the slope at `low`.
fn quadratic_min(low: Bound, high: Bound) -> f64 {
    let d_value = high.value - low.value;
    let d_alpha = high.alpha - low.alpha;
    let d_alpha2 = d_alpha * d_alpha;

    // f(x) = bx^2 + cx + d
    let b = (d_value - low.slope * d_alpha) / d_alpha2;
    let c = low.slope;

    low.alpha - c / (2.0 * b)
}
