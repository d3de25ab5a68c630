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

//! Utilities for numeric differentiation.
//!
//! These are publicly exported because crates that implement an
//! [`Objective`] will want them to test their analytic gradients.

use crate::Objective;
use crate::util::Never;

/// Approximation method for a numerical 1D derivative.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DerivativeKind {
    /// n-point stencil. `n` must be odd. Only implemented for `n = 3, 5, 7, 9`.
    Stencil(u32),
}

impl DerivativeKind {
    /// Alias for `DerivativeKind::Stencil(3)`.
    #[allow(bad_style)]
    pub const CentralDifference: Self = DerivativeKind::Stencil(3);
}

impl Default for DerivativeKind {
    fn default() -> DerivativeKind {
        DerivativeKind::Stencil(5)
    }
}

// (offset, coefficient) pairs for central differences of the first derivative,
// and the denominator in units of the step.
//
// http://www.holoborodko.com/pavel/numerical-methods/numerical-derivative/central-differences/
const STENCIL_3: &[(f64, f64)] = &[(-1.0, -1.0), (1.0, 1.0)];
const STENCIL_5: &[(f64, f64)] = &[(-2.0, 1.0), (-1.0, -8.0), (1.0, 8.0), (2.0, -1.0)];
const STENCIL_7: &[(f64, f64)] = &[
    (-3.0, -1.0), (-2.0, 9.0), (-1.0, -45.0),
    (1.0, 45.0), (2.0, -9.0), (3.0, 1.0),
];
const STENCIL_9: &[(f64, f64)] = &[
    (-4.0, 3.0), (-3.0, -32.0), (-2.0, 168.0), (-1.0, -672.0),
    (1.0, 672.0), (2.0, -168.0), (3.0, 32.0), (4.0, -3.0),
];

fn stencil(kind: DerivativeKind) -> (&'static [(f64, f64)], f64) {
    match kind {
        DerivativeKind::Stencil(3) => (STENCIL_3, 2.0),
        DerivativeKind::Stencil(5) => (STENCIL_5, 12.0),
        DerivativeKind::Stencil(7) => (STENCIL_7, 60.0),
        DerivativeKind::Stencil(9) => (STENCIL_9, 840.0),
        DerivativeKind::Stencil(n) if n < 3 || n % 2 == 0 => {
            panic!("{}-point stencil does not exist", n);
        },
        DerivativeKind::Stencil(n) => {
            panic!("{}-point stencil is not implemented", n);
        },
    }
}

/// Compute a numerical derivative using finite differences.
pub fn slope(
    step: f64,
    kind: Option<DerivativeKind>,
    point: f64,
    mut value_fn: impl FnMut(f64) -> f64,
) -> f64 {
    try_slope::<Never, _>(step, kind, point, |x| Ok(value_fn(x)))
        .unwrap_or_else(|e| match e {})
}

/// `slope` for functions that can fail.
pub fn try_slope<E, F>(
    step: f64,
    kind: Option<DerivativeKind>,
    point: f64,
    mut value_fn: F,
) -> Result<f64, E>
where
    F: FnMut(f64) -> Result<f64, E>,
{
    let (terms, denom) = stencil(kind.unwrap_or_default());
    let mut numer = 0.0;
    for &(offset, coeff) in terms {
        numer += coeff * value_fn(point + offset * step)?;
    }
    Ok(numer / (denom * step))
}

/// Numerically compute a gradient.
///
/// This does an independent slope check along each axis, so the number of
/// function calls grows linearly with the input size.
pub fn gradient(
    step: f64,
    kind: Option<DerivativeKind>,
    point: &[f64],
    mut value_fn: impl FnMut(&[f64]) -> f64,
) -> Vec<f64> {
    try_gradient::<Never, _>(step, kind, point, |x| Ok(value_fn(x)))
        .unwrap_or_else(|e| match e {})
}

/// `gradient` for functions that can fail.
pub fn try_gradient<E, F>(
    step: f64,
    kind: Option<DerivativeKind>,
    point: &[f64],
    mut value_fn: F,
) -> Result<Vec<f64>, E>
where
    F: FnMut(&[f64]) -> Result<f64, E>,
{
    let kind = kind.unwrap_or_default();
    let mut work = point.to_vec();
    let mut out = Vec::with_capacity(point.len());
    for (i, &center) in point.iter().enumerate() {
        let slope = try_slope(step, Some(kind), center, |x| {
            work[i] = x;
            value_fn(&work)
        })?;
        work[i] = center;
        out.push(slope);
    }
    Ok(out)
}

/// Numerical gradient of an [`Objective`]'s value.
pub fn objective_gradient<F: Objective>(
    objective: &mut F,
    step: f64,
    kind: Option<DerivativeKind>,
    point: &[f64],
) -> Result<Vec<f64>, F::Error> {
    try_gradient(step, kind, point, |x| objective.value(x))
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::test_functions::one_dee::{Differentiable1d, Polynomial};
    use crate::test_functions::n_dee::Trid;
    use crate::util::random::{uniform, uniform_n};
    use crate::DiffFn;

    #[test]
    fn num_diff() {
        for n in vec![3, 5, 7, 9] {
            for _ in 0..10 {
                // n-point stencil is exact for polynomials up to order n-1
                let poly = Polynomial::random(n - 1, 2.0);
                let x = uniform(-10.0, 10.0);

                let expected = poly.derivative().evaluate(x);
                let actual = slope(1e-1, Some(DerivativeKind::Stencil(n)), x, |x| poly.evaluate(x));
                assert_close!(abs=1e-8, rel=1e-8, expected, actual, "{}-point", n);
            }
        }
    }

    #[test]
    #[should_panic(expected = "does not exist")]
    fn even_stencil() {
        slope(1e-1, Some(DerivativeKind::Stencil(4)), 0.0, |x| x);
    }

    #[test]
    fn trid_gradient() {
        let trid = Trid(6);
        let point = uniform_n(6, -5.0, 5.0);
        let expected = trid.diff(&point).1;
        let actual = gradient(1e-3, None, &point, |x| trid.diff(x).0);
        assert_close!(abs=1e-7, expected.clone(), actual);

        let mut objective = DiffFn(|x: &[f64]| Ok::<_, Never>(trid.diff(x)));
        let actual = objective_gradient(&mut objective, 1e-3, None, &point)
            .unwrap_or_else(|e| match e {});
        assert_close!(abs=1e-7, expected, actual);
    }
}
