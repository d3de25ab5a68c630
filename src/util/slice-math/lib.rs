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

//! Arithmetic on flat `&[f64]` buffers.
//!
//! Wrap anything that derefs to a slice in [`V`] (usually through [`v`])
//! to get elementwise operators.  The results are always `V<Vec<f64>>`,
//! so a whole expression can be unpacked with a single pattern:
//!
//! ```
//! # use springnet_slice_math::{v, V};
//! let x = vec![1.0, 2.0];
//! let d = [0.5, -1.0];
//! let V(y) = v(&x) + 2.0 * v(&d);
//! assert_eq!(y, vec![2.0, 0.0]);
//! ```

#[macro_use]
extern crate failure;

use std::ops::{Add, Sub, Neg, Mul, Div};

/// Elementwise-arithmetic wrapper.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct V<T>(pub T);

#[inline(always)]
pub fn v<T>(x: T) -> V<T> { V(x) }

impl<T: AsRef<[f64]>> V<T> {
    #[inline]
    pub fn as_slice(&self) -> &[f64] { self.0.as_ref() }
}

fn zip_with(a: &[f64], b: &[f64], f: impl Fn(f64, f64) -> f64) -> Vec<f64> {
    assert_eq!(a.len(), b.len(), "length mismatch in vector arithmetic");
    a.iter().zip(b).map(|(&a, &b)| f(a, b)).collect()
}

impl<A: AsRef<[f64]>, B: AsRef<[f64]>> Add<V<B>> for V<A> {
    type Output = V<Vec<f64>>;

    fn add(self, other: V<B>) -> V<Vec<f64>> {
        V(zip_with(self.as_slice(), other.as_slice(), |a, b| a + b))
    }
}

impl<A: AsRef<[f64]>, B: AsRef<[f64]>> Sub<V<B>> for V<A> {
    type Output = V<Vec<f64>>;

    fn sub(self, other: V<B>) -> V<Vec<f64>> {
        V(zip_with(self.as_slice(), other.as_slice(), |a, b| a - b))
    }
}

impl<A: AsRef<[f64]>> Neg for V<A> {
    type Output = V<Vec<f64>>;

    fn neg(self) -> V<Vec<f64>> {
        V(self.as_slice().iter().map(|&x| -x).collect())
    }
}

impl<A: AsRef<[f64]>> Mul<f64> for V<A> {
    type Output = V<Vec<f64>>;

    fn mul(self, scale: f64) -> V<Vec<f64>> {
        V(self.as_slice().iter().map(|&x| x * scale).collect())
    }
}

impl<A: AsRef<[f64]>> Mul<V<A>> for f64 {
    type Output = V<Vec<f64>>;

    fn mul(self, vec: V<A>) -> V<Vec<f64>> { vec * self }
}

impl<A: AsRef<[f64]>> Div<f64> for V<A> {
    type Output = V<Vec<f64>>;

    fn div(self, scale: f64) -> V<Vec<f64>> {
        V(self.as_slice().iter().map(|&x| x / scale).collect())
    }
}

/// Dot product.
pub fn vdot(a: &[f64], b: &[f64]) -> f64 {
    assert_eq!(a.len(), b.len(), "length mismatch in vdot");
    a.iter().zip(b).map(|(&a, &b)| a * b).sum()
}

pub fn vsqnorm(a: &[f64]) -> f64 { vdot(a, a) }

/// Euclidean norm.
pub fn vnorm(a: &[f64]) -> f64 { vsqnorm(a).sqrt() }

/// Largest absolute value.
pub fn vmax_abs(a: &[f64]) -> f64 {
    a.iter().fold(0.0, |acc: f64, x| acc.max(x.abs()))
}

/// Error for vectors that cannot be normalized; holds the offending norm.
#[derive(Debug, Fail)]
#[fail(display = "cannot normalize a vector of norm {}", _0)]
pub struct BadNorm(pub f64);

/// Produce a unit vector, failing on zero, infinite, or NaN norms.
pub fn vnormalize(a: &[f64]) -> Result<V<Vec<f64>>, BadNorm> {
    let norm = vnorm(a);
    if norm == 0.0 || !norm.is_finite() {
        return Err(BadNorm(norm));
    }
    Ok(v(a) / norm)
}
