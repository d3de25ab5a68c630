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

use crate::types::{V3, M33};

/// Inner product of two vectors.
#[inline(always)]
pub fn dot(a: &V3, b: &V3) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

/// Cross product of two vectors.
#[inline]
pub fn cross(a: &V3, b: &V3) -> V3 {
    V3([
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ])
}

impl V3 {
    /// Get a zero vector.
    #[inline(always)]
    pub fn zero() -> Self { V3([0.0; 3]) }

    /// Construct a vector from a function on indices.
    #[inline(always)]
    pub fn from_fn(mut f: impl FnMut(usize) -> f64) -> Self {
        V3([f(0), f(1), f(2)])
    }

    /// Apply a function to each element.
    #[inline(always)]
    pub fn map(self, mut f: impl FnMut(f64) -> f64) -> Self {
        V3([f(self[0]), f(self[1]), f(self[2])])
    }

    /// Get the inner product of two vectors.
    ///
    /// It is recommended you write this as `V3::dot(a, b)`, rather than `a.dot(b)`.
    #[inline(always)]
    pub fn dot(&self, other: &V3) -> f64 { dot(self, other) }

    #[inline(always)]
    pub fn cross(&self, other: &V3) -> V3 { cross(self, other) }

    /// Get the vector's squared magnitude.
    #[inline(always)]
    pub fn sqnorm(&self) -> f64 { dot(self, self) }

    /// Get the vector's magnitude.
    #[inline(always)]
    pub fn norm(&self) -> f64 { self.sqnorm().sqrt() }

    /// Alias of `norm`, for vectors that are understood as displacements.
    #[inline(always)]
    pub fn distance(&self) -> f64 { self.norm() }

    /// Normalize the vector.
    #[inline(always)]
    pub fn unit(&self) -> V3 { self / self.norm() }

    /// Perform elementwise multiplication, or multiplication of a vector by a diagonal
    /// matrix.
    #[inline(always)]
    pub fn mul_diag(&self, other: &V3) -> V3 {
        V3::from_fn(|i| self[i] * other[i])
    }

    /// Length of the projection of this vector onto `direction`.
    ///
    /// The result is signed, and `direction` need not be normalized.
    #[inline]
    pub fn scalar_proj(&self, direction: &V3) -> f64 {
        dot(self, direction) / direction.norm()
    }

    /// Coordinates of this vector in a basis whose vectors are the rows of `basis`.
    ///
    /// That is, the `f` such that `f * basis == self`.  A singular basis
    /// produces non-finite output.
    #[inline]
    pub fn change_basis(&self, basis: &M33) -> V3 {
        self * &basis.inv_unchecked()
    }
}
