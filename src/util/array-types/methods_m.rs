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
use crate::methods_v::{dot, cross};

impl M33 {
    /// Construct a matrix from a function on `(row, col)` indices.
    #[inline(always)]
    pub fn from_fn(mut f: impl FnMut(usize, usize) -> f64) -> Self {
        M33([
            V3::from_fn(|c| f(0, c)),
            V3::from_fn(|c| f(1, c)),
            V3::from_fn(|c| f(2, c)),
        ])
    }

    #[inline(always)]
    pub fn zero() -> Self { M33([V3::zero(); 3]) }

    /// Construct the identity matrix.
    #[inline(always)]
    pub fn eye() -> Self { M33::from_diag(V3([1.0; 3])) }

    /// Construct a diagonal matrix.
    #[inline(always)]
    pub fn from_diag(diag: V3) -> Self {
        M33::from_fn(|r, c| if r == c { diag[r] } else { 0.0 })
    }

    /// Write `value` to both `(i, j)` and `(j, i)`.
    #[inline]
    pub fn set_sym(&mut self, i: usize, j: usize, value: f64) {
        self[i][j] = value;
        self[j][i] = value;
    }

    #[inline(always)]
    pub fn row(&self, i: usize) -> V3 { self[i] }

    #[inline(always)]
    pub fn col(&self, j: usize) -> V3 { V3::from_fn(|r| self[r][j]) }

    /// Matrix transpose.
    #[inline]
    pub fn t(&self) -> M33 { M33::from_fn(|r, c| self[c][r]) }

    /// Matrix determinant.
    #[inline]
    pub fn det(&self) -> f64 { dot(&self[0], &cross(&self[1], &self[2])) }

    /// Matrix inverse, or `None` if the matrix is singular or not finite.
    pub fn inv(&self) -> Option<M33> {
        let det = self.det();
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        let out = self.inv_unchecked();
        match out.iter().all(|row| row.iter().all(|x| x.is_finite())) {
            true => Some(out),
            false => None,
        }
    }

    // Adjugate over determinant.  Singular input gives infinities and NaNs.
    #[inline]
    pub(crate) fn inv_unchecked(&self) -> M33 {
        let det = self.det();
        // Columns of the inverse are cross products of the rows.
        let cols = [
            cross(&self[1], &self[2]),
            cross(&self[2], &self[0]),
            cross(&self[0], &self[1]),
        ];
        M33::from_fn(|r, c| cols[c][r] / det)
    }

    /// Apply a function to each element.
    #[inline]
    pub fn map(self, mut f: impl FnMut(f64) -> f64) -> Self {
        M33([self[0].map(&mut f), self[1].map(&mut f), self[2].map(&mut f)])
    }
}
