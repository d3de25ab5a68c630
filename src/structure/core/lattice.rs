use std::ops::{Mul, Div};

use springnet_array_types::{V3, M33};
use springnet_assert_close::Flatten;

/// A non-degenerate cell basis for periodic boundary conditions in three dimensions.
///
/// The rows of [`Lattice::matrix`] are the cell edges.  The inverse matrix and
/// the edge lengths are computed on construction, and since a `Lattice` is never
/// modified in place they always agree with the matrix.
#[derive(Debug, Clone)]
pub struct Lattice {
    matrix: M33,
    inverse: M33,
    norms: [f64; 3],
}

/// A cell basis whose edges do not span three dimensions.
#[derive(Debug, Fail)]
#[fail(display = "degenerate cell basis (determinant {}): {:?}", det, matrix)]
pub struct DegenerateLattice {
    pub matrix: M33,
    pub det: f64,
}

/// `|det|` must exceed this times the product of the edge lengths.
const DEGENERACY_TOL: f64 = 1e-12;

// Manual impl that only compares the matrix.
impl PartialEq<Lattice> for Lattice {
    fn eq(&self, other: &Lattice) -> bool {
        // deconstruct to get errors when new fields are added
        let Lattice { ref matrix, inverse: _, norms: _ } = *self;
        matrix == &other.matrix
    }
}

impl Lattice {
    /// Create a lattice from a matrix where the rows are lattice vectors.
    ///
    /// Fails if any element is not finite, or if the cell volume is negligible
    /// compared to the product of the edge lengths.
    pub fn new(matrix: &M33) -> Result<Self, DegenerateLattice> {
        let matrix = *matrix;
        let det = matrix.det();
        let degenerate = || DegenerateLattice { matrix, det };

        if matrix.iter().any(|row| row.iter().any(|x| !x.is_finite())) {
            return Err(degenerate());
        }

        let norms = [matrix[0].norm(), matrix[1].norm(), matrix[2].norm()];
        let scale = norms[0] * norms[1] * norms[2];
        if !(det.abs() > DEGENERACY_TOL * scale) {
            return Err(degenerate());
        }

        let inverse = matrix.inv().ok_or_else(degenerate)?;
        Ok(Lattice { matrix, inverse, norms })
    }

    #[inline(always)]
    pub fn from_vectors(vectors: &[V3; 3]) -> Result<Self, DegenerateLattice> {
        Self::new(&M33(*vectors))
    }

    /// Matrix where lattice vectors are rows.
    #[inline]
    pub fn matrix(&self) -> &M33
    { &self.matrix }

    /// Get the (precomputed) inverse of the matrix where lattice vectors are rows.
    #[inline]
    pub fn inverse_matrix(&self) -> &M33
    { &self.inverse }

    #[inline]
    pub fn vectors(&self) -> &[V3; 3]
    { &self.matrix.0 }

    /// Lengths of the cell edges.
    #[inline]
    pub fn norms(&self) -> [f64; 3]
    { self.norms }

    /// Get the (positive) volume of the lattice cell.
    pub fn volume(&self) -> f64
    { self.matrix.det().abs() }

    /// Right-multiply the basis by a strain tensor.
    ///
    /// Diagonal elements are stretch factors along the cartesian axes, so the
    /// identity leaves the cell unchanged.
    pub fn strained(&self, strain: &M33) -> Result<Lattice, DegenerateLattice> {
        let mut matrix = self.matrix;
        matrix *= strain;
        Lattice::new(&matrix)
    }
}

/// Helper constructors
///
/// These panic on nonpositive lengths.
impl Lattice {
    /// The identity lattice.
    #[inline]
    pub fn eye() -> Self {
        let matrix = M33::eye();
        Lattice { matrix, inverse: matrix, norms: [1.0; 3] }
    }

    #[inline]
    pub fn diagonal(&[x, y, z]: &[f64; 3]) -> Self { Self::orthorhombic(x, y, z) }

    /// A cubic lattice ((a, a, a), (90, 90, 90))
    #[inline]
    pub fn cubic(a: f64) -> Self { Self::orthorhombic(a, a, a) }

    /// An orthorhombic lattice ((a, b, c), (90, 90, 90))
    pub fn orthorhombic(a: f64, b: f64, c: f64) -> Self {
        assert!(a > 0.0 && b > 0.0 && c > 0.0, "bad orthorhombic lengths: {:?}", (a, b, c));
        let matrix = M33::from_diag(V3([a, b, c]));
        let inverse = M33::from_diag(V3([1.0 / a, 1.0 / b, 1.0 / c]));
        Lattice { matrix, inverse, norms: [a, b, c] }
    }

    /// Generate a random lattice that is not too far from the identity.
    #[cfg(test)]
    pub(crate) fn random_skewed(max_skew: f64) -> Self {
        let mut matrix = M33::eye();
        for r in 0..3 {
            for c in 0..3 {
                if r != c {
                    matrix[r][c] = (::rand::random::<f64>() - 0.5) * 2.0 * max_skew;
                }
            }
        }
        let scale = 5.0 + 10.0 * ::rand::random::<f64>();
        Lattice::new(&(matrix * scale)).unwrap()
    }
}

/// Defaults to the identity matrix.
impl Default for Lattice {
    #[inline]
    fn default() -> Lattice { Lattice::eye() }
}

// frac * lattice = cart
impl<'a, 'b> Mul<&'b Lattice> for &'a V3 {
    type Output = V3;

    fn mul(self, other: &'b Lattice) -> V3 {
        self * other.matrix()
    }
}

impl<'b> Mul<&'b Lattice> for V3 {
    type Output = V3;

    fn mul(self, other: &'b Lattice) -> V3 {
        self * other.matrix()
    }
}

// cart / lattice = frac
impl<'a, 'b> Div<&'b Lattice> for &'a V3 {
    type Output = V3;

    fn div(self, other: &'b Lattice) -> V3 {
        self * other.inverse_matrix()
    }
}

impl<'b> Div<&'b Lattice> for V3 {
    type Output = V3;

    fn div(self, other: &'b Lattice) -> V3 {
        self * other.inverse_matrix()
    }
}

impl Flatten for Lattice {
    fn flatten_into(&self, out: &mut Vec<f64>) {
        self.matrix.flatten_into(out)
    }
}
