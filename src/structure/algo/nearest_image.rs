use springnet_array_types::V3;
use crate::Lattice;

/// Strategy used to pick the periodic image of a displacement.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ImageConvention {
    /// One correction per cell axis.  See [`per_axis_image`].
    ///
    /// Exact for orthogonal cells.  For sheared cells the result may not be
    /// the shortest image.
    PerAxis,
    /// Shortest image among the 27 cells surrounding the reduced vector.
    Nearest,
}

impl Default for ImageConvention {
    fn default() -> Self { ImageConvention::PerAxis }
}

/// Shift a displacement by at most one cell edge along each axis.
///
/// Fractional coordinates are computed once, and every axis whose fractional
/// coordinate lies outside `[-1/2, 1/2)` gets shifted by its edge vector.
/// The direction is taken from the sign of the matching cartesian component
/// of the displacement as corrected so far: negative components get the edge
/// added, all others get it subtracted.
///
/// For orthogonal cells this is the same as rounding each fractional
/// coordinate.  For sheared cells it can pick a longer image than necessary;
/// see [`ImageConvention::Nearest`].
pub fn per_axis_image(lattice: &Lattice, cart: V3) -> V3 {
    let frac = cart / lattice;
    let mut out = cart;
    for (k, edge) in lattice.vectors().iter().enumerate() {
        if -0.5 <= frac[k] && frac[k] < 0.5 {
            continue;
        }
        match out[k] < 0.0 {
            true => out += edge,
            false => out -= edge,
        }
    }
    out
}

/// Translate a position so that its fractional coordinates lie in `[0, 1)`.
///
/// Each axis is corrected at most once, so this is only a full reduction for
/// positions within one cell of the canonical one.  Fractional coordinates
/// that are tiny and negative can round up to exactly `1.0` after the shift.
pub fn wrap_position(lattice: &Lattice, cart: V3) -> V3 {
    let frac = cart / lattice;
    let mut out = cart;
    for (k, edge) in lattice.vectors().iter().enumerate() {
        if frac[k] < 0.0 {
            out += edge;
        } else if frac[k] >= 1.0 {
            out -= edge;
        }
    }
    out
}

/// A helper type for locating nearest images under periodic boundary conditions.
#[derive(Debug, Clone)]
pub struct NearestImageFinder {
    lattice: Lattice,
    lattice_vector_carts_around_origin: [V3; 27],
}

impl NearestImageFinder {
    /// Construct a `NearestImageFinder` for a lattice.
    ///
    /// The search only looks in the 27 cells centered around the reduced vector,
    /// which finds the true nearest image for any cell that is not extremely skewed.
    pub fn new(lattice: &Lattice) -> Self {
        let mut vecs = [V3::zero(); 27];
        let mut i = 0;
        for &fa in &[-1.0, 0.0, 1.0] {
            for &fb in &[-1.0, 0.0, 1.0] {
                for &fc in &[-1.0, 0.0, 1.0] {
                    vecs[i] = V3([fa, fb, fc]) * lattice;
                    i += 1;
                }
            }
        }

        NearestImageFinder {
            lattice: lattice.clone(),
            lattice_vector_carts_around_origin: vecs,
        }
    }

    /// Find the shortest image of an arbitrary displacement vector.
    pub fn nearest_image(&self, cart: V3) -> V3 {
        // Note: rounding puts every fractional coordinate in [-1/2, 1/2],
        //       after which the nearest image must be among the neighbours.
        let frac = (cart / &self.lattice).map(|x| x - x.round());
        let cart = frac * &self.lattice;
        self.nearest_image_fast(cart)
    }

    /// A faster version of `nearest_image` for vectors that are already reduced.
    ///
    /// **Input:** A displacement vector whose fractional coordinates lie in `[-1, 1]`.
    #[inline(never)]
    pub fn nearest_image_fast(&self, cart: V3) -> V3 {
        let mut best = cart;
        let mut best_sqnorm = cart.sqnorm();
        for offset in &self.lattice_vector_carts_around_origin {
            let candidate = cart + offset;
            let sqnorm = candidate.sqnorm();
            if sqnorm < best_sqnorm {
                best = candidate;
                best_sqnorm = sqnorm;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use springnet_array_types::M33;

    fn random_point(max: f64) -> V3 {
        V3::from_fn(|_| ::rand::random::<f64>() * max)
    }

    #[test]
    fn per_axis_on_cubic_cell_matches_rounding() {
        let lattice = Lattice::cubic(10.0);
        for _ in 0..100 {
            let a = random_point(10.0);
            let b = random_point(10.0);
            let diff = per_axis_image(&lattice, a - b);
            let raw = a - b;
            for k in 0..3 {
                let expected = raw[k] - (raw[k] / 10.0).round() * 10.0;
                assert_close!(abs=1e-12, diff[k], expected);
            }
        }
    }

    #[test]
    fn per_axis_shifts_at_most_once() {
        let lattice = Lattice::orthorhombic(2.0, 4.0, 8.0);
        // already short
        assert_eq!(per_axis_image(&lattice, V3([0.5, -1.0, 3.0])), V3([0.5, -1.0, 3.0]));
        // one shift per axis, in the direction toward zero
        assert_eq!(per_axis_image(&lattice, V3([1.5, -3.0, 5.0])), V3([-0.5, 1.0, -3.0]));
        // the interval is half-open
        assert_eq!(per_axis_image(&lattice, V3([1.0, 0.0, 0.0])), V3([-1.0, 0.0, 0.0]));
        assert_eq!(per_axis_image(&lattice, V3([-1.0, 0.0, 0.0])), V3([-1.0, 0.0, 0.0]));
        // far vectors are only shifted by one cell
        assert_eq!(per_axis_image(&lattice, V3([5.0, 0.0, 0.0])), V3([3.0, 0.0, 0.0]));
    }

    #[test]
    fn per_axis_sign_follows_cartesian_component() {
        let lattice = Lattice::new(&M33([
            V3([10.0, 0.0, 0.0]),
            V3([-8.0, 6.0, 0.0]),
            V3([0.0, 0.0, 10.0]),
        ])).unwrap();

        // x is negative even though the first fractional coordinate is 0.6,
        // so the first edge is added rather than subtracted
        let cart = V3([0.6, 0.9, 0.2]) * &lattice;
        assert_close!(abs=1e-12, cart, V3([-1.2, 5.4, 2.0]));
        assert_close!(abs=1e-12, per_axis_image(&lattice, cart), V3([16.8, -0.6, 2.0]));

        // reversing the displacement reverses the image
        assert_close!(abs=1e-12, per_axis_image(&lattice, -cart), V3([-16.8, 0.6, -2.0]));

        // later axes see the components left over from earlier shifts
        let lattice = Lattice::new(&M33([
            V3([10.0, 12.0, 0.0]),
            V3([0.0, 10.0, 0.0]),
            V3([0.0, 0.0, 10.0]),
        ])).unwrap();
        let cart = V3([0.6, -0.55, 0.0]) * &lattice;
        assert_close!(abs=1e-12, cart, V3([6.0, 1.7, 0.0]));
        assert_close!(abs=1e-12, per_axis_image(&lattice, cart), V3([-4.0, -0.3, 0.0]));
    }

    #[test]
    fn wrap_is_idempotent() {
        let lattice = Lattice::random_skewed(0.2);
        for _ in 0..100 {
            // fractional coordinates within one cell of the canonical one
            let frac = V3::from_fn(|_| ::rand::random::<f64>() * 3.0 - 1.0);
            let once = wrap_position(&lattice, frac * &lattice);
            let twice = wrap_position(&lattice, once);
            assert_close!(abs=1e-10, once, twice);

            let wrapped_frac = once / &lattice;
            for k in 0..3 {
                assert!(-1e-12 <= wrapped_frac[k] && wrapped_frac[k] < 1.0 + 1e-12);
            }
        }
    }

    #[test]
    fn wrap_corrects_each_axis_once() {
        let lattice = Lattice::cubic(10.0);
        assert_eq!(wrap_position(&lattice, V3([-1.0, 12.0, 3.0])), V3([9.0, 2.0, 3.0]));
        assert_eq!(wrap_position(&lattice, V3([0.0, 10.0, 9.5])), V3([0.0, 0.0, 9.5]));
        assert_eq!(wrap_position(&lattice, V3([25.0, 0.0, 0.0])), V3([15.0, 0.0, 0.0]));
    }

    #[test]
    fn nearest_is_never_longer() {
        for _ in 0..10 {
            let lattice = Lattice::random_skewed(0.4);
            let finder = NearestImageFinder::new(&lattice);
            for _ in 0..50 {
                let a = random_point(1.0) * &lattice;
                let b = random_point(1.0) * &lattice;
                let per_axis = per_axis_image(&lattice, a - b);
                let nearest = finder.nearest_image(a - b);
                assert!(nearest.norm() <= per_axis.norm() + 1e-12);

                // still an image of the same displacement
                let lattice_vector = (nearest - (a - b)) / &lattice;
                for k in 0..3 {
                    assert_close!(abs=1e-9, lattice_vector[k], lattice_vector[k].round());
                }
            }
        }
    }

    #[test]
    fn nearest_image_of_far_vector() {
        let lattice = Lattice::diagonal(&[4.0, 8.0, 12.0]);
        let finder = NearestImageFinder::new(&lattice);
        let quarter_way = V3([1.0, -2.0, 3.0]);
        assert_close!(abs=1e-12, finder.nearest_image(V3([13.0, 30.0, 15.0])), quarter_way);
        assert_close!(abs=1e-12, finder.nearest_image_fast(V3([1.0, 6.0, -9.0])), quarter_way);
    }
}
