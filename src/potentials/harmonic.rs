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

//! Harmonic springs along the couples of a bond table.
//!
//! Each couple `[s, t]` contributes
//!
//! ```text
//! k/4 * (|real_diff(x_s, x_t)| - dist)^2
//! ```
//!
//! so a bond listed once from each end carries the usual `k/2` spring energy.
//! Couples whose endpoints sit at exactly the same position (including the
//! self-couples used to pad short rows) contribute nothing.

use slice_of_array::prelude::*;
use springnet_array_types::V3;
use springnet_minimize::Objective;

use crate::{Params, FailResult};

/// Total spring energy.
///
/// # Panics
///
/// Panics if `coords` does not hold exactly one position per site.
/// [`Harmonic`] checks the length and returns an error instead.
pub fn energy(params: &Params, coords: &[V3]) -> f64 {
    assert_eq!(coords.len(), params.num_sites());
    let k = params.spring_constant();
    let dist = params.equilibrium_distance();

    let mut value = 0.0;
    for &[source, target] in params.bonds().couples() {
        let (a, b) = (coords[source], coords[target]);
        if a == b {
            continue;
        }
        let r = params.real_diff(a, b).norm();
        value += 0.25 * k * (r - dist) * (r - dist);
    }
    value
}

/// Derivative of [`energy`] with respect to each site's position.
///
/// # Panics
///
/// Panics if `coords` does not hold exactly one position per site.
pub fn gradient(params: &Params, coords: &[V3]) -> Vec<V3> {
    assert_eq!(coords.len(), params.num_sites());
    (0..coords.len()).map(|site| site_gradient(params, coords, site)).collect()
}

/// [`energy`] and [`gradient`] together.
///
/// # Panics
///
/// Panics if `coords` does not hold exactly one position per site.
pub fn energy_and_gradient(params: &Params, coords: &[V3]) -> (f64, Vec<V3>) {
    (energy(params, coords), gradient(params, coords))
}

fn site_gradient(params: &Params, coords: &[V3], site: usize) -> V3 {
    let k = params.spring_constant();
    let dist = params.equilibrium_distance();
    let bonds = params.bonds();
    let couples = bonds.couples();
    let a = coords[site];

    // d/dr of k/4 (r - dist)^2, times dr/d(diff)
    let term = |diff: V3, r: f64| 0.5 * k * (r - dist) / r * diff;

    let mut acc = V3::zero();

    // couples in this site's own row
    for &c in bonds.outgoing(site) {
        let b = coords[couples[c][1]];
        if a == b {
            continue;
        }
        let diff_ab = params.real_diff(a, b);
        acc += term(diff_ab, diff_ab.norm());
    }

    // couples in other rows that name this site.
    // The reversed displacement reuses the image chosen for the forward one.
    for &c in bonds.incoming(site) {
        let b = coords[couples[c][0]];
        if a == b {
            continue;
        }
        let diff_ba = params.real_diff(b, a);
        let diff_ab = -diff_ba;
        acc += term(diff_ab, diff_ba.norm());
    }
    acc
}

/// The spring energy as a function of the flat coordinate vector.
#[derive(Debug, Clone)]
pub struct Harmonic {
    params: Params,
}

impl Harmonic {
    pub fn new(params: Params) -> Self { Harmonic { params } }

    pub fn params(&self) -> &Params { &self.params }

    pub fn into_params(self) -> Params { self.params }

    fn coords(&self, position: &[f64]) -> FailResult<Vec<V3>> {
        ensure!(
            position.len() == self.params.num_vars(),
            "coordinate vector has length {}, expected {} for {} sites",
            position.len(), self.params.num_vars(), self.params.num_sites(),
        );
        Ok(position.nest::<[f64; 3]>().iter().map(|&x| V3(x)).collect())
    }
}

fn flatten(gradient: Vec<V3>) -> Vec<f64> {
    let arrays: Vec<[f64; 3]> = gradient.into_iter().map(|v| v.0).collect();
    arrays.flat().to_vec()
}

impl Objective for Harmonic {
    type Error = failure::Error;

    fn value(&mut self, position: &[f64]) -> FailResult<f64> {
        let coords = self.coords(position)?;
        Ok(energy(&self.params, &coords))
    }

    fn gradient(&mut self, position: &[f64]) -> FailResult<Vec<f64>> {
        let coords = self.coords(position)?;
        Ok(flatten(gradient(&self.params, &coords)))
    }

    fn value_and_gradient(&mut self, position: &[f64]) -> FailResult<(f64, Vec<f64>)> {
        let coords = self.coords(position)?;
        let (value, gradient) = energy_and_gradient(&self.params, &coords);
        Ok((value, flatten(gradient)))
    }
}
