//! Periodic cells and bonded topologies.
//!
//! Cartesian vectors are row vectors.  A [`Lattice`] holds the cell edges as
//! the rows of a matrix, so that `frac * &lattice` is cartesian and
//! `cart / &lattice` is fractional.

#[macro_use] extern crate failure;
#[macro_use] extern crate log;
#[cfg(test)] #[macro_use] extern crate springnet_assert_close;

mod core;
mod algo;

//---------------------------
// public reexports; API

pub use crate::core::lattice::{Lattice, DegenerateLattice};

pub use crate::algo::nearest_image::{ImageConvention, NearestImageFinder};
pub use crate::algo::nearest_image::{per_axis_image, wrap_position};

pub use crate::algo::bonds::{Atom, BondTable, TopologyError};
