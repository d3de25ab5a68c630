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

//! The harmonic spring model of a bonded network in a periodic cell.
//!
//! [`Params`] describes everything about the system except the coordinates.
//! The functions in [`harmonic`] evaluate the energy and its gradient for a
//! list of positions, and [`Harmonic`] wraps them as a minimizer objective
//! over the flat coordinate vector.

#[macro_use] extern crate failure;
#[macro_use] extern crate log;
#[cfg(test)] #[macro_use] extern crate springnet_assert_close;

pub type FailResult<T> = Result<T, failure::Error>;

mod params;
pub use crate::params::Params;

pub mod harmonic;
pub use crate::harmonic::Harmonic;

#[cfg(test)] pub(crate) mod util;
