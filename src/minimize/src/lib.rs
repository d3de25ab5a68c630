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

//! Stepwise nonlinear minimization.
//!
//! A [`Minimizer`] is set up once from an [`Objective`] and a starting point,
//! then driven one [`iterate`](Minimizer::iterate) at a time by the caller, who
//! decides when to stop (typically with [`test_gradient`]).

#[macro_use] extern crate log;
#[macro_use] extern crate failure;
#[cfg(test)] #[macro_use] extern crate springnet_assert_close;
#[cfg(test)] #[macro_use] extern crate itertools;

pub(crate) mod util;
#[cfg(test)] pub(crate) mod test_functions;

mod stepwise;
pub use crate::stepwise::{Objective, DiffFn, Minimizer, Status, test_gradient};

pub mod strong_ls;
pub mod numerical;

pub mod cg;
pub use crate::cg::ConjugateFr;
