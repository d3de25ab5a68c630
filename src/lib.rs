/* ********************************************************************** **
**  This file is part of springnet.                                       **
**                                                                        **
**  springnet is free software: you can redistribute it and/or modify it  **
**  under the terms of the GNU General Public License as published by the **
**  Free Software Foundation, either version 3 of the License, or (at     **
**  your option) any later version.                                       **
**                                                                        **
**      http://www.gnu.org/licenses/                                      **
**                                                                        **
** Do note that, while the whole of springnet is licensed under the GPL,  **
** many parts of it are licensed under more permissive terms.             **
** ********************************************************************** */

//! Relaxation of harmonic spring networks in a periodic cell.
//!
//! The work is done by the member crates; this re-exports the pieces needed
//! to set up and run a relaxation from code.

pub use springnet_array_types::{V3, M33};
pub use springnet_structure::{Atom, BondTable, Lattice, ImageConvention};
pub use springnet_minimize::{Objective, Minimizer, Status, ConjugateFr, test_gradient};
pub use springnet_potentials::{Params, Harmonic};
pub use springnet_tasks::{relax, relax_with, Relaxed, Termination};
pub use springnet_tasks::{build_params, initial_positions};
pub use springnet_tasks_config::{YamlRead, Settings, ValidatedSettings, StructureInput};
pub use springnet_tasks_config::Cg as CgSettings;
