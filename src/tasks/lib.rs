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

//! High-level tasks: turning input files into a relaxed spring network.

#[macro_use] extern crate failure;
#[macro_use] extern crate log;
#[macro_use] extern crate serde_derive;
#[macro_use] extern crate serde_json;
#[macro_use] extern crate clap;
#[cfg(test)] #[macro_use] extern crate springnet_assert_close;
#[cfg(test)] #[macro_use] extern crate itertools;

pub type FailResult<T> = Result<T, failure::Error>;

mod ui;
mod system;
pub mod relaxation;
pub mod entry_points;

pub use crate::ui::logging::{GlobalLogger, ColorizedLevel};
pub use crate::system::{build_params, initial_positions, atoms_from_input};
pub use crate::relaxation::{relax, relax_with, Relaxed, Termination};

#[cfg(test)]
pub(crate) fn init_test_logger() {
    let _ = ::env_logger::try_init();
}
