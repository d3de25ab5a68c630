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

//! Fixed-size `f64` vectors and matrices for cell and strain handling.
//!
//! This library uses a row-based formalism; matrices are conceptually
//! containers of row-vectors, and most vector-matrix multiplication
//! has the matrix on the right.  A cell basis is therefore an `M33`
//! whose rows are the cell edges, and for fractional coordinates `f`
//! the cartesian position is `f * basis`.

mod types;
mod methods_v;
mod methods_m;
mod ops;

pub use crate::types::{V3, M33};
pub use crate::methods_v::{dot, cross};

use springnet_assert_close::Flatten;

// Allow `assert_close!` on these types.
impl Flatten for V3 {
    fn flatten_into(&self, out: &mut Vec<f64>) { out.extend_from_slice(&self.0) }
}

impl Flatten for M33 {
    fn flatten_into(&self, out: &mut Vec<f64>) {
        for row in &self.0 { row.flatten_into(out); }
    }
}
