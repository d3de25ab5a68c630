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

use springnet_array_types::{V3, M33};
use springnet_structure::{Lattice, DegenerateLattice, BondTable, Atom, TopologyError};
use springnet_structure::{ImageConvention, NearestImageFinder};
use springnet_structure as structure;

/// Everything about a spring network except the positions of its sites.
///
/// Sites are numbered `0..num_sites()`, and the coordinate vector that goes
/// with these parameters has three entries per site.
///
/// Nothing in here changes during a minimization.  Strain is applied to the
/// cell between runs, and only ever touches the cell; coordinates are never
/// rescaled along with it.
#[derive(Debug, Clone)]
pub struct Params {
    spring_constant: f64,
    equilibrium_distance: f64,
    bonds: BondTable,
    lattice: Lattice,
    convention: ImageConvention,
    // always built from `lattice`
    images: NearestImageFinder,
}

/// No sites, unit springs and an identity cell.
impl Default for Params {
    fn default() -> Self { Params::new(Lattice::eye(), BondTable::default()) }
}

impl Params {
    pub fn new(lattice: Lattice, bonds: BondTable) -> Self {
        let images = NearestImageFinder::new(&lattice);
        Params {
            spring_constant: 1.0,
            equilibrium_distance: 1.0,
            convention: ImageConvention::default(),
            bonds, lattice, images,
        }
    }

    pub fn num_sites(&self) -> usize { self.bonds.num_sites() }

    /// Number of couples in each site's row of the bond table.
    pub fn connections(&self) -> usize { self.bonds.connections() }

    /// Length of the flat coordinate vector.
    pub fn num_vars(&self) -> usize { 3 * self.num_sites() }

    pub fn spring_constant(&self) -> f64 { self.spring_constant }

    pub fn equilibrium_distance(&self) -> f64 { self.equilibrium_distance }

    pub fn image_convention(&self) -> ImageConvention { self.convention }

    pub fn bonds(&self) -> &BondTable { &self.bonds }

    /// Flat `[source, target, ...]` list of every couple in the bond table.
    pub fn pairs(&self) -> &[usize] { self.bonds.pairs() }

    pub fn lattice(&self) -> &Lattice { &self.lattice }

    /// Lengths of the cell edges.
    pub fn cell_lengths(&self) -> [f64; 3] { self.lattice.norms() }

    pub fn set_spring_constant(&mut self, k: f64) -> &mut Self {
        self.spring_constant = k; self
    }

    pub fn set_equilibrium_distance(&mut self, dist: f64) -> &mut Self {
        self.equilibrium_distance = dist; self
    }

    pub fn set_image_convention(&mut self, convention: ImageConvention) -> &mut Self {
        self.convention = convention; self
    }

    pub fn set_bonds(&mut self, bonds: BondTable) -> &mut Self {
        self.bonds = bonds; self
    }

    /// Replace the bond table with one built from `atoms`, each of which must
    /// have exactly `connections` neighbours.
    pub fn set_bonds_from_atoms(
        &mut self,
        atoms: &[Atom],
        connections: usize,
    ) -> Result<&mut Self, TopologyError> {
        self.bonds = BondTable::from_atoms(atoms, connections)?;
        Ok(self)
    }

    /// Replace the cell.
    pub fn set_lattice(&mut self, lattice: Lattice) -> &mut Self {
        self.images = NearestImageFinder::new(&lattice);
        self.lattice = lattice;
        self
    }

    /// Replace the cell with one whose edges are the rows of `matrix`.
    pub fn set_cell_matrix(&mut self, matrix: &M33) -> Result<&mut Self, DegenerateLattice> {
        let lattice = Lattice::new(matrix)?;
        Ok(self.set_lattice(lattice))
    }
}

/// Strain.
///
/// Each of these right-multiplies the cell matrix by a strain tensor whose
/// diagonal holds stretch factors (`1.0` is unstrained).  If the result would
/// be degenerate, the cell is left untouched.
impl Params {
    pub fn strain_diagonal(&mut self, stretch: V3) -> Result<&mut Self, DegenerateLattice> {
        self.strain_tensor(&M33::from_diag(stretch))
    }

    /// Diagonal stretch plus symmetric shear.
    ///
    /// The components of `shear` go to the `yz`, `xz` and `xy` elements
    /// in that order.
    pub fn strain_with_shear(
        &mut self,
        stretch: V3,
        shear: V3,
    ) -> Result<&mut Self, DegenerateLattice> {
        let mut tensor = M33::from_diag(stretch);
        tensor.set_sym(1, 2, shear[0]);
        tensor.set_sym(0, 2, shear[1]);
        tensor.set_sym(0, 1, shear[2]);
        self.strain_tensor(&tensor)
    }

    pub fn strain_tensor(&mut self, tensor: &M33) -> Result<&mut Self, DegenerateLattice> {
        let lattice = self.lattice.strained(tensor)?;
        debug!("Strained cell lengths: {:?} -> {:?}", self.lattice.norms(), lattice.norms());
        Ok(self.set_lattice(lattice))
    }
}

/// Periodic geometry.
impl Params {
    /// The displacement `a - b`, brought to its minimum image under the
    /// current convention.
    #[inline]
    pub fn real_diff(&self, a: V3, b: V3) -> V3 {
        let cart = a - b;
        match self.convention {
            ImageConvention::PerAxis => structure::per_axis_image(&self.lattice, cart),
            ImageConvention::Nearest => self.images.nearest_image(cart),
        }
    }

    /// Translate a position into the canonical cell.
    ///
    /// See [`springnet_structure::wrap_position`].
    pub fn wrap_position(&self, position: V3) -> V3 {
        structure::wrap_position(&self.lattice, position)
    }
}
