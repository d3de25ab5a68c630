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

use slice_of_array::prelude::*;

/// A site together with the ordered list of sites it is bonded to.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Atom {
    /// Which slot of the coordinate vector holds this site.
    pub index: usize,
    pub neighbours: Vec<usize>,
}

impl Atom {
    pub fn new(index: usize, neighbours: Vec<usize>) -> Self {
        Atom { index, neighbours }
    }
}

/// Bond topology in a fixed-width table.
///
/// Every site owns exactly `connections` directed **couples** `[source, target]`.
/// A physical bond between two sites normally appears twice, once from each end.
/// Couples whose source and target are the same site are allowed; they never
/// contribute to any interaction, and are used to pad short rows.
///
/// Considering the data embedded in this representation, any of the following
/// actions will invalidate the table:
///
/// * removal, addition, or reordering of sites
///
/// Motion of sites, including across cell boundaries, is okay.
#[derive(Debug, Clone, PartialEq)]
pub struct BondTable {
    num_sites: usize,
    connections: usize,
    couples: Vec<[usize; 2]>,
    // couple indices, by source and by target
    outgoing: Vec<Vec<usize>>,
    incoming: Vec<Vec<usize>>,
}

#[derive(Debug, Fail)]
pub enum TopologyError {
    #[fail(display = "site {} has {} neighbours, but all sites must have {}", index, found, expected)]
    WrongNeighbourCount { index: usize, found: usize, expected: usize },

    #[fail(display = "index {} is out of range for {} sites", index, num_sites)]
    IndexOutOfRange { index: usize, num_sites: usize },

    #[fail(display = "site {} is described more than once", index)]
    DuplicateSite { index: usize },

    #[fail(display = "pair list has length {}, expected {} ({} sites with {} connections)",
        len, expected, num_sites, connections)]
    PairListLength { len: usize, expected: usize, num_sites: usize, connections: usize },
}

impl BondTable {
    /// Build the table from atoms that each have exactly `connections` neighbours.
    ///
    /// Couples are emitted in the order of `atoms`, then in the order of each atom's
    /// neighbours.  The atom indices must be a permutation of `0..atoms.len()`.
    pub fn from_atoms(atoms: &[Atom], connections: usize) -> Result<Self, TopologyError> {
        check_site_indices(atoms)?;

        let mut pairs = Vec::with_capacity(atoms.len() * connections);
        for atom in atoms {
            if atom.neighbours.len() != connections {
                return Err(TopologyError::WrongNeighbourCount {
                    index: atom.index,
                    found: atom.neighbours.len(),
                    expected: connections,
                });
            }
            pairs.extend(atom.neighbours.iter().map(|&n| [atom.index, n]));
        }
        Self::from_couples(atoms.len(), connections, pairs)
    }

    /// Build the table from atoms with varying numbers of neighbours.
    ///
    /// The width is the largest neighbour count, and short rows are padded with
    /// couples from the atom to itself.
    pub fn from_atoms_padded(atoms: &[Atom]) -> Result<Self, TopologyError> {
        check_site_indices(atoms)?;

        let connections = atoms.iter().map(|a| a.neighbours.len()).max().unwrap_or(0);
        let num_padded = atoms.iter().filter(|a| a.neighbours.len() < connections).count();
        if num_padded > 0 {
            debug!("Padding {} of {} sites to {} connections", num_padded, atoms.len(), connections);
        }

        let mut pairs = Vec::with_capacity(atoms.len() * connections);
        for atom in atoms {
            let padding = ::std::iter::repeat(atom.index).take(connections - atom.neighbours.len());
            pairs.extend(atom.neighbours.iter().cloned().chain(padding).map(|n| [atom.index, n]));
        }
        Self::from_couples(atoms.len(), connections, pairs)
    }

    /// Build the table from a flat pair list `[s0, t0, s1, t1, ...]`.
    pub fn from_pairs(
        num_sites: usize,
        connections: usize,
        pairs: &[usize],
    ) -> Result<Self, TopologyError> {
        let expected = 2 * num_sites * connections;
        if pairs.len() != expected {
            return Err(TopologyError::PairListLength {
                len: pairs.len(), expected, num_sites, connections,
            });
        }
        Self::from_couples(num_sites, connections, pairs.nest::<[_; 2]>().to_vec())
    }

    fn from_couples(
        num_sites: usize,
        connections: usize,
        couples: Vec<[usize; 2]>,
    ) -> Result<Self, TopologyError> {
        debug_assert_eq!(couples.len(), num_sites * connections);

        let mut outgoing = vec![vec![]; num_sites];
        let mut incoming = vec![vec![]; num_sites];
        for (c, &[source, target]) in couples.iter().enumerate() {
            for &index in &[source, target] {
                if index >= num_sites {
                    return Err(TopologyError::IndexOutOfRange { index, num_sites });
                }
            }
            outgoing[source].push(c);
            incoming[target].push(c);
        }
        Ok(BondTable { num_sites, connections, couples, outgoing, incoming })
    }

    pub fn num_sites(&self) -> usize { self.num_sites }

    /// Width of the table.
    pub fn connections(&self) -> usize { self.connections }

    /// All couples, as `[source, target]`.
    pub fn couples(&self) -> &[[usize; 2]] { &self.couples }

    /// All couples as a flat list of length `2 * num_sites * connections`.
    pub fn pairs(&self) -> &[usize] { self.couples.flat() }

    /// Targets of the couples whose source is `site`, in table order.
    pub fn neighbours(&self, site: usize) -> impl Iterator<Item=usize> + '_ {
        self.outgoing[site].iter().map(move |&c| self.couples[c][1])
    }

    /// Indices into `couples()` of the couples whose source is `site`.
    pub fn outgoing(&self, site: usize) -> &[usize] { &self.outgoing[site] }

    /// Indices into `couples()` of the couples whose target is `site`.
    pub fn incoming(&self, site: usize) -> &[usize] { &self.incoming[site] }
}

/// The table with no sites.
impl Default for BondTable {
    fn default() -> Self {
        BondTable {
            num_sites: 0,
            connections: 0,
            couples: vec![],
            outgoing: vec![],
            incoming: vec![],
        }
    }
}

fn check_site_indices(atoms: &[Atom]) -> Result<(), TopologyError> {
    let num_sites = atoms.len();
    let mut seen = vec![false; num_sites];
    for atom in atoms {
        let index = atom.index;
        if index >= num_sites {
            return Err(TopologyError::IndexOutOfRange { index, num_sites });
        }
        if ::std::mem::replace(&mut seen[index], true) {
            return Err(TopologyError::DuplicateSite { index });
        }
        // neighbour indices are checked with the couples
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    fn ring(n: usize) -> Vec<Atom> {
        (0..n).map(|i| Atom::new(i, vec![(i + n - 1) % n, (i + 1) % n])).collect()
    }

    #[test]
    fn ring_table() {
        let table = BondTable::from_atoms(&ring(3), 2).unwrap();
        assert_eq!(table.num_sites(), 3);
        assert_eq!(table.connections(), 2);
        assert_eq!(table.pairs(), &[
            0, 2,  0, 1,
            1, 0,  1, 2,
            2, 1,  2, 0,
        ][..]);
        assert_eq!(table.neighbours(1).collect_vec(), vec![0, 2]);
        assert_eq!(table.outgoing(2), &[4, 5][..]);
        // couples naming site 0 as the target
        assert_eq!(table.incoming(0), &[2, 5][..]);
    }

    #[test]
    fn permuted_atoms_keep_list_order() {
        let atoms = vec![
            Atom::new(1, vec![0]),
            Atom::new(0, vec![1]),
        ];
        let table = BondTable::from_atoms(&atoms, 1).unwrap();
        assert_eq!(table.pairs(), &[1, 0, 0, 1][..]);
        assert_eq!(table.neighbours(0).collect_vec(), vec![1]);
        assert_eq!(table.outgoing(0), &[1][..]);
    }

    #[test]
    fn padded_chain() {
        let atoms = vec![
            Atom::new(0, vec![1]),
            Atom::new(1, vec![0, 2]),
            Atom::new(2, vec![1]),
        ];
        assert!(BondTable::from_atoms(&atoms, 2).is_err());

        let table = BondTable::from_atoms_padded(&atoms).unwrap();
        assert_eq!(table.connections(), 2);
        assert_eq!(table.pairs(), &[
            0, 1,  0, 0,
            1, 0,  1, 2,
            2, 1,  2, 2,
        ][..]);
        assert_eq!(table.incoming(0), &[1, 2][..]);
    }

    #[test]
    fn errors() {
        match BondTable::from_atoms(&ring(3), 3) {
            Err(TopologyError::WrongNeighbourCount { index: 0, found: 2, expected: 3 }) => {},
            r => panic!("{:?}", r),
        }

        let atoms = vec![Atom::new(0, vec![1]), Atom::new(1, vec![5])];
        match BondTable::from_atoms(&atoms, 1) {
            Err(TopologyError::IndexOutOfRange { index: 5, num_sites: 2 }) => {},
            r => panic!("{:?}", r),
        }

        let atoms = vec![Atom::new(0, vec![1]), Atom::new(0, vec![1])];
        match BondTable::from_atoms_padded(&atoms) {
            Err(TopologyError::DuplicateSite { index: 0 }) => {},
            r => panic!("{:?}", r),
        }

        let atoms = vec![Atom::new(0, vec![1]), Atom::new(2, vec![0])];
        match BondTable::from_atoms(&atoms, 1) {
            Err(TopologyError::IndexOutOfRange { index: 2, num_sites: 2 }) => {},
            r => panic!("{:?}", r),
        }

        match BondTable::from_pairs(2, 1, &[0, 1, 1]) {
            Err(TopologyError::PairListLength { len: 3, expected: 4, .. }) => {},
            r => panic!("{:?}", r),
        }
    }

    #[test]
    fn empty() {
        let table = BondTable::from_atoms_padded(&[]).unwrap();
        assert_eq!(table.num_sites(), 0);
        assert_eq!(table.connections(), 0);
        assert!(table.pairs().is_empty());
    }
}
