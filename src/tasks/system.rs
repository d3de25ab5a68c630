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

use crate::FailResult;

use springnet_array_types::{V3, M33};
use springnet_structure::{Atom, BondTable, Lattice};
use springnet_potentials::Params;
use springnet_tasks_config as cfg;

/// One [`Atom`] per input site, indexed by position in the list.
pub fn atoms_from_input(input: &cfg::StructureInput) -> Vec<Atom> {
    input.sites.iter().enumerate()
        .map(|(index, site)| Atom::new(index, site.neighbours.clone()))
        .collect()
}

pub fn initial_positions(input: &cfg::StructureInput) -> Vec<V3> {
    input.sites.iter().map(|site| V3(site.position)).collect()
}

/// Build the parameters of a run, with strain already applied to the cell.
pub fn build_params(settings: &cfg::Settings, input: &cfg::StructureInput) -> FailResult<Params> {
    let lattice = Lattice::new(&M33::from(settings.cell))?;

    let atoms = atoms_from_input(input);
    let bonds = match settings.connections {
        Some(connections) => BondTable::from_atoms(&atoms, connections)?,
        None => BondTable::from_atoms_padded(&atoms)?,
    };
    info!("{} sites, {} couples per site", bonds.num_sites(), bonds.connections());

    let mut params = Params::new(lattice, bonds);
    params
        .set_spring_constant(settings.spring_constant)
        .set_equilibrium_distance(settings.equilibrium_distance)
        .set_image_convention(settings.image_convention);

    if let Some(strain) = &settings.strain {
        apply_strain(&mut params, strain)?;
    }
    Ok(params)
}

fn apply_strain(params: &mut Params, strain: &cfg::Strain) -> FailResult<()> {
    match strain.kind()? {
        cfg::StrainKind::Diagonal(diag) => {
            params.strain_diagonal(V3(diag))?;
        },
        cfg::StrainKind::WithShear(diag, shear) => {
            params.strain_with_shear(V3(diag), V3(shear))?;
        },
        cfg::StrainKind::Tensor(tensor) => {
            params.strain_tensor(&M33::from(tensor))?;
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use springnet_tasks_config::YamlRead;

    const RING: &str = "
sites:
  - position: [0.0, 0.0, 0.0]
    neighbours: [1, 2]
  - position: [1.5, 0.0, 0.0]
    neighbours: [2, 0]
  - position: [0.7, 1.3, 0.0]
    neighbours: [0, 1]
";

    fn read_settings(text: &str) -> cfg::Settings {
        let cfg::ValidatedSettings(settings) = YamlRead::from_reader(text.as_bytes()).unwrap();
        settings
    }

    fn ring() -> cfg::StructureInput {
        YamlRead::from_reader(RING.as_bytes()).unwrap()
    }

    #[test]
    fn ring_with_strain() {
        let settings = read_settings("
cell: [[20, 0, 0], [0, 20, 0], [0, 0, 20]]
spring-constant: 2.0
equilibrium-distance: 1.5
connections: 2
image-convention: nearest
strain:
  diagonal: [1.1, 1.0, 0.5]
");
        let params = build_params(&settings, &ring()).unwrap();
        assert_eq!(params.num_sites(), 3);
        assert_eq!(params.connections(), 2);
        assert_eq!(params.pairs(), &[0, 1, 0, 2, 1, 2, 1, 0, 2, 0, 2, 1]);
        assert_eq!(params.spring_constant(), 2.0);
        assert_eq!(params.equilibrium_distance(), 1.5);
        assert_eq!(params.image_convention(), cfg::ImageConvention::Nearest);
        assert_close!(params.cell_lengths(), [22.0, 20.0, 10.0]);

        let positions = initial_positions(&ring());
        assert_eq!(positions[2], V3([0.7, 1.3, 0.0]));
    }

    #[test]
    fn open_chain_is_padded() {
        let settings = read_settings("cell: [[20, 0, 0], [0, 20, 0], [0, 0, 20]]");
        let input: cfg::StructureInput = YamlRead::from_reader("
sites:
  - position: [0.0, 0.0, 0.0]
    neighbours: [1]
  - position: [1.5, 0.0, 0.0]
    neighbours: [0, 2]
  - position: [3.0, 0.0, 0.0]
    neighbours: [1]
".as_bytes()).unwrap();

        let params = build_params(&settings, &input).unwrap();
        assert_eq!(params.connections(), 2);
        assert_eq!(params.pairs(), &[0, 1, 0, 0, 1, 0, 1, 2, 2, 1, 2, 2]);
    }

    #[test]
    fn bad_topology() {
        let settings = read_settings("
cell: [[20, 0, 0], [0, 20, 0], [0, 0, 20]]
connections: 3
");
        assert!(build_params(&settings, &ring()).is_err());
    }

    #[test]
    fn degenerate_cell() {
        let settings = read_settings("cell: [[20, 0, 0], [0, 20, 0], [20, 20, 0]]");
        assert!(build_params(&settings, &ring()).is_err());

        let settings = read_settings("
cell: [[20, 0, 0], [0, 20, 0], [0, 0, 20]]
strain:
  diagonal: [1.0, 0.0, 1.0]
");
        assert!(build_params(&settings, &ring()).is_err());
    }
}
