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

//! Drives a minimizer over the spring energy until the gradient is small.
//!
//! A run ends in one of three ways (see [`Termination`]).  Only a converged
//! run hands back new positions; these are wrapped into the canonical cell.
//! Otherwise the input positions are returned untouched, since the
//! minimizer's current point is not known to mean anything.

use crate::FailResult;

use springnet_array_types::V3;
use springnet_minimize::{Minimizer, Status, ConjugateFr, test_gradient};
use springnet_potentials::{Params, Harmonic};
use springnet_slice_math::vnorm;
use springnet_tasks_config as cfg;

use slice_of_array::prelude::*;

/// How a relaxation ended.
///
/// `iterations` counts calls to [`Minimizer::iterate`], including the one
/// that ended the run.
#[derive(Serialize)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Termination {
    /// The gradient norm fell below `gradient-tolerance`.
    Converged { iterations: u64 },
    /// The minimizer could not improve on its current point.
    Stalled { iterations: u64 },
    MaxIterationsReached { iterations: u64 },
}

impl Termination {
    pub fn iterations(&self) -> u64 {
        match *self {
            Termination::Converged { iterations } |
            Termination::Stalled { iterations } |
            Termination::MaxIterationsReached { iterations } => iterations,
        }
    }

    pub fn is_converged(&self) -> bool {
        match self {
            Termination::Converged { .. } => true,
            _ => false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Relaxed {
    /// Energy at the minimizer's final point.
    pub value: f64,
    pub termination: Termination,
    pub positions: Vec<V3>,
}

/// Relax with the Fletcher–Reeves minimizer.
pub fn relax(params: &Params, positions: &[V3], settings: &cfg::Cg) -> FailResult<Relaxed> {
    relax_with::<ConjugateFr<Harmonic>>(params, positions, settings)
}

/// Relax with any minimizer.
///
/// Errors come from invalid settings or from evaluating the objective (e.g. a
/// position list of the wrong size).  Stalling and hitting the iteration cap
/// are reported through [`Termination`].
pub fn relax_with<M>(params: &Params, positions: &[V3], settings: &cfg::Cg) -> FailResult<Relaxed>
where M: Minimizer<Harmonic>,
{
    settings.validate()?;
    ensure!(
        positions.len() == params.num_sites(),
        "got {} positions for {} sites", positions.len(), params.num_sites(),
    );

    let initial = flatten(positions);
    let objective = Harmonic::new(params.clone());
    let mut minimizer = M::set(objective, &initial, settings.step_size, settings.line_tolerance)?;
    debug!("Initial value: {}  grad norm: {:e}", minimizer.value(), vnorm(minimizer.gradient()));

    let max_iterations = u64::from(settings.max_iterations);
    let mut iterations = 0;
    let termination = loop {
        if iterations >= max_iterations {
            warn!("Maximum cycles hit! ({} iterations)", iterations);
            warn!("     Value: {}", minimizer.value());
            warn!(" Grad Norm: {:e}", vnorm(minimizer.gradient()));
            break Termination::MaxIterationsReached { iterations };
        }

        iterations += 1;
        if let Status::NoProgress = minimizer.iterate()? {
            warn!("Numerical error: the minimizer cannot make progress. (i: {})", iterations);
            warn!("     Value: {}", minimizer.value());
            warn!(" Grad Norm: {:e}", vnorm(minimizer.gradient()));
            break Termination::Stalled { iterations };
        }

        if test_gradient(minimizer.gradient(), settings.gradient_tolerance) {
            info!(
                "Converged after {} iterations.  value: {}  grad norm: {:e}",
                iterations, minimizer.value(), vnorm(minimizer.gradient()),
            );
            break Termination::Converged { iterations };
        }
    };

    let positions = match termination {
        Termination::Converged { .. } => {
            minimizer.position().nest::<[f64; 3]>().iter()
                .map(|&x| params.wrap_position(V3(x)))
                .collect()
        },
        Termination::Stalled { .. } |
        Termination::MaxIterationsReached { .. } => positions.to_vec(),
    };

    Ok(Relaxed { value: minimizer.value(), termination, positions })
}

fn flatten(positions: &[V3]) -> Vec<f64> {
    let arrays: Vec<[f64; 3]> = positions.iter().map(|v| v.0).collect();
    arrays.flat().to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use springnet_minimize::Objective;
    use springnet_structure::{Atom, BondTable, Lattice};

    fn network(atoms: &[Atom], connections: Option<usize>) -> Params {
        let bonds = match connections {
            Some(cxn) => BondTable::from_atoms(atoms, cxn).unwrap(),
            None => BondTable::from_atoms_padded(atoms).unwrap(),
        };
        let mut params = Params::new(Lattice::cubic(50.0), bonds);
        params.set_spring_constant(2.0).set_equilibrium_distance(1.5);
        params
    }

    fn ring() -> Params {
        network(&[
            Atom::new(0, vec![1, 2]),
            Atom::new(1, vec![2, 0]),
            Atom::new(2, vec![0, 1]),
        ], Some(2))
    }

    fn chain() -> Params {
        network(&[
            Atom::new(0, vec![1]),
            Atom::new(1, vec![0, 2]),
            Atom::new(2, vec![1]),
        ], None)
    }

    fn settings() -> cfg::Cg {
        cfg::Cg {
            gradient_tolerance: 1e-7,
            max_iterations: 1000,
            ..cfg::Cg::default()
        }
    }

    fn assert_in_cell(params: &Params, positions: &[V3]) {
        for pos in positions {
            let frac = pos / params.lattice();
            for &x in &frac.0 {
                assert!(0.0 <= x && x <= 1.0, "{:?} not in cell", frac);
            }
        }
    }

    #[test]
    fn ring_relaxes() {
        crate::init_test_logger();
        let params = ring();
        let start = vec![
            V3([25.0, 25.0, 25.0]),
            V3([26.2, 25.3, 25.0]),
            V3([25.4, 26.9, 25.2]),
        ];
        let relaxed = relax(&params, &start, &settings()).unwrap();
        assert!(relaxed.termination.is_converged(), "{:?}", relaxed.termination);
        assert!(relaxed.termination.iterations() <= 1000);
        assert_close!(abs=1e-9, relaxed.value, 0.0);

        for &[a, b] in params.bonds().couples() {
            let dist = params.real_diff(relaxed.positions[a], relaxed.positions[b]).norm();
            assert_close!(abs=1e-5, dist, 1.5);
        }
        assert_in_cell(&params, &relaxed.positions);
    }

    #[test]
    fn padded_chain_relaxes() {
        crate::init_test_logger();
        let params = chain();
        let start = vec![
            V3([10.0, 10.0, 10.0]),
            V3([11.1, 10.2, 10.0]),
            V3([12.9, 10.1, 9.8]),
        ];
        let relaxed = relax(&params, &start, &settings()).unwrap();
        assert!(relaxed.termination.is_converged(), "{:?}", relaxed.termination);

        let pos = &relaxed.positions;
        assert_close!(abs=1e-5, params.real_diff(pos[1], pos[0]).norm(), 1.5);
        assert_close!(abs=1e-5, params.real_diff(pos[2], pos[1]).norm(), 1.5);
    }

    #[test]
    fn converged_positions_are_wrapped() {
        let params = ring();
        // the whole ring sits across the boundary at x = 0
        let start = vec![
            V3([-0.4, 5.0, 5.0]),
            V3([1.0, 5.2, 5.0]),
            V3([0.2, 6.3, 5.1]),
        ];
        let relaxed = relax(&params, &start, &settings()).unwrap();
        assert!(relaxed.termination.is_converged(), "{:?}", relaxed.termination);
        assert_in_cell(&params, &relaxed.positions);

        for &[a, b] in params.bonds().couples() {
            let dist = params.real_diff(relaxed.positions[a], relaxed.positions[b]).norm();
            assert_close!(abs=1e-5, dist, 1.5);
        }
    }

    #[test]
    fn stalled_at_minimum() {
        let params = chain();
        // already relaxed; the first step has a zero gradient to work with
        let start = vec![
            V3([-1.5, 0.0, 0.0]),
            V3([0.0, 0.0, 0.0]),
            V3([1.5, 0.0, 0.0]),
        ];
        let relaxed = relax(&params, &start, &settings()).unwrap();
        assert_eq!(relaxed.termination, Termination::Stalled { iterations: 1 });
        assert_eq!(relaxed.value, 0.0);
        // not wrapped
        assert_eq!(relaxed.positions, start);
    }

    #[test]
    fn iteration_cap() {
        let params = ring();
        let start = vec![
            V3([-5.0, 5.0, 5.0]),
            V3([-2.0, 5.0, 5.0]),
            V3([-3.0, 9.0, 5.0]),
        ];
        let settings = cfg::Cg {
            gradient_tolerance: 1e-12,
            max_iterations: 2,
            ..cfg::Cg::default()
        };
        let relaxed = relax(&params, &start, &settings).unwrap();
        assert_eq!(relaxed.termination, Termination::MaxIterationsReached { iterations: 2 });
        assert_eq!(relaxed.positions, start);

        let initial = Harmonic::new(params.clone()).value(&flatten(&start)).unwrap();
        assert!(relaxed.value <= initial);
    }

    #[test]
    fn wrong_number_of_positions() {
        let params = ring();
        let start = vec![V3::zero(); 2];
        assert!(relax(&params, &start, &settings()).is_err());
    }

    #[test]
    fn invalid_settings_are_an_error() {
        let params = ring();
        let start = vec![
            V3([25.0, 25.0, 25.0]),
            V3([26.2, 25.3, 25.0]),
            V3([25.4, 26.9, 25.2]),
        ];
        for bad in vec![
            cfg::Cg { step_size: 0.0, ..settings() },
            cfg::Cg { step_size: -1.0, ..settings() },
            cfg::Cg { line_tolerance: 1.5, ..settings() },
            cfg::Cg { line_tolerance: 0.0, ..settings() },
        ] {
            assert!(relax(&params, &start, &bad).is_err(), "{:?}", bad);
        }
    }

    // Reports `NoProgress` on its third step and never moves.
    struct StallsOnThird {
        position: Vec<f64>,
        gradient: Vec<f64>,
        value: f64,
        calls: u64,
    }

    impl Minimizer<Harmonic> for StallsOnThird {
        fn set(mut objective: Harmonic, initial: &[f64], _: f64, _: f64) -> FailResult<Self> {
            let (value, gradient) = objective.value_and_gradient(initial)?;
            Ok(StallsOnThird { position: initial.to_vec(), gradient, value, calls: 0 })
        }

        fn iterate(&mut self) -> FailResult<Status> {
            self.calls += 1;
            Ok(match self.calls {
                3 => Status::NoProgress,
                _ => Status::Continue,
            })
        }

        fn position(&self) -> &[f64] { &self.position }
        fn gradient(&self) -> &[f64] { &self.gradient }
        fn value(&self) -> f64 { self.value }
        fn iterations(&self) -> u64 { self.calls }
    }

    #[test]
    fn stall_counts_every_call() {
        let params = ring();
        let start = vec![
            V3([0.0, 0.0, 0.0]),
            V3([3.0, 0.0, 0.0]),
            V3([0.0, 3.0, 0.0]),
        ];
        let relaxed = relax_with::<StallsOnThird>(&params, &start, &settings()).unwrap();
        assert_eq!(relaxed.termination, Termination::Stalled { iterations: 3 });
        assert_eq!(relaxed.positions, start);
    }

    #[test]
    fn termination_json() {
        let json = serde_json::to_value(Termination::MaxIterationsReached { iterations: 100 }).unwrap();
        assert_eq!(json, json!({"max-iterations-reached": {"iterations": 100}}));

        for (term, converged) in izip!(
            vec![
                Termination::Converged { iterations: 4 },
                Termination::Stalled { iterations: 4 },
                Termination::MaxIterationsReached { iterations: 4 },
            ],
            vec![true, false, false]
        ) {
            assert_eq!(term.is_converged(), converged);
            assert_eq!(term.iterations(), 4);
        }
    }
}
