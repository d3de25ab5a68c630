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

use springnet_slice_math::vnorm;

/// A differentiable function of a flat coordinate vector.
///
/// The dimension is the length of the slice handed in.
pub trait Objective {
    type Error;

    fn value(&mut self, position: &[f64]) -> Result<f64, Self::Error>;

    fn gradient(&mut self, position: &[f64]) -> Result<Vec<f64>, Self::Error>;

    /// Evaluate both at once.  Override this when they share work.
    fn value_and_gradient(&mut self, position: &[f64]) -> Result<(f64, Vec<f64>), Self::Error> {
        Ok((self.value(position)?, self.gradient(position)?))
    }
}

/// Adapts a closure that returns `(value, gradient)` into an [`Objective`].
#[derive(Debug, Clone)]
pub struct DiffFn<F>(pub F);

impl<E, F> Objective for DiffFn<F>
where F: FnMut(&[f64]) -> Result<(f64, Vec<f64>), E>,
{
    type Error = E;

    fn value(&mut self, position: &[f64]) -> Result<f64, E> {
        Ok((self.0)(position)?.0)
    }

    fn gradient(&mut self, position: &[f64]) -> Result<Vec<f64>, E> {
        Ok((self.0)(position)?.1)
    }

    fn value_and_gradient(&mut self, position: &[f64]) -> Result<(f64, Vec<f64>), E> {
        (self.0)(position)
    }
}

/// Outcome of a single step.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Status {
    /// A step was taken, or a failure was recorded that the next step may recover from.
    Continue,
    /// The minimizer cannot improve on its current point.
    NoProgress,
}

/// A minimizer that is driven one iteration at a time.
///
/// Whether the current point is good enough is for the caller to decide;
/// see [`test_gradient`].
pub trait Minimizer<F: Objective>: Sized {
    /// Evaluate the objective at `initial_position` and prepare for the first step.
    ///
    /// `step_size` is the size of the first trial step, and `line_tolerance`
    /// controls how accurately each line minimization is carried out.
    fn set(
        objective: F,
        initial_position: &[f64],
        step_size: f64,
        line_tolerance: f64,
    ) -> Result<Self, F::Error>;

    fn iterate(&mut self) -> Result<Status, F::Error>;

    /// Current best point.
    fn position(&self) -> &[f64];

    /// Gradient at [`Minimizer::position`].
    fn gradient(&self) -> &[f64];

    /// Value at [`Minimizer::position`].
    fn value(&self) -> f64;

    /// Number of successful steps taken.
    fn iterations(&self) -> u64;
}

/// Test for convergence: `true` when the norm of the gradient is below `tolerance`.
pub fn test_gradient(gradient: &[f64], tolerance: f64) -> bool {
    vnorm(gradient) < tolerance
}
