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

//! Fletcher–Reeves nonlinear conjugate gradient.
//!
//! Each step searches along
//!
//! ```text
//! d_k = -g_k + beta_k d_{k-1},    beta_k = |g_k|^2 / |g_{k-1}|^2
//! ```
//!
//! with a strong Wolfe linesearch.  The search restarts from steepest
//! descent every `n` steps (`n` being the dimension), whenever the conjugate
//! direction fails to point downhill, and after a failed linesearch.  A second
//! consecutive failure is reported as [`Status::NoProgress`].

use either::{Left, Right};
use springnet_slice_math::{v, V, vdot, vnorm, vsqnorm, vnormalize, BadNorm};

use crate::{Objective, Minimizer, Status};
use crate::strong_ls;
use crate::util::MinCache;

#[derive(Debug, Clone)]
struct Point {
    position: Vec<f64>,
    gradient: Vec<f64>,
    value: f64,
}

// Describes the previous step.
#[derive(Debug, Clone)]
struct Last {
    // direction searched (not normalized)
    direction: Vec<f64>,
    // |g|^2 at the start of the step
    gradient_sqnorm: f64,
    ls_failed: bool,
}

/// Fletcher–Reeves conjugate gradient, driven one step at a time.
#[derive(Debug)]
pub struct ConjugateFr<F> {
    objective: F,
    linesearch: strong_ls::Settings,
    step_size: f64,
    point: Point,
    // initial guess for the next linesearch
    alpha: f64,
    last: Option<Last>,
    iterations: u64,
    since_restart: usize,
}

impl<F> ConjugateFr<F> {
    pub fn objective(&self) -> &F { &self.objective }

    pub fn into_objective(self) -> F { self.objective }

    fn warning(&self, msg: &str) {
        warn!("{}", msg);
        warn!("Iterations: {}", self.iterations);
        warn!("     Alpha: {}", self.alpha);
        warn!("     Value: {}", self.point.value);
        warn!(" Grad Norm: {}", vnorm(&self.point.gradient));
    }
}

impl<F: Objective> ConjugateFr<F> {
    fn compute_point(&mut self, position: Vec<f64>) -> Result<Point, F::Error> {
        let (value, gradient) = self.objective.value_and_gradient(&position)?;
        Ok(Point { position, gradient, value })
    }

    // Conjugate direction if usable, steepest descent otherwise.
    fn choose_direction(&mut self) -> Vec<f64> {
        let dim = self.point.position.len();
        let gradient = &self.point.gradient;

        // an loop/break is used for complex control flow
        let conjugate = 'use_dir: loop { break {
            if let Some(Last { ls_failed: false, direction, gradient_sqnorm }) = &self.last {
                if self.since_restart < dim {
                    let beta = vsqnorm(gradient) / gradient_sqnorm;
                    let V(direction) = beta * v(direction) - v(gradient);

                    // use this direction as long as it is downhill
                    if vdot(gradient, &direction) < 0.0 {
                        break 'use_dir Some(direction);
                    }
                }
            }
            None
        }};

        match conjugate {
            Some(direction) => direction,
            None => {
                debug!("Using steepest descent. (i: {})", self.iterations + 1);
                self.since_restart = 0;
                let V(direction) = -v(gradient);
                direction
            },
        }
    }
}

impl<F: Objective> Minimizer<F> for ConjugateFr<F> {
    /// # Panics
    ///
    /// Panics if `step_size` is not positive or `line_tolerance` is not in `(1e-4, 1)`.
    fn set(
        mut objective: F,
        initial_position: &[f64],
        step_size: f64,
        line_tolerance: f64,
    ) -> Result<Self, F::Error> {
        assert!(step_size > 0.0, "non-positive step size: {}", step_size);
        let linesearch = strong_ls::Settings::with_curvature(line_tolerance);
        if let Err(e) = linesearch.validate() {
            panic!("{}", e);
        }

        let (value, gradient) = objective.value_and_gradient(initial_position)?;
        let point = Point { position: initial_position.to_vec(), gradient, value };
        Ok(ConjugateFr {
            objective, linesearch, step_size, point,
            alpha: step_size,
            last: None,
            iterations: 0,
            since_restart: 0,
        })
    }

    fn iterate(&mut self) -> Result<Status, F::Error> {
        let gradient_sqnorm = vsqnorm(&self.point.gradient);
        if gradient_sqnorm == 0.0 {
            debug!("Zero gradient. (i: {})", self.iterations + 1);
            return Ok(Status::NoProgress);
        }

        let direction = self.choose_direction();
        let V(unit) = match vnormalize(&direction) {
            Ok(unit) => unit,
            Err(BadNorm(norm)) => {
                self.warning(&format!("Cannot normalize search direction (norm: {})", norm));
                return Ok(Status::NoProgress);
            },
        };

        // the linesearch sees `unit`, so alpha is a distance
        let mut best = MinCache::new();
        let ls_result = {
            let objective = &mut self.objective;
            let origin = &self.point.position;
            let unit = &unit;
            let best = &mut best;
            strong_ls::linesearch(&self.linesearch, self.alpha, |alpha| -> Result<_, F::Error> {
                let V(position) = v(origin) + alpha * v(unit);
                let (value, gradient) = objective.value_and_gradient(&position)?;
                let slope = vdot(&gradient, unit);
                best.put(alpha, value, Point { position, gradient, value });
                Ok((value, slope))
            })
        };

        let next_alpha = match ls_result {
            Ok(alpha) if alpha > 0.0 => Some(alpha),
            Ok(_) => None,
            Err(Left(e)) => {
                debug!("{}", e);
                None
            },
            Err(Right(e)) => return Err(e),
        };

        let next_alpha = match next_alpha {
            Some(alpha) => alpha,
            None => {
                if let Some(Last { ls_failed: true, .. }) = self.last {
                    self.warning("Linesearch failure (second)");
                    return Ok(Status::NoProgress);
                }
                self.warning("Linesearch failure, switching to steepest descent");
                self.alpha = self.step_size;
                self.last = Some(Last { direction, gradient_sqnorm, ls_failed: true });
                return Ok(Status::Continue);
            },
        };

        let next_point = match best.get_consume(&next_alpha) {
            Some(point) => point, // extraneous computation avoided!
            None => {
                let V(position) = v(&self.point.position) + next_alpha * v(&unit);
                self.compute_point(position)?
            },
        };

        trace!(
            "cg step  i: {}  alpha: {:e}  value: {}  grad norm: {:e}",
            self.iterations + 1, next_alpha, next_point.value, vnorm(&next_point.gradient),
        );

        self.last = Some(Last { direction, gradient_sqnorm, ls_failed: false });
        self.point = next_point;
        self.alpha = next_alpha;
        self.iterations += 1;
        self.since_restart += 1;
        Ok(Status::Continue)
    }

    fn position(&self) -> &[f64] { &self.point.position }

    fn gradient(&self) -> &[f64] { &self.point.gradient }

    fn value(&self) -> f64 { self.point.value }

    fn iterations(&self) -> u64 { self.iterations }
}
