// Copyright 2026 the ADCST developers.
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at:
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

// Part of the ADCST project (automatic differentiation with second-order and
// Taylor-mode derivatives).

//! Newton's method driven by exact AD gradients and Hessians: each step
//! seeds fresh variables at the current point, evaluates the objective, and
//! solves `H step = -grad`.

use ndarray::Array1;
use tracing::debug;

use crate::autodiff::{Ad, AdError, AdVec};
use crate::linalg;

/// Options controlling the Newton iteration.
#[derive(Debug, Clone)]
pub struct NewtonOptions {
    /// Stop once the step norm falls below this tolerance.
    pub tol: f64,
    /// Give up after this many iterations.
    pub max_iter: usize,
}

impl Default for NewtonOptions {
    fn default() -> Self {
        Self {
            tol: 1e-8,
            max_iter: 100,
        }
    }
}

/// A converged minimization.
#[derive(Debug, Clone)]
pub struct NewtonResult {
    /// The point the iteration converged to.
    pub x: Array1<f64>,
    /// Objective value at that point.
    pub value: f64,
    /// Number of Newton steps taken.
    pub iterations: usize,
}

/// Errors returned by the Newton solver.
#[derive(Debug, thiserror::Error)]
pub enum NewtonError {
    /// The objective failed to evaluate at some iterate.
    #[error("objective evaluation failed: {0}")]
    Objective(#[from] AdError),
    /// The Hessian could not be inverted at the current point.
    #[error("Hessian is singular at iteration {iteration}")]
    SingularHessian { iteration: usize },
    /// The step norm never passed the tolerance.
    #[error("no convergence after {max_iter} iterations (last step norm {step_norm:e})")]
    NoConvergence { max_iter: usize, step_norm: f64 },
}

/// Minimize `objective` starting from `start`.
///
/// The objective receives one freshly seeded variable per coordinate and
/// returns the function value built from them; its gradient and Hessian
/// drive the iteration.
pub fn minimize<F>(
    objective: F,
    start: &[f64],
    opts: &NewtonOptions,
) -> Result<NewtonResult, NewtonError>
where
    F: Fn(&[Ad]) -> Result<Ad, AdError>,
{
    let mut point: Vec<f64> = start.to_vec();
    let mut step_norm = f64::INFINITY;

    for iteration in 0..opts.max_iter {
        let seeded = AdVec::new(&point);
        let f = objective(seeded.vars())?;
        let grad = f.gradient().to_owned();
        let hess = f.hessian().to_owned();

        let step = linalg::solve(&hess, &(-&grad))
            .ok_or(NewtonError::SingularHessian { iteration })?;
        for (p, s) in point.iter_mut().zip(step.iter()) {
            *p += s;
        }
        step_norm = linalg::norm(&step);
        debug!(iteration, step_norm, value = f.value(), "newton step");

        if step_norm < opts.tol {
            let seeded = AdVec::new(&point);
            let f = objective(seeded.vars())?;
            return Ok(NewtonResult {
                x: Array1::from(point),
                value: f.value(),
                iterations: iteration + 1,
            });
        }
    }

    Err(NewtonError::NoConvergence {
        max_iter: opts.max_iter,
        step_norm,
    })
}
