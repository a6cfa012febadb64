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

use adcst::{minimize, Ad, AdError, NewtonError, NewtonOptions};

fn rosenbrock(v: &[Ad]) -> Result<Ad, AdError> {
    let (x, y) = (&v[0], &v[1]);
    let residual = y - &(x * x);
    let bias = 1.0 - x;
    Ok(&(&residual * &residual) * 100.0 + &bias * &bias)
}

#[test]
fn rosenbrock_converges_to_the_optimum() {
    let result = minimize(rosenbrock, &[2.0, 1.0], &NewtonOptions::default()).unwrap();

    assert!((result.x[0] - 1.0).abs() < 1e-6, "x = {}", result.x);
    assert!((result.x[1] - 1.0).abs() < 1e-6, "x = {}", result.x);
    assert!(result.value < 1e-10);
    assert!(result.iterations <= 10, "took {}", result.iterations);
}

#[test]
fn quadratic_converges_in_two_steps() {
    let result = minimize(
        |v| Ok(&(&v[0] - 3.0) * &(&v[0] - 3.0)),
        &[0.0],
        &NewtonOptions::default(),
    )
    .unwrap();

    assert!((result.x[0] - 3.0).abs() < 1e-12);
    assert_eq!(result.iterations, 2);
}

#[test]
fn flat_objective_has_a_singular_hessian() {
    let err = minimize(
        |v| Ok(v[0].clone() + v[1].clone()),
        &[1.0, 1.0],
        &NewtonOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, NewtonError::SingularHessian { iteration: 0 }));
}

#[test]
fn iteration_cap_is_enforced() {
    let opts = NewtonOptions {
        tol: 1e-12,
        max_iter: 3,
    };
    let err = minimize(rosenbrock, &[2.0, 1.0], &opts).unwrap_err();
    assert!(matches!(err, NewtonError::NoConvergence { max_iter: 3, .. }));
}

#[test]
fn objective_errors_propagate() {
    let err = minimize(|v| v[0].asec(), &[0.5], &NewtonOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        NewtonError::Objective(AdError::OutsideDomain { func: "asec", .. })
    ));
}
