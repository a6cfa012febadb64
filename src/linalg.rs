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

//! Small dense linear algebra helpers used by the derivative rules and the
//! Newton solver.

use ndarray::{Array1, Array2};

pub(crate) fn outer(a: &Array1<f64>, b: &Array1<f64>) -> Array2<f64> {
    Array2::from_shape_fn((a.len(), b.len()), |(i, j)| a[i] * b[j])
}

pub(crate) fn norm(v: &Array1<f64>) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

/// Solve `a x = b` by Gaussian elimination with partial pivoting. Returns
/// `None` when the matrix is singular to working precision.
pub(crate) fn solve(a: &Array2<f64>, b: &Array1<f64>) -> Option<Array1<f64>> {
    let n = b.len();
    debug_assert_eq!(a.nrows(), n);
    debug_assert_eq!(a.ncols(), n);

    let mut m = a.clone();
    let mut rhs = b.clone();
    for col in 0..n {
        let mut pivot = col;
        for row in col + 1..n {
            if m[[row, col]].abs() > m[[pivot, col]].abs() {
                pivot = row;
            }
        }
        if m[[pivot, col]].abs() < 1e-12 {
            return None;
        }
        if pivot != col {
            for k in 0..n {
                m.swap([col, k], [pivot, k]);
            }
            rhs.swap(col, pivot);
        }
        for row in col + 1..n {
            let factor = m[[row, col]] / m[[col, col]];
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                m[[row, k]] -= factor * m[[col, k]];
            }
            rhs[row] -= factor * rhs[col];
        }
    }

    let mut x = Array1::zeros(n);
    for row in (0..n).rev() {
        let mut acc = rhs[row];
        for k in row + 1..n {
            acc -= m[[row, k]] * x[k];
        }
        x[row] = acc / m[[row, row]];
    }
    Some(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, arr2};

    #[test]
    fn solve_recovers_known_solution() {
        let a = arr2(&[[2.0, 1.0], [1.0, 3.0]]);
        let b = arr1(&[5.0, 10.0]);
        let x = solve(&a, &b).expect("well-conditioned system");
        assert!((x[0] - 1.0).abs() < 1e-12);
        assert!((x[1] - 3.0).abs() < 1e-12);
    }

    #[test]
    fn solve_rejects_singular_matrix() {
        let a = arr2(&[[1.0, 2.0], [2.0, 4.0]]);
        let b = arr1(&[1.0, 2.0]);
        assert!(solve(&a, &b).is_none());
    }

    #[test]
    fn solve_pivots_when_leading_entry_vanishes() {
        let a = arr2(&[[0.0, 1.0], [1.0, 0.0]]);
        let b = arr1(&[2.0, 3.0]);
        let x = solve(&a, &b).expect("permutation matrix");
        assert!((x[0] - 3.0).abs() < 1e-12);
        assert!((x[1] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn outer_product_shape_and_values() {
        let p = outer(&arr1(&[1.0, 2.0]), &arr1(&[3.0, 4.0]));
        assert_eq!(p, arr2(&[[3.0, 4.0], [6.0, 8.0]]));
    }
}
