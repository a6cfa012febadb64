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

//! Seeded variable vectors: one [`AdVec`] owns the variables of a
//! differentiation session, seeded with the identity gradient. `jacobian`
//! and `hessian` assemble derivative matrices from function values built on
//! those variables.

use std::ops::Index;
use std::slice;

use ndarray::{Array1, Array2, ArrayView2};

use super::engine::AdError;
use super::var::Ad;

/// The seeded variables of one differentiation session.
#[derive(Debug, Clone)]
pub struct AdVec {
    vars: Vec<Ad>,
}

impl AdVec {
    /// Seed `values.len()` variables with the identity gradient, tracking
    /// first and second order.
    pub fn new(values: &[f64]) -> AdVec {
        let size = values.len();
        AdVec {
            vars: values
                .iter()
                .enumerate()
                .map(|(i, &v)| Ad::seeded(v, i, size))
                .collect(),
        }
    }

    /// Seed variables tracking derivatives up to `order`. Orders above 2
    /// switch to Taylor mode, which follows a single variable.
    pub fn with_order(values: &[f64], order: usize) -> Result<AdVec, AdError> {
        if order == 0 {
            return Err(AdError::OrderZero);
        }
        if order > 2 {
            if values.len() != 1 {
                return Err(AdError::TaylorNeedsSingleVariable { got: values.len() });
            }
            return Ok(AdVec {
                vars: vec![Ad::taylor_seeded(values[0], order)],
            });
        }
        Ok(AdVec::new(values))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn var(&self, index: usize) -> &Ad {
        &self.vars[index]
    }

    pub fn vars(&self) -> &[Ad] {
        &self.vars
    }

    /// The primal values of every variable.
    pub fn values(&self) -> Array1<f64> {
        self.vars.iter().map(Ad::value).collect()
    }

    /// Apply a unary function over every variable, collecting the results.
    pub fn map<F>(&self, f: F) -> Vec<Ad>
    where
        F: Fn(&Ad) -> Ad,
    {
        self.vars.iter().map(f).collect()
    }
}

impl Index<usize> for AdVec {
    type Output = Ad;
    fn index(&self, index: usize) -> &Ad {
        &self.vars[index]
    }
}

impl<'a> IntoIterator for &'a AdVec {
    type Item = &'a Ad;
    type IntoIter = slice::Iter<'a, Ad>;
    fn into_iter(self) -> Self::IntoIter {
        self.vars.iter()
    }
}

/// Stack the gradients of scalar functions into a Jacobian, one row per
/// function.
pub fn jacobian(funcs: &[Ad]) -> Result<Array2<f64>, AdError> {
    let first = funcs.first().ok_or(AdError::NoFunctions)?;
    let size = first.size();
    let mut out = Array2::zeros((funcs.len(), size));
    for (row, func) in funcs.iter().enumerate() {
        if func.size() != size {
            return Err(AdError::SizeMismatch {
                a: size,
                b: func.size(),
            });
        }
        for (col, d) in func.gradient().iter().enumerate() {
            out[[row, col]] = *d;
        }
    }
    Ok(out)
}

/// The Hessian of one scalar function.
pub fn hessian(func: &Ad) -> ArrayView2<'_, f64> {
    func.hessian()
}
