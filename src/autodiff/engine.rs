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

//! Chain-rule composition for `f(g)` where `g` is an [`Ad`] value and `f` is
//! an elementary function described by its derivative sequence at `g`'s
//! value. First and second order use the two-term Faa di Bruno expansion;
//! Taylor mode composes all tracked orders through partial Bell polynomials.

use crate::linalg;

use super::var::Ad;

/// Errors surfaced by the differentiation core.
#[derive(Debug, thiserror::Error)]
pub enum AdError {
    /// `abs` has no derivative at the origin.
    #[error("derivative of abs is undefined at zero")]
    AbsAtZero,
    /// The input sits outside the region where the function is
    /// differentiable.
    #[error("{func} is not differentiable at {value}: domain is {domain}")]
    OutsideDomain {
        func: &'static str,
        value: f64,
        domain: &'static str,
    },
    /// The function only defines derivatives up to order 2, but the operand
    /// tracks a higher Taylor order.
    #[error("{func} only provides derivatives up to order 2, but order {order} is tracked")]
    UnsupportedOrder { func: &'static str, order: usize },
    /// Raising a zero base to a variable exponent of at most 2.
    #[error("power of a zero base: derivative is undefined for exponent {exponent}")]
    ZeroBasePow { exponent: f64 },
    /// A derivative was requested in a direction that was never seeded.
    #[error("direction {index} is out of range for {size} variable(s)")]
    DirectionOutOfRange { index: usize, size: usize },
    /// Derivative orders start at 1.
    #[error("derivative order must be at least 1")]
    OrderZero,
    /// Higher-order access on a value that only tracks order 2.
    #[error("no derivatives beyond order 2 are tracked; seed with `AdVec::with_order`")]
    HigherOrderNotTracked,
    /// Higher-order access beyond what was seeded.
    #[error("requested order {requested} exceeds the tracked order {tracked}")]
    OrderOutOfRange { requested: usize, tracked: usize },
    /// Taylor mode follows a single scalar variable.
    #[error("Taylor mode tracks a single variable, but {got} were seeded")]
    TaylorNeedsSingleVariable { got: usize },
    /// `jacobian` over an empty function list.
    #[error("jacobian requires at least one function")]
    NoFunctions,
    /// Functions built from different seeding sessions.
    #[error("functions disagree on variable count: {a} vs {b}")]
    SizeMismatch { a: usize, b: usize },
}

/// Derivatives of an outer scalar function evaluated at an inner value.
/// `ders[i]` holds the (i+1)-th derivative.
pub(super) struct Outer {
    pub val: f64,
    pub ders: Vec<f64>,
}

/// How many outer derivative orders a rule must supply to compose with `x`.
pub(super) fn required_orders(x: &Ad) -> usize {
    x.higher.as_ref().map_or(2, |h| h.len().max(2))
}

/// Build `f(x)` from the outer derivative sequence of `f` at `x.value()`.
///
/// Gradient and Hessian follow the multivariate chain rule; when `x` tracks
/// Taylor coefficients, every order composes through Faa di Bruno:
/// `h^(n) = sum_k f^(k) * B_{n,k}(g', ..., g^(n-k+1))`.
pub(super) fn compose(x: &Ad, outer: &Outer) -> Ad {
    let d1 = outer.ders[0];
    let d2 = outer.ders[1];
    let der = &x.der * d1;
    let der2 = &x.der2 * d1 + linalg::outer(&x.der, &x.der) * d2;
    let higher = x.higher.as_ref().map(|inner| {
        let order = inner.len();
        let mut out = vec![0.0; order];
        for n in 1..=order {
            let mut sum = 0.0;
            for k in 1..=n {
                sum += outer.ders[k - 1] * bell_partial(n, k, &inner[..n - k + 1]);
            }
            out[n - 1] = sum;
        }
        out
    });
    Ad {
        val: outer.val,
        der,
        der2,
        higher,
    }
}

/// Binomial coefficient as a float; exact for the small orders in play.
pub(super) fn binomial(n: usize, k: usize) -> f64 {
    if k > n {
        return 0.0;
    }
    let k = k.min(n - k);
    let mut acc = 1.0;
    for i in 0..k {
        acc = acc * (n - i) as f64 / (i + 1) as f64;
    }
    acc
}

/// The falling factorial `x(x-1)...(x-n+1)`.
pub(super) fn falling_factorial(x: f64, n: usize) -> f64 {
    let mut prod = 1.0;
    for i in 0..n {
        prod *= x - i as f64;
    }
    prod
}

/// Partial Bell polynomial `B_{n,k}` over the inner derivative sequence
/// (`xs[i]` holds the (i+1)-th derivative). Standard recurrence:
/// `B_{n,k} = sum_i C(n-1, i-1) * xs[i] * B_{n-i,k-1}`.
pub(super) fn bell_partial(n: usize, k: usize, xs: &[f64]) -> f64 {
    if n == 0 && k == 0 {
        return 1.0;
    }
    if n == 0 || k == 0 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 1..=(n - k + 1) {
        sum += binomial(n - 1, i - 1) * xs[i - 1] * bell_partial(n - i, k - 1, xs);
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binomial_small_values() {
        assert_eq!(binomial(4, 2), 6.0);
        assert_eq!(binomial(5, 0), 1.0);
        assert_eq!(binomial(3, 5), 0.0);
    }

    #[test]
    fn falling_factorial_matches_hand_expansion() {
        // 2.5 * 1.5 * 0.5
        assert!((falling_factorial(2.5, 3) - 1.875).abs() < 1e-12);
        assert_eq!(falling_factorial(5.0, 6), 0.0);
    }

    #[test]
    fn bell_partials_match_known_rows() {
        let xs = [2.0, 3.0, 5.0];
        // B_{3,1} = x3, B_{3,2} = 3 x1 x2, B_{3,3} = x1^3
        assert_eq!(bell_partial(3, 1, &xs), 5.0);
        assert_eq!(bell_partial(3, 2, &xs), 18.0);
        assert_eq!(bell_partial(3, 3, &xs), 8.0);
    }
}
