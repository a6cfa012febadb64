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

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Rem, Sub};

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use tracing::warn;

use crate::linalg;

use super::engine::{self, AdError};
use super::rules;

/// A scalar carrying its value, gradient, and Hessian with respect to a
/// fixed set of seeded variables, plus an optional Taylor-mode stack of
/// higher-order derivatives for a single variable.
///
/// Arithmetic (`+ - * /`, unary `-`) is defined between `Ad` values and
/// against plain `f64` on either side, for owned values and references.
/// Operands must come from the same seeding session: mismatched variable
/// counts or Taylor orders panic, the same way ndarray arithmetic panics on
/// shape mismatch.
#[derive(Debug, Clone)]
pub struct Ad {
    pub(crate) val: f64,
    pub(crate) der: Array1<f64>,
    pub(crate) der2: Array2<f64>,
    /// Derivative orders `1..=order` with respect to the single seeded
    /// variable; `Some` only in Taylor mode (order > 2).
    pub(crate) higher: Option<Vec<f64>>,
}

impl Ad {
    /// A seeded variable: derivative 1 in its own direction, 0 elsewhere.
    pub fn variable(val: f64, index: usize, size: usize) -> Result<Ad, AdError> {
        if index >= size {
            return Err(AdError::DirectionOutOfRange { index, size });
        }
        Ok(Self::seeded(val, index, size))
    }

    pub(crate) fn seeded(val: f64, index: usize, size: usize) -> Ad {
        let mut der = Array1::zeros(size);
        der[index] = 1.0;
        Ad {
            val,
            der,
            der2: Array2::zeros((size, size)),
            higher: None,
        }
    }

    /// A constant with zero derivatives everywhere.
    pub fn constant(val: f64, size: usize) -> Ad {
        Ad {
            val,
            der: Array1::zeros(size),
            der2: Array2::zeros((size, size)),
            higher: None,
        }
    }

    /// A constant shaped like `template`, including its Taylor order, so the
    /// result keeps flowing through Leibniz products.
    pub(crate) fn constant_like(val: f64, template: &Ad) -> Ad {
        Ad {
            val,
            der: Array1::zeros(template.size()),
            der2: Array2::zeros((template.size(), template.size())),
            higher: template.higher.as_ref().map(|h| vec![0.0; h.len()]),
        }
    }

    /// A Taylor-mode variable tracking derivative orders `1..=order`.
    pub(crate) fn taylor_seeded(val: f64, order: usize) -> Ad {
        let mut higher = vec![0.0; order];
        higher[0] = 1.0;
        Ad {
            val,
            der: Array1::from_elem(1, 1.0),
            der2: Array2::zeros((1, 1)),
            higher: Some(higher),
        }
    }

    /// Number of seeded variables this value differentiates against.
    pub fn size(&self) -> usize {
        self.der.len()
    }

    /// Highest tracked derivative order (2 outside Taylor mode).
    pub fn order(&self) -> usize {
        self.higher.as_ref().map_or(2, Vec::len)
    }

    pub fn value(&self) -> f64 {
        self.val
    }

    pub fn gradient(&self) -> ArrayView1<'_, f64> {
        self.der.view()
    }

    pub fn hessian(&self) -> ArrayView2<'_, f64> {
        self.der2.view()
    }

    /// First derivative in the given variable direction.
    pub fn diff(&self, direction: usize) -> Result<f64, AdError> {
        if direction >= self.size() {
            return Err(AdError::DirectionOutOfRange {
                index: direction,
                size: self.size(),
            });
        }
        Ok(self.der[direction])
    }

    /// Second derivative, i.e. the Hessian entry `(i, j)`.
    pub fn diff2(&self, i: usize, j: usize) -> Result<f64, AdError> {
        let bad = if i >= self.size() { i } else { j };
        if bad >= self.size() {
            return Err(AdError::DirectionOutOfRange {
                index: bad,
                size: self.size(),
            });
        }
        Ok(self.der2[[i, j]])
    }

    /// The n-th derivative of a Taylor-mode value.
    pub fn higher_diff(&self, order: usize) -> Result<f64, AdError> {
        if order == 0 {
            return Err(AdError::OrderZero);
        }
        let higher = self.higher.as_ref().ok_or(AdError::HigherOrderNotTracked)?;
        if order > higher.len() {
            return Err(AdError::OrderOutOfRange {
                requested: order,
                tracked: higher.len(),
            });
        }
        Ok(higher[order - 1])
    }

    /// True when the value carries no derivative information at all.
    pub fn is_constant(&self) -> bool {
        self.der.iter().all(|&d| d == 0.0)
            && self.der2.iter().all(|&d| d == 0.0)
            && self
                .higher
                .as_ref()
                .map_or(true, |h| h.iter().all(|&d| d == 0.0))
    }

    /// Compare value, gradient, and Hessian within an absolute tolerance.
    pub fn approx_eq(&self, other: &Ad, tol: f64) -> bool {
        (self.val - other.val).abs() <= tol
            && self.size() == other.size()
            && self
                .der
                .iter()
                .zip(other.der.iter())
                .all(|(a, b)| (a - b).abs() <= tol)
            && self
                .der2
                .iter()
                .zip(other.der2.iter())
                .all(|(a, b)| (a - b).abs() <= tol)
    }

    fn add_impl(&self, other: &Ad) -> Ad {
        let higher = match (&self.higher, &other.higher) {
            (Some(a), Some(b)) => {
                assert_eq!(a.len(), b.len(), "operands track different Taylor orders");
                Some(a.iter().zip(b).map(|(x, y)| x + y).collect())
            }
            _ => None,
        };
        Ad {
            val: self.val + other.val,
            der: &self.der + &other.der,
            der2: &self.der2 + &other.der2,
            higher,
        }
    }

    fn add_scalar(&self, c: f64) -> Ad {
        Ad {
            val: self.val + c,
            der: self.der.clone(),
            der2: self.der2.clone(),
            higher: self.higher.clone(),
        }
    }

    fn sub_impl(&self, other: &Ad) -> Ad {
        self.add_impl(&other.mul_scalar(-1.0))
    }

    fn sub_scalar(&self, c: f64) -> Ad {
        self.add_scalar(-c)
    }

    fn rsub_scalar(&self, c: f64) -> Ad {
        self.mul_scalar(-1.0).add_scalar(c)
    }

    fn mul_impl(&self, other: &Ad) -> Ad {
        let der = &self.der * other.val + &other.der * self.val;
        let der2 = &other.der2 * self.val
            + linalg::outer(&other.der, &self.der)
            + linalg::outer(&self.der, &other.der)
            + &self.der2 * other.val;
        let higher = match (&self.higher, &other.higher) {
            (Some(a), Some(b)) => {
                assert_eq!(a.len(), b.len(), "operands track different Taylor orders");
                let order = a.len();
                let mut out = vec![0.0; order];
                for n in 1..=order {
                    // Leibniz: (fg)^(n) = sum_k C(n,k) f^(k) g^(n-k),
                    // with the zeroth derivative being the value itself.
                    let mut sum = self.val * b[n - 1] + a[n - 1] * other.val;
                    for k in 1..n {
                        sum += engine::binomial(n, k) * a[k - 1] * b[n - k - 1];
                    }
                    out[n - 1] = sum;
                }
                Some(out)
            }
            _ => None,
        };
        Ad {
            val: self.val * other.val,
            der,
            der2,
            higher,
        }
    }

    fn mul_scalar(&self, c: f64) -> Ad {
        Ad {
            val: self.val * c,
            der: &self.der * c,
            der2: &self.der2 * c,
            higher: self
                .higher
                .as_ref()
                .map(|h| h.iter().map(|d| d * c).collect()),
        }
    }

    fn div_impl(&self, other: &Ad) -> Ad {
        self.mul_impl(&other.powf(-1.0))
    }

    fn div_scalar(&self, c: f64) -> Ad {
        self.mul_scalar(c.recip())
    }

    fn rdiv_scalar(&self, c: f64) -> Ad {
        self.powf(-1.0).mul_scalar(c)
    }

    /// Raise to a constant power.
    pub fn powf(&self, p: f64) -> Ad {
        let outer = rules::powf(self.val, p, engine::required_orders(self));
        engine::compose(self, &outer)
    }

    pub fn powi(&self, n: i32) -> Ad {
        self.powf(f64::from(n))
    }

    pub fn sqrt(&self) -> Ad {
        self.powf(0.5)
    }

    /// Raise to a variable power. Constant exponents fall back to [`powf`];
    /// otherwise this is `exp(ln(self) * exponent)`, which requires a
    /// positive base for finite derivatives. A zero base with an exponent
    /// above 2 yields the zero function; other zero-base exponents have no
    /// derivative.
    ///
    /// [`powf`]: Ad::powf
    pub fn pow(&self, exponent: &Ad) -> Result<Ad, AdError> {
        if exponent.is_constant() {
            return Ok(self.powf(exponent.val));
        }
        if self.val == 0.0 {
            if exponent.val > 2.0 {
                return Ok(Ad::constant_like(0.0, self));
            }
            return Err(AdError::ZeroBasePow {
                exponent: exponent.val,
            });
        }
        Ok((self.ln().mul_impl(exponent)).exp())
    }

    /// The exponential `base^self`.
    pub fn exp_base(&self, base: f64) -> Ad {
        self.mul_scalar(base.ln()).exp()
    }

    pub fn exp(&self) -> Ad {
        engine::compose(self, &rules::exp(self.val, engine::required_orders(self)))
    }

    pub fn ln(&self) -> Ad {
        engine::compose(self, &rules::ln(self.val, engine::required_orders(self)))
    }

    pub fn sin(&self) -> Ad {
        engine::compose(self, &rules::sin(self.val, engine::required_orders(self)))
    }

    pub fn cos(&self) -> Ad {
        engine::compose(self, &rules::cos(self.val, engine::required_orders(self)))
    }

    pub fn tan(&self) -> Ad {
        self.sin().div_impl(&self.cos())
    }

    pub fn cot(&self) -> Ad {
        self.cos().div_impl(&self.sin())
    }

    pub fn sec(&self) -> Ad {
        self.cos().powf(-1.0)
    }

    pub fn csc(&self) -> Ad {
        self.sin().powf(-1.0)
    }

    pub fn sinh(&self) -> Ad {
        engine::compose(self, &rules::sinh(self.val, engine::required_orders(self)))
    }

    pub fn cosh(&self) -> Ad {
        engine::compose(self, &rules::cosh(self.val, engine::required_orders(self)))
    }

    pub fn tanh(&self) -> Ad {
        self.sinh().div_impl(&self.cosh())
    }

    pub fn coth(&self) -> Ad {
        self.cosh().div_impl(&self.sinh())
    }

    pub fn sech(&self) -> Ad {
        self.cosh().powf(-1.0)
    }

    pub fn csch(&self) -> Ad {
        self.sinh().powf(-1.0)
    }

    /// Absolute value; the derivative is undefined at zero.
    pub fn abs(&self) -> Result<Ad, AdError> {
        let outer = rules::abs(self.val, engine::required_orders(self))?;
        Ok(engine::compose(self, &outer))
    }

    fn order2_only(&self, func: &'static str) -> Result<(), AdError> {
        match &self.higher {
            Some(h) => Err(AdError::UnsupportedOrder {
                func,
                order: h.len(),
            }),
            None => Ok(()),
        }
    }

    pub fn asin(&self) -> Result<Ad, AdError> {
        self.order2_only("asin")?;
        Ok(engine::compose(self, &rules::asin(self.val)))
    }

    pub fn acos(&self) -> Result<Ad, AdError> {
        self.order2_only("acos")?;
        Ok(engine::compose(self, &rules::acos(self.val)))
    }

    pub fn atan(&self) -> Result<Ad, AdError> {
        self.order2_only("atan")?;
        Ok(engine::compose(self, &rules::atan(self.val)))
    }

    pub fn acot(&self) -> Result<Ad, AdError> {
        self.order2_only("acot")?;
        Ok(engine::compose(self, &rules::acot(self.val)))
    }

    pub fn asec(&self) -> Result<Ad, AdError> {
        self.order2_only("asec")?;
        Ok(engine::compose(self, &rules::asec(self.val)?))
    }

    pub fn acsc(&self) -> Result<Ad, AdError> {
        self.order2_only("acsc")?;
        Ok(engine::compose(self, &rules::acsc(self.val)?))
    }

    pub fn asinh(&self) -> Result<Ad, AdError> {
        self.order2_only("asinh")?;
        Ok(engine::compose(self, &rules::asinh(self.val)))
    }

    pub fn acosh(&self) -> Result<Ad, AdError> {
        self.order2_only("acosh")?;
        Ok(engine::compose(self, &rules::acosh(self.val)?))
    }

    pub fn atanh(&self) -> Result<Ad, AdError> {
        self.order2_only("atanh")?;
        Ok(engine::compose(self, &rules::atanh(self.val)?))
    }

    pub fn acoth(&self) -> Result<Ad, AdError> {
        self.order2_only("acoth")?;
        Ok(engine::compose(self, &rules::acoth(self.val)?))
    }

    pub fn asech(&self) -> Result<Ad, AdError> {
        self.order2_only("asech")?;
        Ok(engine::compose(self, &rules::asech(self.val)?))
    }

    pub fn acsch(&self) -> Result<Ad, AdError> {
        self.order2_only("acsch")?;
        Ok(engine::compose(self, &rules::acsch(self.val)?))
    }
}

impl fmt::Display for Ad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AD(value: {}, derivatives: {})", self.val, self.der)
    }
}

// Comparisons look at the primal value only, like the float they wrap.
impl PartialEq for Ad {
    fn eq(&self, other: &Ad) -> bool {
        self.val == other.val
    }
}

impl PartialOrd for Ad {
    fn partial_cmp(&self, other: &Ad) -> Option<Ordering> {
        self.val.partial_cmp(&other.val)
    }
}

macro_rules! binary_op {
    ($trait:ident, $method:ident, $ad_ad:ident, $ad_f64:ident, $f64_ad:ident) => {
        impl $trait<&Ad> for &Ad {
            type Output = Ad;
            fn $method(self, rhs: &Ad) -> Ad {
                self.$ad_ad(rhs)
            }
        }
        impl $trait<Ad> for &Ad {
            type Output = Ad;
            fn $method(self, rhs: Ad) -> Ad {
                self.$ad_ad(&rhs)
            }
        }
        impl $trait<&Ad> for Ad {
            type Output = Ad;
            fn $method(self, rhs: &Ad) -> Ad {
                self.$ad_ad(rhs)
            }
        }
        impl $trait<Ad> for Ad {
            type Output = Ad;
            fn $method(self, rhs: Ad) -> Ad {
                self.$ad_ad(&rhs)
            }
        }
        impl $trait<f64> for &Ad {
            type Output = Ad;
            fn $method(self, rhs: f64) -> Ad {
                self.$ad_f64(rhs)
            }
        }
        impl $trait<f64> for Ad {
            type Output = Ad;
            fn $method(self, rhs: f64) -> Ad {
                self.$ad_f64(rhs)
            }
        }
        impl $trait<&Ad> for f64 {
            type Output = Ad;
            fn $method(self, rhs: &Ad) -> Ad {
                rhs.$f64_ad(self)
            }
        }
        impl $trait<Ad> for f64 {
            type Output = Ad;
            fn $method(self, rhs: Ad) -> Ad {
                rhs.$f64_ad(self)
            }
        }
    };
}

binary_op!(Add, add, add_impl, add_scalar, add_scalar);
binary_op!(Sub, sub, sub_impl, sub_scalar, rsub_scalar);
binary_op!(Mul, mul, mul_impl, mul_scalar, mul_scalar);
binary_op!(Div, div, div_impl, div_scalar, rdiv_scalar);

impl Neg for &Ad {
    type Output = Ad;
    fn neg(self) -> Ad {
        self.mul_scalar(-1.0)
    }
}

impl Neg for Ad {
    type Output = Ad;
    fn neg(self) -> Ad {
        self.mul_scalar(-1.0)
    }
}

// The remainder only applies to the primal value; there is no meaningful
// derivative to carry, so the output is a bare float.
impl Rem<f64> for &Ad {
    type Output = f64;
    fn rem(self, modulus: f64) -> f64 {
        warn!("the % operator only applies to the value; derivatives are discarded");
        self.val % modulus
    }
}

impl Rem<f64> for Ad {
    type Output = f64;
    fn rem(self, modulus: f64) -> f64 {
        &self % modulus
    }
}
