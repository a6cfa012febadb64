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

//! Outer-derivative sequences for the elementary functions, consumed by the
//! composition engine. Functions with a closed n-th derivative (`exp`, `ln`,
//! `pow`, the circular and hyperbolic sine/cosine) supply every tracked
//! order; the inverse functions supply exactly first and second order and
//! their domain checks.

use super::engine::{falling_factorial, AdError, Outer};

pub(super) fn exp(x: f64, orders: usize) -> Outer {
    let e = x.exp();
    Outer {
        val: e,
        ders: vec![e; orders],
    }
}

/// Order n of `ln` is `(-1)^(n-1) (n-1)! / x^n`, written with the falling
/// factorial as in `d^n/dx^n x^p` with p = -1 shifted by one order.
pub(super) fn ln(x: f64, orders: usize) -> Outer {
    let mut ders = Vec::with_capacity(orders);
    for n in 1..=orders {
        ders.push(falling_factorial(-1.0, n - 1) * x.powi(-(n as i32)));
    }
    Outer { val: x.ln(), ders }
}

pub(super) fn powf(x: f64, p: f64, orders: usize) -> Outer {
    let mut ders = Vec::with_capacity(orders);
    for n in 1..=orders {
        let coef = falling_factorial(p, n);
        // The coefficient kills the term for integer p once n exceeds it;
        // skip the power so 0^negative cannot poison the product.
        ders.push(if coef == 0.0 {
            0.0
        } else {
            coef * x.powf(p - n as f64)
        });
    }
    Outer {
        val: x.powf(p),
        ders,
    }
}

pub(super) fn sin(x: f64, orders: usize) -> Outer {
    let (s, c) = x.sin_cos();
    let cycle = [c, -s, -c, s];
    Outer {
        val: s,
        ders: (0..orders).map(|i| cycle[i % 4]).collect(),
    }
}

pub(super) fn cos(x: f64, orders: usize) -> Outer {
    let (s, c) = x.sin_cos();
    let cycle = [-s, -c, s, c];
    Outer {
        val: c,
        ders: (0..orders).map(|i| cycle[i % 4]).collect(),
    }
}

pub(super) fn sinh(x: f64, orders: usize) -> Outer {
    let (sh, ch) = (x.sinh(), x.cosh());
    let cycle = [ch, sh];
    Outer {
        val: sh,
        ders: (0..orders).map(|i| cycle[i % 2]).collect(),
    }
}

pub(super) fn cosh(x: f64, orders: usize) -> Outer {
    let (sh, ch) = (x.sinh(), x.cosh());
    let cycle = [sh, ch];
    Outer {
        val: ch,
        ders: (0..orders).map(|i| cycle[i % 2]).collect(),
    }
}

pub(super) fn abs(x: f64, orders: usize) -> Result<Outer, AdError> {
    if x == 0.0 {
        return Err(AdError::AbsAtZero);
    }
    let mut ders = vec![0.0; orders];
    ders[0] = if x > 0.0 { 1.0 } else { -1.0 };
    Ok(Outer { val: x.abs(), ders })
}

// The inverse functions carry first and second order only; the callers
// reject Taylor-mode operands before reaching these.

pub(super) fn asin(x: f64) -> Outer {
    let w = 1.0 - x * x;
    Outer {
        val: x.asin(),
        ders: vec![w.sqrt().recip(), x / w.powf(1.5)],
    }
}

pub(super) fn acos(x: f64) -> Outer {
    let w = 1.0 - x * x;
    Outer {
        val: x.acos(),
        ders: vec![-w.sqrt().recip(), -x / w.powf(1.5)],
    }
}

pub(super) fn atan(x: f64) -> Outer {
    let u = 1.0 + x * x;
    Outer {
        val: x.atan(),
        ders: vec![u.recip(), -2.0 * x / (u * u)],
    }
}

pub(super) fn acot(x: f64) -> Outer {
    let u = 1.0 + x * x;
    Outer {
        val: x.recip().atan(),
        ders: vec![-u.recip(), 2.0 * x / (u * u)],
    }
}

pub(super) fn asec(x: f64) -> Result<Outer, AdError> {
    if x.abs() <= 1.0 {
        return Err(AdError::OutsideDomain {
            func: "asec",
            value: x,
            domain: "|x| > 1",
        });
    }
    let w = x * x - 1.0;
    Ok(Outer {
        val: x.recip().acos(),
        ders: vec![
            (x.abs() * w.sqrt()).recip(),
            -x.signum() * (2.0 * x * x - 1.0) / (x * x * w.powf(1.5)),
        ],
    })
}

pub(super) fn acsc(x: f64) -> Result<Outer, AdError> {
    if x.abs() <= 1.0 {
        return Err(AdError::OutsideDomain {
            func: "acsc",
            value: x,
            domain: "|x| > 1",
        });
    }
    let w = x * x - 1.0;
    Ok(Outer {
        val: x.recip().asin(),
        ders: vec![
            -(x.abs() * w.sqrt()).recip(),
            x.signum() * (2.0 * x * x - 1.0) / (x * x * w.powf(1.5)),
        ],
    })
}

pub(super) fn asinh(x: f64) -> Outer {
    let u = 1.0 + x * x;
    Outer {
        val: x.asinh(),
        ders: vec![u.sqrt().recip(), -x / u.powf(1.5)],
    }
}

pub(super) fn acosh(x: f64) -> Result<Outer, AdError> {
    if x < 1.0 {
        return Err(AdError::OutsideDomain {
            func: "acosh",
            value: x,
            domain: "[1, inf)",
        });
    }
    let w = x * x - 1.0;
    Ok(Outer {
        val: x.acosh(),
        ders: vec![w.sqrt().recip(), -x / w.powf(1.5)],
    })
}

pub(super) fn atanh(x: f64) -> Result<Outer, AdError> {
    if x.abs() >= 1.0 {
        return Err(AdError::OutsideDomain {
            func: "atanh",
            value: x,
            domain: "(-1, 1)",
        });
    }
    let u = 1.0 - x * x;
    Ok(Outer {
        val: x.atanh(),
        ders: vec![u.recip(), 2.0 * x / (u * u)],
    })
}

pub(super) fn acoth(x: f64) -> Result<Outer, AdError> {
    if x.abs() <= 1.0 {
        return Err(AdError::OutsideDomain {
            func: "acoth",
            value: x,
            domain: "(-inf, -1) U (1, inf)",
        });
    }
    let u = 1.0 - x * x;
    Ok(Outer {
        val: 0.5 * ((x + 1.0) / (x - 1.0)).ln(),
        ders: vec![u.recip(), 2.0 * x / (u * u)],
    })
}

pub(super) fn asech(x: f64) -> Result<Outer, AdError> {
    if x <= 0.0 || x > 1.0 {
        return Err(AdError::OutsideDomain {
            func: "asech",
            value: x,
            domain: "(0, 1]",
        });
    }
    let w = 1.0 - x * x;
    Ok(Outer {
        val: ((1.0 + w.sqrt()) / x).ln(),
        ders: vec![
            -(x * w.sqrt()).recip(),
            (1.0 - 2.0 * x * x) / (x * x * w.powf(1.5)),
        ],
    })
}

pub(super) fn acsch(x: f64) -> Result<Outer, AdError> {
    if x == 0.0 {
        return Err(AdError::OutsideDomain {
            func: "acsch",
            value: x,
            domain: "x != 0",
        });
    }
    let u = 1.0 + x * x;
    Ok(Outer {
        val: (x.recip() + (x.powi(-2) + 1.0).sqrt()).ln(),
        ders: vec![
            -(x.abs() * u.sqrt()).recip(),
            x.signum() * (1.0 + 2.0 * x * x) / (x * x * u.powf(1.5)),
        ],
    })
}
