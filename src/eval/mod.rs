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

//! Expression evaluation against seeded variables.
//!
//! Evaluation runs in two steps, mirroring the front-end pipeline: `compile`
//! resolves names and arities once and produces a [`Program`]; running the
//! program can then only fail on math-domain errors, which lets callers like
//! the Newton solver re-evaluate at fresh points without re-checking names.

use crate::ast::{BinOp, Node, Span};
use crate::autodiff::{Ad, AdError, AdVec};

/// Named seeded variables for one evaluation.
pub struct Env {
    names: Vec<String>,
    vars: AdVec,
}

impl Env {
    /// Seed one variable per `(name, value)` binding.
    pub fn seed(bindings: &[(String, f64)], order: usize) -> Result<Env, AdError> {
        let names = bindings.iter().map(|(n, _)| n.clone()).collect();
        let values: Vec<f64> = bindings.iter().map(|&(_, v)| v).collect();
        Ok(Env {
            names,
            vars: AdVec::with_order(&values, order)?,
        })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn vars(&self) -> &AdVec {
        &self.vars
    }
}

/// Errors from name resolution and evaluation.
#[derive(Debug, thiserror::Error)]
pub enum EvalError {
    #[error("unknown variable `{name}`")]
    UnknownVariable { name: String, span: Span },
    #[error("unknown function `{name}`")]
    UnknownFunction { name: String, span: Span },
    #[error("`{name}` expects {expected} argument(s), got {got}")]
    BadArity {
        name: String,
        expected: usize,
        got: usize,
        span: Span,
    },
    #[error(transparent)]
    Math(#[from] AdError),
}

#[derive(Debug, Clone, Copy)]
enum Func {
    Abs,
    Exp,
    Ln,
    Sqrt,
    Sin,
    Cos,
    Tan,
    Cot,
    Sec,
    Csc,
    Sinh,
    Cosh,
    Tanh,
    Coth,
    Sech,
    Csch,
    Asin,
    Acos,
    Atan,
    Acot,
    Asec,
    Acsc,
    Asinh,
    Acosh,
    Atanh,
    Acoth,
    Asech,
    Acsch,
}

impl Func {
    fn resolve(name: &str) -> Option<Func> {
        Some(match name {
            "abs" => Func::Abs,
            "exp" => Func::Exp,
            "ln" | "log" => Func::Ln,
            "sqrt" => Func::Sqrt,
            "sin" => Func::Sin,
            "cos" => Func::Cos,
            "tan" => Func::Tan,
            "cot" => Func::Cot,
            "sec" => Func::Sec,
            "csc" => Func::Csc,
            "sinh" => Func::Sinh,
            "cosh" => Func::Cosh,
            "tanh" => Func::Tanh,
            "coth" => Func::Coth,
            "sech" => Func::Sech,
            "csch" => Func::Csch,
            "asin" => Func::Asin,
            "acos" => Func::Acos,
            "atan" => Func::Atan,
            "acot" => Func::Acot,
            "asec" => Func::Asec,
            "acsc" => Func::Acsc,
            "asinh" => Func::Asinh,
            "acosh" => Func::Acosh,
            "atanh" => Func::Atanh,
            "acoth" => Func::Acoth,
            "asech" => Func::Asech,
            "acsch" => Func::Acsch,
            _ => return None,
        })
    }

    fn apply(self, x: &Ad) -> Result<Ad, AdError> {
        match self {
            Func::Abs => x.abs(),
            Func::Exp => Ok(x.exp()),
            Func::Ln => Ok(x.ln()),
            Func::Sqrt => Ok(x.sqrt()),
            Func::Sin => Ok(x.sin()),
            Func::Cos => Ok(x.cos()),
            Func::Tan => Ok(x.tan()),
            Func::Cot => Ok(x.cot()),
            Func::Sec => Ok(x.sec()),
            Func::Csc => Ok(x.csc()),
            Func::Sinh => Ok(x.sinh()),
            Func::Cosh => Ok(x.cosh()),
            Func::Tanh => Ok(x.tanh()),
            Func::Coth => Ok(x.coth()),
            Func::Sech => Ok(x.sech()),
            Func::Csch => Ok(x.csch()),
            Func::Asin => x.asin(),
            Func::Acos => x.acos(),
            Func::Atan => x.atan(),
            Func::Acot => x.acot(),
            Func::Asec => x.asec(),
            Func::Acsc => x.acsc(),
            Func::Asinh => x.asinh(),
            Func::Acosh => x.acosh(),
            Func::Atanh => x.atanh(),
            Func::Acoth => x.acoth(),
            Func::Asech => x.asech(),
            Func::Acsch => x.acsch(),
        }
    }
}

#[derive(Debug, Clone)]
enum Expr {
    Num(f64),
    Var(usize),
    Neg(Box<Expr>),
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Pow(Box<Expr>, Box<Expr>),
    Call(Func, Box<Expr>),
}

/// A name-resolved expression ready to evaluate against seeded variables.
#[derive(Debug, Clone)]
pub struct Program {
    root: Expr,
    arity: usize,
}

/// Resolve variable names and function calls against the given variable
/// order.
pub fn compile(node: &Node, names: &[String]) -> Result<Program, EvalError> {
    let root = resolve(node, names)?;
    Ok(Program {
        root,
        arity: names.len(),
    })
}

fn resolve(node: &Node, names: &[String]) -> Result<Expr, EvalError> {
    match node {
        Node::Num(v, _) => Ok(Expr::Num(*v)),
        Node::Var(name, span) => names
            .iter()
            .position(|n| n == name)
            .map(Expr::Var)
            .ok_or_else(|| EvalError::UnknownVariable {
                name: name.clone(),
                span: *span,
            }),
        Node::Neg(inner, _) => Ok(Expr::Neg(Box::new(resolve(inner, names)?))),
        Node::Binary {
            op, left, right, ..
        } => {
            let left = Box::new(resolve(left, names)?);
            let right = Box::new(resolve(right, names)?);
            if *op == BinOp::Pow {
                Ok(Expr::Pow(left, right))
            } else {
                Ok(Expr::Binary {
                    op: *op,
                    left,
                    right,
                })
            }
        }
        Node::Call { callee, args, span } => {
            // `pow` is the one two-argument form; everything else is unary.
            if callee == "pow" {
                if args.len() != 2 {
                    return Err(EvalError::BadArity {
                        name: callee.clone(),
                        expected: 2,
                        got: args.len(),
                        span: *span,
                    });
                }
                let base = Box::new(resolve(&args[0], names)?);
                let exponent = Box::new(resolve(&args[1], names)?);
                return Ok(Expr::Pow(base, exponent));
            }
            let func = Func::resolve(callee).ok_or_else(|| EvalError::UnknownFunction {
                name: callee.clone(),
                span: *span,
            })?;
            if args.len() != 1 {
                return Err(EvalError::BadArity {
                    name: callee.clone(),
                    expected: 1,
                    got: args.len(),
                    span: *span,
                });
            }
            Ok(Expr::Call(func, Box::new(resolve(&args[0], names)?)))
        }
    }
}

impl Program {
    /// Evaluate against one seeded variable per resolved name, in order.
    pub fn eval(&self, vars: &[Ad]) -> Result<Ad, AdError> {
        if vars.len() != self.arity {
            return Err(AdError::SizeMismatch {
                a: self.arity,
                b: vars.len(),
            });
        }
        run(&self.root, vars)
    }
}

fn run(expr: &Expr, vars: &[Ad]) -> Result<Ad, AdError> {
    match expr {
        Expr::Num(v) => Ok(match vars.first() {
            Some(template) => Ad::constant_like(*v, template),
            None => Ad::constant(*v, 0),
        }),
        Expr::Var(index) => Ok(vars[*index].clone()),
        Expr::Neg(inner) => Ok(-run(inner, vars)?),
        Expr::Binary { op, left, right } => {
            let l = run(left, vars)?;
            let r = run(right, vars)?;
            Ok(match op {
                BinOp::Add => l + r,
                BinOp::Sub => l - r,
                BinOp::Mul => l * r,
                BinOp::Div => l / r,
                BinOp::Pow => unreachable!("pow is resolved to Expr::Pow"),
            })
        }
        Expr::Pow(base, exponent) => {
            let base = run(base, vars)?;
            let exponent = run(exponent, vars)?;
            base.pow(&exponent)
        }
        Expr::Call(func, arg) => func.apply(&run(arg, vars)?),
    }
}

/// One-shot convenience: resolve and evaluate in a single call.
pub fn eval(node: &Node, env: &Env) -> Result<Ad, EvalError> {
    let program = compile(node, env.names())?;
    Ok(program.eval(env.vars().vars())?)
}
