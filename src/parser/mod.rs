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

//! Scalar expression parser.
//!
//! # Example
//! ```
//! use adcst::{eval, parser};
//! let node = parser::parse("2 + 3 * 4").unwrap();
//! let env = eval::Env::seed(&[], 2).unwrap();
//! assert_eq!(eval::eval(&node, &env).unwrap().value(), 14.0);
//! ```

use chumsky::prelude::*;

use crate::ast::{BinOp, Node, Span};
use crate::diagnostics::Diagnostic;

pub fn parser() -> impl Parser<char, Node, Error = Simple<char>> {
    let number = text::int(10)
        .then(just('.').ignore_then(text::digits(10)).or_not())
        .map_with_span(
            |(int, frac): (String, Option<String>), sp: std::ops::Range<usize>| {
                let mut digits = int;
                if let Some(frac) = frac {
                    digits.push('.');
                    digits.push_str(&frac);
                }
                Node::Num(digits.parse().unwrap(), Span::new(sp.start, sp.end))
            },
        )
        .padded();

    recursive(|expr| {
        let call = text::ident()
            .then(
                expr.clone()
                    .separated_by(just(',').padded())
                    .allow_trailing()
                    .delimited_by(just('(').padded(), just(')').padded()),
            )
            .map_with_span(|(callee, args), sp: std::ops::Range<usize>| Node::Call {
                callee,
                args,
                span: Span::new(sp.start, sp.end),
            });

        let var = text::ident().map_with_span(|name: String, sp: std::ops::Range<usize>| {
            Node::Var(name, Span::new(sp.start, sp.end))
        });

        let atom = choice((
            call,
            var,
            number,
            expr.delimited_by(just('(').padded(), just(')').padded()),
        ))
        .padded();

        // Unary minus binds looser than `^`, so -x^2 negates the square and
        // 2^-3 still parses.
        let unary = recursive(|unary: Recursive<'_, char, Node, Simple<char>>| {
            let power = atom
                .then(just('^').padded().ignore_then(unary.clone()).or_not())
                .map(|(base, exp)| match exp {
                    Some(exp) => {
                        let span = Span::new(base.span().start(), exp.span().end());
                        Node::Binary {
                            op: BinOp::Pow,
                            left: Box::new(base),
                            right: Box::new(exp),
                            span,
                        }
                    }
                    None => base,
                });

            just('-')
                .map_with_span(|_, sp: std::ops::Range<usize>| sp.start)
                .padded()
                .then(unary)
                .map(|(start, inner)| {
                    let span = Span::new(start, inner.span().end());
                    Node::Neg(Box::new(inner), span)
                })
                .or(power)
        });

        let product = unary
            .clone()
            .then(
                choice((just('*').to(BinOp::Mul), just('/').to(BinOp::Div)))
                    .padded()
                    .then(unary)
                    .repeated(),
            )
            .foldl(|left, (op, right)| {
                let span = Span::new(left.span().start(), right.span().end());
                Node::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                    span,
                }
            });

        product
            .clone()
            .then(
                choice((just('+').to(BinOp::Add), just('-').to(BinOp::Sub)))
                    .padded()
                    .then(product)
                    .repeated(),
            )
            .foldl(|left, (op, right)| {
                let span = Span::new(left.span().start(), right.span().end());
                Node::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                    span,
                }
            })
    })
}

pub fn parse(input: &str) -> Result<Node, Vec<Simple<char>>> {
    parser().then_ignore(end()).parse(input)
}

/// Parse with pretty diagnostics instead of raw chumsky errors.
pub fn parse_with_diagnostics(input: &str) -> Result<Node, Vec<Diagnostic>> {
    parse(input).map_err(|errs| {
        errs.into_iter()
            .map(|e| Diagnostic::from_chumsky(input, e))
            .collect()
    })
}
