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

//! Forward-mode automatic differentiation core.
//!
//! Values of type [`Ad`] carry their primal value together with a gradient
//! and a Hessian over a fixed set of seeded variables, and optionally a
//! Taylor-mode stack of higher-order derivatives for a single variable.
//! Derivatives propagate eagerly through arithmetic and through the
//! elementary-function rules; no runtime tape is kept.
//!
//! Variables are seeded through [`AdVec`], which owns the identity gradient
//! seed for one differentiation session. The chain-rule composition lives in
//! `engine`, the per-function derivative sequences in `rules`.

mod engine;
mod rules;
mod var;
mod vec;

pub use engine::AdError;
pub use var::Ad;
pub use vec::{hessian, jacobian, AdVec};
