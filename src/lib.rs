//! Forward-mode automatic differentiation with gradients, Hessians, and
//! Taylor-mode higher-order derivatives.
//!
//! ```
//! use adcst::AdVec;
//!
//! let vars = AdVec::new(&[5.0, 3.0]);
//! let f = vars.var(0) * vars.var(1);
//! assert_eq!(f.value(), 15.0);
//! assert_eq!(f.diff(0).unwrap(), 3.0);
//! assert_eq!(f.diff(1).unwrap(), 5.0);
//! ```
pub mod ast;
pub mod autodiff;
pub mod diagnostics;
pub mod eval;
pub(crate) mod linalg;
pub mod newton;
pub mod parser;

pub use autodiff::{hessian, jacobian, Ad, AdError, AdVec};
pub use newton::{minimize, NewtonError, NewtonOptions, NewtonResult};
