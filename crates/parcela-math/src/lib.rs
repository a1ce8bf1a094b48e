//! # Parcela Math
//!
//! Numerical solvers used by the payment-plan engine:
//!
//! - **Root finding**: Newton-Raphson, bisection and a hybrid of both, used to
//!   solve internal rates of return
//! - **Fixed point**: bounded fixed-point iteration, used to gross taxes up
//!   into a financed amount

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]

pub mod error;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::solvers::{
        bisection, fixed_point, hybrid, SolverConfig, SolverResult,
    };
}

pub use error::{MathError, MathResult};
