//! Solver errors.

use thiserror::Error;

/// Result of a solver call.
pub type MathResult<T> = Result<T, MathError>;

/// Why a solve stopped without an answer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// The iteration budget ran out.
    #[error("no convergence after {iterations} iterations (residual {residual:.2e})")]
    ConvergenceFailed {
        /// Iterations spent.
        iterations: u32,
        /// Residual or last step at exit.
        residual: f64,
    },

    /// The interval does not straddle a root.
    #[error("no sign change on [{a}, {b}]: f(a) = {fa:.2e}, f(b) = {fb:.2e}")]
    InvalidBracket {
        /// Lower end.
        a: f64,
        /// Upper end.
        b: f64,
        /// `f(a)`.
        fa: f64,
        /// `f(b)`.
        fb: f64,
    },

    /// A Newton step hit a stationary point.
    #[error("derivative too close to zero: {value:.2e}")]
    FlatDerivative {
        /// The derivative.
        value: f64,
    },

    /// The problem or an iterate is not usable.
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// What was wrong.
        reason: String,
    },
}

impl MathError {
    /// Creates a convergence failed error.
    #[must_use]
    pub fn convergence_failed(iterations: u32, residual: f64) -> Self {
        Self::ConvergenceFailed {
            iterations,
            residual,
        }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}
