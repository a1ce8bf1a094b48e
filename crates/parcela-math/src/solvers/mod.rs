//! Root-finding and fixed-point algorithms.
//!
//! - [`bisection`]: slow but guaranteed inside a sign-changing bracket
//! - [`hybrid`]: Newton-Raphson with a bisection fallback
//! - [`fixed_point`]: iterates `x = g(x)` until successive values agree
//!
//! # Example: Daily IRR
//!
//! ```rust
//! use parcela_math::solvers::{hybrid, SolverConfig};
//!
//! // 1000 borrowed, 1100 repaid after 30 days
//! let npv = |d: f64| 1100.0 / (1.0 + d).powi(30) - 1000.0;
//! let dnpv = |d: f64| -30.0 * 1100.0 / (1.0 + d).powi(31);
//!
//! let result = hybrid(npv, dnpv, 0.0, Some((-0.5, 1.0)), &SolverConfig::default()).unwrap();
//! assert!((result.root - (1.1f64.powf(1.0 / 30.0) - 1.0)).abs() < 1e-10);
//! ```

mod bisection;
mod fixed_point;
mod hybrid;

pub use bisection::bisection;
pub use fixed_point::fixed_point;
pub use hybrid::hybrid;

/// Default tolerance for solvers.
pub const DEFAULT_TOLERANCE: f64 = 1e-12;

/// Default maximum iterations for solvers.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Configuration for solvers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Tolerance for convergence.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Result of a successful solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverResult {
    /// The root (or fixed point) found.
    pub root: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Function value at the root, or the last step size for fixed points.
    pub residual: f64,
}
