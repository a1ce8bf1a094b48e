//! Fixed-point iteration.

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult};

/// Iterates `x_{n+1} = g(x_n)` until `|x_{n+1} - x_n| < tolerance`.
///
/// Suited to contractions such as grossing a proportional tax up into the
/// amount it is levied on.
///
/// ```rust
/// use parcela_math::solvers::{fixed_point, SolverConfig};
///
/// // x = 100 + 1% of x
/// let result = fixed_point(|x| 100.0 + 0.01 * x, 100.0, &SolverConfig::default()).unwrap();
/// assert!((result.root - 100.0 / 0.99).abs() < 1e-9);
/// ```
pub fn fixed_point<G>(g: G, initial_guess: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    G: Fn(f64) -> f64,
{
    let mut x = initial_guess;

    for iteration in 0..config.max_iterations {
        let next = g(x);
        if !next.is_finite() {
            return Err(MathError::invalid_input("fixed-point iteration produced non-finite value"));
        }

        let step = (next - x).abs();
        x = next;

        if step < config.tolerance {
            return Ok(SolverResult {
                root: x,
                iterations: iteration + 1,
                residual: step,
            });
        }
    }

    Err(MathError::convergence_failed(
        config.max_iterations,
        (g(x) - x).abs(),
    ))
}
