//! Hybrid root-finding algorithm.
//!
//! Newton-Raphson for speed, bisection as the safety net.

use crate::error::{MathError, MathResult};
use crate::solvers::{bisection, SolverConfig, SolverResult};

/// Newton steps tried before falling back to bisection.
const NEWTON_BUDGET: u32 = 20;

/// Divergent Newton steps tolerated in a row.
const MAX_DIVERGENCE: u32 = 3;

/// Hybrid root-finding algorithm.
///
/// Runs a monitored Newton-Raphson from `initial_guess`. If Newton diverges,
/// hits a flat derivative or leaves the finite range, the root is bracketed
/// with bisection on `bounds`, or on a bracket found by expanding around the
/// initial guess when no bounds are given.
pub fn hybrid<F, DF>(
    f: F,
    df: DF,
    initial_guess: f64,
    bounds: Option<(f64, f64)>,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    if let Ok(result) = newton_with_monitoring(&f, &df, initial_guess, bounds, config) {
        return Ok(result);
    }

    let (a, b) = match bounds {
        Some(bounds) => bounds,
        None => find_bracket(&f, initial_guess).ok_or_else(|| {
            MathError::invalid_input(
                "Newton-Raphson failed and no bracketing interval could be found",
            )
        })?,
    };

    // Bisection needs more halvings than Newton needs steps
    let bisection_config = config.with_max_iterations(config.max_iterations.max(200));
    bisection(&f, a, b, &bisection_config)
}

fn newton_with_monitoring<F, DF>(
    f: &F,
    df: &DF,
    initial_guess: f64,
    bounds: Option<(f64, f64)>,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    let mut x = initial_guess;
    let mut prev_residual = f64::MAX;
    let mut divergence_count = 0;
    let budget = config.max_iterations.min(NEWTON_BUDGET);

    for iteration in 0..budget {
        let fx = f(x);
        let residual = fx.abs();

        if residual < config.tolerance {
            return Ok(SolverResult {
                root: x,
                iterations: iteration,
                residual: fx,
            });
        }

        if residual > prev_residual * 2.0 {
            divergence_count += 1;
            if divergence_count >= MAX_DIVERGENCE {
                return Err(MathError::invalid_input("Newton-Raphson diverging"));
            }
        } else {
            divergence_count = 0;
        }
        prev_residual = residual;

        let dfx = df(x);
        if dfx.abs() < 1e-15 {
            return Err(MathError::FlatDerivative { value: dfx });
        }

        let step = fx / dfx;
        x -= step;

        if !x.is_finite() {
            return Err(MathError::invalid_input("Newton produced non-finite value"));
        }
        if let Some((a, b)) = bounds {
            if x < a.min(b) || x > a.max(b) {
                return Err(MathError::invalid_input("Newton left the bracketing interval"));
            }
        }

        if step.abs() < config.tolerance {
            return Ok(SolverResult {
                root: x,
                iterations: iteration + 1,
                residual: f(x),
            });
        }
    }

    Err(MathError::convergence_failed(budget, f(x).abs()))
}

/// Expands symmetrically around the initial guess until the sign changes.
fn find_bracket<F>(f: &F, initial_guess: f64) -> Option<(f64, f64)>
where
    F: Fn(f64) -> f64,
{
    let f_init = f(initial_guess);
    let mut delta = 0.1;

    for _ in 0..40 {
        let left = initial_guess - delta;
        let right = initial_guess + delta;

        if f(left) * f_init < 0.0 {
            return Some((left, initial_guess));
        }
        if f(right) * f_init < 0.0 {
            return Some((initial_guess, right));
        }

        delta *= 2.0;
    }

    None
}
