//! IOF (financial transactions tax) on consumer credit.
//!
//! IOF is levied on every amortization: a flat share plus a daily share
//! accrued over the calendar days the principal stays outstanding, capped at
//! one year. The tax is financed, so the contract amount must be grossed up
//! until it covers the IOF computed on itself.

use parcela_math::solvers::{fixed_point, SolverConfig};
use tracing::{debug, warn};

use crate::amortization::amortizations;
use crate::error::PlanResult;
use crate::index::{accumulated_index, InstallmentPoint};

/// IOF rates of a request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IofRates {
    /// Flat rate on each amortization.
    pub overall: f64,
    /// Rate per calendar day outstanding.
    pub daily: f64,
    /// Days beyond which the daily rate stops accruing.
    pub daily_cap_days: i64,
}

impl IofRates {
    /// Creates the rate set.
    pub fn new(overall: f64, daily: f64, daily_cap_days: i64) -> Self {
        Self {
            overall,
            daily,
            daily_cap_days,
        }
    }

    /// Combined rate on principal repaid `calendar_days` after disbursement.
    pub fn rate_for(&self, calendar_days: i64) -> f64 {
        self.overall + self.daily * calendar_days.min(self.daily_cap_days) as f64
    }

    /// IOF due on a contract of `contract` amortized in level installments
    /// over `points`.
    pub fn levied_on(&self, contract: f64, points: &[InstallmentPoint]) -> f64 {
        let installment = contract / accumulated_index(points);
        amortizations(contract, installment, points)
            .iter()
            .zip(points)
            .map(|(amortization, point)| amortization * self.rate_for(point.calendar_days))
            .sum()
    }

    /// Contract amount `C` solving `C = financed + IOF(C)`.
    pub fn gross_up(
        &self,
        financed: f64,
        points: &[InstallmentPoint],
        solver: &SolverConfig,
    ) -> PlanResult<f64> {
        let result = fixed_point(|contract| financed + self.levied_on(contract, points), financed, solver)
            .map_err(|err| {
                warn!(financed, installments = points.len(), error = %err, "IOF gross-up did not converge");
                err
            })?;

        debug!(
            financed,
            contract = result.root,
            iterations = result.iterations,
            "IOF grossed up"
        );
        Ok(result.root)
    }
}
