//! Effective interest rate (EIR) and total effective cost (CET).
//!
//! Both are internal rates of return of the installments paid by the
//! customer, compounded daily on calendar days. The EIR discounts them
//! against the contract amount; the CET against the amount the customer
//! asked for, so IOF, TAC and the debit service all count as cost.

use parcela_core::daycounts::Act365Fixed;
use parcela_math::solvers::{hybrid, SolverConfig};
use tracing::warn;

use crate::error::{PlanError, PlanResult};
use crate::index::InstallmentPoint;
use crate::rounding::{round_monthly_rate, round_yearly_rate};

/// Daily rates are searched in this interval.
const DAILY_RATE_BOUNDS: (f64, f64) = (-0.5, 1.0);

/// Starting guess of the daily rate (about 3% a month).
const DAILY_RATE_GUESS: f64 = 0.001;

const MONTHS_PER_YEAR: f64 = 12.0;

/// An effective rate in its daily, yearly and monthly forms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectiveRate {
    /// Daily IRR, unrounded.
    pub daily: f64,
    /// `(1 + daily)^365 - 1`, to 6 decimal places.
    pub yearly: f64,
    /// Monthly equivalent of the unrounded yearly rate, to 4 decimal places.
    pub monthly: f64,
}

impl EffectiveRate {
    /// Annualizes and monthlyizes a daily rate.
    pub fn from_daily(daily: f64) -> Self {
        let yearly = (1.0 + daily).powf(Act365Fixed::BASIS as f64) - 1.0;
        let monthly = (1.0 + yearly).powf(1.0 / MONTHS_PER_YEAR) - 1.0;
        Self {
            daily,
            yearly: round_yearly_rate(yearly),
            monthly: round_monthly_rate(monthly),
        }
    }

    /// Effective rate of receiving `base` at disbursement and paying
    /// `installment` at every point.
    pub fn solve(
        base: f64,
        installment: f64,
        points: &[InstallmentPoint],
        solver: &SolverConfig,
    ) -> PlanResult<Self> {
        let flows: Vec<(f64, f64)> = points
            .iter()
            .map(|p| (installment, p.calendar_days as f64))
            .collect();
        daily_irr(base, &flows, solver).map(Self::from_daily)
    }
}

/// Daily rate `d` with `sum(amount / (1 + d)^days) = base`.
pub fn daily_irr(base: f64, flows: &[(f64, f64)], solver: &SolverConfig) -> PlanResult<f64> {
    if flows.is_empty() || base.is_nan() || base <= 0.0 {
        return Err(PlanError::calculation(
            "effective rate needs a positive base and at least one flow",
        ));
    }

    let npv = |d: f64| {
        flows
            .iter()
            .map(|&(amount, days)| amount / (1.0 + d).powf(days))
            .sum::<f64>()
            - base
    };
    let dnpv = |d: f64| {
        flows
            .iter()
            .map(|&(amount, days)| -days * amount / (1.0 + d).powf(days + 1.0))
            .sum::<f64>()
    };

    let result = hybrid(npv, dnpv, DAILY_RATE_GUESS, Some(DAILY_RATE_BOUNDS), solver).map_err(|err| {
        warn!(base, flows = flows.len(), error = %err, "effective rate did not converge");
        err
    })?;
    Ok(result.root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::DailyIndex;
    use approx::assert_relative_eq;
    use parcela_core::Date;

    fn reference_points() -> Vec<InstallmentPoint> {
        let index = DailyIndex::from_monthly(0.0235, 21, 10);
        let start = Date::from_ymd(2025, 4, 7).unwrap();
        [(28, 17), (57, 38), (87, 59), (119, 81)]
            .iter()
            .zip(1..)
            .map(|(&(calendar_days, business_days), number)| InstallmentPoint {
                number,
                due_date: start.add_days(calendar_days).unwrap(),
                calendar_days,
                business_days,
                discount_factor: index.discount_factor(business_days),
            })
            .collect()
    }

    #[test]
    fn test_single_flow_has_closed_form() {
        let daily = daily_irr(1000.0, &[(1100.0, 30.0)], &SolverConfig::default()).unwrap();
        assert_relative_eq!(daily, 1.1f64.powf(1.0 / 30.0) - 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_cost_loan() {
        let daily = daily_irr(1000.0, &[(500.0, 30.0), (500.0, 60.0)], &SolverConfig::default()).unwrap();
        assert!(daily.abs() < 1e-12);
        assert_eq!(EffectiveRate::from_daily(daily).monthly, 0.0);
    }

    #[test]
    fn test_rejects_degenerate_inputs() {
        assert!(daily_irr(1000.0, &[], &SolverConfig::default()).is_err());
        assert!(daily_irr(0.0, &[(10.0, 1.0)], &SolverConfig::default()).is_err());
    }

    #[test]
    fn test_reference_total_effective_cost() {
        let points = reference_points();
        let tec = EffectiveRate::solve(7800.0, 2077.73, &points, &SolverConfig::default()).unwrap();
        assert_relative_eq!(tec.yearly, 0.377876, epsilon = 2e-6);
        assert_relative_eq!(tec.monthly, 0.0271, epsilon = 1e-9);
    }

    #[test]
    fn test_reference_effective_interest_rate() {
        let points = reference_points();
        let eir = EffectiveRate::solve(7847.84, 7996.8, &points[..1], &SolverConfig::default()).unwrap();
        assert_relative_eq!(eir.yearly, 0.277782, epsilon = 1e-4);
        assert_relative_eq!(eir.monthly, 0.0206, epsilon = 1e-9);
    }

    #[test]
    fn test_monthly_uses_unrounded_yearly() {
        let rate = EffectiveRate::from_daily(0.0008);
        let yearly = 1.0008f64.powf(365.0) - 1.0;
        assert_relative_eq!(rate.yearly, (yearly * 1e6).round() / 1e6);
        assert_relative_eq!(
            rate.monthly,
            (((1.0 + yearly).powf(1.0 / 12.0) - 1.0) * 1e4).round() / 1e4
        );
    }
}
