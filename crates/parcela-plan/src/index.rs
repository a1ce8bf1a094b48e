//! Daily index model.
//!
//! Converts a monthly rate into a rate per business day and discounts every
//! due date of a plan by the business days separating it from the
//! disbursement.

use parcela_core::daycounts::{Act365Fixed, Business252, DayCount};
use parcela_core::Date;

use crate::disbursement::CalendarEngine;
use crate::error::{PlanError, PlanResult};
use crate::rounding::round_to;

/// Compounding rate per business day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyIndex {
    daily_rate: f64,
}

impl DailyIndex {
    /// Daily equivalent of a monthly rate over `business_days_per_month`,
    /// rounded to `precision` decimal places.
    pub fn from_monthly(monthly_rate: f64, business_days_per_month: u32, precision: u32) -> Self {
        let exact = (1.0 + monthly_rate).powf(1.0 / f64::from(business_days_per_month)) - 1.0;
        Self {
            daily_rate: round_to(exact, precision),
        }
    }

    /// The rate per business day.
    pub fn daily_rate(&self) -> f64 {
        self.daily_rate
    }

    /// Present value of one unit due `business_days` from now.
    pub fn discount_factor(&self, business_days: i64) -> f64 {
        1.0 / (1.0 + self.daily_rate).powf(business_days as f64)
    }
}

/// One due date of a plan, measured from the disbursement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InstallmentPoint {
    /// Installment number, from 1.
    pub number: u32,
    /// Business-day adjusted due date.
    pub due_date: Date,
    /// Calendar days from the disbursement.
    pub calendar_days: i64,
    /// Business days in `(disbursement, due_date]`.
    pub business_days: i64,
    /// Discount factor of the due date.
    pub discount_factor: f64,
}

/// Due dates of a request with their discount factors.
///
/// Every option `k` of a plan uses the first `k` points.
#[derive(Debug, Clone, PartialEq)]
pub struct InstallmentGrid {
    disbursement: Date,
    points: Vec<InstallmentPoint>,
}

impl InstallmentGrid {
    /// Lays out `installments` due dates from `first_payment` and discounts them
    /// to `disbursement`.
    pub fn build(
        engine: &CalendarEngine,
        index: &DailyIndex,
        disbursement: Date,
        first_payment: Date,
        installments: u32,
    ) -> PlanResult<Self> {
        let bus252 = Business252::new(engine.calendar());
        let mut points = Vec::with_capacity(installments as usize);

        for number in 1..=installments {
            let due_date = engine.due_date(first_payment, number)?;
            if due_date <= disbursement {
                return Err(PlanError::invalid_params(format!(
                    "due date {due_date} of installment {number} is not after disbursement {disbursement}"
                )));
            }

            let business_days = bus252.day_count(disbursement, due_date);
            points.push(InstallmentPoint {
                number,
                due_date,
                calendar_days: Act365Fixed.day_count(disbursement, due_date),
                business_days,
                discount_factor: index.discount_factor(business_days),
            });
        }

        Ok(Self {
            disbursement,
            points,
        })
    }

    /// The disbursement every point is measured from.
    pub fn disbursement(&self) -> Date {
        self.disbursement
    }

    /// All points, ascending.
    pub fn points(&self) -> &[InstallmentPoint] {
        &self.points
    }

    /// Number of due dates.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when the grid has no due dates.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The first `installments` points.
    pub fn option(&self, installments: u32) -> PlanResult<&[InstallmentPoint]> {
        self.points.get(..installments as usize).ok_or_else(|| {
            PlanError::invalid_params(format!(
                "option {installments} exceeds the {} installments of the plan",
                self.points.len()
            ))
        })
    }
}

/// Sum of the discount factors of `points`.
pub fn accumulated_index(points: &[InstallmentPoint]) -> f64 {
    points.iter().map(|p| p.discount_factor).sum()
}
