//! Input records of the calculators.

use parcela_core::Date;
use serde::{Deserialize, Serialize};

use crate::error::{PlanError, PlanResult};

/// Basis points meaning "the merchant bears the whole debit service".
pub const FULL_DEBIT_SERVICE_BPS: u16 = 10_000;

/// Loan request for a payment plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Params {
    /// Principal requested by the customer.
    pub requested_amount: f64,
    /// Nominal date of the first installment, before business-day adjustment.
    pub first_payment_date: Date,
    /// Date the customer asked for the money.
    pub requested_date: Date,
    /// Number of installment options to compute (`1..=installments`).
    pub installments: u32,
    /// Share of the debit service borne by the merchant, in basis points.
    #[serde(default)]
    pub debit_service_percentage: u16,
    /// Merchant discount rate as a fraction of the principal.
    #[serde(default)]
    pub mdr: f64,
    /// Origination fee as a fraction of the principal, financed into the contract.
    #[serde(default)]
    pub tac_percentage: f64,
    /// Flat IOF rate.
    #[serde(default)]
    pub iof_overall: f64,
    /// Daily IOF rate.
    #[serde(default)]
    pub iof_percentage: f64,
    /// Monthly interest rate.
    pub interest_rate: f64,
    /// Smallest acceptable installment amount.
    #[serde(default)]
    pub min_installment_amount: f64,
    /// Largest acceptable total repaid.
    pub max_total_amount: f64,
    /// Roll the disbursement forward to a business day.
    #[serde(default)]
    pub disbursement_only_on_business_days: bool,
}

impl Params {
    /// Checks ranges that do not depend on the calendar.
    pub fn validate(&self) -> PlanResult<()> {
        ensure(
            self.requested_amount.is_finite() && self.requested_amount > 0.0,
            "requested_amount must be positive",
        )?;
        ensure(self.installments >= 1, "installments must be at least 1")?;
        ensure(
            self.debit_service_percentage <= FULL_DEBIT_SERVICE_BPS,
            "debit_service_percentage cannot exceed 10000 basis points",
        )?;
        ensure(
            self.mdr.is_finite() && (0.0..1.0).contains(&self.mdr),
            "mdr must be in [0, 1)",
        )?;

        for (name, value) in [
            ("tac_percentage", self.tac_percentage),
            ("iof_overall", self.iof_overall),
            ("iof_percentage", self.iof_percentage),
            ("interest_rate", self.interest_rate),
            ("min_installment_amount", self.min_installment_amount),
        ] {
            ensure(
                value.is_finite() && value >= 0.0,
                &format!("{name} cannot be negative"),
            )?;
        }

        ensure(
            self.max_total_amount.is_finite() && self.max_total_amount > 0.0,
            "max_total_amount must be positive",
        )
    }
}

/// Down-payment request wrapping the financed plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownPaymentParams {
    /// The financed plan.
    pub params: Params,
    /// Total paid upfront across the down-payment installments.
    pub requested_amount: f64,
    /// Smallest acceptable down-payment installment.
    #[serde(default)]
    pub min_installment_amount: f64,
    /// Date of the first down-payment installment.
    pub first_payment_date: Date,
    /// Largest number of down-payment installments to try.
    pub installments: u32,
}

impl DownPaymentParams {
    /// Checks the down-payment ranges and the wrapped plan.
    pub fn validate(&self) -> PlanResult<()> {
        ensure(
            self.requested_amount.is_finite() && self.requested_amount > 0.0,
            "down payment requested_amount must be positive",
        )?;
        ensure(
            self.installments >= 1,
            "down payment installments must be at least 1",
        )?;
        ensure(
            self.min_installment_amount.is_finite() && self.min_installment_amount >= 0.0,
            "down payment min_installment_amount cannot be negative",
        )?;
        self.params.validate()
    }
}

fn ensure(condition: bool, reason: &str) -> PlanResult<()> {
    if condition {
        Ok(())
    } else {
        Err(PlanError::invalid_params(reason))
    }
}
