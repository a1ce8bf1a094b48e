//! Down-payment candidates.
//!
//! A down payment of `requested_amount` may be split into up to
//! `installments` monthly parts. Each split shifts the financed plan: its
//! disbursement follows the last down-payment date by a settlement delay and
//! its first installment falls one month later.

use tracing::debug;

use crate::error::{PlanError, PlanResult};
use crate::params::{DownPaymentParams, Params};

/// One admissible split of the down payment.
#[derive(Debug, Clone, PartialEq)]
pub struct DownPaymentCandidate {
    /// Number of down-payment installments.
    pub quantity: u32,
    /// Amount of each down-payment installment, unrounded.
    pub installment_amount: f64,
    /// The financed plan shifted after the last down-payment installment.
    pub params: Params,
}

/// Splits whose installment reaches the down-payment minimum, ascending by count.
pub fn candidates(
    request: &DownPaymentParams,
    settlement_days: i64,
) -> PlanResult<Vec<DownPaymentCandidate>> {
    request.validate()?;

    let mut accepted = Vec::new();
    for quantity in 1..=request.installments {
        let installment_amount = request.requested_amount / f64::from(quantity);
        if installment_amount < request.min_installment_amount {
            debug!(
                quantity,
                installment_amount,
                minimum = request.min_installment_amount,
                "down-payment split below minimum"
            );
            continue;
        }

        accepted.push(DownPaymentCandidate {
            quantity,
            installment_amount,
            params: shifted_params(request, quantity, settlement_days)?,
        });
    }

    if accepted.is_empty() {
        return Err(PlanError::invalid_params(format!(
            "no down-payment split of {} reaches the minimum installment of {}",
            request.requested_amount, request.min_installment_amount
        )));
    }
    Ok(accepted)
}

fn shifted_params(
    request: &DownPaymentParams,
    quantity: u32,
    settlement_days: i64,
) -> PlanResult<Params> {
    let first = request.first_payment_date;
    let months = i32::try_from(quantity)
        .map_err(|_| PlanError::invalid_params("down payment installments out of range"))?;
    let last_down_payment = first.add_months(months - 1)?;

    Ok(Params {
        first_payment_date: first.add_months(months)?,
        requested_date: last_down_payment.add_days(settlement_days)?,
        ..request.params.clone()
    })
}
