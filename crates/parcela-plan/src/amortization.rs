//! Level-installment (French table) amortization on business-day discount factors.

use parcela_math::solvers::SolverConfig;
use tracing::debug;

use crate::error::PlanResult;
use crate::index::{accumulated_index, InstallmentPoint};
use crate::iof::IofRates;
use crate::response::AmortizationEntry;
use crate::rounding::round_money;

/// Principal repaid at each point when `principal` is repaid by `installment`.
///
/// Interest of period `j` is the balance grown by the ratio of consecutive
/// discount factors.
pub(crate) fn amortizations(principal: f64, installment: f64, points: &[InstallmentPoint]) -> Vec<f64> {
    let mut balance = principal;
    let mut previous = 1.0;

    points
        .iter()
        .map(|point| {
            let growth = previous / point.discount_factor;
            previous = point.discount_factor;

            let interest = balance * (growth - 1.0);
            balance += interest - installment;
            installment - interest
        })
        .collect()
}

/// Rounded amounts of one installment option.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Financing {
    /// Financed amount before IOF.
    pub financed: f64,
    /// Financed amount grossed up by IOF, in cents.
    pub contract_amount: f64,
    /// IOF included in the contract.
    pub total_iof: f64,
    /// Level installment.
    pub installment_amount: f64,
    /// Sum of all installments.
    pub total_amount: f64,
    /// `total_amount - contract_amount`, unrounded.
    pub debit_service: f64,
    /// Sum of the discount factors of the option.
    pub accumulated_index: f64,
}

impl Financing {
    /// Solves the contract and installment of `financed` repaid over `points`.
    pub fn solve(
        financed: f64,
        points: &[InstallmentPoint],
        rates: &IofRates,
        solver: &SolverConfig,
    ) -> PlanResult<Self> {
        let accumulated_index = accumulated_index(points);
        let contract = rates.gross_up(financed, points, solver)?;

        let contract_amount = round_money(contract);
        let installment_amount = round_money(contract_amount / accumulated_index);
        let total_amount = round_money(installment_amount * points.len() as f64);

        let financing = Self {
            financed,
            contract_amount,
            total_iof: round_money(contract_amount - financed),
            installment_amount,
            total_amount,
            debit_service: total_amount - contract_amount,
            accumulated_index,
        };

        debug!(
            installments = points.len(),
            contract = financing.contract_amount,
            installment = financing.installment_amount,
            "option solved"
        );
        Ok(financing)
    }

    /// Present value of the rounded installments.
    pub fn paid_contract_amount(&self) -> f64 {
        round_money(self.installment_amount * self.accumulated_index)
    }

    /// Amortization table of the option, in cents.
    ///
    /// The last installment repays the remaining balance, so amortizations add
    /// up to the contract amount and the table closes at zero.
    pub fn schedule(&self, points: &[InstallmentPoint], rates: &IofRates) -> Vec<AmortizationEntry> {
        let mut balance = self.contract_amount;
        let mut previous = 1.0;
        let last = points.len();

        points
            .iter()
            .enumerate()
            .map(|(i, point)| {
                let growth = previous / point.discount_factor;
                previous = point.discount_factor;

                let interest = round_money(balance * (growth - 1.0));
                let (installment_amount, amortization) = if i + 1 == last {
                    (round_money(balance + interest), balance)
                } else {
                    let amortization = round_money(self.installment_amount - interest);
                    (self.installment_amount, amortization)
                };
                balance = round_money(balance - amortization);

                AmortizationEntry {
                    installment: point.number,
                    due_date: point.due_date,
                    accumulated_days: point.calendar_days,
                    business_days: point.business_days,
                    discount_factor: point.discount_factor,
                    installment_amount,
                    interest,
                    amortization,
                    balance,
                    iof: round_money(amortization * rates.rate_for(point.calendar_days)),
                }
            })
            .collect()
    }
}
