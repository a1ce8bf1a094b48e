//! Output records of the calculators.

use parcela_core::Date;
use serde::{Deserialize, Serialize};

/// One installment option of a payment plan.
///
/// Row `k` of a plan describes repaying the request in `k` installments, the
/// last of which falls on `due_date`. Monetary amounts are in currency units
/// rounded to cents; `debit_service` and
/// `calculation_basis_for_effective_interest_rate` are derived from rounded
/// amounts and keep their floating-point residue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Number of installments of this option.
    pub installment: u32,
    /// Due date of the last installment.
    pub due_date: Date,
    /// Date the principal is released.
    pub disbursement_date: Date,
    /// Calendar days from disbursement to `due_date`.
    pub accumulated_days: i64,
    /// Discount factor of `due_date`.
    pub days_index: f64,
    /// Sum of the discount factors of installments `1..=installment`.
    pub accumulated_days_index: f64,
    /// Monthly interest rate of the request.
    pub interest_rate: f64,
    /// Installment amount.
    pub installment_amount: f64,
    /// Installment amount had the TAC not been financed (0 without TAC).
    pub installment_amount_without_tac: f64,
    /// Sum of all installments.
    pub total_amount: f64,
    /// Interest and financed taxes: total repaid minus contract amount.
    pub debit_service: f64,
    /// Part of the debit service paid by the customer.
    pub customer_debit_service_amount: f64,
    /// Installment amount paid by the customer.
    pub customer_amount: f64,
    /// Principal plus customer debit service, per installment.
    pub calculation_basis_for_effective_interest_rate: f64,
    /// Part of the debit service borne by the merchant.
    pub merchant_debit_service_amount: f64,
    /// MDR plus merchant debit service.
    pub merchant_total_amount: f64,
    /// Amount credited to the merchant.
    pub settled_to_merchant: f64,
    /// Merchant discount.
    pub mdr_amount: f64,
    /// Monthly effective interest rate (EIR).
    pub effective_interest_rate: f64,
    /// Monthly total effective cost (CET).
    pub total_effective_cost: f64,
    /// Yearly effective interest rate.
    pub eir_yearly: f64,
    /// Yearly total effective cost.
    pub tec_yearly: f64,
    /// Monthly effective interest rate.
    pub eir_monthly: f64,
    /// Monthly total effective cost.
    pub tec_monthly: f64,
    /// IOF financed into the contract.
    pub total_iof: f64,
    /// Financed amount: principal, TAC and IOF.
    pub contract_amount: f64,
    /// Contract amount had the TAC not been financed (0 without TAC).
    pub contract_amount_without_tac: f64,
    /// Origination fee.
    pub tac_amount: f64,
    /// Daily IOF rate.
    pub iof_percentage: f64,
    /// Flat IOF rate.
    pub overall_iof: f64,
    /// Principal implied by the rounded installments, net of IOF and TAC.
    pub pre_disbursement_amount: f64,
    /// IOF implied by the rounded installments.
    pub paid_total_iof: f64,
    /// Present value of the rounded installments.
    pub paid_contract_amount: f64,
}

/// One candidate split of a down payment and the financed plan that follows it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownPaymentResponse {
    /// Amount of each down-payment installment.
    pub installment_amount: f64,
    /// Total paid upfront.
    pub total_amount: f64,
    /// Number of down-payment installments.
    pub installment_quantity: u32,
    /// Date of the first down-payment installment.
    pub first_payment_date: Date,
    /// Plan of the financed amount under this candidate.
    pub plans: Vec<Response>,
}

/// One installment of the amortization table of a chosen option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationEntry {
    /// Installment number, from 1.
    pub installment: u32,
    /// Due date.
    pub due_date: Date,
    /// Calendar days from disbursement.
    pub accumulated_days: i64,
    /// Business days from disbursement.
    pub business_days: i64,
    /// Discount factor of the due date.
    pub discount_factor: f64,
    /// Amount paid; the last installment absorbs rounding.
    pub installment_amount: f64,
    /// Interest accrued since the previous installment.
    pub interest: f64,
    /// Principal repaid.
    pub amortization: f64,
    /// Outstanding balance after payment.
    pub balance: f64,
    /// IOF levied on the principal repaid.
    pub iof: f64,
}
