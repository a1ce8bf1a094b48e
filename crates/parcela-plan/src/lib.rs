//! # Parcela Plan
//!
//! Installment payment plans for Brazilian consumer credit.
//!
//! Given a loan request, the planner lays out business-day due dates,
//! discounts them on the BUS/252 convention, grosses the IOF up into the
//! contract and reports, for every installment count, the installment,
//! merchant settlement and effective-cost metrics.
//!
//! - **Calendar engine**: disbursement placement and due-date rolling
//! - **Daily index**: monthly rate to business-day discount factors
//! - **IOF**: flat and daily tax, financed into the contract
//! - **Amortization**: level installments and the per-installment table
//! - **Effective cost**: EIR and CET from a daily IRR
//! - **Down payment**: splits of an upfront payment and the plans after them
//!
//! ## Example
//!
//! ```rust
//! use parcela_plan::prelude::*;
//!
//! let planner = PaymentPlanner::default().with_today(Date::from_ymd(2025, 4, 1).unwrap());
//!
//! // Requested on a Saturday, released on Monday
//! let disbursement = planner.next_disbursement_date(Date::from_ymd(2025, 4, 5).unwrap()).unwrap();
//! assert_eq!(disbursement, Date::from_ymd(2025, 4, 7).unwrap());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::float_cmp)]

pub mod amortization;
pub mod config;
pub mod cost;
pub mod disbursement;
pub mod down_payment;
pub mod error;
pub mod index;
pub mod instant;
pub mod iof;
pub mod params;
pub mod planner;
pub mod response;
pub mod rounding;

use parcela_core::Date;
use std::sync::OnceLock;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::{CalendarSource, PlanConfig};
    pub use crate::disbursement::CalendarEngine;
    pub use crate::error::{ConfigError, PlanError, PlanResult};
    pub use crate::instant::InstantConvention;
    pub use crate::params::{DownPaymentParams, Params};
    pub use crate::planner::PaymentPlanner;
    pub use crate::response::{AmortizationEntry, DownPaymentResponse, Response};
    pub use parcela_core::Date;
}

pub use error::{ConfigError, ConfigResult, PlanError, PlanResult};
pub use params::{DownPaymentParams, Params};
pub use planner::PaymentPlanner;
pub use response::{AmortizationEntry, DownPaymentResponse, Response};

static DEFAULT_PLANNER: OnceLock<PaymentPlanner> = OnceLock::new();

/// Planner with the default configuration, the Brazilian national calendar and
/// the system clock.
pub fn default_planner() -> &'static PaymentPlanner {
    DEFAULT_PLANNER.get_or_init(PaymentPlanner::default)
}

/// [`PaymentPlanner::calculate_payment_plan`] on the [`default_planner`].
pub fn calculate_payment_plan(params: &Params) -> PlanResult<Vec<Response>> {
    default_planner().calculate_payment_plan(params)
}

/// [`PaymentPlanner::calculate_down_payment_plan`] on the [`default_planner`].
pub fn calculate_down_payment_plan(
    request: &DownPaymentParams,
) -> PlanResult<Vec<DownPaymentResponse>> {
    default_planner().calculate_down_payment_plan(request)
}

/// [`PaymentPlanner::next_disbursement_date`] on the [`default_planner`].
pub fn next_disbursement_date(date: Date) -> PlanResult<Date> {
    default_planner().next_disbursement_date(date)
}

/// [`PaymentPlanner::disbursement_date_range`] on the [`default_planner`].
pub fn disbursement_date_range(base: Date, days: u32) -> PlanResult<(Date, Date)> {
    default_planner().disbursement_date_range(base, days)
}

/// [`PaymentPlanner::non_business_days_between`] on the [`default_planner`].
pub fn non_business_days_between(start: Date, end: Date) -> Vec<Date> {
    default_planner().non_business_days_between(start, end)
}
