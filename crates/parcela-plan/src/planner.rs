//! The payment planner: calendar, index, tax and cost models wired together.

use parcela_core::calendars::{BrazilCalendar, Calendar};
use parcela_core::Date;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::amortization::Financing;
use crate::config::PlanConfig;
use crate::cost::EffectiveRate;
use crate::disbursement::CalendarEngine;
use crate::down_payment;
use crate::error::{ConfigResult, PlanError, PlanResult, Validate};
use crate::index::{DailyIndex, InstallmentGrid, InstallmentPoint};
use crate::iof::IofRates;
use crate::params::{DownPaymentParams, Params, FULL_DEBIT_SERVICE_BPS};
use crate::response::{AmortizationEntry, DownPaymentResponse, Response};
use crate::rounding::round_money;

/// Computes payment plans under one configuration and holiday calendar.
///
/// Immutable once built; share it behind an [`Arc`] between threads.
///
/// ```rust
/// use parcela_plan::prelude::*;
///
/// let planner = PaymentPlanner::default().with_today(Date::from_ymd(2025, 4, 1).unwrap());
/// let params = Params {
///     requested_amount: 7800.0,
///     first_payment_date: Date::from_ymd(2025, 5, 3).unwrap(),
///     requested_date: Date::from_ymd(2025, 4, 5).unwrap(),
///     installments: 4,
///     debit_service_percentage: 0,
///     mdr: 0.05,
///     tac_percentage: 0.0,
///     iof_overall: 0.0038,
///     iof_percentage: 0.000082,
///     interest_rate: 0.0235,
///     min_installment_amount: 100.0,
///     max_total_amount: 1_000_000.0,
///     disbursement_only_on_business_days: true,
/// };
///
/// let plan = planner.calculate_payment_plan(&params).unwrap();
/// assert_eq!(plan.len(), 4);
/// assert_eq!(plan[0].installment_amount, 7996.8);
/// ```
#[derive(Debug, Clone)]
pub struct PaymentPlanner {
    config: PlanConfig,
    engine: CalendarEngine,
}

impl Default for PaymentPlanner {
    fn default() -> Self {
        let config = PlanConfig::default();
        let engine = engine_for(&config, Arc::new(BrazilCalendar::new()));
        Self { config, engine }
    }
}

/// Everything an option needs that does not depend on its installment count.
struct PreparedPlan {
    grid: InstallmentGrid,
    rates: IofRates,
}

impl PaymentPlanner {
    /// Validates `config` and builds its calendar.
    pub fn new(config: PlanConfig) -> ConfigResult<Self> {
        config.validate_or_error()?;
        let engine = engine_for(&config, config.calendar.build()?);
        Ok(Self { config, engine })
    }

    /// Replaces the holiday calendar.
    pub fn with_calendar(mut self, calendar: Arc<dyn Calendar>) -> Self {
        self.engine = engine_for(&self.config, calendar);
        self
    }

    /// Pins the processing date instead of reading the clock.
    pub fn with_today(mut self, today: Date) -> Self {
        self.engine = self.engine.with_today(today);
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &PlanConfig {
        &self.config
    }

    /// The calendar engine placing disbursements and due dates.
    pub fn engine(&self) -> &CalendarEngine {
        &self.engine
    }

    /// First business day a disbursement requested on `date` can happen.
    pub fn next_disbursement_date(&self, date: Date) -> PlanResult<Date> {
        self.engine.next_business_day(date)
    }

    /// First and last day of a disbursement window of `days` business days.
    pub fn disbursement_date_range(&self, base: Date, days: u32) -> PlanResult<(Date, Date)> {
        self.engine.disbursement_date_range(base, days)
    }

    /// Weekend days and holidays in `[start, end]`.
    pub fn non_business_days_between(&self, start: Date, end: Date) -> Vec<Date> {
        self.engine.non_business_days_between(start, end)
    }

    // =========================================================================
    // Payment plan
    // =========================================================================

    /// One [`Response`] per installment count `1..=params.installments`.
    pub fn calculate_payment_plan(&self, params: &Params) -> PlanResult<Vec<Response>> {
        params.validate()?;
        let plan = self.prepare(params)?;

        let responses = (1..=params.installments)
            .map(|k| self.option_response(params, &plan, plan.grid.option(k)?))
            .collect::<PlanResult<Vec<_>>>()?;

        debug!(
            requested = params.requested_amount,
            options = responses.len(),
            disbursement = %plan.grid.disbursement(),
            "payment plan calculated"
        );
        Ok(responses)
    }

    /// The financed plan of every admissible down-payment split.
    pub fn calculate_down_payment_plan(
        &self,
        request: &DownPaymentParams,
    ) -> PlanResult<Vec<DownPaymentResponse>> {
        self.check_installment_count(request.installments, "down payment installments")?;
        down_payment::candidates(request, self.config.down_payment_settlement_days)?
            .into_iter()
            .map(|candidate| {
                Ok(DownPaymentResponse {
                    installment_amount: candidate.installment_amount,
                    total_amount: request.requested_amount,
                    installment_quantity: candidate.quantity,
                    first_payment_date: request.first_payment_date,
                    plans: self.calculate_payment_plan(&candidate.params)?,
                })
            })
            .collect()
    }

    /// Per-installment table of the option repaid in `installments` installments.
    pub fn amortization_schedule(
        &self,
        params: &Params,
        installments: u32,
    ) -> PlanResult<Vec<AmortizationEntry>> {
        params.validate()?;
        if installments == 0 || installments > params.installments {
            return Err(PlanError::invalid_params(format!(
                "option {installments} is outside 1..={}",
                params.installments
            )));
        }

        let plan = self.prepare(params)?;
        let points = plan.grid.option(installments)?;
        let financing = Financing::solve(
            financed_amount(params),
            points,
            &plan.rates,
            &self.config.gross_up_solver(),
        )?;
        Ok(financing.schedule(points, &plan.rates))
    }

    fn check_installment_count(&self, installments: u32, field: &str) -> PlanResult<()> {
        let maximum = self.config.max_installments;
        if installments > maximum {
            warn!(installments, maximum, field, "installment count above maximum");
            return Err(PlanError::invalid_params(format!(
                "{field} of {installments} exceeds the maximum of {maximum}"
            )));
        }
        Ok(())
    }

    fn prepare(&self, params: &Params) -> PlanResult<PreparedPlan> {
        self.check_installment_count(params.installments, "installments")?;
        let disbursement = self
            .engine
            .disbursement_date(params.requested_date, params.disbursement_only_on_business_days)?;
        let index = DailyIndex::from_monthly(
            params.interest_rate,
            self.config.business_days_per_month,
            self.config.daily_rate_precision,
        );
        let grid = InstallmentGrid::build(
            &self.engine,
            &index,
            disbursement,
            params.first_payment_date,
            params.installments,
        )?;
        let rates = IofRates::new(
            params.iof_overall,
            params.iof_percentage,
            self.config.iof_daily_cap_days,
        );

        Ok(PreparedPlan { grid, rates })
    }

    fn option_response(
        &self,
        params: &Params,
        plan: &PreparedPlan,
        points: &[InstallmentPoint],
    ) -> PlanResult<Response> {
        let k = points.len() as f64;
        let Some(last) = points.last() else {
            return Err(PlanError::invalid_params("an option needs at least one installment"));
        };

        let gross_up = self.config.gross_up_solver();
        let requested = params.requested_amount;
        let tac_amount = round_money(requested * params.tac_percentage);
        let financed = requested + tac_amount;

        let financing = Financing::solve(financed, points, &plan.rates, &gross_up)?;
        check_limits(params, &financing, points.len())?;

        let without_tac = if params.tac_percentage > 0.0 {
            Some(Financing::solve(requested, points, &plan.rates, &gross_up)?)
        } else {
            None
        };

        // Debit service split between merchant and customer
        let debit_service = financing.debit_service;
        let merchant_debit_service = round_money(
            debit_service * f64::from(params.debit_service_percentage)
                / f64::from(FULL_DEBIT_SERVICE_BPS),
        );
        let customer_debit_service = debit_service - merchant_debit_service;
        let customer_amount = if params.debit_service_percentage == 0 {
            financing.installment_amount
        } else {
            round_money((financing.total_amount - merchant_debit_service) / k)
        };

        let mdr_amount = round_money(requested * params.mdr);
        let merchant_total = round_money(mdr_amount + merchant_debit_service);

        let irr = self.config.irr_solver();
        let eir = EffectiveRate::solve(financing.contract_amount, customer_amount, points, &irr)?;
        let tec = EffectiveRate::solve(requested, customer_amount, points, &irr)?;

        let paid_contract = financing.paid_contract_amount();

        Ok(Response {
            installment: last.number,
            due_date: last.due_date,
            disbursement_date: plan.grid.disbursement(),
            accumulated_days: last.calendar_days,
            days_index: last.discount_factor,
            accumulated_days_index: financing.accumulated_index,
            interest_rate: params.interest_rate,
            installment_amount: financing.installment_amount,
            installment_amount_without_tac: without_tac.map_or(0.0, |f| f.installment_amount),
            total_amount: financing.total_amount,
            debit_service,
            customer_debit_service_amount: customer_debit_service,
            customer_amount,
            calculation_basis_for_effective_interest_rate: (financed + customer_debit_service) / k,
            merchant_debit_service_amount: merchant_debit_service,
            merchant_total_amount: merchant_total,
            settled_to_merchant: round_money(requested - merchant_total),
            mdr_amount,
            effective_interest_rate: eir.monthly,
            total_effective_cost: tec.monthly,
            eir_yearly: eir.yearly,
            tec_yearly: tec.yearly,
            eir_monthly: eir.monthly,
            tec_monthly: tec.monthly,
            total_iof: financing.total_iof,
            contract_amount: financing.contract_amount,
            contract_amount_without_tac: without_tac.map_or(0.0, |f| f.contract_amount),
            tac_amount,
            iof_percentage: params.iof_percentage,
            overall_iof: params.iof_overall,
            pre_disbursement_amount: round_money(paid_contract - financing.total_iof - tac_amount),
            paid_total_iof: round_money(paid_contract - financed),
            paid_contract_amount: paid_contract,
        })
    }
}

fn engine_for(config: &PlanConfig, calendar: Arc<dyn Calendar>) -> CalendarEngine {
    CalendarEngine::new(calendar, config.instant).with_due_date_convention(config.due_date_convention)
}

fn financed_amount(params: &Params) -> f64 {
    params.requested_amount + round_money(params.requested_amount * params.tac_percentage)
}

fn check_limits(params: &Params, financing: &Financing, installments: usize) -> PlanResult<()> {
    if financing.installment_amount < params.min_installment_amount {
        warn!(
            installments,
            installment = financing.installment_amount,
            minimum = params.min_installment_amount,
            "installment below minimum"
        );
        return Err(PlanError::invalid_params(format!(
            "installment of {} in {installments} installments is below the minimum of {}",
            financing.installment_amount, params.min_installment_amount
        )));
    }

    if financing.total_amount > params.max_total_amount {
        warn!(
            installments,
            total = financing.total_amount,
            maximum = params.max_total_amount,
            "total above maximum"
        );
        return Err(PlanError::calculation(format!(
            "total of {} in {installments} installments exceeds the maximum of {}",
            financing.total_amount, params.max_total_amount
        )));
    }

    Ok(())
}
