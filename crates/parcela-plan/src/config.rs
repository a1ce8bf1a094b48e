//! Plan engine configuration.
//!
//! Every tunable the calculators rely on lives here with the market default,
//! so a deployment can override them from a TOML or JSON file:
//!
//! ```toml
//! business_days_per_month = 21
//! down_payment_settlement_days = 6
//! due_date_convention = "modified_following"
//!
//! [calendar]
//! kind = "file"
//! path = "/etc/parcela/holidays.json"
//! ```

use parcela_core::calendars::{
    BrazilCalendar, BusinessDayConvention, Calendar, CalendarData, DynamicCalendar, WeekendCalendar,
};
use parcela_core::daycounts::BUSINESS_DAYS_PER_MONTH;
use parcela_core::CoreResult;
use parcela_math::solvers::SolverConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};
use crate::instant::InstantConvention;

// =============================================================================
// CALENDAR SOURCE
// =============================================================================

/// Where the holiday calendar comes from.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CalendarSource {
    /// Built-in Brazilian national holidays.
    #[default]
    BrazilNational,
    /// Weekends only, no holidays.
    WeekendsOnly,
    /// Holidays given inline in the configuration.
    Inline(CalendarData),
    /// Holidays read from a JSON holiday file.
    File {
        /// Path to the JSON file.
        path: PathBuf,
    },
}

impl CalendarSource {
    /// Builds the calendar this source describes.
    pub fn build(&self) -> CoreResult<Arc<dyn Calendar>> {
        let calendar: Arc<dyn Calendar> = match self {
            CalendarSource::BrazilNational => Arc::new(BrazilCalendar::new()),
            CalendarSource::WeekendsOnly => Arc::new(WeekendCalendar),
            CalendarSource::Inline(data) => Arc::new(DynamicCalendar::from_calendar_data(data.clone())?),
            CalendarSource::File { path } => Arc::new(DynamicCalendar::from_json_file(path)?),
        };
        Ok(calendar)
    }
}

// =============================================================================
// PLAN CONFIGURATION
// =============================================================================

/// Tunables of the payment-plan engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanConfig {
    /// Holiday calendar for disbursement and due dates.
    #[serde(default)]
    pub calendar: CalendarSource,

    /// How due dates landing on closed days are rolled.
    #[serde(default)]
    pub due_date_convention: BusinessDayConvention,

    /// Business days in a month under BUS/252.
    #[serde(default = "default_business_days_per_month")]
    pub business_days_per_month: u32,

    /// Largest installment count a plan or down payment may ask for.
    #[serde(default = "default_max_installments")]
    pub max_installments: u32,

    /// Decimal places the daily rate is rounded to.
    #[serde(default = "default_daily_rate_precision")]
    pub daily_rate_precision: u32,

    /// Maximum days of daily IOF charged on one installment.
    #[serde(default = "default_iof_daily_cap_days")]
    pub iof_daily_cap_days: i64,

    /// Calendar days between a down-payment date and the next disbursement.
    #[serde(default = "default_down_payment_settlement_days")]
    pub down_payment_settlement_days: i64,

    /// Convergence tolerance of the IOF gross-up.
    #[serde(default = "default_gross_up_tolerance")]
    pub gross_up_tolerance: f64,

    /// Iteration budget of the IOF gross-up.
    #[serde(default = "default_gross_up_max_iterations")]
    pub gross_up_max_iterations: u32,

    /// Convergence tolerance of the effective-rate solve.
    #[serde(default = "default_irr_tolerance")]
    pub irr_tolerance: f64,

    /// Iteration budget of the effective-rate solve.
    #[serde(default = "default_irr_max_iterations")]
    pub irr_max_iterations: u32,

    /// Output instant convention and the offset "today" is read in.
    #[serde(default)]
    pub instant: InstantConvention,
}

fn default_business_days_per_month() -> u32 {
    BUSINESS_DAYS_PER_MONTH
}

fn default_max_installments() -> u32 {
    120
}

fn default_daily_rate_precision() -> u32 {
    10
}

fn default_iof_daily_cap_days() -> i64 {
    365
}

fn default_down_payment_settlement_days() -> i64 {
    6
}

fn default_gross_up_tolerance() -> f64 {
    1e-9
}

fn default_gross_up_max_iterations() -> u32 {
    50
}

fn default_irr_tolerance() -> f64 {
    1e-12
}

fn default_irr_max_iterations() -> u32 {
    100
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            calendar: CalendarSource::default(),
            due_date_convention: BusinessDayConvention::default(),
            business_days_per_month: default_business_days_per_month(),
            max_installments: default_max_installments(),
            daily_rate_precision: default_daily_rate_precision(),
            iof_daily_cap_days: default_iof_daily_cap_days(),
            down_payment_settlement_days: default_down_payment_settlement_days(),
            gross_up_tolerance: default_gross_up_tolerance(),
            gross_up_max_iterations: default_gross_up_max_iterations(),
            irr_tolerance: default_irr_tolerance(),
            irr_max_iterations: default_irr_max_iterations(),
            instant: InstantConvention::default(),
        }
    }
}

impl PlanConfig {
    /// Parses and validates a TOML configuration.
    pub fn from_toml_str(s: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Parses and validates a JSON configuration.
    pub fn from_json_str(s: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Loads a configuration file; `.json` files are read as JSON, anything else as TOML.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {e}", path.display())))?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&content),
            _ => Self::from_toml_str(&content),
        }
    }

    /// Solver settings for the IOF gross-up.
    pub fn gross_up_solver(&self) -> SolverConfig {
        SolverConfig::new(self.gross_up_tolerance, self.gross_up_max_iterations)
    }

    /// Solver settings for effective-rate solves.
    pub fn irr_solver(&self) -> SolverConfig {
        SolverConfig::new(self.irr_tolerance, self.irr_max_iterations)
    }
}

impl Validate for PlanConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.business_days_per_month == 0 {
            errors.push(ValidationError::new(
                "business_days_per_month",
                "must be positive",
            ));
        }

        if self.max_installments == 0 {
            errors.push(ValidationError::new("max_installments", "must be positive"));
        }

        if self.daily_rate_precision > 15 {
            errors.push(ValidationError::new(
                "daily_rate_precision",
                "must be at most 15 decimal places",
            ));
        }

        if self.iof_daily_cap_days <= 0 {
            errors.push(ValidationError::new("iof_daily_cap_days", "must be positive"));
        }

        if self.down_payment_settlement_days < 0 {
            errors.push(ValidationError::new(
                "down_payment_settlement_days",
                "cannot be negative",
            ));
        }

        for (field, tolerance) in [
            ("gross_up_tolerance", self.gross_up_tolerance),
            ("irr_tolerance", self.irr_tolerance),
        ] {
            if !(tolerance.is_finite() && tolerance > 0.0) {
                errors.push(ValidationError::new(field, "must be a positive number"));
            }
        }

        for (field, iterations) in [
            ("gross_up_max_iterations", self.gross_up_max_iterations),
            ("irr_max_iterations", self.irr_max_iterations),
        ] {
            if iterations == 0 {
                errors.push(ValidationError::new(field, "must be positive"));
            }
        }

        if self.instant.offset().is_err() {
            errors.push(ValidationError::new(
                "instant.utc_offset_seconds",
                "must be within one day of UTC",
            ));
        }

        if self.instant.hour > 23 {
            errors.push(ValidationError::new("instant.hour", "must be between 0 and 23"));
        }

        errors
    }
}
