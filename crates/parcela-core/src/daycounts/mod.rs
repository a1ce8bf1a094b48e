//! Day count conventions for installment accrual.
//!
//! # Supported Conventions
//!
//! - [`Business252`]: BUS/252, business days over 252. The Brazilian market
//!   convention; compounds the contract interest of each installment.
//! - [`Act365Fixed`]: Actual/365 Fixed. Calendar days; drives daily IOF
//!   accrual and the annualization of effective cost rates.
//!
//! # Usage
//!
//! ```rust
//! use parcela_core::calendars::BrazilCalendar;
//! use parcela_core::daycounts::{Business252, DayCount};
//! use parcela_core::types::Date;
//!
//! let dc = Business252::new(BrazilCalendar::global());
//! let start = Date::from_ymd(2025, 4, 7).unwrap();
//! let end = Date::from_ymd(2025, 5, 5).unwrap();
//!
//! assert_eq!(dc.day_count(start, end), 17);
//! ```

mod act365;
mod bus252;

pub use act365::Act365Fixed;
pub use bus252::{Business252, BUSINESS_DAYS_PER_MONTH, BUSINESS_DAYS_PER_YEAR};

use crate::types::Date;

/// Trait for day count conventions.
///
/// Implementations must be thread-safe (`Send + Sync`).
pub trait DayCount: Send + Sync {
    /// Returns the name of the day count convention.
    fn name(&self) -> &'static str;

    /// Calculates the year fraction between two dates.
    ///
    /// Can be negative if `end < start`.
    fn year_fraction(&self, start: Date, end: Date) -> f64;

    /// Calculates the day count between two dates according to the convention.
    fn day_count(&self, start: Date, end: Date) -> i64;
}
