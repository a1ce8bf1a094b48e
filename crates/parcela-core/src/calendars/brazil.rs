//! Brazilian national holiday calendar.
//!
//! Governs the settlement of credit operations in Brazil: disbursements and
//! installment due dates only land on days this calendar considers open.

use super::bitmap::{HolidayBitmap, HolidayCalendarBuilder, WeekendType, MAX_YEAR, MIN_YEAR};
use super::Calendar;
use crate::types::Date;
use std::sync::OnceLock;

static BRAZIL_CALENDAR: OnceLock<BrazilCalendar> = OnceLock::new();

/// Brazilian national holidays.
///
/// ## Holidays
///
/// - New Year's Day (January 1)
/// - Carnival Monday and Tuesday (Easter - 48, Easter - 47)
/// - Good Friday (Easter - 2)
/// - Tiradentes (April 21)
/// - Labour Day (May 1)
/// - Corpus Christi (Easter + 60)
/// - Independence Day (September 7)
/// - Our Lady of Aparecida (October 12)
/// - All Souls' Day (November 2)
/// - Proclamation of the Republic (November 15)
/// - Black Consciousness Day (November 20, from 2024)
/// - Christmas Day (December 25)
///
/// Holidays falling on a weekend are not moved.
#[derive(Debug, Clone)]
pub struct BrazilCalendar {
    bitmap: HolidayBitmap,
}

impl BrazilCalendar {
    /// Create a new Brazilian national calendar.
    pub fn new() -> Self {
        Self {
            bitmap: build_brazil_holidays(),
        }
    }

    /// Get the shared calendar instance.
    pub fn global() -> &'static BrazilCalendar {
        BRAZIL_CALENDAR.get_or_init(BrazilCalendar::new)
    }
}

impl Default for BrazilCalendar {
    fn default() -> Self {
        Self::new()
    }
}

impl Calendar for BrazilCalendar {
    fn name(&self) -> &str {
        "Brazil National"
    }

    fn is_business_day(&self, date: Date) -> bool {
        self.bitmap.is_business_day(date.as_naive_date())
    }
}

fn build_brazil_holidays() -> HolidayBitmap {
    HolidayCalendarBuilder::new()
        .weekend(WeekendType::SaturdaySunday)
        .year_range(MIN_YEAR, MAX_YEAR)
        .add_fixed_holiday(1, 1)
        .add_easter_holiday(-48)
        .add_easter_holiday(-47)
        .add_easter_holiday(-2)
        .add_fixed_holiday(4, 21)
        .add_fixed_holiday(5, 1)
        .add_easter_holiday(60)
        .add_fixed_holiday(9, 7)
        .add_fixed_holiday(10, 12)
        .add_fixed_holiday(11, 2)
        .add_fixed_holiday(11, 15)
        // Law 14.759/2023
        .add_fixed_holiday_from(11, 20, 2024)
        .add_fixed_holiday(12, 25)
        .build()
}
