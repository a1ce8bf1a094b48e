//! BUS/252 business-day count convention.

use super::DayCount;
use crate::calendars::Calendar;
use crate::types::Date;

/// Business days in a year.
pub const BUSINESS_DAYS_PER_YEAR: i64 = 252;

/// Business days in a month; a monthly rate compounds over this many days.
pub const BUSINESS_DAYS_PER_MONTH: u32 = 21;

/// Business/252 day count convention.
///
/// Counts business days in `(start, end]` on a holiday calendar and divides by
/// a 252-day year. A month is taken as 21 business days, so a monthly rate `r`
/// corresponds to a daily rate of `(1 + r)^(1/21) - 1`.
#[derive(Debug, Clone, Copy)]
pub struct Business252<'a, C: Calendar + ?Sized> {
    calendar: &'a C,
}

impl<'a, C: Calendar + ?Sized> Business252<'a, C> {
    /// Creates the convention on top of a holiday calendar.
    pub fn new(calendar: &'a C) -> Self {
        Self { calendar }
    }

    /// The calendar business days are counted on.
    pub fn calendar(&self) -> &C {
        self.calendar
    }
}

impl<C: Calendar + ?Sized> DayCount for Business252<'_, C> {
    fn name(&self) -> &'static str {
        "BUS/252"
    }

    fn year_fraction(&self, start: Date, end: Date) -> f64 {
        self.day_count(start, end) as f64 / BUSINESS_DAYS_PER_YEAR as f64
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        if end < start {
            -self.calendar.business_days_between(end, start)
        } else {
            self.calendar.business_days_between(start, end)
        }
    }
}
