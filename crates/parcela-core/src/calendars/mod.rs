//! Business day calendars and conventions.
//!
//! This module provides:
//! - The [`Calendar`] trait with date rolling and business-day counting
//! - The Brazilian national calendar used for disbursement and due dates
//! - A dynamic calendar loadable from JSON holiday files
//! - Business day adjustment conventions

mod bitmap;
mod brazil;
mod conventions;
mod dynamic;

pub use bitmap::{easter_sunday, HolidayBitmap, HolidayCalendarBuilder, WeekendType, MAX_YEAR, MIN_YEAR};
pub use brazil::BrazilCalendar;
pub use conventions::BusinessDayConvention;
pub use dynamic::{CalendarData, DynamicCalendar};

use crate::error::CoreResult;
use crate::types::Date;

/// Trait for business day calendars.
///
/// Calendars determine which days are business days vs holidays
/// for a specific market or jurisdiction.
pub trait Calendar: Send + Sync {
    /// Returns the name of the calendar.
    fn name(&self) -> &str;

    /// Returns true if the date is a business day.
    fn is_business_day(&self, date: Date) -> bool;

    /// Adjusts a date according to the given business day convention.
    fn adjust(&self, date: Date, convention: BusinessDayConvention) -> CoreResult<Date> {
        conventions::adjust(date, convention, self)
    }

    /// Advances a date by a number of business days.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if stepping leaves the date range.
    fn add_business_days(&self, date: Date, days: i32) -> CoreResult<Date> {
        let mut result = date;
        let mut remaining = days.unsigned_abs();
        let direction: i64 = if days >= 0 { 1 } else { -1 };

        while remaining > 0 {
            result = result.add_days(direction)?;
            if self.is_business_day(result) {
                remaining -= 1;
            }
        }

        Ok(result)
    }

    /// Returns the next business day on or after the given date.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if no business day follows before the
    /// end of the date range.
    fn next_business_day(&self, date: Date) -> CoreResult<Date> {
        let mut result = date;
        while !self.is_business_day(result) {
            result = result.add_days(1)?;
        }
        Ok(result)
    }

    /// Returns the previous business day on or before the given date.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if no business day precedes the start
    /// of the date range.
    fn previous_business_day(&self, date: Date) -> CoreResult<Date> {
        let mut result = date;
        while !self.is_business_day(result) {
            result = result.add_days(-1)?;
        }
        Ok(result)
    }

    /// Counts business days between two dates (exclusive of start, inclusive of end).
    fn business_days_between(&self, start: Date, end: Date) -> i64 {
        start
            .iter_until(end)
            .skip(1)
            .filter(|d| self.is_business_day(*d))
            .count() as i64
    }

    /// Lists the non-business days in `[start, end]`, ascending.
    fn non_business_days_between(&self, start: Date, end: Date) -> Vec<Date> {
        start
            .iter_until(end)
            .filter(|d| !self.is_business_day(*d))
            .collect()
    }
}

/// A simple weekend-only calendar (no holidays).
///
/// Useful for testing or when holiday data is not available.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekendCalendar;

impl Calendar for WeekendCalendar {
    fn name(&self) -> &str {
        "Weekend Only"
    }

    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekend_calendar() {
        let cal = WeekendCalendar;

        assert!(cal.is_business_day(Date::from_ymd(2025, 1, 6).unwrap()));
        assert!(!cal.is_business_day(Date::from_ymd(2025, 1, 4).unwrap()));
        assert!(!cal.is_business_day(Date::from_ymd(2025, 1, 5).unwrap()));
    }

    #[test]
    fn test_add_business_days() {
        let cal = WeekendCalendar;

        // Friday + 1 business day = Monday
        let friday = Date::from_ymd(2025, 1, 3).unwrap();
        assert_eq!(cal.add_business_days(friday, 1).unwrap(), Date::from_ymd(2025, 1, 6).unwrap());
        assert_eq!(cal.add_business_days(friday, -1).unwrap(), Date::from_ymd(2025, 1, 2).unwrap());
        assert_eq!(cal.add_business_days(friday, 0).unwrap(), friday);
    }

    /// Closed every day.
    struct ClosedCalendar;

    impl Calendar for ClosedCalendar {
        fn name(&self) -> &str {
            "Closed"
        }

        fn is_business_day(&self, _date: Date) -> bool {
            false
        }
    }

    #[test]
    fn test_rolling_past_range_end_is_an_error() {
        let last = Date::from(chrono::NaiveDate::MAX);
        let near_end = last.add_days(-3).unwrap();

        assert!(ClosedCalendar.next_business_day(near_end).is_err());
        assert!(ClosedCalendar.add_business_days(near_end, 1).is_err());
        assert!(WeekendCalendar.add_business_days(last, 1).is_err());

        let first = Date::from(chrono::NaiveDate::MIN);
        assert!(ClosedCalendar.previous_business_day(first.add_days(3).unwrap()).is_err());
    }

    #[test]
    fn test_previous_business_day() {
        let sunday = Date::from_ymd(2025, 1, 5).unwrap();
        assert_eq!(
            WeekendCalendar.previous_business_day(sunday).unwrap(),
            Date::from_ymd(2025, 1, 3).unwrap()
        );
    }

    #[test]
    fn test_business_days_between() {
        let cal = WeekendCalendar;

        // Monday to Friday = 4 business days (Tue, Wed, Thu, Fri)
        let monday = Date::from_ymd(2025, 1, 6).unwrap();
        let friday = Date::from_ymd(2025, 1, 10).unwrap();
        assert_eq!(cal.business_days_between(monday, friday), 4);
        assert_eq!(cal.business_days_between(friday, monday), 0);
    }

    #[test]
    fn test_non_business_days_between() {
        let cal = WeekendCalendar;

        let start = Date::from_ymd(2025, 1, 1).unwrap();
        let end = Date::from_ymd(2025, 1, 12).unwrap();
        let days = cal.non_business_days_between(start, end);

        assert_eq!(days.len(), 4);
        assert_eq!(days[0], Date::from_ymd(2025, 1, 4).unwrap());
        assert_eq!(days[3], end);
        assert!(cal.non_business_days_between(end, start).is_empty());
    }
}
