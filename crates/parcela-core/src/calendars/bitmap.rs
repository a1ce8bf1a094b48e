//! Bitmap-based holiday storage for O(1) lookups.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Minimum year supported by the calendar.
pub const MIN_YEAR: i32 = 1970;
/// Maximum year supported by the calendar.
pub const MAX_YEAR: i32 = 2100;

const YEAR_COUNT: usize = (MAX_YEAR - MIN_YEAR + 1) as usize;
const MAX_DAYS_PER_YEAR: usize = 366;
const WORD_COUNT: usize = (YEAR_COUNT * MAX_DAYS_PER_YEAR).div_ceil(64);

/// Which weekdays are closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WeekendType {
    /// Saturday and Sunday (most markets)
    #[default]
    #[serde(alias = "saturday_sunday")]
    SaturdaySunday,
    /// Sunday only
    #[serde(alias = "sunday_only")]
    SundayOnly,
    /// No weekends
    #[serde(alias = "none")]
    None,
}

impl WeekendType {
    /// Check if a weekday is a weekend day for this type.
    #[inline]
    pub fn is_weekend(&self, weekday: Weekday) -> bool {
        match self {
            WeekendType::SaturdaySunday => matches!(weekday, Weekday::Sat | Weekday::Sun),
            WeekendType::SundayOnly => weekday == Weekday::Sun,
            WeekendType::None => false,
        }
    }
}

/// Holiday set stored as one bit per day from 1970 to 2100.
///
/// Lookups outside the supported range report "not a holiday", so dates
/// past 2100 fall back to weekend-only rules.
#[derive(Clone)]
pub struct HolidayBitmap {
    bits: Box<[u64; WORD_COUNT]>,
    weekend: WeekendType,
}

impl std::fmt::Debug for HolidayBitmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HolidayBitmap")
            .field("weekend", &self.weekend)
            .finish_non_exhaustive()
    }
}

impl HolidayBitmap {
    /// Create a new empty holiday bitmap.
    pub fn new(weekend: WeekendType) -> Self {
        Self {
            bits: Box::new([0u64; WORD_COUNT]),
            weekend,
        }
    }

    /// Get the weekend type.
    #[inline]
    pub fn weekend_type(&self) -> WeekendType {
        self.weekend
    }

    /// Add a holiday to the bitmap. Dates outside the supported range are ignored.
    pub fn add_holiday(&mut self, date: NaiveDate) {
        if let Some((word_idx, bit_idx)) = Self::date_to_indices(date) {
            self.bits[word_idx] |= 1u64 << bit_idx;
        }
    }

    /// Check if a date is a holiday (excluding weekends).
    #[inline]
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        Self::date_to_indices(date)
            .is_some_and(|(word_idx, bit_idx)| self.bits[word_idx] & (1u64 << bit_idx) != 0)
    }

    /// A business day is neither a weekend day nor a holiday.
    #[inline]
    pub fn is_business_day(&self, date: NaiveDate) -> bool {
        !self.weekend.is_weekend(date.weekday()) && !self.is_holiday(date)
    }

    #[inline]
    fn date_to_indices(date: NaiveDate) -> Option<(usize, usize)> {
        let year = date.year();
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return None;
        }

        let bit_position =
            (year - MIN_YEAR) as usize * MAX_DAYS_PER_YEAR + date.ordinal0() as usize;

        Some((bit_position / 64, bit_position % 64))
    }
}

/// Builder for holiday bitmaps from recurring holiday rules.
///
/// ```rust
/// use parcela_core::calendars::{HolidayCalendarBuilder, WeekendType};
/// use chrono::NaiveDate;
///
/// let bitmap = HolidayCalendarBuilder::new()
///     .weekend(WeekendType::SaturdaySunday)
///     .year_range(2025, 2026)
///     .add_fixed_holiday(12, 25)
///     .add_easter_holiday(-2)
///     .build();
///
/// assert!(bitmap.is_holiday(NaiveDate::from_ymd_opt(2025, 4, 18).unwrap()));
/// ```
#[derive(Debug, Clone)]
pub struct HolidayCalendarBuilder {
    weekend: WeekendType,
    holidays: HashSet<NaiveDate>,
    start_year: i32,
    end_year: i32,
}

impl Default for HolidayCalendarBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HolidayCalendarBuilder {
    /// Create a new builder covering the full supported year range.
    pub fn new() -> Self {
        Self {
            weekend: WeekendType::SaturdaySunday,
            holidays: HashSet::new(),
            start_year: MIN_YEAR,
            end_year: MAX_YEAR,
        }
    }

    /// Set the weekend type.
    pub fn weekend(mut self, weekend: WeekendType) -> Self {
        self.weekend = weekend;
        self
    }

    /// Restrict the years for which recurring rules generate holidays.
    pub fn year_range(mut self, start: i32, end: i32) -> Self {
        self.start_year = start.max(MIN_YEAR);
        self.end_year = end.min(MAX_YEAR);
        self
    }

    /// Add a fixed holiday (same month and day every year).
    pub fn add_fixed_holiday(self, month: u32, day: u32) -> Self {
        let from = self.start_year;
        self.add_fixed_holiday_from(month, day, from)
    }

    /// Add a fixed holiday observed only from `from_year` onwards.
    pub fn add_fixed_holiday_from(mut self, month: u32, day: u32, from_year: i32) -> Self {
        for year in from_year.max(self.start_year)..=self.end_year {
            if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                self.holidays.insert(date);
            }
        }
        self
    }

    /// Add an Easter-based holiday (offset in days from Easter Sunday).
    pub fn add_easter_holiday(mut self, offset_days: i64) -> Self {
        for year in self.start_year..=self.end_year {
            if let Some(date) = easter_sunday(year)
                .and_then(|easter| easter.checked_add_signed(chrono::Duration::days(offset_days)))
            {
                self.holidays.insert(date);
            }
        }
        self
    }

    /// Build the holiday bitmap.
    pub fn build(self) -> HolidayBitmap {
        let mut bitmap = HolidayBitmap::new(self.weekend);
        for date in self.holidays {
            bitmap.add_holiday(date);
        }
        bitmap
    }
}

/// Calculate Easter Sunday using the Anonymous Gregorian algorithm.
#[allow(clippy::many_single_char_names)]
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = ((h + l - 7 * m + 114) % 31) + 1;

    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_bitmap_basic() {
        let mut bitmap = HolidayBitmap::new(WeekendType::SaturdaySunday);

        let date = ymd(2025, 1, 1);
        assert!(!bitmap.is_holiday(date));

        bitmap.add_holiday(date);
        assert!(bitmap.is_holiday(date));
        assert!(!bitmap.is_business_day(date));
        assert!(!bitmap.is_holiday(ymd(2025, 1, 2)));
    }

    #[test]
    fn test_out_of_range_dates_are_ignored() {
        let mut bitmap = HolidayBitmap::new(WeekendType::SaturdaySunday);
        bitmap.add_holiday(ymd(2150, 1, 1));
        assert!(!bitmap.is_holiday(ymd(2150, 1, 1)));
        assert!(bitmap.is_business_day(ymd(2150, 1, 1)));
    }

    #[test]
    fn test_weekend_types() {
        let saturday = ymd(2025, 1, 4);
        assert!(!HolidayBitmap::new(WeekendType::SaturdaySunday).is_business_day(saturday));
        assert!(HolidayBitmap::new(WeekendType::SundayOnly).is_business_day(saturday));
        assert!(HolidayBitmap::new(WeekendType::None).is_business_day(ymd(2025, 1, 5)));
    }

    #[test]
    fn test_easter() {
        assert_eq!(easter_sunday(2025).unwrap(), ymd(2025, 4, 20));
        assert_eq!(easter_sunday(2024).unwrap(), ymd(2024, 3, 31));
        assert_eq!(easter_sunday(2026).unwrap(), ymd(2026, 4, 5));
    }

    #[test]
    fn test_builder_fixed_from() {
        let bitmap = HolidayCalendarBuilder::new()
            .year_range(2023, 2025)
            .add_fixed_holiday_from(11, 20, 2024)
            .build();

        assert!(!bitmap.is_holiday(ymd(2023, 11, 20)));
        assert!(bitmap.is_holiday(ymd(2024, 11, 20)));
        assert!(bitmap.is_holiday(ymd(2025, 11, 20)));
    }
}
