//! Runtime-configurable holiday calendar.
//!
//! Lets deployments swap in their own holiday list (a municipal calendar, a
//! bank-specific closure list) without recompiling.
//!
//! # Example
//!
//! ```
//! use parcela_core::calendars::{Calendar, DynamicCalendar};
//! use parcela_core::types::Date;
//!
//! let cal = DynamicCalendar::from_json(r#"{
//!     "name": "Sao Paulo",
//!     "holidays": ["2025-01-25", "2025-07-09"]
//! }"#).unwrap();
//!
//! assert!(!cal.is_business_day(Date::from_ymd(2025, 7, 9).unwrap()));
//! ```

use super::bitmap::{HolidayBitmap, WeekendType};
use super::Calendar;
use crate::error::{CoreError, CoreResult};
use crate::types::Date;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A holiday calendar loaded at runtime from holiday data.
#[derive(Clone)]
pub struct DynamicCalendar {
    name: String,
    bitmap: HolidayBitmap,
}

impl std::fmt::Debug for DynamicCalendar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamicCalendar")
            .field("name", &self.name)
            .field("weekend", &self.bitmap.weekend_type())
            .finish_non_exhaustive()
    }
}

impl DynamicCalendar {
    /// Load a calendar from JSON data.
    ///
    /// # JSON Format
    ///
    /// ```json
    /// {
    ///   "name": "My Calendar",
    ///   "weekend": "SaturdaySunday",
    ///   "holidays": ["2025-01-01", "2025-12-25"]
    /// }
    /// ```
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let data: CalendarData = serde_json::from_str(json)
            .map_err(|e| CoreError::calendar(format!("Failed to parse JSON: {e}")))?;
        Self::from_calendar_data(data)
    }

    /// Load a calendar from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> CoreResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            CoreError::calendar(format!("Failed to read {}: {e}", path.display()))
        })?;
        Self::from_json(&content)
    }

    /// Build a calendar from already-parsed data.
    ///
    /// Every holiday must be a valid `YYYY-MM-DD` date; the first bad entry
    /// rejects the whole file.
    pub fn from_calendar_data(data: CalendarData) -> CoreResult<Self> {
        let mut bitmap = HolidayBitmap::new(data.weekend.unwrap_or_default());

        for date_str in &data.holidays {
            let date = Date::parse(date_str)
                .map_err(|e| CoreError::calendar(format!("Invalid holiday '{date_str}': {e}")))?;
            bitmap.add_holiday(date.as_naive_date());
        }

        Ok(Self {
            name: data.name,
            bitmap,
        })
    }

    /// Get the weekend type.
    pub fn weekend_type(&self) -> WeekendType {
        self.bitmap.weekend_type()
    }
}

impl Calendar for DynamicCalendar {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_business_day(&self, date: Date) -> bool {
        self.bitmap.is_business_day(date.as_naive_date())
    }
}

/// JSON shape of a holiday file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarData {
    /// Name of the calendar
    pub name: String,

    /// Weekend type (optional, defaults to SaturdaySunday)
    #[serde(default)]
    pub weekend: Option<WeekendType>,

    /// List of holiday dates in YYYY-MM-DD format
    #[serde(default)]
    pub holidays: Vec<String>,
}
