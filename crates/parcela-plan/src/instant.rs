//! Conversion between plan dates and zoned instants.

use chrono::{DateTime, FixedOffset, TimeZone};
use parcela_core::Date;
use serde::{Deserialize, Serialize};

use crate::error::{PlanError, PlanResult};

fn default_utc_offset_seconds() -> i32 {
    -3 * 3600
}

fn default_hour() -> u32 {
    7
}

/// How plan dates are rendered as instants, and which offset defines "today".
///
/// Defaults to 07:00 at UTC-03:00 (Brasilia time).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstantConvention {
    /// Offset from UTC in seconds (negative west of Greenwich).
    #[serde(default = "default_utc_offset_seconds")]
    pub utc_offset_seconds: i32,

    /// Hour of day output instants are placed at.
    #[serde(default = "default_hour")]
    pub hour: u32,
}

impl Default for InstantConvention {
    fn default() -> Self {
        Self {
            utc_offset_seconds: default_utc_offset_seconds(),
            hour: default_hour(),
        }
    }
}

impl InstantConvention {
    /// The configured offset.
    pub fn offset(&self) -> PlanResult<FixedOffset> {
        FixedOffset::east_opt(self.utc_offset_seconds).ok_or_else(|| {
            PlanError::invalid_params(format!(
                "UTC offset of {} seconds is out of range",
                self.utc_offset_seconds
            ))
        })
    }

    /// Renders a plan date as an instant.
    pub fn to_instant(&self, date: Date) -> PlanResult<DateTime<FixedOffset>> {
        Ok(date.at_hour(self.hour, self.offset()?)?)
    }

    /// Reads the calendar date of an instant in its own offset.
    pub fn to_date<Tz: TimeZone>(&self, instant: &DateTime<Tz>) -> Date {
        Date::from_instant(instant)
    }

    /// Today's date in the configured offset.
    pub fn today(&self) -> PlanResult<Date> {
        Ok(Date::today_in(self.offset()?))
    }
}
