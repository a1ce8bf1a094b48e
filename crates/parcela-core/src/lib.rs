//! # Parcela Core
//!
//! Calendar and date building blocks for the Parcela payment-plan engine.
//!
//! - **Types**: the [`Date`] newtype with month arithmetic and zoned-instant conversion
//! - **Business Day Calendars**: the Brazilian national calendar, a JSON-loadable
//!   dynamic calendar and the bitmap storage behind both
//! - **Day Count Conventions**: BUS/252 and ACT/365 Fixed
//!
//! ## Example
//!
//! ```rust
//! use parcela_core::prelude::*;
//!
//! let cal = BrazilCalendar::new();
//! let good_friday = Date::from_ymd(2025, 4, 18).unwrap();
//! assert!(!cal.is_business_day(good_friday));
//! assert_eq!(
//!     cal.adjust(good_friday, BusinessDayConvention::Following).unwrap(),
//!     Date::from_ymd(2025, 4, 22).unwrap()
//! );
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::similar_names)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::trivially_copy_pass_by_ref)]

pub mod calendars;
pub mod daycounts;
pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calendars::{
        BrazilCalendar, BusinessDayConvention, Calendar, CalendarData, DynamicCalendar,
        WeekendCalendar, WeekendType,
    };
    pub use crate::daycounts::{Act365Fixed, Business252, DayCount};
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::Date;
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use types::Date;
