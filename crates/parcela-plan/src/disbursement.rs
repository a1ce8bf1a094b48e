//! Calendar engine: where disbursements and due dates may land.

use parcela_core::calendars::{BusinessDayConvention, Calendar};
use parcela_core::Date;
use std::sync::Arc;

use crate::error::PlanResult;
use crate::instant::InstantConvention;

/// Source of the processing date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clock {
    /// Read the wall clock in the convention's offset.
    System(InstantConvention),
    /// A pinned processing date.
    Fixed(Date),
}

impl Clock {
    /// The processing date.
    pub fn today(&self) -> PlanResult<Date> {
        match self {
            Clock::System(convention) => convention.today(),
            Clock::Fixed(date) => Ok(*date),
        }
    }
}

/// Business-day policy for disbursement and installment dates.
///
/// A disbursement is never placed on the processing date itself: money asked
/// for today is released on the next business day at the earliest.
#[derive(Clone)]
pub struct CalendarEngine {
    calendar: Arc<dyn Calendar>,
    clock: Clock,
    due_date_convention: BusinessDayConvention,
}

impl std::fmt::Debug for CalendarEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CalendarEngine")
            .field("calendar", &self.calendar.name())
            .field("clock", &self.clock)
            .field("due_date_convention", &self.due_date_convention)
            .finish()
    }
}

impl CalendarEngine {
    /// Creates an engine reading "today" from the system clock.
    pub fn new(calendar: Arc<dyn Calendar>, convention: InstantConvention) -> Self {
        Self {
            calendar,
            clock: Clock::System(convention),
            due_date_convention: BusinessDayConvention::Following,
        }
    }

    /// Rolls due dates that land on closed days with `convention` instead of
    /// [`BusinessDayConvention::Following`].
    pub fn with_due_date_convention(mut self, convention: BusinessDayConvention) -> Self {
        self.due_date_convention = convention;
        self
    }

    /// Pins the processing date.
    pub fn with_today(mut self, today: Date) -> Self {
        self.clock = Clock::Fixed(today);
        self
    }

    /// The underlying holiday calendar.
    pub fn calendar(&self) -> &dyn Calendar {
        self.calendar.as_ref()
    }

    /// The processing date.
    pub fn today(&self) -> PlanResult<Date> {
        self.clock.today()
    }

    /// False on weekends and holidays.
    pub fn is_business_day(&self, date: Date) -> bool {
        self.calendar.is_business_day(date)
    }

    /// First business day on or after `date`, skipping the processing date.
    pub fn next_business_day(&self, date: Date) -> PlanResult<Date> {
        let start = self.skip_today(date)?;
        Ok(self.calendar.next_business_day(start)?)
    }

    /// Disbursement date of a request.
    ///
    /// Rolled to a business day only when `only_business_days` is set; the
    /// processing date is skipped either way.
    pub fn disbursement_date(&self, requested: Date, only_business_days: bool) -> PlanResult<Date> {
        if only_business_days {
            self.next_business_day(requested)
        } else {
            self.skip_today(requested)
        }
    }

    /// First and last business day of a disbursement window of `days` business days.
    ///
    /// The window opens on [`next_business_day`](Self::next_business_day) of
    /// `base`, which counts as its first day.
    pub fn disbursement_date_range(&self, base: Date, days: u32) -> PlanResult<(Date, Date)> {
        let start = self.next_business_day(base)?;
        let extra = i32::try_from(days.saturating_sub(1)).unwrap_or(i32::MAX);
        let end = self.calendar.add_business_days(start, extra)?;
        Ok((start, end))
    }

    /// Weekend days and holidays in `[start, end]`, ascending.
    pub fn non_business_days_between(&self, start: Date, end: Date) -> Vec<Date> {
        self.calendar.non_business_days_between(start, end)
    }

    /// Due date of installment `number` (from 1): the first payment date moved
    /// `number - 1` months, then rolled with the due-date convention.
    pub fn due_date(&self, first_payment: Date, number: u32) -> PlanResult<Date> {
        let months = i32::try_from(number.saturating_sub(1)).unwrap_or(i32::MAX);
        let nominal = first_payment.add_months(months)?;
        Ok(self.calendar.adjust(nominal, self.due_date_convention)?)
    }

    fn skip_today(&self, date: Date) -> PlanResult<Date> {
        if date == self.today()? {
            Ok(date.add_days(1)?)
        } else {
            Ok(date)
        }
    }
}
