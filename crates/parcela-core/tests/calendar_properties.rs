//! Property-based tests for calendar and day-count invariants.
//!
//! Checked on the Brazilian national calendar between 2020 and 2035:
//! - Rolling lands on a business day without skipping one
//! - Business and non-business days partition any interval
//! - BUS/252 counts are additive across a split point
//! - Day arithmetic and day differences agree

use parcela_core::calendars::{BrazilCalendar, BusinessDayConvention, Calendar};
use parcela_core::daycounts::{Act365Fixed, Business252, DayCount};
use parcela_core::Date;
use proptest::prelude::*;

// =============================================================================
// TEST DATA GENERATORS
// =============================================================================

fn base_date() -> Date {
    Date::from_ymd(2020, 1, 1).unwrap()
}

prop_compose! {
    fn arb_date()(offset in 0i64..5800) -> Date {
        base_date().add_days(offset).unwrap()
    }
}

fn calendar() -> &'static BrazilCalendar {
    BrazilCalendar::global()
}

// =============================================================================
// ROLLING
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_following_is_first_open_day(date in arb_date()) {
        let rolled = calendar().adjust(date, BusinessDayConvention::Following).unwrap();

        prop_assert!(rolled >= date);
        prop_assert!(calendar().is_business_day(rolled));
        prop_assert_eq!(calendar().business_days_between(date, rolled), i64::from(rolled != date));
    }

    #[test]
    fn prop_preceding_is_last_open_day(date in arb_date()) {
        let rolled = calendar().adjust(date, BusinessDayConvention::Preceding).unwrap();

        prop_assert!(rolled <= date);
        prop_assert!(calendar().is_business_day(rolled));
        prop_assert_eq!(calendar().business_days_between(rolled, date), 0);
    }

    #[test]
    fn prop_modified_following_stays_in_month(date in arb_date()) {
        let rolled = calendar().adjust(date, BusinessDayConvention::ModifiedFollowing).unwrap();

        prop_assert!(calendar().is_business_day(rolled));
        prop_assert_eq!(rolled.month(), date.month());
    }

    #[test]
    fn prop_open_days_are_fixed_points(date in arb_date()) {
        prop_assume!(calendar().is_business_day(date));

        for convention in [
            BusinessDayConvention::Unadjusted,
            BusinessDayConvention::Following,
            BusinessDayConvention::ModifiedFollowing,
            BusinessDayConvention::Preceding,
        ] {
            prop_assert_eq!(calendar().adjust(date, convention).unwrap(), date);
        }
    }

    #[test]
    fn prop_add_business_days_counts_exactly(date in arb_date(), days in 0i32..60) {
        let moved = calendar().add_business_days(date, days).unwrap();

        prop_assert_eq!(calendar().business_days_between(date, moved), i64::from(days));
        prop_assert!(days == 0 || calendar().is_business_day(moved));
    }
}

// =============================================================================
// COUNTING
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_interval_partitions(start in arb_date(), len in 0i64..120) {
        let end = start.add_days(len).unwrap();
        let closed = calendar().non_business_days_between(start, end);
        let open = start.iter_until(end).filter(|d| calendar().is_business_day(*d)).count();

        prop_assert_eq!(closed.len() + open, (len + 1) as usize);
        prop_assert!(closed.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn prop_bus252_is_additive(start in arb_date(), first in 0i64..200, second in 0i64..200) {
        let middle = start.add_days(first).unwrap();
        let end = middle.add_days(second).unwrap();
        let dc = Business252::new(calendar());

        prop_assert_eq!(
            dc.day_count(start, middle) + dc.day_count(middle, end),
            dc.day_count(start, end)
        );
        prop_assert!(dc.day_count(start, end) <= Act365Fixed.day_count(start, end));
    }

    #[test]
    fn prop_add_days_inverts_days_between(start in arb_date(), days in -3000i64..3000) {
        let moved = start.add_days(days).unwrap();

        prop_assert_eq!(start.days_between(&moved), days);
        prop_assert_eq!(moved.add_days(-days).unwrap(), start);
    }
}
