//! Property-based tests for the date engine using proptest.
//!
//! These check invariants that must hold for any window and any set of
//! occupied ranges, not just the fixtures in `vacancy_tests.rs`.

use std::collections::BTreeSet;

use proptest::prelude::*;
use sukima_engine::date::{days_between, enumerate_dates, CalendarDate};
use sukima_engine::holiday::{holiday_dates, holidays_in_range};
use sukima_engine::occupancy::{detect_gaps, occupied_dates, DateRange};
use sukima_engine::vacancy::{
    calculate_vacant_periods_with, VacancyOptions, VacancyPolicy, MAX_VACANT_DAYS,
};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// A date in 2025-2027. Day is capped at 28 to avoid invalid month/day combos.
fn arb_date() -> impl Strategy<Value = CalendarDate> {
    (2025i32..=2027, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| CalendarDate::new(y, m, d).expect("day <= 28 is always valid"))
}

/// A window of up to two years starting at an arbitrary date.
fn arb_window() -> impl Strategy<Value = (CalendarDate, CalendarDate)> {
    (arb_date(), 0i64..=730).prop_map(|(start, len)| (start, start.add_days(len)))
}

fn arb_range() -> impl Strategy<Value = DateRange> {
    (arb_date(), 0i64..=20).prop_map(|(start, len)| DateRange {
        start_date: start,
        end_date: start.add_days(len),
    })
}

fn arb_policy() -> impl Strategy<Value = VacancyPolicy> {
    prop_oneof![Just(VacancyPolicy::DaysOffOnly), Just(VacancyPolicy::AnyFreeDay)]
}

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 128,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Property 1: parse(format(d)) == d
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn format_parse_roundtrip(date in arb_date()) {
        prop_assert_eq!(CalendarDate::parse(&date.to_string()), Ok(date));
    }
}

// ---------------------------------------------------------------------------
// Property 2: inclusive day count
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn days_between_counts_both_ends(date in arb_date(), n in 0i64..=1000) {
        prop_assert_eq!(days_between(date, date), 1);
        prop_assert_eq!(days_between(date, date.add_days(n)), n + 1);
        prop_assert_eq!(enumerate_dates(date, date.add_days(n)).count() as i64, n + 1);
    }
}

// ---------------------------------------------------------------------------
// Property 3: gaps are maximal, disjoint from occupied, and cover all free days
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn gaps_partition_free_days(
        (start, end) in arb_window(),
        ranges in prop::collection::vec(arb_range(), 0..12),
    ) {
        let occupied = occupied_dates(&ranges);
        let gaps = detect_gaps(&occupied, start, end);

        let mut covered = BTreeSet::new();
        for gap in &gaps {
            prop_assert!(gap.start <= gap.end);
            prop_assert!(gap.start >= start && gap.end <= end);
            for date in enumerate_dates(gap.start, gap.end) {
                prop_assert!(!occupied.contains(&date));
                covered.insert(date);
            }
            // Maximal: the neighbours are occupied or outside the window.
            let before = gap.start.add_days(-1);
            prop_assert!(gap.start == start || occupied.contains(&before));
            prop_assert!(gap.end == end || occupied.contains(&gap.end.succ()));
        }

        let free: BTreeSet<CalendarDate> = enumerate_dates(start, end)
            .filter(|date| !occupied.contains(date))
            .collect();
        prop_assert_eq!(covered, free);

        for pair in gaps.windows(2) {
            prop_assert!(pair[0].end < pair[1].start);
        }
    }
}

// ---------------------------------------------------------------------------
// Property 4: every vacant period respects the cap, month and window bounds
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn vacant_periods_respect_bounds(
        (start, end) in arb_window(),
        ranges in prop::collection::vec(arb_range(), 0..12),
        min_days in 1u32..=5,
        policy in arb_policy(),
    ) {
        let holidays = holiday_dates(&holidays_in_range(start, end).unwrap());
        let options = VacancyOptions { min_days, policy };
        let periods = calculate_vacant_periods_with(&ranges, &holidays, start, end, &options);
        let occupied = occupied_dates(&ranges);

        for p in &periods {
            let days = days_between(p.start_date, p.end_date);
            prop_assert_eq!(i64::from(p.days), days);
            prop_assert!(days >= i64::from(min_days));
            prop_assert!(days <= MAX_VACANT_DAYS);
            prop_assert!(p.start_date.same_month(&p.end_date));
            prop_assert!(p.start_date >= start && p.end_date <= end);
            prop_assert!(
                enumerate_dates(p.start_date, p.end_date).all(|date| !occupied.contains(&date))
            );
            if p.is_long_weekend {
                prop_assert!((3..=5).contains(&days));
            }
        }

        for pair in periods.windows(2) {
            prop_assert!(pair[0].end_date < pair[1].start_date);
        }
    }
}

// ---------------------------------------------------------------------------
// Property 5: holidays are strictly ascending with unique dates
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn holidays_are_unique_and_sorted((start, end) in arb_window()) {
        let holidays = holidays_in_range(start, end).unwrap();
        for pair in holidays.windows(2) {
            prop_assert!(pair[0].date < pair[1].date);
        }
        for h in &holidays {
            prop_assert!(h.date >= start && h.date <= end);
        }
    }
}
