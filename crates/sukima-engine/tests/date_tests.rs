//! Tests for calendar date primitives.

use chrono::Weekday;
use sukima_engine::date::{
    days_between, default_window_end, enumerate_dates, last_day_of_month, CalendarDate,
};
use sukima_engine::EngineError;

// ── Helpers ─────────────────────────────────────────────────────────────────

fn d(s: &str) -> CalendarDate {
    s.parse().unwrap()
}

// ── Parsing and formatting ──────────────────────────────────────────────────

#[test]
fn parse_and_format_roundtrip() {
    let date = d("2026-05-03");
    assert_eq!(date.year(), 2026);
    assert_eq!(date.month(), 5);
    assert_eq!(date.day(), 3);
    assert_eq!(date.to_string(), "2026-05-03");
}

#[test]
fn parse_rejects_malformed_strings() {
    for bad in [
        "",
        "2026-1-05",
        "2026/01/05",
        "26-01-05",
        "2026-01-05T00:00",
        "+026-01-01",
        "2026-02-30",
        "2026-13-01",
        "2026-00-10",
    ] {
        assert_eq!(
            CalendarDate::parse(bad),
            Err(EngineError::Parse(bad.to_string())),
            "{bad:?} should be rejected"
        );
    }
}

#[test]
fn display_pads_short_years() {
    assert_eq!(CalendarDate::new(987, 3, 4).unwrap().to_string(), "0987-03-04");
}

#[test]
fn leap_day_parses_only_in_leap_years() {
    assert!(CalendarDate::parse("2028-02-29").is_ok());
    assert!(CalendarDate::parse("2027-02-29").is_err());
}

#[test]
fn serde_uses_plain_date_strings() {
    let json = serde_json::to_string(&d("2026-01-12")).unwrap();
    assert_eq!(json, "\"2026-01-12\"");

    let back: CalendarDate = serde_json::from_str(&json).unwrap();
    assert_eq!(back, d("2026-01-12"));

    assert!(serde_json::from_str::<CalendarDate>("\"2026-1-12\"").is_err());
}

// ── Arithmetic ──────────────────────────────────────────────────────────────

#[test]
fn days_between_is_inclusive() {
    assert_eq!(days_between(d("2026-01-01"), d("2026-01-01")), 1);
    assert_eq!(days_between(d("2026-01-01"), d("2026-01-03")), 3);
    assert_eq!(days_between(d("2026-12-31"), d("2027-01-01")), 2);
    assert_eq!(days_between(d("2028-02-28"), d("2028-03-01")), 3);
}

#[test]
fn add_days_crosses_month_and_year() {
    assert_eq!(d("2026-01-31").add_days(1), d("2026-02-01"));
    assert_eq!(d("2026-12-31").add_days(1), d("2027-01-01"));
    assert_eq!(d("2026-03-01").add_days(-1), d("2026-02-28"));
    assert_eq!(d("2026-01-01").add_days(0), d("2026-01-01"));
}

#[test]
fn weekend_detection() {
    assert!(d("2026-01-03").is_weekend()); // Saturday
    assert!(d("2026-01-04").is_weekend()); // Sunday
    assert!(!d("2026-01-05").is_weekend()); // Monday
    assert_eq!(d("2026-05-03").weekday(), Weekday::Sun);
    assert!(d("2026-05-03").is_sunday());
}

#[test]
fn last_day_of_each_month() {
    assert_eq!(last_day_of_month(2026, 1), Some(d("2026-01-31")));
    assert_eq!(last_day_of_month(2026, 2), Some(d("2026-02-28")));
    assert_eq!(last_day_of_month(2028, 2), Some(d("2028-02-29")));
    assert_eq!(last_day_of_month(2026, 4), Some(d("2026-04-30")));
    assert_eq!(last_day_of_month(2026, 12), Some(d("2026-12-31")));
    assert_eq!(last_day_of_month(2026, 13), None);
    assert_eq!(last_day_of_month(2026, 0), None);

    assert_eq!(d("2026-09-15").last_day_of_month(), d("2026-09-30"));
    assert_eq!(d("2026-12-15").first_of_next_month(), Some(d("2027-01-01")));
}

// ── Enumeration ─────────────────────────────────────────────────────────────

#[test]
fn enumerate_includes_both_ends() {
    let dates: Vec<String> = enumerate_dates(d("2026-01-30"), d("2026-02-02"))
        .map(|date| date.to_string())
        .collect();
    assert_eq!(dates, ["2026-01-30", "2026-01-31", "2026-02-01", "2026-02-02"]);
}

#[test]
fn enumerate_single_day_and_inverted() {
    assert_eq!(enumerate_dates(d("2026-01-01"), d("2026-01-01")).count(), 1);
    assert_eq!(enumerate_dates(d("2026-01-02"), d("2026-01-01")).count(), 0);
}

#[test]
fn enumeration_is_restartable() {
    let iter = enumerate_dates(d("2026-01-01"), d("2026-01-10"));
    assert_eq!(iter.len(), 10);
    let first: Vec<CalendarDate> = iter.clone().collect();
    let second: Vec<CalendarDate> = iter.collect();
    assert_eq!(first, second);
}

// ── Window helpers ──────────────────────────────────────────────────────────

#[test]
fn default_window_spans_two_years() {
    assert_eq!(default_window_end(d("2026-10-18")), Some(d("2028-10-18")));
    // 29 February has no counterpart two years later.
    assert_eq!(default_window_end(d("2028-02-29")), Some(d("2030-02-28")));
}
