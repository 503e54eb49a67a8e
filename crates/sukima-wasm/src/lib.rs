//! WASM bindings for sukima-engine.
//!
//! Exposes the holiday calculator, vacant-period detection and the planning
//! calendar to JavaScript via `wasm-bindgen`. All complex types are passed as
//! JSON strings; errors surface as string exceptions.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p sukima-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir packages/sukima-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/sukima_wasm.wasm
//! ```

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use sukima_engine::date::{default_window_end, CalendarDate};
use sukima_engine::{DateRange, VacancyOptions};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Input DTOs
// ---------------------------------------------------------------------------

/// Occupied range as passed from JavaScript: `{startDate, endDate}`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RangeInput {
    start_date: String,
    end_date: String,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_date(s: &str) -> Result<CalendarDate, String> {
    CalendarDate::parse(s).map_err(|e| e.to_string())
}

/// Parse and validate a scan window. An inverted window is rejected here so
/// the engine never sees one.
fn parse_window(start: &str, end: &str) -> Result<DateRange, String> {
    DateRange::new(parse_date(start)?, parse_date(end)?).map_err(|e| e.to_string())
}

/// Convert a JSON array of `{startDate, endDate}` objects into validated ranges.
fn parse_ranges_json(json: &str) -> Result<Vec<DateRange>, String> {
    let inputs: Vec<RangeInput> =
        serde_json::from_str(json).map_err(|e| format!("Invalid occupied ranges JSON: {}", e))?;

    inputs
        .iter()
        .map(|r| DateRange::parse(&r.start_date, &r.end_date).map_err(|e| e.to_string()))
        .collect()
}

/// Convert a JSON array of `YYYY-MM-DD` strings into a date set.
fn parse_dates_json(json: &str) -> Result<BTreeSet<CalendarDate>, String> {
    let dates: Vec<String> =
        serde_json::from_str(json).map_err(|e| format!("Invalid holiday dates JSON: {}", e))?;
    dates.iter().map(|s| parse_date(s)).collect()
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

fn options(min_days: Option<u32>) -> VacancyOptions {
    min_days
        .map(VacancyOptions::with_min_days)
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Plain-Rust implementations (testable without a JS host)
// ---------------------------------------------------------------------------

fn holidays_in_range_impl(range_start: &str, range_end: &str) -> Result<String, String> {
    let window = parse_window(range_start, range_end)?;
    let holidays = sukima_engine::holidays_in_range(window.start_date, window.end_date)
        .map_err(|e| e.to_string())?;
    to_json(&holidays)
}

fn calculate_vacant_periods_impl(
    occupied_json: &str,
    holiday_dates_json: &str,
    range_start: &str,
    range_end: &str,
    min_days: Option<u32>,
) -> Result<String, String> {
    let occupied = parse_ranges_json(occupied_json)?;
    let holidays = parse_dates_json(holiday_dates_json)?;
    let window = parse_window(range_start, range_end)?;

    let periods = sukima_engine::calculate_vacant_periods_with(
        &occupied,
        &holidays,
        window.start_date,
        window.end_date,
        &options(min_days),
    );
    to_json(&periods)
}

fn planning_calendar_impl(
    occupied_json: &str,
    range_start: &str,
    range_end: Option<&str>,
    min_days: Option<u32>,
) -> Result<String, String> {
    let occupied = parse_ranges_json(occupied_json)?;
    let start = parse_date(range_start)?;
    let end = match range_end {
        Some(end) => parse_date(end)?,
        None => default_window_end(start)
            .ok_or_else(|| format!("No default window end for {}", start))?,
    };
    let window = DateRange::new(start, end).map_err(|e| e.to_string())?;

    let calendar = sukima_engine::build_planning_calendar(
        &occupied,
        window.start_date,
        window.end_date,
        &options(min_days),
    )
    .map_err(|e| e.to_string())?;
    to_json(&calendar)
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Japanese public holidays in `[rangeStart, rangeEnd]`.
///
/// Returns a JSON string containing an array of `{date, title, kind}`
/// objects sorted by date.
#[wasm_bindgen(js_name = "holidaysInRange")]
pub fn holidays_in_range(range_start: &str, range_end: &str) -> Result<String, JsValue> {
    holidays_in_range_impl(range_start, range_end).map_err(|e| JsValue::from_str(&e))
}

/// Vacant periods between occupied ranges.
///
/// `occupied_json` must be a JSON array of `{startDate, endDate}` objects and
/// `holiday_dates_json` a JSON array of `YYYY-MM-DD` strings. `min_days`
/// defaults to 3. Returns a JSON string containing an array of
/// `{startDate, endDate, days, isLongWeekend}` objects.
#[wasm_bindgen(js_name = "calculateVacantPeriods")]
pub fn calculate_vacant_periods(
    occupied_json: &str,
    holiday_dates_json: &str,
    range_start: &str,
    range_end: &str,
    min_days: Option<u32>,
) -> Result<String, JsValue> {
    calculate_vacant_periods_impl(
        occupied_json,
        holiday_dates_json,
        range_start,
        range_end,
        min_days,
    )
    .map_err(|e| JsValue::from_str(&e))
}

/// Holidays and vacant periods for one window, computed together.
///
/// `range_end` defaults to two years after `range_start`.
#[wasm_bindgen(js_name = "planningCalendar")]
pub fn planning_calendar(
    occupied_json: &str,
    range_start: &str,
    range_end: Option<String>,
    min_days: Option<u32>,
) -> Result<String, JsValue> {
    planning_calendar_impl(occupied_json, range_start, range_end.as_deref(), min_days)
        .map_err(|e| JsValue::from_str(&e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn holidays_roundtrip_through_json() {
        let json = holidays_in_range_impl("2026-05-01", "2026-05-10").unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 4);
        assert_eq!(value[3]["date"], "2026-05-06");
    }

    #[test]
    fn vacant_periods_with_default_min_days() {
        let json = calculate_vacant_periods_impl("[]", r#"["2026-01-12"]"#, "2026-01-05", "2026-01-16", None)
            .unwrap();
        assert_eq!(
            json,
            r#"[{"startDate":"2026-01-10","endDate":"2026-01-12","days":3,"isLongWeekend":true}]"#
        );
    }

    #[test]
    fn inverted_window_is_rejected() {
        let err = calculate_vacant_periods_impl("[]", "[]", "2026-02-01", "2026-01-01", Some(1))
            .unwrap_err();
        assert!(err.contains("Inverted range"));
    }

    #[test]
    fn inverted_occupied_range_is_rejected() {
        let occupied = r#"[{"startDate":"2026-01-10","endDate":"2026-01-09"}]"#;
        let err = calculate_vacant_periods_impl(occupied, "[]", "2026-01-01", "2026-01-31", None)
            .unwrap_err();
        assert!(err.contains("Inverted range"));
    }

    #[test]
    fn malformed_holiday_date_is_rejected() {
        let err = calculate_vacant_periods_impl("[]", r#"["2026/01/12"]"#, "2026-01-01", "2026-01-31", None)
            .unwrap_err();
        assert!(err.contains("Invalid date '2026/01/12'"));
    }

    #[test]
    fn planning_calendar_defaults_window_end() {
        let json = planning_calendar_impl("[]", "2026-10-18", None, Some(3)).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["rangeEnd"], "2028-10-18");
        assert!(value["longWeekends"].as_u64().unwrap() > 0);
    }
}
