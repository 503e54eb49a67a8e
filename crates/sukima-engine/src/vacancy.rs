//! Vacant-period detection: split free runs, filter them, classify them.
//!
//! The pipeline is fixed:
//!
//! 1. Flatten the occupied ranges into a date set (under
//!    [`VacancyPolicy::DaysOffOnly`], working weekdays are occupied too).
//! 2. Find the maximal free runs in the scan window.
//! 3. Cut every run at month boundaries.
//! 4. Cut every month chunk into pieces of at most [`MAX_VACANT_DAYS`].
//! 5. Drop pieces shorter than `min_days` or without any weekend/holiday.
//! 6. Flag the survivors that are long weekends.
//!
//! Splitting happens before filtering, so a short remainder left by a split
//! is judged on its own and never merged back into a neighbour.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::date::{days_between, CalendarDate};
use crate::occupancy::{
    contains_holiday, contains_weekend, detect_gaps, occupied_dates_within, workday_dates,
    DateRange, Gap,
};

/// Longest vacant period ever emitted, in days.
pub const MAX_VACANT_DAYS: i64 = 30;

/// Default minimum length of a vacant period, in days.
pub const DEFAULT_MIN_DAYS: u32 = 3;

/// Which unoccupied dates may form a vacant period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VacancyPolicy {
    /// Only weekends and holidays; a working weekday always breaks a run.
    #[default]
    DaysOffOnly,
    /// Any date not covered by an occupied range.
    AnyFreeDay,
}

/// Tunables for [`calculate_vacant_periods_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VacancyOptions {
    /// Shortest period kept, in days.
    pub min_days: u32,
    pub policy: VacancyPolicy,
}

impl Default for VacancyOptions {
    fn default() -> Self {
        Self {
            min_days: DEFAULT_MIN_DAYS,
            policy: VacancyPolicy::default(),
        }
    }
}

impl VacancyOptions {
    pub fn with_min_days(min_days: u32) -> Self {
        Self {
            min_days,
            ..Self::default()
        }
    }
}

/// A free run of dates usable for a trip.
///
/// Always within one calendar month and at most [`MAX_VACANT_DAYS`] long.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VacantPeriod {
    pub start_date: CalendarDate,
    pub end_date: CalendarDate,
    /// Inclusive day count of `[start_date, end_date]`.
    pub days: u32,
    pub is_long_weekend: bool,
}

impl VacantPeriod {
    fn new(start: CalendarDate, end: CalendarDate, holidays: &BTreeSet<CalendarDate>) -> Self {
        Self {
            start_date: start,
            end_date: end,
            days: days_between(start, end) as u32,
            is_long_weekend: is_long_weekend(start, end, holidays),
        }
    }
}

/// Cut a gap at every month boundary it crosses.
///
/// A gap inside one month comes back unchanged.
pub fn split_by_month(gap: Gap) -> Vec<Gap> {
    let mut chunks = Vec::new();
    if gap.start > gap.end {
        return chunks;
    }

    let mut start = gap.start;
    loop {
        let month_end = start.last_day_of_month();
        if month_end >= gap.end {
            chunks.push(Gap {
                start,
                end: gap.end,
            });
            break;
        }
        chunks.push(Gap {
            start,
            end: month_end,
        });
        start = month_end.succ();
    }
    chunks
}

/// Cut a gap into consecutive windows of at most `max_days`; the last
/// window takes whatever remains.
pub fn split_by_max_days(gap: Gap, max_days: i64) -> Vec<Gap> {
    let mut chunks = Vec::new();
    if gap.start > gap.end {
        return chunks;
    }

    let step = max_days.max(1) - 1;
    let mut start = gap.start;
    loop {
        let end = start.add_days(step).min(gap.end);
        chunks.push(Gap { start, end });
        if end >= gap.end {
            break;
        }
        start = end.succ();
    }
    chunks
}

/// At least `min_days` long and containing a weekend day or a holiday.
pub fn is_valid_vacant_period(
    start: CalendarDate,
    end: CalendarDate,
    holidays: &BTreeSet<CalendarDate>,
    min_days: u32,
) -> bool {
    days_between(start, end) >= i64::from(min_days)
        && (contains_weekend(start, end) || contains_holiday(start, end, holidays))
}

/// A 3-5 day run holding both a weekend day and a holiday.
///
/// Runs of six days or more (Golden Week and the like) are never long
/// weekends, and neither is a plain weekend.
pub fn is_long_weekend(start: CalendarDate, end: CalendarDate, holidays: &BTreeSet<CalendarDate>) -> bool {
    let days = days_between(start, end);
    if !(3..=5).contains(&days) {
        return false;
    }
    contains_weekend(start, end) && contains_holiday(start, end, holidays)
}

/// Vacant periods in `[range_start, range_end]` under the default
/// days-off policy.
///
/// `holidays` is the caller's holiday-date set, normally from
/// [`crate::holiday::holiday_dates`].
pub fn calculate_vacant_periods(
    occupied_ranges: &[DateRange],
    holidays: &BTreeSet<CalendarDate>,
    range_start: CalendarDate,
    range_end: CalendarDate,
    min_days: u32,
) -> Vec<VacantPeriod> {
    let options = VacancyOptions::with_min_days(min_days);
    calculate_vacant_periods_with(occupied_ranges, holidays, range_start, range_end, &options)
}

/// Vacant periods in `[range_start, range_end]`, sorted ascending.
///
/// # Arguments
///
/// * `occupied_ranges` — Events and blocked periods; may overlap or extend
///   past the window.
/// * `holidays` — Dates that count as holidays for filtering and
///   classification.
/// * `range_start`, `range_end` — The scan window, both ends included.
/// * `options` — Minimum length and which dates may be vacant.
pub fn calculate_vacant_periods_with(
    occupied_ranges: &[DateRange],
    holidays: &BTreeSet<CalendarDate>,
    range_start: CalendarDate,
    range_end: CalendarDate,
    options: &VacancyOptions,
) -> Vec<VacantPeriod> {
    let mut occupied = occupied_dates_within(occupied_ranges, range_start, range_end);
    if options.policy == VacancyPolicy::DaysOffOnly {
        occupied.extend(workday_dates(range_start, range_end, holidays));
    }

    let raw_gaps = detect_gaps(&occupied, range_start, range_end);

    let chunks: Vec<Gap> = raw_gaps
        .iter()
        .flat_map(|&gap| split_by_month(gap))
        .flat_map(|chunk| split_by_max_days(chunk, MAX_VACANT_DAYS))
        .collect();

    let periods: Vec<VacantPeriod> = chunks
        .iter()
        .filter(|chunk| {
            let keep = is_valid_vacant_period(chunk.start, chunk.end, holidays, options.min_days);
            if !keep {
                trace!(start = %chunk.start, end = %chunk.end, "dropped chunk");
            }
            keep
        })
        .map(|chunk| VacantPeriod::new(chunk.start, chunk.end, holidays))
        .collect();

    debug!(
        range_start = %range_start,
        range_end = %range_end,
        policy = ?options.policy,
        raw_gaps = raw_gaps.len(),
        chunks = chunks.len(),
        kept = periods.len(),
        "computed vacant periods"
    );
    periods
}
