//! One-stop planning view for a scan window.
//!
//! Computes the window's holidays, then the vacant periods left once the
//! caller's occupied ranges are removed. This is the shape the calendar
//! screen consumes: holidays and vacant periods side by side.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::date::CalendarDate;
use crate::error::Result;
use crate::holiday::{holiday_dates, holidays_in_range, Holiday};
use crate::occupancy::DateRange;
use crate::vacancy::{calculate_vacant_periods_with, VacancyOptions, VacantPeriod};

/// Holidays and vacant periods for one scan window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanningCalendar {
    pub range_start: CalendarDate,
    pub range_end: CalendarDate,
    /// Holidays in the window, sorted by date.
    pub holidays: Vec<Holiday>,
    /// Vacant periods in the window, sorted by start date.
    pub vacant_periods: Vec<VacantPeriod>,
    /// How many of `vacant_periods` are long weekends.
    pub long_weekends: usize,
}

/// Build the planning calendar for `[range_start, range_end]`.
///
/// Holidays come from [`holidays_in_range`]; their dates feed the vacancy
/// filter and the long-weekend classification.
///
/// # Errors
/// Returns `EngineError::UnsupportedYear` when the window touches a year
/// the holiday calculator does not cover.
pub fn build_planning_calendar(
    occupied_ranges: &[DateRange],
    range_start: CalendarDate,
    range_end: CalendarDate,
    options: &VacancyOptions,
) -> Result<PlanningCalendar> {
    let holidays = holidays_in_range(range_start, range_end)?;
    let dates = holiday_dates(&holidays);

    let vacant_periods =
        calculate_vacant_periods_with(occupied_ranges, &dates, range_start, range_end, options);
    let long_weekends = vacant_periods.iter().filter(|p| p.is_long_weekend).count();

    debug!(
        holidays = holidays.len(),
        vacant_periods = vacant_periods.len(),
        long_weekends,
        "built planning calendar"
    );

    Ok(PlanningCalendar {
        range_start,
        range_end,
        holidays,
        vacant_periods,
        long_weekends,
    })
}
