//! Occupied-date sets and gap detection.
//!
//! Occupied ranges (events, blocked periods) are flattened into a set of
//! dates, so overlapping and adjacent ranges merge without any interval
//! sorting. Gaps are then the maximal runs of dates in the scan window that
//! are absent from the set.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::date::{days_between, enumerate_dates, CalendarDate, DateIter};
use crate::error::{EngineError, Result};

/// An inclusive range of dates, `start_date <= end_date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: CalendarDate,
    pub end_date: CalendarDate,
}

impl DateRange {
    /// Validating constructor for callers at the input boundary.
    ///
    /// A single-day range (`start == end`) is valid.
    ///
    /// # Errors
    /// Returns `EngineError::InvertedRange` when `end_date < start_date`.
    pub fn new(start_date: CalendarDate, end_date: CalendarDate) -> Result<Self> {
        if end_date < start_date {
            return Err(EngineError::InvertedRange {
                start: start_date.to_string(),
                end: end_date.to_string(),
            });
        }
        Ok(Self {
            start_date,
            end_date,
        })
    }

    /// Parse both ends from `YYYY-MM-DD` strings and validate the order.
    ///
    /// # Errors
    /// Returns `EngineError::Parse` for a malformed date and
    /// `EngineError::InvertedRange` for an inverted pair.
    pub fn parse(start_date: &str, end_date: &str) -> Result<Self> {
        Self::new(start_date.parse()?, end_date.parse()?)
    }

    /// Inclusive day count.
    pub fn days(&self) -> i64 {
        days_between(self.start_date, self.end_date)
    }

    pub fn contains(&self, date: CalendarDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    pub fn dates(&self) -> DateIter {
        enumerate_dates(self.start_date, self.end_date)
    }

    /// The part of this range inside `[window_start, window_end]`, if any.
    pub fn clip(&self, window_start: CalendarDate, window_end: CalendarDate) -> Option<Self> {
        let start_date = self.start_date.max(window_start);
        let end_date = self.end_date.min(window_end);
        (start_date <= end_date).then_some(Self {
            start_date,
            end_date,
        })
    }
}

/// A maximal run of free dates found by [`detect_gaps`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gap {
    pub start: CalendarDate,
    pub end: CalendarDate,
}

impl Gap {
    pub fn days(&self) -> i64 {
        days_between(self.start, self.end)
    }
}

/// Every date covered by any of `ranges`, both ends included.
pub fn occupied_dates(ranges: &[DateRange]) -> BTreeSet<CalendarDate> {
    ranges.iter().fold(BTreeSet::new(), |mut occupied, range| {
        occupied.extend(range.dates());
        occupied
    })
}

/// Like [`occupied_dates`], but only the dates inside the window.
///
/// Ranges entirely outside the window are skipped without being walked.
pub fn occupied_dates_within(
    ranges: &[DateRange],
    window_start: CalendarDate,
    window_end: CalendarDate,
) -> BTreeSet<CalendarDate> {
    let clipped: Vec<DateRange> = ranges
        .iter()
        .filter_map(|r| r.clip(window_start, window_end))
        .collect();
    occupied_dates(&clipped)
}

/// Maximal runs of consecutive dates in `[range_start, range_end]` that are
/// not in `occupied`, in ascending order.
///
/// A free `range_start` opens a run immediately, and a run still open at
/// `range_end` closes exactly there. An inverted window yields no gaps.
pub fn detect_gaps(
    occupied: &BTreeSet<CalendarDate>,
    range_start: CalendarDate,
    range_end: CalendarDate,
) -> Vec<Gap> {
    let mut gaps = Vec::new();
    let mut open: Option<CalendarDate> = None;
    let mut previous = range_start;

    for date in enumerate_dates(range_start, range_end) {
        if occupied.contains(&date) {
            // Occupied day: close the current run at the day before.
            if let Some(start) = open.take() {
                gaps.push(Gap {
                    start,
                    end: previous,
                });
            }
        } else if open.is_none() {
            open = Some(date);
        }
        previous = date;
    }

    // Trailing run that reaches the end of the window.
    if let Some(start) = open {
        gaps.push(Gap {
            start,
            end: range_end,
        });
    }

    gaps
}

/// A weekend day or a date in `holidays`.
pub fn is_day_off(date: CalendarDate, holidays: &BTreeSet<CalendarDate>) -> bool {
    date.is_weekend() || holidays.contains(&date)
}

/// Working weekdays in `[range_start, range_end]`: neither weekend nor holiday.
pub fn workday_dates(
    range_start: CalendarDate,
    range_end: CalendarDate,
    holidays: &BTreeSet<CalendarDate>,
) -> BTreeSet<CalendarDate> {
    enumerate_dates(range_start, range_end)
        .filter(|&date| !is_day_off(date, holidays))
        .collect()
}

pub fn contains_weekend(start: CalendarDate, end: CalendarDate) -> bool {
    enumerate_dates(start, end).any(|date| date.is_weekend())
}

pub fn contains_holiday(
    start: CalendarDate,
    end: CalendarDate,
    holidays: &BTreeSet<CalendarDate>,
) -> bool {
    enumerate_dates(start, end).any(|date| holidays.contains(&date))
}
