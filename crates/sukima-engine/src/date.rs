//! Naive calendar dates and the primitive arithmetic the rest of the engine
//! is built on.
//!
//! A [`CalendarDate`] wraps `chrono::NaiveDate`: no time of day, no timezone,
//! and every operation returns a fresh value. The textual form is always
//! `YYYY-MM-DD`, both for `Display` and for serde.

use std::fmt;
use std::iter::FusedIterator;
use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// A naive calendar date, serialized as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Build a date from its components. Returns `None` for an impossible
    /// date such as 2026-02-30 or month 13.
    pub fn new(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Parse a strict `YYYY-MM-DD` string.
    ///
    /// Exactly four year digits, two month digits and two day digits are
    /// required; `2026-1-5` and `2026-01-05T00:00` are both rejected.
    ///
    /// # Errors
    /// Returns `EngineError::Parse` when the string is malformed or names a
    /// date that does not exist.
    pub fn parse(s: &str) -> Result<Self> {
        let bytes = s.as_bytes();
        let well_formed = bytes.len() == 10
            && bytes[4] == b'-'
            && bytes[7] == b'-'
            && bytes
                .iter()
                .enumerate()
                .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
        if !well_formed {
            return Err(EngineError::Parse(s.to_string()));
        }

        let field = |range: std::ops::Range<usize>| s[range].parse::<u32>().ok();
        match (field(0..4), field(5..7), field(8..10)) {
            (Some(year), Some(month), Some(day)) => {
                Self::new(year as i32, month, day).ok_or_else(|| EngineError::Parse(s.to_string()))
            }
            _ => Err(EngineError::Parse(s.to_string())),
        }
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// Saturday or Sunday.
    pub fn is_weekend(&self) -> bool {
        matches!(self.weekday(), Weekday::Sat | Weekday::Sun)
    }

    pub fn is_sunday(&self) -> bool {
        self.weekday() == Weekday::Sun
    }

    /// Shift by `n` days in either direction.
    ///
    /// Saturates at chrono's representable range instead of panicking.
    pub fn add_days(&self, n: i64) -> Self {
        let shifted = if n >= 0 {
            self.0.checked_add_days(Days::new(n.unsigned_abs()))
        } else {
            self.0.checked_sub_days(Days::new(n.unsigned_abs()))
        };
        Self(shifted.unwrap_or(if n >= 0 { NaiveDate::MAX } else { NaiveDate::MIN }))
    }

    /// The day after this one.
    pub fn succ(&self) -> Self {
        self.add_days(1)
    }

    /// Last day of this date's month.
    pub fn last_day_of_month(&self) -> Self {
        last_day_of_month(self.year(), self.month()).unwrap_or(*self)
    }

    /// The 1st of the month following this date's month.
    pub fn first_of_next_month(&self) -> Option<Self> {
        let (year, month) = if self.month() == 12 {
            (self.year() + 1, 1)
        } else {
            (self.year(), self.month() + 1)
        };
        Self::new(year, month, 1)
    }

    /// Same month and day `years` later. 29 February lands on 28 February
    /// in a common year.
    pub fn add_years_clamped(&self, years: i32) -> Option<Self> {
        let year = self.year().checked_add(years)?;
        Self::new(year, self.month(), self.day())
            .or_else(|| last_day_of_month(year, self.month()))
    }

    /// Shares year and month with `other`.
    pub fn same_month(&self, other: &Self) -> bool {
        self.year() == other.year() && self.month() == other.month()
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year(), self.month(), self.day())
    }
}

impl FromStr for CalendarDate {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CalendarDate {
    type Error = EngineError;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<CalendarDate> for String {
    fn from(date: CalendarDate) -> Self {
        date.to_string()
    }
}

/// Number of days in `[start, end]`, counting both ends.
///
/// `days_between(d, d) == 1`. An inverted pair yields zero or a negative count.
pub fn days_between(start: CalendarDate, end: CalendarDate) -> i64 {
    (end.0 - start.0).num_days() + 1
}

/// Last day of `month` in `year`, or `None` for a month outside 1-12.
pub fn last_day_of_month(year: i32, month: u32) -> Option<CalendarDate> {
    if !(1..=12).contains(&month) {
        return None;
    }
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    next_first?.pred_opt().map(CalendarDate)
}

/// Every date from `start` to `end` inclusive; empty when `start > end`.
pub fn enumerate_dates(start: CalendarDate, end: CalendarDate) -> DateIter {
    DateIter {
        next: (start <= end).then_some(start),
        end,
    }
}

/// The default end of a scan window opened at `start`: two years later.
pub fn default_window_end(start: CalendarDate) -> Option<CalendarDate> {
    start.add_years_clamped(2)
}

/// Iterator over an inclusive run of dates.
///
/// Cloning gives an independent iterator from the current position, so a
/// range can be walked any number of times.
#[derive(Debug, Clone)]
pub struct DateIter {
    next: Option<CalendarDate>,
    end: CalendarDate,
}

impl Iterator for DateIter {
    type Item = CalendarDate;

    fn next(&mut self) -> Option<CalendarDate> {
        let current = self.next?;
        self.next = match current.0.succ_opt() {
            Some(succ) if current < self.end => Some(CalendarDate(succ)),
            _ => None,
        };
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self
            .next
            .map(|next| days_between(next, self.end).max(0) as usize)
            .unwrap_or(0);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for DateIter {}

impl FusedIterator for DateIter {}
