//! Expand month/day anniversaries into dated entries.
//!
//! Anniversaries (birthdays, wedding days) are stored without a year. For a
//! display window they are repeated once per year the window touches.

use serde::{Deserialize, Serialize};

use crate::date::CalendarDate;

/// An anniversary stored as month and day only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnniversaryEntry {
    pub id: i64,
    pub title: String,
    pub month: u32,
    pub day: u32,
    #[serde(default)]
    pub memo: String,
}

/// An anniversary pinned to a concrete date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpandedAnniversary {
    #[serde(flatten)]
    pub entry: AnniversaryEntry,
    pub date: CalendarDate,
}

/// Repeat every entry for each year in the window, keeping only the dates
/// inside `[range_start, range_end]`.
///
/// Output is grouped by entry in input order, then by year. A month/day that
/// does not exist in a given year (29 February in a common year) is skipped
/// for that year.
pub fn expand_anniversaries(
    entries: &[AnniversaryEntry],
    range_start: CalendarDate,
    range_end: CalendarDate,
) -> Vec<ExpandedAnniversary> {
    let years = range_start.year()..=range_end.year();

    entries
        .iter()
        .flat_map(|entry| {
            years.clone().filter_map(move |year| {
                let date = CalendarDate::new(year, entry.month, entry.day)?;
                (range_start <= date && date <= range_end).then(|| ExpandedAnniversary {
                    entry: entry.clone(),
                    date,
                })
            })
        })
        .collect()
}
