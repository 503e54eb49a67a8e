//! Japanese national holiday calculator.
//!
//! A year's holidays are built in three layers: the base rules (fixed dates,
//! "Happy Monday" holidays and the two equinoxes), then substitute holidays
//! for base holidays that fall on a Sunday, then citizens' holidays for
//! weekdays sandwiched between two holidays. Each derived layer is a fold
//! over the previous list, so later insertions see the ones made before them.

use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::date::CalendarDate;
use crate::error::{EngineError, Result};

/// Years for which the equinox approximation holds.
pub const SUPPORTED_YEARS: RangeInclusive<i32> = 1980..=2099;

pub const SUBSTITUTE_TITLE: &str = "振替休日";
pub const CITIZENS_TITLE: &str = "国民の休日";

const FIXED_HOLIDAYS: [(&str, u32, u32); 10] = [
    ("元日", 1, 1),
    ("建国記念の日", 2, 11),
    ("天皇誕生日", 2, 23),
    ("昭和の日", 4, 29),
    ("憲法記念日", 5, 3),
    ("みどりの日", 5, 4),
    ("こどもの日", 5, 5),
    ("山の日", 8, 11),
    ("文化の日", 11, 3),
    ("勤労感謝の日", 11, 23),
];

/// (title, month, n): the n-th Monday of the month.
const HAPPY_MONDAYS: [(&str, u32, u32); 4] = [
    ("成人の日", 1, 2),
    ("海の日", 7, 3),
    ("敬老の日", 9, 3),
    ("スポーツの日", 10, 2),
];

/// Which rule produced a holiday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HolidayKind {
    Fixed,
    HappyMonday,
    Equinox,
    Substitute,
    Citizens,
}

/// A single public holiday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    pub date: CalendarDate,
    pub title: String,
    pub kind: HolidayKind,
}

impl Holiday {
    fn new(date: CalendarDate, title: &str, kind: HolidayKind) -> Self {
        Self {
            date,
            title: title.to_string(),
            kind,
        }
    }
}

/// Date of the `n`-th Monday (1-based) of `month` in `year`.
///
/// With `w` the weekday of the 1st (0 = Sunday), the first Monday is day
/// `1 + (8 - w) % 7`; each further Monday is seven days on.
pub fn nth_monday(year: i32, month: u32, n: u32) -> Option<CalendarDate> {
    let first = CalendarDate::new(year, month, 1)?;
    let w = first.weekday().num_days_from_sunday();
    let day = 1 + (8 - w) % 7 + n.checked_sub(1)? * 7;
    CalendarDate::new(year, month, day)
}

fn equinox_day(base: f64, year: i32) -> u32 {
    let offset = year - 1980;
    (base + 0.242194 * f64::from(offset) - f64::from(offset.div_euclid(4))).floor() as u32
}

/// Day of March on which 春分の日 falls.
pub fn spring_equinox_day(year: i32) -> u32 {
    equinox_day(20.8431, year)
}

/// Day of September on which 秋分の日 falls.
pub fn autumn_equinox_day(year: i32) -> u32 {
    equinox_day(23.2488, year)
}

fn check_year(year: i32) -> Result<()> {
    if SUPPORTED_YEARS.contains(&year) {
        Ok(())
    } else {
        Err(EngineError::UnsupportedYear(year))
    }
}

/// Fixed, Happy Monday and equinox holidays for one year, unsorted.
///
/// # Errors
/// Returns `EngineError::UnsupportedYear` outside [`SUPPORTED_YEARS`].
pub fn base_holidays(year: i32) -> Result<Vec<Holiday>> {
    check_year(year)?;

    let fixed = FIXED_HOLIDAYS.iter().filter_map(|&(title, month, day)| {
        CalendarDate::new(year, month, day).map(|date| Holiday::new(date, title, HolidayKind::Fixed))
    });

    let happy_mondays = HAPPY_MONDAYS.iter().filter_map(|&(title, month, n)| {
        nth_monday(year, month, n).map(|date| Holiday::new(date, title, HolidayKind::HappyMonday))
    });

    let equinoxes = [
        ("春分の日", 3, spring_equinox_day(year)),
        ("秋分の日", 9, autumn_equinox_day(year)),
    ]
    .into_iter()
    .filter_map(|(title, month, day)| {
        CalendarDate::new(year, month, day).map(|date| Holiday::new(date, title, HolidayKind::Equinox))
    });

    Ok(fixed.chain(happy_mondays).chain(equinoxes).collect())
}

fn sorted(mut holidays: Vec<Holiday>) -> Vec<Holiday> {
    holidays.sort_by_key(|h| h.date);
    holidays.dedup_by_key(|h| h.date);
    holidays
}

/// Add a 振替休日 for every holiday that falls on a Sunday.
///
/// The substitute goes on the first following date that is not already a
/// holiday, counting substitutes inserted earlier in the same pass.
/// Input must be sorted ascending; output is sorted ascending.
pub fn with_substitute_holidays(holidays: Vec<Holiday>) -> Vec<Holiday> {
    let taken: BTreeSet<CalendarDate> = holidays.iter().map(|h| h.date).collect();
    let sundays: Vec<CalendarDate> = holidays
        .iter()
        .map(|h| h.date)
        .filter(CalendarDate::is_sunday)
        .collect();

    let (result, _) = sundays
        .into_iter()
        .fold((holidays, taken), |(mut acc, mut taken), sunday| {
            let mut substitute = sunday.succ();
            while taken.contains(&substitute) {
                substitute = substitute.succ();
            }
            taken.insert(substitute);
            acc.push(Holiday::new(substitute, SUBSTITUTE_TITLE, HolidayKind::Substitute));
            (acc, taken)
        });

    sorted(result)
}

/// Add a 国民の休日 for every non-holiday date `d + 1` where both `d` and
/// `d + 2` are holidays, unless `d + 1` is a Sunday.
///
/// A Saturday between two holidays is promoted too.
/// Input must be sorted ascending; output is sorted ascending.
pub fn with_citizens_holidays(holidays: Vec<Holiday>) -> Vec<Holiday> {
    let taken: BTreeSet<CalendarDate> = holidays.iter().map(|h| h.date).collect();
    let anchors: Vec<CalendarDate> = holidays.iter().map(|h| h.date).collect();

    let (result, _) = anchors
        .into_iter()
        .fold((holidays, taken), |(mut acc, mut taken), date| {
            let between = date.succ();
            let two_days_later = date.add_days(2);
            if taken.contains(&two_days_later) && !taken.contains(&between) && !between.is_sunday() {
                taken.insert(between);
                acc.push(Holiday::new(between, CITIZENS_TITLE, HolidayKind::Citizens));
            }
            (acc, taken)
        });

    sorted(result)
}

/// Complete holiday list for every year in `years`, sorted ascending.
///
/// # Errors
/// Returns `EngineError::UnsupportedYear` for the first year outside
/// [`SUPPORTED_YEARS`].
pub fn holidays_for_years(years: RangeInclusive<i32>) -> Result<Vec<Holiday>> {
    let mut base = Vec::new();
    for year in years {
        base.extend(base_holidays(year)?);
    }

    let holidays = with_citizens_holidays(with_substitute_holidays(sorted(base)));
    Ok(holidays)
}

/// Complete holiday list for a single year, sorted ascending.
///
/// # Errors
/// Returns `EngineError::UnsupportedYear` outside [`SUPPORTED_YEARS`].
pub fn holidays_for_year(year: i32) -> Result<Vec<Holiday>> {
    holidays_for_years(year..=year)
}

/// Every holiday with `range_start <= date <= range_end`, sorted ascending.
///
/// The range may span several years. An inverted range yields no holidays.
///
/// # Errors
/// Returns `EngineError::UnsupportedYear` if the range touches a year
/// outside [`SUPPORTED_YEARS`].
pub fn holidays_in_range(range_start: CalendarDate, range_end: CalendarDate) -> Result<Vec<Holiday>> {
    if range_start > range_end {
        return Ok(Vec::new());
    }

    let holidays: Vec<Holiday> = holidays_for_years(range_start.year()..=range_end.year())?
        .into_iter()
        .filter(|h| h.date >= range_start && h.date <= range_end)
        .collect();

    debug!(
        range_start = %range_start,
        range_end = %range_end,
        count = holidays.len(),
        "computed holidays"
    );
    Ok(holidays)
}

/// The set of holiday dates, for membership tests.
pub fn holiday_dates(holidays: &[Holiday]) -> BTreeSet<CalendarDate> {
    holidays.iter().map(|h| h.date).collect()
}
