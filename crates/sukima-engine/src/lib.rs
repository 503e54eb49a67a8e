//! # sukima-engine
//!
//! Calendar date engine for family trip planning.
//!
//! Derives the complete set of Japanese national holidays for any span of
//! years (including substitute and citizens' holidays), and finds the free
//! runs of days off left between already-occupied date ranges. All dates are
//! naive calendar dates: no time of day, no timezone.
//!
//! ## Modules
//!
//! - [`date`] — `CalendarDate` and primitive date arithmetic
//! - [`holiday`] — Japanese public holiday calculator
//! - [`occupancy`] — Occupied-date sets and gap detection
//! - [`vacancy`] — Vacant-period splitting, filtering and long-weekend classification
//! - [`planner`] — Holidays and vacant periods for one scan window
//! - [`anniversary`] — Expand month/day anniversaries into dated entries
//! - [`error`] — Error types

pub mod anniversary;
pub mod date;
pub mod error;
pub mod holiday;
pub mod occupancy;
pub mod planner;
pub mod vacancy;

pub use date::CalendarDate;
pub use error::EngineError;
pub use holiday::{holidays_in_range, Holiday, HolidayKind};
pub use occupancy::DateRange;
pub use planner::{build_planning_calendar, PlanningCalendar};
pub use vacancy::{
    calculate_vacant_periods, calculate_vacant_periods_with, VacancyOptions, VacancyPolicy,
    VacantPeriod,
};
