//! Calendar week arithmetic.
//!
//! [`week_of`] maps any date to its Monday-anchored calendar week and ISO-8601
//! week number. [`WeekRange`] is the Monday to Saturday operating week a plan
//! covers.

use chrono::{Datelike, Days, NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of operating days in a plan week (Monday to Saturday).
pub const OPERATING_DAYS: u64 = 6;

/// Errors raised when explicit week bounds do not describe an operating week.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WeekBoundsError {
    #[error("week must start on a Monday, got {0}")]
    NotMonday(NaiveDate),
    #[error("week starting {start} must end on {expected}, got {found}")]
    EndMismatch {
        start: NaiveDate,
        expected: NaiveDate,
        found: NaiveDate,
    },
    #[error("date out of supported range")]
    OutOfRange,
}

/// Calendar week containing a date.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct WeekInfo {
    /// Monday on or before the date.
    pub monday: NaiveDate,
    /// Sunday closing the calendar week.
    pub sunday: NaiveDate,
    /// ISO-8601 week number (1..=53).
    pub iso_week: u32,
    /// Year the ISO week belongs to, which differs from `monday.year()` around
    /// the new year.
    pub iso_year: i32,
}

/// Returns the calendar week of `date`.
///
/// Sunday belongs to the week of the preceding Monday. The week number is
/// taken from the Thursday of the week: week 1 of a year is the week holding
/// that year's first Thursday.
///
/// # Panics
///
/// Panics for dates within a week of [`NaiveDate::MIN`] or [`NaiveDate::MAX`];
/// [`try_week_of`] is the fallible variant.
pub fn week_of(date: NaiveDate) -> WeekInfo {
    try_week_of(date).unwrap_or_else(|| panic!("no complete calendar week around {date}"))
}

/// Same as [`week_of`], `None` when the week runs past the supported calendar.
pub fn try_week_of(date: NaiveDate) -> Option<WeekInfo> {
    let offset = u64::from(date.weekday().num_days_from_monday());
    let monday = date.checked_sub_days(Days::new(offset))?;
    let thursday = monday.checked_add_days(Days::new(3))?;

    Some(WeekInfo {
        monday,
        sunday: monday.checked_add_days(Days::new(6))?,
        iso_week: thursday.ordinal().div_ceil(7),
        iso_year: thursday.year(),
    })
}

#[derive(Deserialize)]
struct RawWeekRange {
    week_start: NaiveDate,
    week_end: NaiveDate,
}

/// Monday to Saturday operating week targeted by a plan.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawWeekRange")]
pub struct WeekRange {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub iso_week: u32,
}

impl WeekRange {
    /// Operating week containing `date`. A Sunday maps to the week that just
    /// ended.
    ///
    /// # Panics
    ///
    /// Same limits as [`week_of`]; see [`WeekRange::try_containing`].
    pub fn containing(date: NaiveDate) -> Self {
        Self::try_containing(date)
            .unwrap_or_else(|| panic!("no complete calendar week around {date}"))
    }

    /// Operating week containing `date`, `None` near the calendar limits.
    pub fn try_containing(date: NaiveDate) -> Option<Self> {
        let info = try_week_of(date)?;
        Some(Self {
            week_start: info.monday,
            week_end: info.monday.checked_add_days(Days::new(OPERATING_DAYS - 1))?,
            iso_week: info.iso_week,
        })
    }

    /// Operating week starting on `monday`.
    pub fn starting(monday: NaiveDate) -> Result<Self, WeekBoundsError> {
        if monday.weekday().num_days_from_monday() != 0 {
            return Err(WeekBoundsError::NotMonday(monday));
        }
        Self::try_containing(monday).ok_or(WeekBoundsError::OutOfRange)
    }

    /// Validates an explicit start/end pair as an operating week.
    pub fn from_bounds(start: NaiveDate, end: NaiveDate) -> Result<Self, WeekBoundsError> {
        let week = Self::starting(start)?;
        if week.week_end != end {
            return Err(WeekBoundsError::EndMismatch {
                start,
                expected: week.week_end,
                found: end,
            });
        }
        Ok(week)
    }

    /// Default week offered by the plan wizard: the next Monday on or after
    /// `today`.
    pub fn upcoming(today: NaiveDate) -> Option<Self> {
        let until_monday = (7 - u64::from(today.weekday().num_days_from_monday())) % 7;
        Self::try_containing(today.checked_add_days(Days::new(until_monday))?)
    }

    /// The week `weeks` whole weeks away from this one. `None` when the result
    /// leaves the supported calendar.
    pub fn offset(&self, weeks: i64) -> Option<Self> {
        let start = self
            .week_start
            .checked_add_signed(TimeDelta::try_weeks(weeks)?)?;
        Self::try_containing(start)
    }

    /// Whether `date` falls on one of the operating days of this week.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.week_start <= date && date <= self.week_end
    }

    /// The six operating dates, Monday first.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (0..OPERATING_DAYS).map(|offset| self.week_start + Days::new(offset))
    }
}

impl TryFrom<RawWeekRange> for WeekRange {
    type Error = WeekBoundsError;

    fn try_from(raw: RawWeekRange) -> Result<Self, Self::Error> {
        Self::from_bounds(raw.week_start, raw.week_end)
    }
}
