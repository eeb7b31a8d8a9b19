//! Week grouping.
//!
//! Partitions classified days into computation weeks. A week starts on the
//! policy's `week_start_day` and is identified by its anchor date, so weeks
//! freely straddle month boundaries.

use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::error::{EngineError, EngineResult};
use crate::models::{DayClassification, weekday_index};

/// Days belonging to one computation week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekBucket {
    /// First date of the week.
    pub anchor: NaiveDate,
    /// The week's days in chronological order.
    pub days: Vec<DayClassification>,
}

impl WeekBucket {
    /// Last date of the week, or [`NaiveDate::MAX`] when the week runs past it.
    pub fn end(&self) -> NaiveDate {
        week_end(self.anchor)
    }
}

/// Returns the first date of the computation week containing `date`.
///
/// `offset = (weekday(date) - week_start + 7) % 7`, `anchor = date - offset`.
/// A week that starts before [`NaiveDate::MIN`] is anchored at `NaiveDate::MIN`.
///
/// # Examples
///
/// ```
/// use worktime_engine::calculation::week_anchor;
/// use chrono::{NaiveDate, Weekday};
///
/// let wed = NaiveDate::from_ymd_opt(2025, 9, 3).unwrap();
/// assert_eq!(week_anchor(wed, Weekday::Mon), NaiveDate::from_ymd_opt(2025, 9, 1).unwrap());
/// assert_eq!(week_anchor(wed, Weekday::Sun), NaiveDate::from_ymd_opt(2025, 8, 31).unwrap());
/// ```
pub fn week_anchor(date: NaiveDate, week_start: Weekday) -> NaiveDate {
    checked_week_anchor(date, week_start).unwrap_or(NaiveDate::MIN)
}

fn checked_week_anchor(date: NaiveDate, week_start: Weekday) -> Option<NaiveDate> {
    let day = u64::from(weekday_index(date.weekday()));
    let start = u64::from(weekday_index(week_start));
    let offset = (day + 7 - start) % 7;
    date.checked_sub_days(Days::new(offset))
}

/// Returns the last date of the week starting on `anchor`, saturating at [`NaiveDate::MAX`].
pub fn week_end(anchor: NaiveDate) -> NaiveDate {
    anchor.checked_add_days(Days::new(6)).unwrap_or(NaiveDate::MAX)
}

/// Groups days into weeks, ordered by anchor, each week sorted by date.
///
/// The sort is stable, so days sharing a date keep their input order.
pub fn group_by_week(days: Vec<DayClassification>, week_start: Weekday) -> Vec<WeekBucket> {
    let mut days = days;
    days.sort_by_key(|d| d.work_date);

    let mut buckets: Vec<WeekBucket> = Vec::new();
    for day in days {
        let anchor = week_anchor(day.work_date, week_start);
        match buckets.last_mut() {
            Some(bucket) if bucket.anchor == anchor => bucket.days.push(day),
            _ => buckets.push(WeekBucket {
                anchor,
                days: vec![day],
            }),
        }
    }
    buckets
}

/// Returns the first and last date of every week touching `year`-`month`.
///
/// Punches in this window are what a month's classification needs, including
/// adjoining-month days that share a week with the month's first or last day.
///
/// # Errors
///
/// Returns [`EngineError::InvalidMonth`] when the year/month is not a real month,
/// or when its first or last week runs past the representable date range.
///
/// # Examples
///
/// ```
/// use worktime_engine::calculation::month_window;
/// use chrono::{NaiveDate, Weekday};
///
/// // September 2024 starts on a Sunday and ends on a Monday.
/// let (from, to) = month_window(2024, 9, Weekday::Mon).unwrap();
/// assert_eq!(from, NaiveDate::from_ymd_opt(2024, 8, 26).unwrap());
/// assert_eq!(to, NaiveDate::from_ymd_opt(2024, 10, 6).unwrap());
///
/// let (from, to) = month_window(2024, 9, Weekday::Sun).unwrap();
/// assert_eq!(from, NaiveDate::from_ymd_opt(2024, 9, 1).unwrap());
/// assert_eq!(to, NaiveDate::from_ymd_opt(2024, 10, 5).unwrap());
/// ```
pub fn month_window(
    year: i32,
    month: u32,
    week_start: Weekday,
) -> EngineResult<(NaiveDate, NaiveDate)> {
    let invalid = || EngineError::InvalidMonth { year, month };

    let (first, last) = month_bounds(year, month)?;
    let from = checked_week_anchor(first, week_start).ok_or_else(invalid)?;
    let to = checked_week_anchor(last, week_start)
        .and_then(|anchor| anchor.checked_add_days(Days::new(6)))
        .ok_or_else(invalid)?;
    Ok((from, to))
}

/// Returns the first and last date of a calendar month.
pub fn month_bounds(year: i32, month: u32) -> EngineResult<(NaiveDate, NaiveDate)> {
    let invalid = || EngineError::InvalidMonth { year, month };

    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(invalid)?;
    let last = next_first.pred_opt().ok_or_else(invalid)?;

    Ok((first, last))
}
