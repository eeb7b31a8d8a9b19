//! Daily punch model.
//!
//! A [`DailyPunch`] is one employee's clock-in/clock-out record for a single
//! calendar date, as entered through time-entry screens.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Why a punch produced zero worked minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PunchSkipReason {
    /// No clock-in time was recorded.
    MissingStartTime,
    /// No clock-out time was recorded.
    MissingEndTime,
    /// The clock-out time is not after the clock-in time.
    EndNotAfterStart,
    /// The break is at least as long as the whole span.
    BreakExceedsSpan,
}

impl PunchSkipReason {
    /// Returns the warning code used in audit traces.
    pub fn code(&self) -> &'static str {
        match self {
            PunchSkipReason::MissingStartTime => "MISSING_START_TIME",
            PunchSkipReason::MissingEndTime => "MISSING_END_TIME",
            PunchSkipReason::EndNotAfterStart => "END_NOT_AFTER_START",
            PunchSkipReason::BreakExceedsSpan => "BREAK_EXCEEDS_SPAN",
        }
    }
}

/// Represents one day of time-punch data for an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPunch {
    /// The calendar date worked.
    pub work_date: NaiveDate,
    /// Clock-in time, if recorded.
    #[serde(default)]
    pub start_time: Option<NaiveTime>,
    /// Clock-out time, if recorded.
    #[serde(default)]
    pub end_time: Option<NaiveTime>,
    /// Unpaid break minutes subtracted from the span.
    #[serde(default)]
    pub break_minutes: u32,
}

impl DailyPunch {
    /// Creates a punch with both times present.
    pub fn new(
        work_date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        break_minutes: u32,
    ) -> Self {
        Self {
            work_date,
            start_time: Some(start_time),
            end_time: Some(end_time),
            break_minutes,
        }
    }

    /// Minutes between clock-in and clock-out on the work date, before breaks.
    ///
    /// Returns zero when either time is missing or the end is not after the start.
    fn span_minutes(&self) -> i64 {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => {
                let start = self.work_date.and_time(start);
                let end = self.work_date.and_time(end);
                if end > start {
                    (end - start).num_minutes()
                } else {
                    0
                }
            }
            _ => 0,
        }
    }

    /// Calculates worked minutes: `max(0, (end - start) - break_minutes)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use worktime_engine::models::DailyPunch;
    /// use chrono::{NaiveDate, NaiveTime};
    ///
    /// let punch = DailyPunch::new(
    ///     NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
    ///     NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
    ///     NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
    ///     60,
    /// );
    /// assert_eq!(punch.worked_minutes(), 480);
    /// ```
    pub fn worked_minutes(&self) -> u32 {
        let worked = self.span_minutes() - i64::from(self.break_minutes);
        u32::try_from(worked.max(0)).unwrap_or(u32::MAX)
    }

    /// Explains a zero-minute punch, or `None` when the punch counts.
    ///
    /// A punch with neither time recorded is a day off, not a skipped punch.
    pub fn skip_reason(&self) -> Option<PunchSkipReason> {
        match (self.start_time, self.end_time) {
            (None, None) => None,
            (None, Some(_)) => Some(PunchSkipReason::MissingStartTime),
            (Some(_), None) => Some(PunchSkipReason::MissingEndTime),
            (Some(_), Some(_)) if self.span_minutes() == 0 => {
                Some(PunchSkipReason::EndNotAfterStart)
            }
            (Some(_), Some(_)) if self.worked_minutes() == 0 => {
                Some(PunchSkipReason::BreakExceedsSpan)
            }
            _ => None,
        }
    }
}
