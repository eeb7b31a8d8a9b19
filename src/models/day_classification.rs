//! Per-day classification output.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How one day's worked minutes split into regular, overtime and holiday time.
///
/// Invariants held by every value the classifier returns:
/// - `regular_minutes + overtime_minutes + holiday_minutes == worked_minutes`
/// - on a legal holiday, `regular_minutes == 0` and `overtime_minutes == 0`
///
/// # Example
///
/// ```
/// use worktime_engine::models::DayClassification;
/// use chrono::NaiveDate;
///
/// let day = DayClassification {
///     work_date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
///     worked_minutes: 540,
///     is_legal_holiday: false,
///     regular_minutes: 480,
///     overtime_minutes: 60,
///     holiday_minutes: 0,
/// };
/// assert!(day.is_balanced());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayClassification {
    /// The calendar date this classification belongs to.
    pub work_date: NaiveDate,
    /// Total minutes worked after breaks.
    pub worked_minutes: u32,
    /// Whether the policy marks this date as a legal holiday.
    pub is_legal_holiday: bool,
    /// Minutes within the daily and weekly statutory limits (法定内).
    pub regular_minutes: u32,
    /// Minutes beyond either limit on an ordinary day (法定外, 25%).
    pub overtime_minutes: u32,
    /// Minutes worked on a legal holiday (法定休日, 35%).
    pub holiday_minutes: u32,
}

impl DayClassification {
    /// Creates an all-zero classification for a date.
    pub fn empty(work_date: NaiveDate, is_legal_holiday: bool) -> Self {
        Self {
            work_date,
            worked_minutes: 0,
            is_legal_holiday,
            regular_minutes: 0,
            overtime_minutes: 0,
            holiday_minutes: 0,
        }
    }

    /// Returns whether the three buckets add up to the worked minutes.
    pub fn is_balanced(&self) -> bool {
        self.regular_minutes + self.overtime_minutes + self.holiday_minutes
            == self.worked_minutes
    }

    /// Minutes that count against the weekly budget (regular plus overtime).
    pub fn ordinary_day_minutes(&self) -> u32 {
        self.regular_minutes + self.overtime_minutes
    }
}
