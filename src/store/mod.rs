//! Punch record storage and month recalculation.
//!
//! The classifier is pure; this module is where punches are read from and
//! classified rows are written back. A month is always recalculated over its
//! full week window and saved in one call, so a reader never sees a week that
//! is only partly re-bucketed.

mod memory;

use chrono::NaiveDate;
use tracing::debug;

use crate::calculation::{WorkingTimeClassifier, month_window};
use crate::error::EngineResult;
use crate::models::{DailyPunch, DayClassification, MonthlyClassification};

pub use memory::InMemoryPunchStore;

/// A record store keyed by employee and work date.
pub trait PunchStore {
    /// Returns the employee's punches with `from <= work_date <= to`.
    fn punches_between(
        &self,
        employee_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<Vec<DailyPunch>>;

    /// Writes classified rows, replacing any existing row for the same date.
    ///
    /// Implementations must apply the whole batch at once.
    fn save_classifications(
        &self,
        employee_id: &str,
        days: &[DayClassification],
    ) -> EngineResult<()>;
}

/// Reclassifies one employee-month from the store and saves the result.
///
/// Loads every punch in the month's week window, so weeks that straddle the
/// month boundary are re-bucketed whole. Adjoining-month rows in those weeks
/// are saved too, since the weekly budget may have moved minutes on them.
///
/// # Errors
///
/// Returns [`crate::error::EngineError::InvalidMonth`] for an invalid month
/// and propagates store failures.
///
/// # Example
///
/// ```
/// use worktime_engine::calculation::WorkingTimeClassifier;
/// use worktime_engine::models::{DailyPunch, LegalHolidayPolicy};
/// use worktime_engine::store::{InMemoryPunchStore, recalculate_month};
/// use chrono::{NaiveDate, NaiveTime};
///
/// let store = InMemoryPunchStore::new();
/// let date = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
/// store.upsert_punch("emp_001", DailyPunch::new(
///     date,
///     NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
///     NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
///     60,
/// )).unwrap();
///
/// let classifier = WorkingTimeClassifier::new(LegalHolidayPolicy::default());
/// let month = recalculate_month(&store, &classifier, "emp_001", 2025, 9).unwrap();
///
/// assert_eq!(month.totals.overtime_minutes, 60);
/// assert_eq!(store.classification("emp_001", date).unwrap().unwrap().overtime_minutes, 60);
/// ```
pub fn recalculate_month<S: PunchStore + ?Sized>(
    store: &S,
    classifier: &WorkingTimeClassifier,
    employee_id: &str,
    year: i32,
    month: u32,
) -> EngineResult<MonthlyClassification> {
    let (from, to) = month_window(year, month, classifier.policy().week_start_day)?;
    let punches = store.punches_between(employee_id, from, to)?;

    let result = classifier.calculate_weekly_overtime(employee_id, &punches, year, month)?;

    let rows = result.all_days();
    store.save_classifications(employee_id, &rows)?;

    debug!(
        employee_id = %employee_id,
        year,
        month,
        window_start = %from,
        window_end = %to,
        rows_saved = rows.len(),
        "Month recalculated"
    );

    Ok(result)
}
