//! In-memory punch store.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDate;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{DailyPunch, DayClassification};

use super::PunchStore;

type RecordKey = (String, NaiveDate);

#[derive(Debug, Default)]
struct Records {
    punches: BTreeMap<RecordKey, DailyPunch>,
    classifications: BTreeMap<RecordKey, DayClassification>,
}

/// A [`PunchStore`] backed by ordered maps behind one `RwLock`.
///
/// Punches and classified rows share the lock, so a batch save is never
/// observed half-applied.
#[derive(Debug, Default)]
pub struct InMemoryPunchStore {
    records: RwLock<Records>,
}

impl InMemoryPunchStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> EngineResult<RwLockReadGuard<'_, Records>> {
        self.records.read().map_err(|e| EngineError::StoreError {
            message: format!("lock poisoned: {}", e),
        })
    }

    fn write(&self) -> EngineResult<RwLockWriteGuard<'_, Records>> {
        self.records.write().map_err(|e| EngineError::StoreError {
            message: format!("lock poisoned: {}", e),
        })
    }

    /// Inserts a punch, replacing any punch on the same date for the employee.
    ///
    /// Returns the replaced punch, if any.
    pub fn upsert_punch(
        &self,
        employee_id: &str,
        punch: DailyPunch,
    ) -> EngineResult<Option<DailyPunch>> {
        let key = (employee_id.to_string(), punch.work_date);
        Ok(self.write()?.punches.insert(key, punch))
    }

    /// Returns the stored classification for one employee-date.
    pub fn classification(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> EngineResult<Option<DayClassification>> {
        let key = (employee_id.to_string(), date);
        Ok(self.read()?.classifications.get(&key).cloned())
    }

    /// Returns the employee's stored classifications between two dates, inclusive.
    pub fn classifications_between(
        &self,
        employee_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<Vec<DayClassification>> {
        if from > to {
            return Ok(Vec::new());
        }
        let range = (employee_id.to_string(), from)..=(employee_id.to_string(), to);
        Ok(self
            .read()?
            .classifications
            .range(range)
            .map(|(_, day)| day.clone())
            .collect())
    }
}

impl PunchStore for InMemoryPunchStore {
    fn punches_between(
        &self,
        employee_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<Vec<DailyPunch>> {
        if from > to {
            return Ok(Vec::new());
        }
        let range = (employee_id.to_string(), from)..=(employee_id.to_string(), to);
        Ok(self
            .read()?
            .punches
            .range(range)
            .map(|(_, punch)| punch.clone())
            .collect())
    }

    fn save_classifications(
        &self,
        employee_id: &str,
        days: &[DayClassification],
    ) -> EngineResult<()> {
        let mut records = self.write()?;
        for day in days {
            records
                .classifications
                .insert((employee_id.to_string(), day.work_date), day.clone());
        }
        debug!(employee_id = %employee_id, rows = days.len(), "Classifications saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::WorkingTimeClassifier;
    use crate::models::LegalHolidayPolicy;
    use crate::store::recalculate_month;
    use chrono::{Duration, NaiveTime};
    use std::sync::Arc;
    use std::thread;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn punch(d: NaiveDate, worked: u32) -> DailyPunch {
        let start = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        let end = start + Duration::minutes(i64::from(worked) + 60);
        DailyPunch::new(d, start, end, 60)
    }

    fn classifier() -> WorkingTimeClassifier {
        WorkingTimeClassifier::new(LegalHolidayPolicy::default())
    }

    #[test]
    fn test_upsert_replaces_same_date() {
        let store = InMemoryPunchStore::new();
        assert!(store.upsert_punch("emp_001", punch(date("2025-09-01"), 300)).unwrap().is_none());

        let replaced = store.upsert_punch("emp_001", punch(date("2025-09-01"), 480)).unwrap();
        assert_eq!(replaced.unwrap().worked_minutes(), 300);

        let punches = store
            .punches_between("emp_001", date("2025-09-01"), date("2025-09-01"))
            .unwrap();
        assert_eq!(punches.len(), 1);
        assert_eq!(punches[0].worked_minutes(), 480);
    }

    #[test]
    fn test_punches_between_filters_employee_and_range() {
        let store = InMemoryPunchStore::new();
        store.upsert_punch("emp_001", punch(date("2025-08-31"), 480)).unwrap();
        store.upsert_punch("emp_001", punch(date("2025-09-01"), 480)).unwrap();
        store.upsert_punch("emp_001", punch(date("2025-09-07"), 480)).unwrap();
        store.upsert_punch("emp_001", punch(date("2025-09-08"), 480)).unwrap();
        store.upsert_punch("emp_002", punch(date("2025-09-02"), 480)).unwrap();

        let punches = store
            .punches_between("emp_001", date("2025-09-01"), date("2025-09-07"))
            .unwrap();
        let dates: Vec<NaiveDate> = punches.iter().map(|p| p.work_date).collect();
        assert_eq!(dates, vec![date("2025-09-01"), date("2025-09-07")]);

        assert!(store
            .punches_between("emp_001", date("2025-09-07"), date("2025-09-01"))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_recalculate_month_saves_adjacent_rows() {
        let store = InMemoryPunchStore::new();
        // Week of 2025-09-29 (Monday): two September days, four October days
        for i in 0..6 {
            store
                .upsert_punch("emp_001", punch(date("2025-09-29") + Duration::days(i), 480))
                .unwrap();
        }

        let result = recalculate_month(&store, &classifier(), "emp_001", 2025, 10).unwrap();
        assert_eq!(result.days.len(), 4);
        assert_eq!(result.adjacent_days.len(), 2);

        // The adjacent row is saved as well
        let sept_30 = store.classification("emp_001", date("2025-09-30")).unwrap().unwrap();
        assert_eq!(sept_30.regular_minutes, 480);

        // Saturday 10/4 is the sixth 8h day of the week
        let saturday = store.classification("emp_001", date("2025-10-04")).unwrap().unwrap();
        assert_eq!(saturday.regular_minutes, 0);
        assert_eq!(saturday.overtime_minutes, 480);
    }

    #[test]
    fn test_recalculate_month_is_idempotent() {
        let store = InMemoryPunchStore::new();
        for i in 0..6 {
            store
                .upsert_punch("emp_001", punch(date("2025-09-01") + Duration::days(i), 450))
                .unwrap();
        }

        recalculate_month(&store, &classifier(), "emp_001", 2025, 9).unwrap();
        let first = store
            .classifications_between("emp_001", date("2025-09-01"), date("2025-09-30"))
            .unwrap();
        recalculate_month(&store, &classifier(), "emp_001", 2025, 9).unwrap();
        let second = store
            .classifications_between("emp_001", date("2025-09-01"), date("2025-09-30"))
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(first.len(), 6);
    }

    #[test]
    fn test_recalculate_after_edit_reclassifies_week() {
        let store = InMemoryPunchStore::new();
        for i in 0..6 {
            store
                .upsert_punch("emp_001", punch(date("2025-09-01") + Duration::days(i), 450))
                .unwrap();
        }
        recalculate_month(&store, &classifier(), "emp_001", 2025, 9).unwrap();
        let saturday = store.classification("emp_001", date("2025-09-06")).unwrap().unwrap();
        assert_eq!(saturday.overtime_minutes, 300);

        // Shortening Monday frees up budget for Saturday
        store.upsert_punch("emp_001", punch(date("2025-09-01"), 150)).unwrap();
        recalculate_month(&store, &classifier(), "emp_001", 2025, 9).unwrap();
        let saturday = store.classification("emp_001", date("2025-09-06")).unwrap().unwrap();
        assert_eq!(saturday.regular_minutes, 450);
        assert_eq!(saturday.overtime_minutes, 0);
    }

    #[test]
    fn test_recalculate_month_invalid_month() {
        let store = InMemoryPunchStore::new();
        let result = recalculate_month(&store, &classifier(), "emp_001", 2025, 0);
        assert!(matches!(result, Err(EngineError::InvalidMonth { .. })));
    }

    #[test]
    fn test_concurrent_recalculations_converge() {
        let store = Arc::new(InMemoryPunchStore::new());
        for i in 0..7 {
            store
                .upsert_punch("emp_001", punch(date("2025-09-01") + Duration::days(i), 540))
                .unwrap();
        }

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    recalculate_month(store.as_ref(), &classifier(), "emp_001", 2025, 9).unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let expected = classifier().classify(
            &store
                .punches_between("emp_001", date("2025-09-01"), date("2025-09-07"))
                .unwrap(),
        );
        let saved = store
            .classifications_between("emp_001", date("2025-09-01"), date("2025-09-07"))
            .unwrap();
        assert_eq!(saved, expected);
    }

    #[test]
    fn test_poisoned_lock_is_store_error() {
        let store = Arc::new(InMemoryPunchStore::new());
        let poisoner = Arc::clone(&store);
        let _ = thread::spawn(move || {
            let _guard = poisoner.records.write().unwrap();
            panic!("poison the lock");
        })
        .join();

        let result = store.punches_between("emp_001", date("2025-09-01"), date("2025-09-30"));
        assert!(matches!(result, Err(EngineError::StoreError { .. })));
    }
}
