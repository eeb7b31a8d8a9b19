//! The working-time classifier.
//!
//! Ties the passes together: daily pre-classification, week grouping and the
//! weekly re-bucketing. [`WorkingTimeClassifier::classify`] is a pure
//! function of the punches, the policy and the limits; persistence belongs
//! to the caller.

use std::collections::HashSet;
use std::time::Instant;

use chrono::{Datelike, NaiveDate, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, DailyPunch, DayClassification, LegalHolidayPolicy,
    MonthlyClassification, StatutoryLimits, WeekSummary,
};

use super::daily_classification::classify_day;
use super::totals::calculate_totals;
use super::week_grouping::{group_by_week, month_window};
use super::weekly_rebucketing::rebucket_week;

/// Everything one classification pass produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationRun {
    /// Classified days in chronological order.
    pub days: Vec<DayClassification>,
    /// One summary per computation week, in order.
    pub weeks: Vec<WeekSummary>,
    /// Audit steps, daily steps first, then one per week.
    pub steps: Vec<AuditStep>,
    /// Warnings about punches that were accepted as zero minutes.
    pub warnings: Vec<AuditWarning>,
}

/// Classifies punches under a legal-holiday policy and statutory limits.
///
/// # Example
///
/// ```
/// use worktime_engine::calculation::WorkingTimeClassifier;
/// use worktime_engine::models::{DailyPunch, LegalHolidayPolicy};
/// use chrono::{Duration, NaiveDate, NaiveTime};
///
/// let monday = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
/// let punches: Vec<DailyPunch> = (0..6)
///     .map(|i| DailyPunch::new(
///         monday + Duration::days(i),
///         NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
///         NaiveTime::from_hms_opt(17, 30, 0).unwrap(),
///         60,
///     ))
///     .collect();
///
/// let days = WorkingTimeClassifier::new(LegalHolidayPolicy::default()).classify(&punches);
///
/// // Saturday: 2:30 regular, 5:00 overtime
/// assert_eq!(days[5].regular_minutes, 150);
/// assert_eq!(days[5].overtime_minutes, 300);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingTimeClassifier {
    policy: LegalHolidayPolicy,
    limits: StatutoryLimits,
}

impl WorkingTimeClassifier {
    /// Creates a classifier with the default 8h/40h limits.
    pub fn new(policy: LegalHolidayPolicy) -> Self {
        Self {
            policy,
            limits: StatutoryLimits::default(),
        }
    }

    /// Replaces the statutory limits.
    pub fn with_limits(mut self, limits: StatutoryLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Returns the policy in use.
    pub fn policy(&self) -> &LegalHolidayPolicy {
        &self.policy
    }

    /// Returns the limits in use.
    pub fn limits(&self) -> &StatutoryLimits {
        &self.limits
    }

    /// Classifies every punch and returns the days in chronological order.
    pub fn classify(&self, punches: &[DailyPunch]) -> Vec<DayClassification> {
        self.run(punches, 1).days
    }

    /// Runs both passes and keeps the week summaries and audit trail.
    ///
    /// `step_number_start` numbers the first audit step.
    pub fn run(&self, punches: &[DailyPunch], step_number_start: u32) -> ClassificationRun {
        let mut step_number = step_number_start;
        let mut steps = Vec::with_capacity(punches.len() + 6);
        let mut warnings = Vec::new();

        let mut ordered: Vec<&DailyPunch> = punches.iter().collect();
        ordered.sort_by_key(|p| p.work_date);

        let mut seen: HashSet<NaiveDate> = HashSet::with_capacity(ordered.len());
        let mut first_pass = Vec::with_capacity(ordered.len());
        for punch in ordered {
            if !seen.insert(punch.work_date) {
                warnings.push(AuditWarning {
                    code: "DUPLICATE_WORK_DATE".to_string(),
                    message: format!(
                        "More than one punch for {}; each is classified separately",
                        punch.work_date
                    ),
                    severity: "high".to_string(),
                });
            }

            let result = classify_day(punch, &self.policy, &self.limits, step_number);
            step_number += 1;
            steps.push(result.audit_step);
            warnings.extend(result.warning);
            first_pass.push(result.classification);
        }

        let mut days = Vec::with_capacity(first_pass.len());
        let mut weeks = Vec::new();
        for mut bucket in group_by_week(first_pass, self.policy.week_start_day) {
            let result = rebucket_week(
                bucket.anchor,
                &mut bucket.days,
                self.limits.weekly_limit_minutes,
                step_number,
            );
            step_number += 1;

            debug!(
                week_start = %result.summary.week_start,
                regular_minutes = result.summary.regular_minutes,
                overtime_minutes = result.summary.overtime_minutes,
                holiday_minutes = result.summary.holiday_minutes,
                weekly_overtime_minutes = result.summary.weekly_overtime_minutes,
                "Week re-bucketed"
            );

            steps.push(result.audit_step);
            weeks.push(result.summary);
            days.extend(bucket.days);
        }

        ClassificationRun {
            days,
            weeks,
            steps,
            warnings,
        }
    }

    /// Classifies one employee-month, weeks straddling the month included.
    ///
    /// Punches outside [`month_window`] are ignored, so callers may pass a
    /// superset. Adjoining-month days inside the window take part in their
    /// week's 40-hour budget and come back in `adjacent_days`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::EngineError::InvalidMonth`] for an invalid month.
    pub fn calculate_weekly_overtime(
        &self,
        employee_id: &str,
        punches: &[DailyPunch],
        year: i32,
        month: u32,
    ) -> EngineResult<MonthlyClassification> {
        let start_time = Instant::now();
        let (from, to) = month_window(year, month, self.policy.week_start_day)?;

        let in_window: Vec<DailyPunch> = punches
            .iter()
            .filter(|p| p.work_date >= from && p.work_date <= to)
            .cloned()
            .collect();

        debug!(
            employee_id = %employee_id,
            year,
            month,
            window_start = %from,
            window_end = %to,
            punches = in_window.len(),
            "Classifying month"
        );

        let run = self.run(&in_window, 1);

        let (days, adjacent_days): (Vec<DayClassification>, Vec<DayClassification>) = run
            .days
            .into_iter()
            .partition(|d| d.work_date.year() == year && d.work_date.month() == month);

        let totals = calculate_totals(&days);

        Ok(MonthlyClassification {
            calculation_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            employee_id: employee_id.to_string(),
            year,
            month,
            week_start_day: self.policy.week_start_index(),
            days,
            adjacent_days,
            weeks: run.weeks,
            totals,
            audit_trace: AuditTrace {
                steps: run.steps,
                warnings: run.warnings,
                duration_us: start_time.elapsed().as_micros() as u64,
            },
        })
    }
}

/// Classifies punches under `policy` with the default 8h/40h limits.
///
/// Shorthand for `WorkingTimeClassifier::new(policy.clone()).classify(punches)`.
pub fn classify(punches: &[DailyPunch], policy: &LegalHolidayPolicy) -> Vec<DayClassification> {
    WorkingTimeClassifier::new(policy.clone()).classify(punches)
}
