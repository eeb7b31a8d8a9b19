//! Classification result models.
//!
//! This module contains the [`MonthlyClassification`] type and its associated
//! structures: week summaries, totals, and the audit trace recording every
//! classification decision.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::DayClassification;

/// A single step in the audit trace recording a classification decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// Reference to the Labor Standards Act article for this rule.
    pub clause_ref: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during classification.
///
/// Warnings flag input that was accepted but probably needs a second look,
/// such as a punch with no clock-out time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a classification run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of classification steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during classification.
    pub warnings: Vec<AuditWarning>,
    /// The total classification duration in microseconds.
    pub duration_us: u64,
}

/// Totals for one computation week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekSummary {
    /// First date of the week (the week anchor).
    pub week_start: NaiveDate,
    /// Last date of the week (anchor + 6 days).
    pub week_end: NaiveDate,
    /// Total worked minutes in the week, holidays included.
    pub worked_minutes: u32,
    /// Regular minutes on ordinary days; never above the weekly limit.
    pub regular_minutes: u32,
    /// Overtime minutes on ordinary days.
    pub overtime_minutes: u32,
    /// Minutes worked on legal holidays.
    pub holiday_minutes: u32,
    /// Minutes the weekly limit moved from regular to overtime.
    pub weekly_overtime_minutes: u32,
}

/// Aggregated totals handed to payroll and report generation.
///
/// # Example
///
/// ```
/// use worktime_engine::models::ClassificationTotals;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let totals = ClassificationTotals {
///     worked_minutes: 2700,
///     regular_minutes: 2400,
///     overtime_minutes: 300,
///     holiday_minutes: 0,
///     regular_hours: Decimal::from_str("40").unwrap(),
///     overtime_hours: Decimal::from_str("5").unwrap(),
///     holiday_hours: Decimal::ZERO,
///     days_worked: 5,
///     legal_holidays_worked: 0,
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationTotals {
    /// Total worked minutes.
    pub worked_minutes: u32,
    /// Total regular minutes.
    pub regular_minutes: u32,
    /// Total statutory overtime minutes.
    pub overtime_minutes: u32,
    /// Total statutory-holiday minutes.
    pub holiday_minutes: u32,
    /// Regular minutes as hours.
    pub regular_hours: Decimal,
    /// Overtime minutes as hours.
    pub overtime_hours: Decimal,
    /// Holiday minutes as hours.
    pub holiday_hours: Decimal,
    /// Number of days with any worked minutes.
    pub days_worked: u32,
    /// Number of legal holidays with any worked minutes.
    pub legal_holidays_worked: u32,
}

/// The complete result of classifying one employee-month.
///
/// `days` holds only dates in the requested month; `adjacent_days` holds
/// dates from the neighbouring months that share a computation week with it.
/// `totals` covers `days` only, while `weeks` covers every touched week in full.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyClassification {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that produced this result.
    pub engine_version: String,
    /// The employee the punches belong to.
    pub employee_id: String,
    /// The requested year.
    pub year: i32,
    /// The requested month (1-12).
    pub month: u32,
    /// The week start used for grouping, 0 (Monday) to 6 (Sunday).
    pub week_start_day: u8,
    /// Classified days within the requested month, chronological.
    pub days: Vec<DayClassification>,
    /// Classified days outside the month but inside a touched week.
    pub adjacent_days: Vec<DayClassification>,
    /// One summary per touched computation week.
    pub weeks: Vec<WeekSummary>,
    /// Totals over `days`.
    pub totals: ClassificationTotals,
    /// Audit trace of the run.
    pub audit_trace: AuditTrace,
}

impl MonthlyClassification {
    /// Returns every classified day, month and adjacent, in date order.
    pub fn all_days(&self) -> Vec<DayClassification> {
        let mut all: Vec<DayClassification> = self
            .days
            .iter()
            .chain(self.adjacent_days.iter())
            .cloned()
            .collect();
        all.sort_by_key(|d| d.work_date);
        all
    }

    /// Looks up the classification for a date in the requested month.
    pub fn day(&self, date: NaiveDate) -> Option<&DayClassification> {
        self.days.iter().find(|d| d.work_date == date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn zero_totals() -> ClassificationTotals {
        ClassificationTotals {
            worked_minutes: 0,
            regular_minutes: 0,
            overtime_minutes: 0,
            holiday_minutes: 0,
            regular_hours: Decimal::ZERO,
            overtime_hours: Decimal::ZERO,
            holiday_hours: Decimal::ZERO,
            days_worked: 0,
            legal_holidays_worked: 0,
        }
    }

    fn sample_result() -> MonthlyClassification {
        MonthlyClassification {
            calculation_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: "0.1.0".to_string(),
            employee_id: "emp_001".to_string(),
            year: 2025,
            month: 10,
            week_start_day: 0,
            days: vec![DayClassification::empty(date("2025-10-01"), false)],
            adjacent_days: vec![
                DayClassification::empty(date("2025-09-30"), false),
                DayClassification::empty(date("2025-09-29"), false),
            ],
            weeks: vec![],
            totals: zero_totals(),
            audit_trace: AuditTrace {
                steps: vec![],
                warnings: vec![],
                duration_us: 0,
            },
        }
    }

    #[test]
    fn test_all_days_is_chronological() {
        let result = sample_result();
        let dates: Vec<NaiveDate> = result.all_days().iter().map(|d| d.work_date).collect();
        assert_eq!(
            dates,
            vec![date("2025-09-29"), date("2025-09-30"), date("2025-10-01")]
        );
    }

    #[test]
    fn test_day_lookup_only_searches_month() {
        let result = sample_result();
        assert!(result.day(date("2025-10-01")).is_some());
        assert!(result.day(date("2025-09-30")).is_none());
    }

    #[test]
    fn test_result_serialization_round_trip() {
        let result = sample_result();
        let json = serde_json::to_string(&result).unwrap();
        let deserialized: MonthlyClassification = serde_json::from_str(&json).unwrap();
        assert_eq!(result, deserialized);
    }

    #[test]
    fn test_totals_hours_serialize_as_strings() {
        let mut totals = zero_totals();
        totals.regular_hours = Decimal::new(75, 1);
        let json = serde_json::to_string(&totals).unwrap();
        assert!(json.contains("\"regular_hours\":\"7.5\""));
    }
}
