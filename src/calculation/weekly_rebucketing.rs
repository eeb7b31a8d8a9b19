//! Weekly re-bucketing (the 40-hour rule).
//!
//! Within one computation week, regular minutes on ordinary days may not add
//! up to more than the weekly limit (Labor Standards Act Art. 32(1)). The
//! budget is consumed in date order, so the later days of a week are the
//! ones pushed into overtime.
//!
//! ## Allocation
//!
//! For each non-holiday day, earliest first:
//! - `daily_worked = regular + overtime` (the first-pass total)
//! - `assigned_regular = min(remaining_budget, regular)`
//! - `assigned_overtime = daily_worked - assigned_regular`
//! - `remaining_budget -= assigned_regular`
//!
//! Overtime from the daily 8-hour rule stays overtime. Minutes only ever move
//! from regular to overtime, and holiday minutes are never touched, so running
//! the pass again over its own output changes nothing.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{AuditStep, DayClassification, WeekSummary};

use super::totals::format_minutes;
use super::week_grouping::week_end;

/// Clause reference for the weekly limit.
pub const WEEKLY_LIMIT_CLAUSE: &str = "LSA Art. 32(1)";

/// The result of re-bucketing one week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyRebucketResult {
    /// Totals for the week after re-bucketing.
    pub summary: WeekSummary,
    /// The audit step recording the pass.
    pub audit_step: AuditStep,
}

/// Applies the weekly limit to one week's days, in place.
///
/// The slice is sorted by `work_date` first; the caller's order is irrelevant.
///
/// # Arguments
///
/// * `anchor` - First date of the week
/// * `days` - The week's first-pass classifications
/// * `weekly_limit_minutes` - The weekly budget (2400 by default)
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use worktime_engine::calculation::rebucket_week;
/// use worktime_engine::models::DayClassification;
/// use chrono::NaiveDate;
///
/// // Monday to Saturday, 7.5 hours each
/// let anchor = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
/// let mut days: Vec<DayClassification> = (0..6)
///     .map(|i| DayClassification {
///         work_date: anchor + chrono::Duration::days(i),
///         worked_minutes: 450,
///         is_legal_holiday: false,
///         regular_minutes: 450,
///         overtime_minutes: 0,
///         holiday_minutes: 0,
///     })
///     .collect();
///
/// let result = rebucket_week(anchor, &mut days, 2400, 1);
///
/// assert_eq!(days[5].regular_minutes, 150);
/// assert_eq!(days[5].overtime_minutes, 300);
/// assert_eq!(result.summary.regular_minutes, 2400);
/// assert_eq!(result.summary.overtime_minutes, 300);
/// ```
pub fn rebucket_week(
    anchor: NaiveDate,
    days: &mut [DayClassification],
    weekly_limit_minutes: u32,
    step_number: u32,
) -> WeeklyRebucketResult {
    days.sort_by_key(|d| d.work_date);

    let regular_before: u32 = days
        .iter()
        .filter(|d| !d.is_legal_holiday)
        .map(|d| d.regular_minutes)
        .sum();

    let mut remaining = weekly_limit_minutes;
    let mut exhausted_on: Option<NaiveDate> = None;

    for day in days.iter_mut().filter(|d| !d.is_legal_holiday) {
        let daily_worked = day.ordinary_day_minutes();
        let assigned_regular = remaining.min(day.regular_minutes);
        let assigned_overtime = daily_worked - assigned_regular;

        if assigned_regular < day.regular_minutes && exhausted_on.is_none() {
            exhausted_on = Some(day.work_date);
        }

        remaining -= assigned_regular;
        day.regular_minutes = assigned_regular;
        day.overtime_minutes = assigned_overtime;
    }

    let summary = summarize_week(anchor, days, regular_before);

    let reasoning = match exhausted_on {
        Some(date) => format!(
            "{} regular time exceeds the {} weekly limit; budget ran out on {}, moving {} to overtime",
            format_minutes(regular_before),
            format_minutes(weekly_limit_minutes),
            date,
            format_minutes(summary.weekly_overtime_minutes)
        ),
        None => format!(
            "{} regular time is within the {} weekly limit; no change",
            format_minutes(regular_before),
            format_minutes(weekly_limit_minutes)
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "weekly_rebucketing".to_string(),
        rule_name: "Weekly Limit Re-bucketing".to_string(),
        clause_ref: WEEKLY_LIMIT_CLAUSE.to_string(),
        input: serde_json::json!({
            "week_start": summary.week_start.to_string(),
            "week_end": summary.week_end.to_string(),
            "regular_minutes": regular_before,
            "weekly_limit_minutes": weekly_limit_minutes
        }),
        output: serde_json::json!({
            "regular_minutes": summary.regular_minutes,
            "overtime_minutes": summary.overtime_minutes,
            "holiday_minutes": summary.holiday_minutes,
            "weekly_overtime_minutes": summary.weekly_overtime_minutes
        }),
        reasoning,
    };

    WeeklyRebucketResult {
        summary,
        audit_step,
    }
}

fn summarize_week(
    anchor: NaiveDate,
    days: &[DayClassification],
    regular_before: u32,
) -> WeekSummary {
    let regular_minutes: u32 = days
        .iter()
        .filter(|d| !d.is_legal_holiday)
        .map(|d| d.regular_minutes)
        .sum();

    WeekSummary {
        week_start: anchor,
        week_end: week_end(anchor),
        worked_minutes: days.iter().map(|d| d.worked_minutes).sum(),
        regular_minutes,
        overtime_minutes: days.iter().map(|d| d.overtime_minutes).sum(),
        holiday_minutes: days.iter().map(|d| d.holiday_minutes).sum(),
        weekly_overtime_minutes: regular_before - regular_minutes,
    }
}
