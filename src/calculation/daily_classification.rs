//! Daily pre-classification (the 8-hour rule).
//!
//! Turns a single [`DailyPunch`] into a first-pass [`DayClassification`]
//! using only the daily statutory limit (Labor Standards Act Art. 32(2)).
//! Work on a legal holiday goes entirely to holiday minutes (Art. 35, 37)
//! and is left alone by the weekly pass.

use serde::{Deserialize, Serialize};

use crate::models::{
    AuditStep, AuditWarning, DailyPunch, DayClassification, LegalHolidayPolicy, StatutoryLimits,
};

use super::legal_holiday::{LegalHolidayBasis, determine_legal_holiday};
use super::totals::format_minutes;

/// Clause reference for the daily limit.
pub const DAILY_LIMIT_CLAUSE: &str = "LSA Art. 32(2)";

/// Clause reference for legal-holiday work.
pub const LEGAL_HOLIDAY_CLAUSE: &str = "LSA Art. 35, 37(1)";

/// The result of classifying one punch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyClassificationResult {
    /// The first-pass classification.
    pub classification: DayClassification,
    /// The audit step recording the decision.
    pub audit_step: AuditStep,
    /// Set when the punch had times recorded but still produced zero minutes.
    pub warning: Option<AuditWarning>,
}

/// Classifies one punch against the daily limit.
///
/// # Arguments
///
/// * `punch` - The day's punch
/// * `policy` - The legal-holiday policy
/// * `limits` - The statutory limits (only the daily limit is used here)
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use worktime_engine::calculation::classify_day;
/// use worktime_engine::models::{DailyPunch, LegalHolidayPolicy, StatutoryLimits};
/// use chrono::{NaiveDate, NaiveTime};
///
/// let punch = DailyPunch::new(
///     NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(), // Monday
///     NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
///     NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
///     60,
/// );
/// let result = classify_day(&punch, &LegalHolidayPolicy::default(), &StatutoryLimits::default(), 1);
///
/// assert_eq!(result.classification.regular_minutes, 480);
/// assert_eq!(result.classification.overtime_minutes, 60);
/// assert_eq!(result.classification.holiday_minutes, 0);
/// ```
pub fn classify_day(
    punch: &DailyPunch,
    policy: &LegalHolidayPolicy,
    limits: &StatutoryLimits,
    step_number: u32,
) -> DailyClassificationResult {
    let worked_minutes = punch.worked_minutes();
    let holiday = determine_legal_holiday(punch.work_date, policy);

    let mut classification = DayClassification::empty(punch.work_date, holiday.is_legal_holiday);
    classification.worked_minutes = worked_minutes;

    let reasoning = if holiday.is_legal_holiday {
        classification.holiday_minutes = worked_minutes;
        let basis = match holiday.basis {
            LegalHolidayBasis::SpecificDate => "specific-date override",
            LegalHolidayBasis::Weekday => "weekday setting",
        };
        format!(
            "{} is a legal holiday ({}); all {} worked goes to holiday time",
            punch.work_date,
            basis,
            format_minutes(worked_minutes)
        )
    } else {
        let regular = worked_minutes.min(limits.daily_limit_minutes);
        classification.regular_minutes = regular;
        classification.overtime_minutes = worked_minutes - regular;
        if classification.overtime_minutes > 0 {
            format!(
                "{} worked exceeds the {} daily limit by {}",
                format_minutes(worked_minutes),
                format_minutes(limits.daily_limit_minutes),
                format_minutes(classification.overtime_minutes)
            )
        } else {
            format!(
                "{} worked is within the {} daily limit",
                format_minutes(worked_minutes),
                format_minutes(limits.daily_limit_minutes)
            )
        }
    };

    let warning = punch.skip_reason().map(|reason| AuditWarning {
        code: reason.code().to_string(),
        message: format!("Punch on {} counted as zero minutes", punch.work_date),
        severity: "medium".to_string(),
    });

    let audit_step = AuditStep {
        step_number,
        rule_id: "daily_classification".to_string(),
        rule_name: "Daily Classification".to_string(),
        clause_ref: if holiday.is_legal_holiday {
            LEGAL_HOLIDAY_CLAUSE.to_string()
        } else {
            DAILY_LIMIT_CLAUSE.to_string()
        },
        input: serde_json::json!({
            "work_date": punch.work_date.to_string(),
            "worked_minutes": worked_minutes,
            "daily_limit_minutes": limits.daily_limit_minutes,
            "is_legal_holiday": holiday.is_legal_holiday
        }),
        output: serde_json::json!({
            "regular_minutes": classification.regular_minutes,
            "overtime_minutes": classification.overtime_minutes,
            "holiday_minutes": classification.holiday_minutes
        }),
        reasoning,
    };

    DailyClassificationResult {
        classification,
        audit_step,
        warning,
    }
}
