//! Legal-holiday determination.
//!
//! Decides whether a date is a statutory holiday (法定休日) under a
//! [`LegalHolidayPolicy`]. A specific-date override that names the date is
//! authoritative in both directions; otherwise the weekday flag decides.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::LegalHolidayPolicy;

/// What decided a date's legal-holiday status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegalHolidayBasis {
    /// The policy's specific-date override names this date.
    SpecificDate,
    /// The policy's weekday flags decided.
    Weekday,
}

/// The outcome of checking one date against the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalHolidayDetermination {
    /// Whether the date is a legal holiday.
    pub is_legal_holiday: bool,
    /// Which part of the policy decided.
    pub basis: LegalHolidayBasis,
}

/// Determines whether `date` is a legal holiday under `policy`.
///
/// # Examples
///
/// ```
/// use worktime_engine::calculation::{determine_legal_holiday, LegalHolidayBasis};
/// use worktime_engine::models::{LegalHolidayPolicy, SpecificDateOverride};
/// use chrono::NaiveDate;
///
/// let mut policy = LegalHolidayPolicy::default();
/// // Substitute work on Sunday 2025-09-14: not a legal holiday this time.
/// policy.specific_date = Some(SpecificDateOverride {
///     date: NaiveDate::from_ymd_opt(2025, 9, 14).unwrap(),
///     is_legal_holiday: false,
/// });
///
/// let result = determine_legal_holiday(NaiveDate::from_ymd_opt(2025, 9, 14).unwrap(), &policy);
/// assert!(!result.is_legal_holiday);
/// assert_eq!(result.basis, LegalHolidayBasis::SpecificDate);
///
/// let result = determine_legal_holiday(NaiveDate::from_ymd_opt(2025, 9, 21).unwrap(), &policy);
/// assert!(result.is_legal_holiday);
/// assert_eq!(result.basis, LegalHolidayBasis::Weekday);
/// ```
pub fn determine_legal_holiday(
    date: NaiveDate,
    policy: &LegalHolidayPolicy,
) -> LegalHolidayDetermination {
    if let Some(override_day) = policy.specific_date.as_ref().filter(|o| o.date == date) {
        return LegalHolidayDetermination {
            is_legal_holiday: override_day.is_legal_holiday,
            basis: LegalHolidayBasis::SpecificDate,
        };
    }

    LegalHolidayDetermination {
        is_legal_holiday: policy.legal_holidays.is_flagged(date.weekday()),
        basis: LegalHolidayBasis::Weekday,
    }
}
