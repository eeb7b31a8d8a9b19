//! Core data models for the working-time engine.
//!
//! This module contains all the domain models used throughout the engine.

mod classification_result;
mod day_classification;
mod policy;
mod punch;

pub use classification_result::{
    AuditStep, AuditTrace, AuditWarning, ClassificationTotals, MonthlyClassification, WeekSummary,
};
pub use day_classification::DayClassification;
pub use policy::{
    DEFAULT_DAILY_LIMIT_MINUTES, DEFAULT_WEEKLY_LIMIT_MINUTES, LegalHolidayPolicy,
    LegalHolidayWeekdays, SpecificDateOverride, StatutoryLimits, weekday_from_index,
    weekday_index,
};
pub use punch::{DailyPunch, PunchSkipReason};
