//! Classification logic for the working-time engine.
//!
//! This module contains the legal-holiday determination, the daily 8-hour
//! pre-classification, week grouping by the configurable week start, the
//! weekly 40-hour re-bucketing pass, the classifier that runs them in order,
//! and totals for downstream payroll and reports.

mod classifier;
mod daily_classification;
mod legal_holiday;
mod totals;
mod week_grouping;
mod weekly_rebucketing;

pub use classifier::{ClassificationRun, WorkingTimeClassifier, classify};
pub use daily_classification::{
    DAILY_LIMIT_CLAUSE, DailyClassificationResult, LEGAL_HOLIDAY_CLAUSE, classify_day,
};
pub use legal_holiday::{LegalHolidayBasis, LegalHolidayDetermination, determine_legal_holiday};
pub use totals::{calculate_totals, format_minutes, minutes_to_hours};
pub use week_grouping::{
    WeekBucket, group_by_week, month_bounds, month_window, week_anchor, week_end,
};
pub use weekly_rebucketing::{WEEKLY_LIMIT_CLAUSE, WeeklyRebucketResult, rebucket_week};
