//! Totals and formatting helpers for classified days.

use rust_decimal::Decimal;

use crate::models::{ClassificationTotals, DayClassification};

/// Converts minutes to hours, rounded to two decimal places.
///
/// # Examples
///
/// ```
/// use worktime_engine::calculation::minutes_to_hours;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(minutes_to_hours(450), Decimal::from_str("7.5").unwrap());
/// assert_eq!(minutes_to_hours(100), Decimal::from_str("1.67").unwrap());
/// ```
pub fn minutes_to_hours(minutes: u32) -> Decimal {
    (Decimal::from(minutes) / Decimal::from(60)).round_dp(2).normalize()
}

/// Formats minutes as `H:MM`, the way timesheets print durations.
///
/// # Examples
///
/// ```
/// use worktime_engine::calculation::format_minutes;
///
/// assert_eq!(format_minutes(2400), "40:00");
/// assert_eq!(format_minutes(150), "2:30");
/// assert_eq!(format_minutes(5), "0:05");
/// ```
pub fn format_minutes(minutes: u32) -> String {
    format!("{}:{:02}", minutes / 60, minutes % 60)
}

/// Sums a set of classified days into [`ClassificationTotals`].
pub fn calculate_totals(days: &[DayClassification]) -> ClassificationTotals {
    let worked_minutes: u32 = days.iter().map(|d| d.worked_minutes).sum();
    let regular_minutes: u32 = days.iter().map(|d| d.regular_minutes).sum();
    let overtime_minutes: u32 = days.iter().map(|d| d.overtime_minutes).sum();
    let holiday_minutes: u32 = days.iter().map(|d| d.holiday_minutes).sum();

    let days_worked = days.iter().filter(|d| d.worked_minutes > 0).count() as u32;
    let legal_holidays_worked = days
        .iter()
        .filter(|d| d.is_legal_holiday && d.worked_minutes > 0)
        .count() as u32;

    ClassificationTotals {
        worked_minutes,
        regular_minutes,
        overtime_minutes,
        holiday_minutes,
        regular_hours: minutes_to_hours(regular_minutes),
        overtime_hours: minutes_to_hours(overtime_minutes),
        holiday_hours: minutes_to_hours(holiday_minutes),
        days_worked,
        legal_holidays_worked,
    }
}
