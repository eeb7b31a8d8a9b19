//! Legal-holiday policy and statutory limits.
//!
//! The [`LegalHolidayPolicy`] decides which days are statutory holidays
//! (法定休日) and where a computation week begins. [`StatutoryLimits`]
//! carries the daily and weekly working-time thresholds.

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::calculation::determine_legal_holiday;
use crate::error::{EngineError, EngineResult};

/// Default daily statutory limit in minutes (8 hours).
pub const DEFAULT_DAILY_LIMIT_MINUTES: u32 = 480;

/// Default weekly statutory limit in minutes (40 hours).
pub const DEFAULT_WEEKLY_LIMIT_MINUTES: u32 = 2400;

/// Returns the 0-based weekday index used by `week_start_day` (0 = Monday).
pub fn weekday_index(weekday: Weekday) -> u8 {
    weekday.num_days_from_monday() as u8
}

/// Maps a 0-based weekday index (0 = Monday ... 6 = Sunday) to a [`Weekday`].
///
/// # Examples
///
/// ```
/// use worktime_engine::models::weekday_from_index;
/// use chrono::Weekday;
///
/// assert_eq!(weekday_from_index(0), Some(Weekday::Mon));
/// assert_eq!(weekday_from_index(6), Some(Weekday::Sun));
/// assert_eq!(weekday_from_index(7), None);
/// ```
pub fn weekday_from_index(index: u8) -> Option<Weekday> {
    match index {
        0 => Some(Weekday::Mon),
        1 => Some(Weekday::Tue),
        2 => Some(Weekday::Wed),
        3 => Some(Weekday::Thu),
        4 => Some(Weekday::Fri),
        5 => Some(Weekday::Sat),
        6 => Some(Weekday::Sun),
        _ => None,
    }
}

/// Serializes the week start as its 0-6 index and rejects anything else.
mod week_start_day_serde {
    use chrono::Weekday;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    use super::{weekday_from_index, weekday_index};

    pub fn serialize<S: Serializer>(weekday: &Weekday, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(weekday_index(*weekday))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Weekday, D::Error> {
        let index = u8::deserialize(deserializer)?;
        weekday_from_index(index).ok_or_else(|| {
            D::Error::custom(format!(
                "week_start_day must be between 0 (Monday) and 6 (Sunday), got {}",
                index
            ))
        })
    }
}

/// Which weekdays are statutory holidays.
///
/// Missing fields fall back to the default: Sunday only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegalHolidayWeekdays {
    /// Monday is a legal holiday.
    pub monday: bool,
    /// Tuesday is a legal holiday.
    pub tuesday: bool,
    /// Wednesday is a legal holiday.
    pub wednesday: bool,
    /// Thursday is a legal holiday.
    pub thursday: bool,
    /// Friday is a legal holiday.
    pub friday: bool,
    /// Saturday is a legal holiday.
    pub saturday: bool,
    /// Sunday is a legal holiday.
    pub sunday: bool,
}

impl Default for LegalHolidayWeekdays {
    fn default() -> Self {
        Self {
            monday: false,
            tuesday: false,
            wednesday: false,
            thursday: false,
            friday: false,
            saturday: false,
            sunday: true,
        }
    }
}

impl LegalHolidayWeekdays {
    /// Returns no weekday flagged.
    pub fn none() -> Self {
        Self {
            sunday: false,
            ..Self::default()
        }
    }

    /// Returns whether the given weekday is flagged.
    pub fn is_flagged(&self, weekday: Weekday) -> bool {
        match weekday {
            Weekday::Mon => self.monday,
            Weekday::Tue => self.tuesday,
            Weekday::Wed => self.wednesday,
            Weekday::Thu => self.thursday,
            Weekday::Fri => self.friday,
            Weekday::Sat => self.saturday,
            Weekday::Sun => self.sunday,
        }
    }

    /// Sets the flag for the given weekday.
    pub fn set(&mut self, weekday: Weekday, is_legal_holiday: bool) {
        let flag = match weekday {
            Weekday::Mon => &mut self.monday,
            Weekday::Tue => &mut self.tuesday,
            Weekday::Wed => &mut self.wednesday,
            Weekday::Thu => &mut self.thursday,
            Weekday::Fri => &mut self.friday,
            Weekday::Sat => &mut self.saturday,
            Weekday::Sun => &mut self.sunday,
        };
        *flag = is_legal_holiday;
    }
}

/// A single named exception day, e.g. a substituted holiday (振替休日).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecificDateOverride {
    /// The date the override applies to.
    pub date: NaiveDate,
    /// Whether the date is a legal holiday, regardless of its weekday.
    pub is_legal_holiday: bool,
}

/// The legal-holiday configuration handed to the classifier.
///
/// # Example
///
/// ```
/// use worktime_engine::models::LegalHolidayPolicy;
/// use chrono::{NaiveDate, Weekday};
///
/// let policy = LegalHolidayPolicy::default();
/// assert_eq!(policy.week_start_day, Weekday::Mon);
///
/// // 2025-09-07 is a Sunday
/// assert!(policy.is_legal_holiday(NaiveDate::from_ymd_opt(2025, 9, 7).unwrap()));
/// // 2025-09-06 is a Saturday: an ordinary day by default
/// assert!(!policy.is_legal_holiday(NaiveDate::from_ymd_opt(2025, 9, 6).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalHolidayPolicy {
    /// Weekday flags.
    #[serde(default)]
    pub legal_holidays: LegalHolidayWeekdays,
    /// Optional specific-date exception.
    #[serde(default)]
    pub specific_date: Option<SpecificDateOverride>,
    /// First day of the computation week, serialized as 0 (Monday) to 6 (Sunday).
    #[serde(with = "week_start_day_serde", default = "default_week_start_day")]
    pub week_start_day: Weekday,
}

fn default_week_start_day() -> Weekday {
    Weekday::Mon
}

impl Default for LegalHolidayPolicy {
    fn default() -> Self {
        Self {
            legal_holidays: LegalHolidayWeekdays::default(),
            specific_date: None,
            week_start_day: default_week_start_day(),
        }
    }
}

impl LegalHolidayPolicy {
    /// Creates a policy from a raw `week_start_day` index.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidPolicy`] when the index is not 0-6.
    pub fn new(
        legal_holidays: LegalHolidayWeekdays,
        specific_date: Option<SpecificDateOverride>,
        week_start_day: u8,
    ) -> EngineResult<Self> {
        let week_start_day =
            weekday_from_index(week_start_day).ok_or_else(|| EngineError::InvalidPolicy {
                field: "week_start_day".to_string(),
                message: format!("must be between 0 and 6, got {}", week_start_day),
            })?;

        Ok(Self {
            legal_holidays,
            specific_date,
            week_start_day,
        })
    }

    /// Returns the week start as its 0-6 index.
    pub fn week_start_index(&self) -> u8 {
        weekday_index(self.week_start_day)
    }

    /// Returns whether `date` is a statutory holiday under this policy.
    pub fn is_legal_holiday(&self, date: NaiveDate) -> bool {
        determine_legal_holiday(date, self).is_legal_holiday
    }
}

/// The daily and weekly statutory thresholds, in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatutoryLimits {
    /// Daily threshold (8 hours by default).
    pub daily_limit_minutes: u32,
    /// Weekly threshold (40 hours by default).
    pub weekly_limit_minutes: u32,
}

impl Default for StatutoryLimits {
    fn default() -> Self {
        Self {
            daily_limit_minutes: DEFAULT_DAILY_LIMIT_MINUTES,
            weekly_limit_minutes: DEFAULT_WEEKLY_LIMIT_MINUTES,
        }
    }
}

impl StatutoryLimits {
    /// Checks that both limits are positive and the daily limit fits in a week.
    pub fn validate(&self) -> EngineResult<()> {
        if self.daily_limit_minutes == 0 {
            return Err(EngineError::InvalidPolicy {
                field: "daily_limit_minutes".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        if self.weekly_limit_minutes < self.daily_limit_minutes {
            return Err(EngineError::InvalidPolicy {
                field: "weekly_limit_minutes".to_string(),
                message: format!(
                    "must be at least the daily limit ({}), got {}",
                    self.daily_limit_minutes, self.weekly_limit_minutes
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_default_policy_is_sunday_only_monday_start() {
        let policy = LegalHolidayPolicy::default();
        assert!(policy.legal_holidays.sunday);
        assert!(!policy.legal_holidays.saturday);
        assert!(policy.specific_date.is_none());
        assert_eq!(policy.week_start_index(), 0);
    }

    #[test]
    fn test_weekday_index_round_trips() {
        for index in 0..7 {
            let weekday = weekday_from_index(index).unwrap();
            assert_eq!(weekday_index(weekday), index);
        }
    }

    #[test]
    fn test_new_rejects_week_start_out_of_range() {
        let result = LegalHolidayPolicy::new(LegalHolidayWeekdays::default(), None, 7);
        match result {
            Err(EngineError::InvalidPolicy { field, .. }) => {
                assert_eq!(field, "week_start_day");
            }
            _ => panic!("Expected InvalidPolicy error"),
        }
    }

    #[test]
    fn test_new_accepts_sunday_start() {
        let policy = LegalHolidayPolicy::new(LegalHolidayWeekdays::default(), None, 6).unwrap();
        assert_eq!(policy.week_start_day, Weekday::Sun);
    }

    #[test]
    fn test_set_weekday_flag() {
        let mut weekdays = LegalHolidayWeekdays::none();
        weekdays.set(Weekday::Sat, true);
        assert!(weekdays.is_flagged(Weekday::Sat));
        assert!(!weekdays.is_flagged(Weekday::Sun));
    }

    #[test]
    fn test_policy_deserialization() {
        let json = r#"{
            "legal_holidays": {"saturday": true, "sunday": false},
            "specific_date": {"date": "2025-09-15", "is_legal_holiday": true},
            "week_start_day": 6
        }"#;

        let policy: LegalHolidayPolicy = serde_json::from_str(json).unwrap();
        assert!(policy.legal_holidays.saturday);
        assert!(!policy.legal_holidays.sunday);
        assert!(!policy.legal_holidays.monday);
        assert_eq!(policy.week_start_day, Weekday::Sun);
        assert_eq!(policy.specific_date.unwrap().date, date("2025-09-15"));
    }

    #[test]
    fn test_policy_deserialization_defaults() {
        let policy: LegalHolidayPolicy = serde_json::from_str("{}").unwrap();
        assert_eq!(policy, LegalHolidayPolicy::default());
    }

    #[test]
    fn test_policy_deserialization_rejects_bad_week_start() {
        let result: Result<LegalHolidayPolicy, _> =
            serde_json::from_str(r#"{"week_start_day": 9}"#);
        let error = result.unwrap_err().to_string();
        assert!(error.contains("week_start_day must be between 0"));
    }

    #[test]
    fn test_policy_serializes_week_start_as_index() {
        let policy = LegalHolidayPolicy::new(LegalHolidayWeekdays::default(), None, 6).unwrap();
        let json = serde_json::to_string(&policy).unwrap();
        assert!(json.contains("\"week_start_day\":6"));
    }

    #[test]
    fn test_default_limits() {
        let limits = StatutoryLimits::default();
        assert_eq!(limits.daily_limit_minutes, 480);
        assert_eq!(limits.weekly_limit_minutes, 2400);
        assert!(limits.validate().is_ok());
    }

    #[test]
    fn test_limits_reject_zero_daily() {
        let limits = StatutoryLimits {
            daily_limit_minutes: 0,
            weekly_limit_minutes: 2400,
        };
        assert!(limits.validate().is_err());
    }

    #[test]
    fn test_limits_reject_weekly_below_daily() {
        let limits = StatutoryLimits {
            daily_limit_minutes: 480,
            weekly_limit_minutes: 300,
        };
        match limits.validate() {
            Err(EngineError::InvalidPolicy { field, .. }) => {
                assert_eq!(field, "weekly_limit_minutes");
            }
            _ => panic!("Expected InvalidPolicy error"),
        }
    }

    #[test]
    fn test_special_measure_limits_are_valid() {
        let limits = StatutoryLimits {
            daily_limit_minutes: 480,
            weekly_limit_minutes: 2640,
        };
        assert!(limits.validate().is_ok());
    }
}
