//! Working-time classification engine for the Japanese Labor Standards Act
//!
//! This crate splits daily punch records into regular (法定内), overtime
//! (法定外) and legal-holiday (法定休日) minutes under the 8-hour daily and
//! 40-hour weekly limits, with a configurable week start and legal-holiday
//! policy.
//!
//! # Example
//!
//! ```
//! use worktime_engine::calculation::classify;
//! use worktime_engine::models::{DailyPunch, LegalHolidayPolicy};
//! use chrono::{NaiveDate, NaiveTime};
//!
//! let punch = DailyPunch::new(
//!     NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
//!     NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
//!     NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
//!     60,
//! );
//!
//! let days = classify(&[punch], &LegalHolidayPolicy::default());
//! assert_eq!(days[0].regular_minutes, 480);
//! assert_eq!(days[0].overtime_minutes, 60);
//! ```

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
