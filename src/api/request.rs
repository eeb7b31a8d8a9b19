//! Request types for the `/classify` endpoint.

use serde::{Deserialize, Serialize};

use crate::models::{DailyPunch, LegalHolidayPolicy};

use super::response::ApiError;

/// Request body for `POST /classify`.
///
/// Punches outside the month's week window are ignored, so a client may send
/// a wider range than needed. Include the adjoining-month days that share a
/// week with the month's first or last day, or the weekly limit cannot see
/// them.
///
/// # Example
///
/// ```
/// use worktime_engine::api::ClassifyRequest;
///
/// let request: ClassifyRequest = serde_json::from_str(r#"{
///     "employee_id": "emp_001",
///     "year": 2025,
///     "month": 9,
///     "punches": [
///         { "work_date": "2025-09-01", "start_time": "09:00:00", "end_time": "18:00:00", "break_minutes": 60 }
///     ]
/// }"#).unwrap();
///
/// assert!(request.policy.is_none());
/// assert_eq!(request.punches[0].worked_minutes(), 480);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyRequest {
    /// The employee the punches belong to.
    pub employee_id: String,
    /// Calendar year of the target month.
    pub year: i32,
    /// Target month, 1-12.
    pub month: u32,
    /// Overrides the configured legal-holiday policy for this request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<LegalHolidayPolicy>,
    /// The punches to classify.
    pub punches: Vec<DailyPunch>,
}

impl ClassifyRequest {
    /// Checks the fields serde cannot check on its own.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.employee_id.trim().is_empty() {
            return Err(ApiError::validation_error("employee_id must not be empty"));
        }
        Ok(())
    }
}
