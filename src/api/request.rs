//! Request types for the Leave Engine API.
//!
//! Leave submissions use [`LeaveRequestDraft`](crate::models::LeaveRequestDraft)
//! and holiday creation uses [`NewHoliday`](crate::models::NewHoliday)
//! directly; the remaining bodies and query strings are defined here.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::DateRange;

/// Request body for `POST /leave/preview`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewRequest {
    /// First day of leave.
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// Whether interior weekends/holidays are charged.
    #[serde(default)]
    pub is_sandwich_leave: bool,
}

impl PreviewRequest {
    /// The validated date range.
    pub fn range(&self) -> EngineResult<DateRange> {
        DateRange::new(self.start_date, self.end_date)
    }
}

/// Request body for the approve and reject endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewRequest {
    /// Optional remarks recorded on the request.
    #[serde(default)]
    pub remarks: Option<String>,
}

/// Request body for `PUT /employees/:id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterEmployeeRequest {
    /// Display name.
    pub name: String,
    /// Joining date, if known.
    #[serde(default)]
    pub date_of_joining: Option<NaiveDate>,
}

/// Query string carrying an optional year.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct YearQuery {
    /// Calendar year; defaults to the current year.
    #[serde(default)]
    pub year: Option<i32>,
}
