//! Leave request model and its status/type enums.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::error::EngineResult;

use super::DateRange;

/// The category of leave being requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveType {
    /// Casual leave.
    Casual,
    /// Sick leave.
    Sick,
    /// Earned (privilege) leave.
    Earned,
    /// Maternity leave.
    Maternity,
    /// Paternity leave.
    Paternity,
    /// Unpaid leave; never charged against the balance.
    Unpaid,
}

impl LeaveType {
    /// Returns true if this leave type is charged against the leave balance.
    pub fn is_paid(&self) -> bool {
        !matches!(self, LeaveType::Unpaid)
    }
}

impl std::fmt::Display for LeaveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeaveType::Casual => write!(f, "casual"),
            LeaveType::Sick => write!(f, "sick"),
            LeaveType::Earned => write!(f, "earned"),
            LeaveType::Maternity => write!(f, "maternity"),
            LeaveType::Paternity => write!(f, "paternity"),
            LeaveType::Unpaid => write!(f, "unpaid"),
        }
    }
}

/// Review state of a leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    /// Submitted and awaiting review.
    Pending,
    /// Approved by an approver.
    Approved,
    /// Rejected by an approver.
    Rejected,
}

impl std::fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeaveStatus::Pending => write!(f, "pending"),
            LeaveStatus::Approved => write!(f, "approved"),
            LeaveStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// What an employee submits when asking for leave.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequestDraft {
    /// First day of leave.
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// Category of leave.
    pub leave_type: LeaveType,
    /// Whether interior weekends/holidays are charged.
    #[serde(default)]
    pub is_sandwich_leave: bool,
    /// Free-text reason.
    #[serde(default)]
    pub reason: String,
}

impl LeaveRequestDraft {
    /// The validated date range of the draft.
    pub fn range(&self) -> EngineResult<DateRange> {
        DateRange::new(self.start_date, self.end_date)
    }
}

/// A persisted leave request.
///
/// # Example
///
/// ```
/// use leave_engine::models::{LeaveRequest, LeaveStatus, LeaveType};
/// use chrono::{NaiveDate, Utc};
/// use rust_decimal::Decimal;
/// use uuid::Uuid;
///
/// let request = LeaveRequest {
///     id: Uuid::new_v4(),
///     employee_id: "emp_001".to_string(),
///     start_date: NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2026, 1, 16).unwrap(),
///     leave_type: LeaveType::Casual,
///     is_sandwich_leave: false,
///     total_days: Decimal::from(5),
///     sandwich_days: Decimal::ZERO,
///     reason: "Family visit".to_string(),
///     status: LeaveStatus::Pending,
///     admin_remarks: None,
///     approved_by: None,
///     approved_at: None,
///     created_at: Utc::now(),
/// };
/// assert!(request.counts_against_balance());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// Unique identifier.
    pub id: Uuid,
    /// The requesting employee.
    pub employee_id: String,
    /// First day of leave.
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// Category of leave.
    pub leave_type: LeaveType,
    /// Whether interior weekends/holidays were charged.
    pub is_sandwich_leave: bool,
    /// Days charged, including sandwich days.
    pub total_days: Decimal,
    /// Non-working days charged because of the sandwich policy.
    pub sandwich_days: Decimal,
    /// Free-text reason.
    pub reason: String,
    /// Review state.
    pub status: LeaveStatus,
    /// Remarks left by the reviewer.
    pub admin_remarks: Option<String>,
    /// The reviewer's employee id.
    pub approved_by: Option<String>,
    /// When the request was reviewed.
    pub approved_at: Option<DateTime<Utc>>,
    /// When the request was submitted.
    pub created_at: DateTime<Utc>,
}

impl LeaveRequest {
    /// The request's date range.
    ///
    /// Persisted requests always satisfy `end_date >= start_date`; a record
    /// violating that is logged and collapses to its start day.
    pub fn range(&self) -> DateRange {
        DateRange::new(self.start_date, self.end_date).unwrap_or_else(|err| {
            warn!(
                request_id = %self.id,
                error = %err,
                "Stored leave request has a reversed range"
            );
            DateRange::single(self.start_date)
        })
    }

    /// Returns true unless the request was rejected.
    pub fn is_active(&self) -> bool {
        self.status != LeaveStatus::Rejected
    }

    /// Returns true if the request consumes paid leave balance.
    pub fn counts_against_balance(&self) -> bool {
        self.is_active() && self.leave_type.is_paid()
    }
}
