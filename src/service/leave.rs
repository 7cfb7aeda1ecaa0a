//! Leave request workflow.
//!
//! Every write runs inside one store transaction: validation, day
//! calculation, overlap and balance checks, the mutation itself and the
//! balance snapshot refresh either all commit or all roll back.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::calculation::{
    LeaveBalance, LeaveDayCount, calculate_leave_days, compute_balance, has_sandwich_days,
};
use crate::config::{AccrualPolicy, ConfigLoader, RequestPolicy};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    DateRange, Employee, LeaveRequest, LeaveRequestDraft, LeaveStatus, LeaveType,
};
use crate::store::{LeaveStore, Tables};

use super::holiday::calendar_for;

/// Result of a leave preview: the day count plus the sandwich hint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeavePreview {
    /// The calculated day count.
    #[serde(flatten)]
    pub count: LeaveDayCount,
    /// True if a non-working day lies strictly inside the range.
    pub has_sandwich_days: bool,
}

/// Per-year overview of an employee's leave.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveSummary {
    /// The employee summarized.
    pub employee_id: String,
    /// Requests starting in this year are included.
    pub year: i32,
    /// Approved days per leave type.
    pub approved_days: BTreeMap<LeaveType, Decimal>,
    /// Days still awaiting review.
    pub pending_days: Decimal,
    /// Number of requests per status.
    pub request_counts: BTreeMap<LeaveStatus, u32>,
}

/// Which way a review goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Decision {
    Approve,
    Reject,
}

/// Employee records, previews, submissions, reviews and balances.
#[derive(Debug, Clone)]
pub struct LeaveService {
    store: Arc<LeaveStore>,
    accrual: AccrualPolicy,
    requests: RequestPolicy,
}

impl LeaveService {
    /// Creates a service over `store` using the policies in `config`.
    pub fn new(store: Arc<LeaveStore>, config: &ConfigLoader) -> Self {
        Self {
            store,
            accrual: config.accrual().clone(),
            requests: config.requests().clone(),
        }
    }

    /// Registers a new employee or updates name and joining date of an
    /// existing one, then refreshes the balance snapshot.
    pub fn register_employee(
        &self,
        id: &str,
        name: &str,
        date_of_joining: Option<NaiveDate>,
        today: NaiveDate,
    ) -> EngineResult<Employee> {
        if id.trim().is_empty() {
            return Err(validation("id", "must not be empty"));
        }
        if name.trim().is_empty() {
            return Err(validation("name", "must not be empty"));
        }

        let employee = self.store.transaction(|tables| {
            let mut employee = tables
                .employee(id)
                .cloned()
                .unwrap_or_else(|_| Employee::new(id, name, date_of_joining));
            employee.name = name.to_string();
            employee.date_of_joining = date_of_joining;
            tables.upsert_employee(employee);
            refresh_balance(tables, id, today, &self.accrual)?;
            tables.employee(id).cloned()
        })?;

        info!(employee_id = %employee.id, balance = %employee.leave_balance, "Employee registered");
        Ok(employee)
    }

    /// Looks up an employee record.
    pub fn employee(&self, id: &str) -> EngineResult<Employee> {
        self.store.read(|tables| tables.employee(id).cloned())?
    }

    /// Calculates the days a range would charge without persisting anything.
    pub fn preview(
        &self,
        range: &DateRange,
        is_sandwich_leave: bool,
    ) -> EngineResult<LeavePreview> {
        self.check_range_length(range)?;
        let calendar = self.store.read(|tables| calendar_for(tables, range))?;
        Ok(LeavePreview {
            count: calculate_leave_days(range, is_sandwich_leave, &calendar),
            has_sandwich_days: has_sandwich_days(range, &calendar),
        })
    }

    /// Submits a leave request for `employee_id`.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidDateRange`] / [`EngineError::Validation`] for bad input
    /// - [`EngineError::EmployeeNotFound`] for an unknown employee
    /// - [`EngineError::OverlappingLeave`] if a non-rejected request shares a day
    /// - [`EngineError::InsufficientBalance`] if paid leave exceeds the balance
    pub fn submit(
        &self,
        employee_id: &str,
        draft: LeaveRequestDraft,
        now: DateTime<Utc>,
    ) -> EngineResult<LeaveRequest> {
        let range = draft.range()?;
        self.check_range_length(&range)?;
        let reason = draft.reason.trim();
        if reason.is_empty() {
            return Err(validation("reason", "must not be empty"));
        }
        let today = now.date_naive();

        let request = self.store.transaction(|tables| {
            let employee = tables.employee(employee_id)?.clone();

            let calendar = calendar_for(tables, &range);
            let count = calculate_leave_days(&range, draft.is_sandwich_leave, &calendar);
            if count.total_days.is_zero() {
                return Err(validation(
                    "end_date",
                    "the selected dates contain no chargeable leave days",
                ));
            }

            if let Some(existing) = tables.find_overlapping(employee_id, &range) {
                return Err(EngineError::OverlappingLeave {
                    request_id: existing.id,
                    start_date: existing.start_date,
                    end_date: existing.end_date,
                });
            }

            if draft.leave_type.is_paid() {
                let history = tables.leave_requests_for(employee_id);
                let balance =
                    compute_balance(employee.date_of_joining, &history, today, &self.accrual);
                if count.total_days > balance.available {
                    return Err(EngineError::InsufficientBalance {
                        requested: count.total_days,
                        available: balance.available,
                    });
                }
            }

            let request = LeaveRequest {
                id: Uuid::new_v4(),
                employee_id: employee_id.to_string(),
                start_date: range.start(),
                end_date: range.end(),
                leave_type: draft.leave_type,
                is_sandwich_leave: draft.is_sandwich_leave,
                total_days: count.total_days,
                sandwich_days: count.sandwich_days,
                reason: reason.to_string(),
                status: LeaveStatus::Pending,
                admin_remarks: None,
                approved_by: None,
                approved_at: None,
                created_at: now,
            };
            tables.insert_leave_request(request.clone());
            refresh_balance(tables, employee_id, today, &self.accrual)?;
            Ok(request)
        })?;

        info!(
            request_id = %request.id,
            employee_id = %employee_id,
            leave_type = %request.leave_type,
            total_days = %request.total_days,
            sandwich_days = %request.sandwich_days,
            "Leave request submitted"
        );
        Ok(request)
    }

    /// Approves a pending request.
    pub fn approve(
        &self,
        request_id: Uuid,
        approver_id: &str,
        remarks: Option<String>,
        now: DateTime<Utc>,
    ) -> EngineResult<LeaveRequest> {
        self.review(request_id, approver_id, remarks, now, Decision::Approve)
    }

    /// Rejects a pending request, releasing the days it held.
    pub fn reject(
        &self,
        request_id: Uuid,
        approver_id: &str,
        remarks: Option<String>,
        now: DateTime<Utc>,
    ) -> EngineResult<LeaveRequest> {
        self.review(request_id, approver_id, remarks, now, Decision::Reject)
    }

    fn review(
        &self,
        request_id: Uuid,
        approver_id: &str,
        remarks: Option<String>,
        now: DateTime<Utc>,
        decision: Decision,
    ) -> EngineResult<LeaveRequest> {
        let reviewed = self.store.transaction(|tables| {
            tables.employee(approver_id)?;

            let request = tables.leave_request_mut(request_id)?;
            if request.employee_id == approver_id {
                return Err(EngineError::NotAuthorized {
                    message: "employees cannot review their own leave requests".to_string(),
                });
            }
            if request.status != LeaveStatus::Pending {
                return Err(EngineError::InvalidStatus {
                    request_id,
                    status: request.status,
                });
            }

            request.status = match decision {
                Decision::Approve => LeaveStatus::Approved,
                Decision::Reject => LeaveStatus::Rejected,
            };
            request.admin_remarks = remarks.filter(|r| !r.trim().is_empty());
            request.approved_by = Some(approver_id.to_string());
            request.approved_at = Some(now);
            let reviewed = request.clone();

            refresh_balance(tables, &reviewed.employee_id, now.date_naive(), &self.accrual)?;
            Ok(reviewed)
        })?;

        info!(
            request_id = %request_id,
            employee_id = %reviewed.employee_id,
            approver_id = %approver_id,
            status = %reviewed.status,
            "Leave request reviewed"
        );
        Ok(reviewed)
    }

    /// Deletes a request. Only its owner may do so, and only while pending.
    pub fn delete(
        &self,
        request_id: Uuid,
        actor_id: &str,
        today: NaiveDate,
    ) -> EngineResult<LeaveRequest> {
        let removed = self.store.transaction(|tables| {
            let request = tables.leave_request(request_id)?;
            if request.employee_id != actor_id {
                return Err(EngineError::NotAuthorized {
                    message: "only the requesting employee can delete a leave request"
                        .to_string(),
                });
            }
            if request.status != LeaveStatus::Pending {
                return Err(EngineError::InvalidStatus {
                    request_id,
                    status: request.status,
                });
            }

            let removed = tables.remove_leave_request(request_id)?;
            refresh_balance(tables, actor_id, today, &self.accrual)?;
            Ok(removed)
        })?;

        info!(request_id = %request_id, employee_id = %actor_id, "Leave request deleted");
        Ok(removed)
    }

    /// All requests of an employee, ordered by start date.
    pub fn list_for_employee(&self, employee_id: &str) -> EngineResult<Vec<LeaveRequest>> {
        self.store.read(|tables| -> EngineResult<Vec<LeaveRequest>> {
            tables.employee(employee_id)?;
            Ok(tables.leave_requests_for(employee_id))
        })?
    }

    /// Computes the available balance as of `today` and persists the snapshot.
    pub fn balance(&self, employee_id: &str, today: NaiveDate) -> EngineResult<LeaveBalance> {
        self.store
            .transaction(|tables| refresh_balance(tables, employee_id, today, &self.accrual))
    }

    /// Summarizes requests starting in `year`.
    pub fn summary(&self, employee_id: &str, year: i32) -> EngineResult<LeaveSummary> {
        let requests = self.list_for_employee(employee_id)?;

        let mut summary = LeaveSummary {
            employee_id: employee_id.to_string(),
            year,
            approved_days: BTreeMap::new(),
            pending_days: Decimal::ZERO,
            request_counts: BTreeMap::new(),
        };

        for request in requests.iter().filter(|r| r.start_date.year() == year) {
            *summary.request_counts.entry(request.status).or_insert(0) += 1;
            match request.status {
                LeaveStatus::Approved => {
                    *summary
                        .approved_days
                        .entry(request.leave_type)
                        .or_insert(Decimal::ZERO) += request.total_days;
                }
                LeaveStatus::Pending => summary.pending_days += request.total_days,
                LeaveStatus::Rejected => {}
            }
        }

        Ok(summary)
    }

    fn check_range_length(&self, range: &DateRange) -> EngineResult<()> {
        if range.len() > self.requests.max_range_days {
            return Err(validation(
                "end_date",
                &format!(
                    "range of {} days exceeds the maximum of {}",
                    range.len(),
                    self.requests.max_range_days
                ),
            ));
        }
        Ok(())
    }
}

/// Recomputes an employee's balance and writes the snapshot.
fn refresh_balance(
    tables: &mut Tables,
    employee_id: &str,
    today: NaiveDate,
    policy: &AccrualPolicy,
) -> EngineResult<LeaveBalance> {
    let joined = tables.employee(employee_id)?.date_of_joining;
    let history = tables.leave_requests_for(employee_id);
    let balance = compute_balance(joined, &history, today, policy);
    tables.set_leave_balance(employee_id, balance.available)?;
    debug!(employee_id = %employee_id, available = %balance.available, "Leave balance refreshed");
    Ok(balance)
}

fn validation(field: &str, message: &str) -> EngineError {
    EngineError::Validation {
        field: field.to_string(),
        message: message.to_string(),
    }
}
