//! In-memory tables backing the store.

use std::collections::BTreeMap;

use chrono::Datelike;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{DateRange, Employee, Holiday, LeaveRequest};

/// Employees, leave requests and holidays keyed by id.
///
/// Cloned wholesale by [`super::LeaveStore::transaction`] to give each write
/// a private working copy.
#[derive(Debug, Clone, Default)]
pub struct Tables {
    employees: BTreeMap<String, Employee>,
    leave_requests: BTreeMap<Uuid, LeaveRequest>,
    holidays: BTreeMap<Uuid, Holiday>,
}

impl Tables {
    /// Looks up an employee.
    pub fn employee(&self, id: &str) -> EngineResult<&Employee> {
        self.employees
            .get(id)
            .ok_or_else(|| EngineError::EmployeeNotFound { id: id.to_string() })
    }

    /// Inserts or replaces an employee.
    pub fn upsert_employee(&mut self, employee: Employee) {
        self.employees.insert(employee.id.clone(), employee);
    }

    /// Writes a new balance snapshot for an employee.
    pub fn set_leave_balance(&mut self, id: &str, balance: Decimal) -> EngineResult<()> {
        let employee = self
            .employees
            .get_mut(id)
            .ok_or_else(|| EngineError::EmployeeNotFound { id: id.to_string() })?;
        employee.leave_balance = balance;
        Ok(())
    }

    /// Looks up a leave request.
    pub fn leave_request(&self, id: Uuid) -> EngineResult<&LeaveRequest> {
        self.leave_requests
            .get(&id)
            .ok_or(EngineError::LeaveRequestNotFound { id })
    }

    /// Mutable access to a leave request.
    pub fn leave_request_mut(&mut self, id: Uuid) -> EngineResult<&mut LeaveRequest> {
        self.leave_requests
            .get_mut(&id)
            .ok_or(EngineError::LeaveRequestNotFound { id })
    }

    /// All requests of one employee, ordered by start date.
    pub fn leave_requests_for(&self, employee_id: &str) -> Vec<LeaveRequest> {
        let mut requests: Vec<LeaveRequest> = self
            .leave_requests
            .values()
            .filter(|r| r.employee_id == employee_id)
            .cloned()
            .collect();
        requests.sort_by(|a, b| {
            a.start_date
                .cmp(&b.start_date)
                .then(a.created_at.cmp(&b.created_at))
        });
        requests
    }

    /// The first non-rejected request of `employee_id` that shares a day with `range`.
    pub fn find_overlapping(&self, employee_id: &str, range: &DateRange) -> Option<&LeaveRequest> {
        self.leave_requests
            .values()
            .filter(|r| r.employee_id == employee_id && r.is_active())
            .find(|r| r.range().overlaps(range))
    }

    /// Stores a new leave request.
    pub fn insert_leave_request(&mut self, request: LeaveRequest) {
        self.leave_requests.insert(request.id, request);
    }

    /// Removes a leave request, returning it.
    pub fn remove_leave_request(&mut self, id: Uuid) -> EngineResult<LeaveRequest> {
        self.leave_requests
            .remove(&id)
            .ok_or(EngineError::LeaveRequestNotFound { id })
    }

    /// Stores a holiday.
    pub fn insert_holiday(&mut self, holiday: Holiday) {
        self.holidays.insert(holiday.id, holiday);
    }

    /// Removes a holiday, returning it.
    pub fn remove_holiday(&mut self, id: Uuid) -> EngineResult<Holiday> {
        self.holidays
            .remove(&id)
            .ok_or(EngineError::HolidayNotFound { id })
    }

    /// Holidays of one calendar year, ordered by date.
    pub fn holidays_in_year(&self, year: i32) -> Vec<Holiday> {
        let mut holidays: Vec<Holiday> = self
            .holidays
            .values()
            .filter(|h| h.date.year() == year)
            .cloned()
            .collect();
        holidays.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.name.cmp(&b.name)));
        holidays
    }
}
