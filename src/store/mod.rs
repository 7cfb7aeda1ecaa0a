//! In-process storage for employees, leave requests and holidays.
//!
//! Reads take a shared lock. Writes go through [`LeaveStore::transaction`],
//! which runs the closure against a copy of the tables and swaps it in only
//! when the closure returns `Ok`. A failed operation therefore leaves no
//! partial writes behind. The write lock is held for the whole closure, so
//! check-then-insert sequences such as the overlap check are serialized.
//!
//! Each transaction copies all tables, and rejected requests are kept as
//! history, so the cost of a write grows linearly with the stored records.
//! That is acceptable for a single organization's in-process data set; a
//! persistent backend would replace the copy with a real transaction.

mod tables;

use std::sync::RwLock;

use tracing::error;

use crate::error::{EngineError, EngineResult};

pub use tables::Tables;

/// Thread-safe store shared by the service layer.
#[derive(Debug, Default)]
pub struct LeaveStore {
    tables: RwLock<Tables>,
}

impl LeaveStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs a read-only query.
    pub fn read<T>(&self, query: impl FnOnce(&Tables) -> T) -> EngineResult<T> {
        let guard = self.tables.read().map_err(|_| poisoned())?;
        Ok(query(&guard))
    }

    /// Runs `work` as a single all-or-nothing write.
    ///
    /// # Example
    ///
    /// ```
    /// use leave_engine::error::EngineError;
    /// use leave_engine::models::Employee;
    /// use leave_engine::store::LeaveStore;
    ///
    /// let store = LeaveStore::new();
    /// let result: Result<(), _> = store.transaction(|tables| {
    ///     tables.upsert_employee(Employee::new("emp_001", "Asha", None));
    ///     Err(EngineError::Validation { field: "name".into(), message: "rolled back".into() })
    /// });
    /// assert!(result.is_err());
    /// assert!(store.read(|t| t.employee("emp_001").is_err()).unwrap());
    /// ```
    pub fn transaction<T>(
        &self,
        work: impl FnOnce(&mut Tables) -> EngineResult<T>,
    ) -> EngineResult<T> {
        let mut guard = self.tables.write().map_err(|_| poisoned())?;
        let mut working = guard.clone();
        let output = work(&mut working)?;
        *guard = working;
        Ok(output)
    }
}

fn poisoned() -> EngineError {
    error!("Leave store lock poisoned");
    EngineError::StorageError {
        message: "store lock poisoned".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        DateRange, Employee, Holiday, HolidayType, LeaveRequest, LeaveStatus, LeaveType, NewHoliday,
    };
    use chrono::{NaiveDate, Utc};
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn request(employee_id: &str, start: &str, end: &str, status: LeaveStatus) -> LeaveRequest {
        LeaveRequest {
            id: Uuid::new_v4(),
            employee_id: employee_id.to_string(),
            start_date: make_date(start),
            end_date: make_date(end),
            leave_type: LeaveType::Casual,
            is_sandwich_leave: false,
            total_days: Decimal::ONE,
            sandwich_days: Decimal::ZERO,
            reason: String::new(),
            status,
            admin_remarks: None,
            approved_by: None,
            approved_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_committed_transaction_is_visible() {
        let store = LeaveStore::new();
        store
            .transaction(|tables| {
                tables.upsert_employee(Employee::new("emp_001", "Asha", None));
                Ok(())
            })
            .unwrap();

        let name = store
            .read(|t| t.employee("emp_001").map(|e| e.name.clone()))
            .unwrap()
            .unwrap();
        assert_eq!(name, "Asha");
    }

    #[test]
    fn test_failed_transaction_rolls_back_every_write() {
        let store = LeaveStore::new();
        store
            .transaction(|tables| {
                tables.upsert_employee(Employee::new("emp_001", "Asha", None));
                Ok(())
            })
            .unwrap();

        let result: EngineResult<()> = store.transaction(|tables| {
            tables.set_leave_balance("emp_001", Decimal::from(9))?;
            tables.insert_leave_request(request(
                "emp_001",
                "2026-02-02",
                "2026-02-03",
                LeaveStatus::Pending,
            ));
            tables.set_leave_balance("emp_missing", Decimal::ONE)
        });

        assert!(matches!(result, Err(EngineError::EmployeeNotFound { .. })));
        let (balance, requests) = store
            .read(|t| {
                (
                    t.employee("emp_001").map(|e| e.leave_balance).unwrap(),
                    t.leave_requests_for("emp_001").len(),
                )
            })
            .unwrap();
        assert_eq!(balance, Decimal::ZERO);
        assert_eq!(requests, 0);
    }

    #[test]
    fn test_find_overlapping_skips_rejected_and_other_employees() {
        let store = LeaveStore::new();
        store
            .transaction(|tables| {
                tables.insert_leave_request(request(
                    "emp_001",
                    "2026-02-02",
                    "2026-02-04",
                    LeaveStatus::Rejected,
                ));
                tables.insert_leave_request(request(
                    "emp_002",
                    "2026-02-02",
                    "2026-02-04",
                    LeaveStatus::Approved,
                ));
                Ok(())
            })
            .unwrap();

        let range = DateRange::new(make_date("2026-02-03"), make_date("2026-02-05")).unwrap();
        let hit = store
            .read(|t| t.find_overlapping("emp_001", &range).cloned())
            .unwrap();
        assert!(hit.is_none());

        store
            .transaction(|tables| {
                tables.insert_leave_request(request(
                    "emp_001",
                    "2026-02-05",
                    "2026-02-06",
                    LeaveStatus::Pending,
                ));
                Ok(())
            })
            .unwrap();
        let hit = store
            .read(|t| t.find_overlapping("emp_001", &range).cloned())
            .unwrap();
        assert_eq!(hit.map(|r| r.start_date), Some(make_date("2026-02-05")));
    }

    #[test]
    fn test_holiday_queries() {
        let store = LeaveStore::new();
        let holiday = |name: &str, date: &str| {
            Holiday::from(NewHoliday {
                name: name.to_string(),
                date: make_date(date),
                holiday_type: HolidayType::National,
                description: None,
                is_recurring: false,
            })
        };
        store
            .transaction(|tables| {
                tables.insert_holiday(holiday("Christmas", "2025-12-25"));
                tables.insert_holiday(holiday("Republic Day", "2026-01-26"));
                tables.insert_holiday(holiday("New Year", "2026-01-01"));
                Ok(())
            })
            .unwrap();

        let year = store.read(|t| t.holidays_in_year(2026)).unwrap();
        let names: Vec<_> = year.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["New Year", "Republic Day"]);

        let previous = store.read(|t| t.holidays_in_year(2025)).unwrap();
        assert_eq!(previous.len(), 1);
        assert_eq!(previous[0].date, make_date("2025-12-25"));
    }

    #[test]
    fn test_remove_unknown_request_is_not_found() {
        let store = LeaveStore::new();
        let id = Uuid::new_v4();
        let result = store.transaction(|tables| tables.remove_leave_request(id));
        assert!(matches!(
            result,
            Err(EngineError::LeaveRequestNotFound { id: missing }) if missing == id
        ));
    }
}
