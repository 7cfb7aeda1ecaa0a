//! Employee model.
//!
//! Only the HR fields the leave engine needs are carried here: identity,
//! joining date and the persisted leave balance snapshot.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents an employee who can request leave.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name.
    pub name: String,
    /// The date the employee joined. Unknown joining dates accrue nothing.
    #[serde(default)]
    pub date_of_joining: Option<NaiveDate>,
    /// Last persisted available leave balance.
    ///
    /// This is a snapshot written by an explicit refresh; the authoritative
    /// value is always derived from the joining date and request history.
    #[serde(default)]
    pub leave_balance: Decimal,
}

impl Employee {
    /// Creates an employee with a zero balance snapshot.
    ///
    /// # Examples
    ///
    /// ```
    /// use leave_engine::models::Employee;
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let employee = Employee::new(
    ///     "emp_001",
    ///     "Asha Rao",
    ///     NaiveDate::from_ymd_opt(2024, 6, 1),
    /// );
    /// assert_eq!(employee.leave_balance, Decimal::ZERO);
    /// ```
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        date_of_joining: Option<NaiveDate>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            date_of_joining,
            leave_balance: Decimal::ZERO,
        }
    }
}
