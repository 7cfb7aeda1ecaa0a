//! Leave balance accrual.
//!
//! The available balance is derived, never incremented: it is the leave
//! accrued for each completed calendar month of service minus the days held
//! by pending and approved paid requests. Persisting the result is the
//! caller's concern.

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::AccrualPolicy;
use crate::models::LeaveRequest;

/// A computed leave balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveBalance {
    /// The date the balance was computed for.
    pub as_of: NaiveDate,
    /// Completed calendar months of service.
    pub completed_months: u32,
    /// Leave accrued from service, after any cap.
    pub accrued: Decimal,
    /// Days held by pending and approved paid requests.
    pub consumed: Decimal,
    /// Days still available; never negative.
    pub available: Decimal,
}

/// Counts completed calendar months between `joined` and `today`.
///
/// A month is complete once the same day-of-month is reached again, with
/// month-end clamping (joining on Jan 31 completes a month on Feb 28).
///
/// # Example
///
/// ```
/// use leave_engine::calculation::completed_months;
/// use chrono::NaiveDate;
///
/// let joined = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
/// assert_eq!(completed_months(joined, NaiveDate::from_ymd_opt(2025, 4, 14).unwrap()), 0);
/// assert_eq!(completed_months(joined, NaiveDate::from_ymd_opt(2025, 4, 15).unwrap()), 1);
/// assert_eq!(completed_months(joined, NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()), 12);
/// ```
pub fn completed_months(joined: NaiveDate, today: NaiveDate) -> u32 {
    if today <= joined {
        return 0;
    }

    let span = (today.year() - joined.year()) * 12 + today.month() as i32
        - joined.month() as i32;
    let mut months = span.max(0) as u32;

    while months > 0 {
        match joined.checked_add_months(Months::new(months)) {
            Some(anniversary) if anniversary <= today => break,
            _ => months -= 1,
        }
    }

    months
}

/// Sums the days held against the balance by `history`.
///
/// Pending and approved requests count; rejected and unpaid ones do not.
pub fn consumed_days(history: &[LeaveRequest]) -> Decimal {
    history
        .iter()
        .filter(|request| request.counts_against_balance())
        .map(|request| request.total_days)
        .sum()
}

/// Computes an employee's leave balance as of `today`.
///
/// # Arguments
///
/// * `date_of_joining` - When the employee joined, if known
/// * `history` - The employee's leave requests
/// * `today` - The reference date
/// * `policy` - Accrual rate and optional cap
///
/// # Returns
///
/// A [`LeaveBalance`]. An unknown or future joining date accrues nothing and
/// yields zero available balance rather than an error. The computation is
/// pure, so repeated calls with the same inputs give the same result.
///
/// # Example
///
/// ```
/// use leave_engine::calculation::compute_balance;
/// use leave_engine::config::AccrualPolicy;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let policy = AccrualPolicy { days_per_month: Decimal::ONE, max_accrued: None };
/// let balance = compute_balance(
///     NaiveDate::from_ymd_opt(2025, 10, 1),
///     &[],
///     NaiveDate::from_ymd_opt(2026, 1, 20).unwrap(),
///     &policy,
/// );
/// assert_eq!(balance.completed_months, 3);
/// assert_eq!(balance.available, Decimal::from(3));
/// ```
pub fn compute_balance(
    date_of_joining: Option<NaiveDate>,
    history: &[LeaveRequest],
    today: NaiveDate,
    policy: &AccrualPolicy,
) -> LeaveBalance {
    let consumed = consumed_days(history);

    let months = match date_of_joining {
        Some(joined) if joined <= today => completed_months(joined, today),
        _ => 0,
    };

    let mut accrued = Decimal::from(months) * policy.days_per_month;
    if let Some(cap) = policy.max_accrued {
        accrued = accrued.min(cap);
    }

    let available = (accrued - consumed).max(Decimal::ZERO);

    LeaveBalance {
        as_of: today,
        completed_months: months,
        accrued,
        consumed,
        available,
    }
}
