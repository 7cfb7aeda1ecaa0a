//! Calculation logic for the Leave Engine.
//!
//! This module contains the pure functions behind leave handling: non-working
//! day classification (Sundays, 2nd/4th Saturdays and declared holidays),
//! leave day counting with the sandwich-leave policy, and leave balance
//! accrual from length of service.

mod day_classification;
mod leave_balance;
mod leave_days;

pub use day_classification::{
    DayKind, HolidayCalendar, classify_day, is_holiday, is_second_or_fourth_saturday, is_sunday,
};
pub use leave_balance::{LeaveBalance, completed_months, compute_balance, consumed_days};
pub use leave_days::{LeaveDay, LeaveDayCount, calculate_leave_days, has_sandwich_days};
