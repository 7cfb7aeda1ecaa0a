//! Core data models for the Leave Engine.
//!
//! This module contains the domain records persisted by the store and
//! exchanged over the API.

mod date_range;
mod employee;
mod holiday;
mod leave_request;

pub use date_range::DateRange;
pub use employee::Employee;
pub use holiday::{Holiday, HolidayType, NewHoliday};
pub use leave_request::{LeaveRequest, LeaveRequestDraft, LeaveStatus, LeaveType};
