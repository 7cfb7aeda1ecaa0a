//! Error types for the Leave Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every condition a leave operation can fail on: validation, balance,
//! overlap, authorization, lookups and infrastructure.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use crate::models::LeaveStatus;

/// The main error type for the Leave Engine.
///
/// # Example
///
/// ```
/// use leave_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/policy.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/policy.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The requested date range ends before it starts.
    #[error("Invalid date range: end date {end} is before start date {start}")]
    InvalidDateRange {
        /// First day of the range.
        start: NaiveDate,
        /// Last day of the range.
        end: NaiveDate,
    },

    /// A request field failed validation.
    #[error("Invalid field '{field}': {message}")]
    Validation {
        /// The offending field.
        field: String,
        /// What was wrong with it.
        message: String,
    },

    /// Paid leave would exceed the employee's available balance.
    #[error("Insufficient leave balance: requested {requested} day(s), available {available}")]
    InsufficientBalance {
        /// Days the request would charge.
        requested: Decimal,
        /// Days available at submission time.
        available: Decimal,
    },

    /// The requested range intersects an existing non-rejected request.
    #[error("Leave overlaps existing request {request_id} ({start_date} to {end_date})")]
    OverlappingLeave {
        /// The conflicting request.
        request_id: Uuid,
        /// Start of the conflicting request.
        start_date: NaiveDate,
        /// End of the conflicting request.
        end_date: NaiveDate,
    },

    /// The acting employee may not perform this operation.
    #[error("Not authorized: {message}")]
    NotAuthorized {
        /// Why the action was refused.
        message: String,
    },

    /// The leave request is not in a state that allows the operation.
    #[error("Leave request {request_id} is {status}, expected pending")]
    InvalidStatus {
        /// The request that was acted on.
        request_id: Uuid,
        /// Its current status.
        status: LeaveStatus,
    },

    /// No employee with this id exists.
    #[error("Employee not found: {id}")]
    EmployeeNotFound {
        /// The unknown employee id.
        id: String,
    },

    /// No leave request with this id exists.
    #[error("Leave request not found: {id}")]
    LeaveRequestNotFound {
        /// The unknown request id.
        id: Uuid,
    },

    /// No holiday with this id exists.
    #[error("Holiday not found: {id}")]
    HolidayNotFound {
        /// The unknown holiday id.
        id: Uuid,
    },

    /// The backing store could not be accessed.
    #[error("Storage error: {message}")]
    StorageError {
        /// A description of the failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
