//! HTTP API module for the Leave Engine.
//!
//! This module provides the REST endpoints for previewing leave, running
//! the request workflow, reading balances and administering holidays.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::{EMPLOYEE_ID_HEADER, create_router};
pub use request::{PreviewRequest, RegisterEmployeeRequest, ReviewRequest, YearQuery};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
