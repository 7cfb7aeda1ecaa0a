//! Service layer tying the calculation functions to the store.
//!
//! [`LeaveService`] owns employee records and the leave request lifecycle;
//! [`HolidayService`] administers the holiday calendar both of them read.

mod holiday;
mod leave;

pub use holiday::HolidayService;
pub use leave::{LeavePreview, LeaveService, LeaveSummary};
