//! Leave Engine
//!
//! This crate calculates chargeable leave days against an organization's
//! non-working day calendar (Sundays, 2nd/4th Saturdays and declared
//! holidays), applies the sandwich-leave policy, derives leave balances from
//! monthly accrual, and runs the leave request workflow behind a JSON API.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod store;
