//! Configuration loading and management for the Leave Engine.
//!
//! This module loads the organization metadata, the accrual and request
//! policy, and the seed holiday calendar from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use leave_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Loaded organization: {}", config.organization().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AccrualPolicy, HolidayFile, LeaveConfig, OrganizationMetadata, PolicyConfig, RequestPolicy,
};
