//! Application state for the Leave Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use tracing::info;

use crate::config::ConfigLoader;
use crate::error::EngineResult;
use crate::service::{HolidayService, LeaveService};
use crate::store::LeaveStore;

/// Shared application state.
///
/// Holds the loaded configuration and the services, which share one store.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    leave: LeaveService,
    holidays: HolidayService,
}

impl AppState {
    /// Creates the state with a fresh store seeded with the configured holidays.
    pub fn new(config: ConfigLoader) -> EngineResult<Self> {
        let store = Arc::new(LeaveStore::new());
        let leave = LeaveService::new(store.clone(), &config);
        let holidays = HolidayService::new(store);

        let seeded = holidays.seed(config.holidays())?;
        info!(
            organization = %config.organization().code,
            holidays = seeded,
            "Application state initialized"
        );

        Ok(Self {
            config: Arc::new(config),
            leave,
            holidays,
        })
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the leave service.
    pub fn leave(&self) -> &LeaveService {
        &self.leave
    }

    /// Returns the holiday service.
    pub fn holidays(&self) -> &HolidayService {
        &self.holidays
    }
}
