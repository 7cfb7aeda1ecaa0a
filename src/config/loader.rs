//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the leave
//! configuration from YAML files.

use chrono::Datelike;
use rust_decimal::Decimal;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::NewHoliday;

use super::types::{
    AccrualPolicy, HolidayFile, LeaveConfig, OrganizationMetadata, PolicyConfig, RequestPolicy,
};

/// Loads and provides access to the leave configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── organization.yaml  # Organization metadata
/// ├── policy.yaml        # Accrual and request limits
/// └── holidays/          # Optional seed holidays
///     └── 2026.yaml
/// ```
///
/// # Example
///
/// ```no_run
/// use leave_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Organization: {}", loader.organization().name);
/// println!("Accrual per month: {}", loader.accrual().days_per_month);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: LeaveConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - `organization.yaml` or `policy.yaml` is missing
    /// - Any file contains invalid YAML
    /// - A policy value is out of range
    /// - A holiday file lists a date outside its declared year
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let organization_path = path.join("organization.yaml");
        let metadata = Self::load_yaml::<OrganizationMetadata>(&organization_path)?;

        let policy_path = path.join("policy.yaml");
        let policy = Self::load_yaml::<PolicyConfig>(&policy_path)?;
        Self::validate_policy(&policy_path, &policy)?;

        let holidays_dir = path.join("holidays");
        let holidays = Self::load_holidays(&holidays_dir)?;

        debug!(
            organization = %metadata.code,
            holidays = holidays.len(),
            "Loaded leave configuration"
        );

        Ok(Self {
            config: LeaveConfig::new(metadata, policy, holidays),
        })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: LeaveConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn validate_policy(path: &Path, policy: &PolicyConfig) -> EngineResult<()> {
        let invalid = |message: &str| EngineError::ConfigParseError {
            path: path.display().to_string(),
            message: message.to_string(),
        };

        if policy.accrual.days_per_month < Decimal::ZERO {
            return Err(invalid("accrual.days_per_month must not be negative"));
        }
        if policy
            .accrual
            .max_accrued
            .is_some_and(|cap| cap < Decimal::ZERO)
        {
            return Err(invalid("accrual.max_accrued must not be negative"));
        }
        if policy.requests.max_range_days == 0 {
            return Err(invalid("requests.max_range_days must be at least 1"));
        }
        Ok(())
    }

    /// Loads every holiday file from the holidays directory.
    ///
    /// A missing directory means no seed holidays.
    fn load_holidays(holidays_dir: &Path) -> EngineResult<Vec<NewHoliday>> {
        if !holidays_dir.exists() {
            debug!(path = %holidays_dir.display(), "No holidays directory");
            return Ok(Vec::new());
        }

        let dir_str = holidays_dir.display().to_string();
        let entries = fs::read_dir(holidays_dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut holidays = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                let file = Self::load_yaml::<HolidayFile>(&path)?;
                if let Some(stray) = file.holidays.iter().find(|h| h.date.year() != file.year) {
                    return Err(EngineError::ConfigParseError {
                        path: path.display().to_string(),
                        message: format!(
                            "holiday '{}' on {} is outside year {}",
                            stray.name, stray.date, file.year
                        ),
                    });
                }
                holidays.extend(file.holidays);
            }
        }

        Ok(holidays)
    }

    /// Returns the organization metadata.
    pub fn organization(&self) -> &OrganizationMetadata {
        self.config.organization()
    }

    /// Returns the accrual policy.
    pub fn accrual(&self) -> &AccrualPolicy {
        self.config.accrual()
    }

    /// Returns the submission limits.
    pub fn requests(&self) -> &RequestPolicy {
        self.config.requests()
    }

    /// Returns the seed holidays, sorted by date.
    pub fn holidays(&self) -> &[NewHoliday] {
        self.config.holidays()
    }
}
