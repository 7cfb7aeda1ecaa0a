//! Configuration types for the leave engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::NewHoliday;

/// Metadata about the organization the configuration belongs to.
#[derive(Debug, Clone, Deserialize)]
pub struct OrganizationMetadata {
    /// Short organization code (e.g., "ACME").
    pub code: String,
    /// The human-readable organization name.
    pub name: String,
}

/// Monthly accrual policy.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AccrualPolicy {
    /// Days credited per completed calendar month of service.
    pub days_per_month: Decimal,
    /// Upper bound on accrued leave, if any.
    #[serde(default)]
    pub max_accrued: Option<Decimal>,
}

/// Limits applied to leave submissions.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RequestPolicy {
    /// Longest range, in calendar days, a single request may cover.
    #[serde(default = "default_max_range_days")]
    pub max_range_days: u32,
}

fn default_max_range_days() -> u32 {
    366
}

impl Default for RequestPolicy {
    fn default() -> Self {
        Self {
            max_range_days: default_max_range_days(),
        }
    }
}

/// Policy configuration from policy.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyConfig {
    /// Accrual settings.
    pub accrual: AccrualPolicy,
    /// Submission limits.
    #[serde(default)]
    pub requests: RequestPolicy,
}

/// One seed file from the holidays directory.
#[derive(Debug, Clone, Deserialize)]
pub struct HolidayFile {
    /// The year every holiday in the file belongs to.
    pub year: i32,
    /// Holidays declared for that year.
    #[serde(default)]
    pub holidays: Vec<NewHoliday>,
}

/// The complete leave configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct LeaveConfig {
    metadata: OrganizationMetadata,
    policy: PolicyConfig,
    /// Seed holidays, sorted by date.
    holidays: Vec<NewHoliday>,
}

impl LeaveConfig {
    /// Creates a new LeaveConfig from its component parts.
    pub fn new(
        metadata: OrganizationMetadata,
        policy: PolicyConfig,
        holidays: Vec<NewHoliday>,
    ) -> Self {
        let mut sorted_holidays = holidays;
        sorted_holidays.sort_by(|a, b| a.date.cmp(&b.date));
        Self {
            metadata,
            policy,
            holidays: sorted_holidays,
        }
    }

    /// Returns the organization metadata.
    pub fn organization(&self) -> &OrganizationMetadata {
        &self.metadata
    }

    /// Returns the accrual policy.
    pub fn accrual(&self) -> &AccrualPolicy {
        &self.policy.accrual
    }

    /// Returns the submission limits.
    pub fn requests(&self) -> &RequestPolicy {
        &self.policy.requests
    }

    /// Returns the seed holidays.
    pub fn holidays(&self) -> &[NewHoliday] {
        &self.holidays
    }
}
