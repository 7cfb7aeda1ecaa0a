//! Holiday records declared by the organization.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of holiday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HolidayType {
    /// Nationally declared public holiday.
    National,
    /// Company-specific holiday.
    Company,
    /// Optional (restricted) holiday.
    Optional,
}

/// A declared non-working date.
///
/// Holidays are immutable once created; they can only be deleted.
/// `is_recurring` is informational and is not expanded into later years.
///
/// # Example
///
/// ```
/// use leave_engine::models::{Holiday, HolidayType, NewHoliday};
/// use chrono::NaiveDate;
///
/// let holiday = Holiday::from(NewHoliday {
///     name: "Republic Day".to_string(),
///     date: NaiveDate::from_ymd_opt(2026, 1, 26).unwrap(),
///     holiday_type: HolidayType::National,
///     description: None,
///     is_recurring: true,
/// });
/// assert_eq!(holiday.name, "Republic Day");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    /// Unique identifier.
    pub id: Uuid,
    /// Holiday name.
    pub name: String,
    /// The calendar date of the holiday.
    pub date: NaiveDate,
    /// Kind of holiday.
    #[serde(rename = "type")]
    pub holiday_type: HolidayType,
    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,
    /// Whether the holiday repeats every year.
    #[serde(default)]
    pub is_recurring: bool,
}

/// Fields supplied when declaring a holiday, from config seeds or the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewHoliday {
    /// Holiday name.
    pub name: String,
    /// The calendar date of the holiday.
    pub date: NaiveDate,
    /// Kind of holiday.
    #[serde(rename = "type", default = "default_holiday_type")]
    pub holiday_type: HolidayType,
    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,
    /// Whether the holiday repeats every year.
    #[serde(default)]
    pub is_recurring: bool,
}

fn default_holiday_type() -> HolidayType {
    HolidayType::National
}

impl From<NewHoliday> for Holiday {
    fn from(new: NewHoliday) -> Self {
        Holiday {
            id: Uuid::new_v4(),
            name: new.name,
            date: new.date,
            holiday_type: new.holiday_type,
            description: new.description,
            is_recurring: new.is_recurring,
        }
    }
}
