//! Holiday administration.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::calculation::HolidayCalendar;
use crate::error::{EngineError, EngineResult};
use crate::models::{DateRange, Holiday, NewHoliday};
use crate::store::{LeaveStore, Tables};

/// Creates, deletes and lists declared holidays.
#[derive(Debug, Clone)]
pub struct HolidayService {
    store: Arc<LeaveStore>,
}

impl HolidayService {
    /// Creates a service over `store`.
    pub fn new(store: Arc<LeaveStore>) -> Self {
        Self { store }
    }

    /// Declares a new holiday.
    pub fn create(&self, new: NewHoliday) -> EngineResult<Holiday> {
        if new.name.trim().is_empty() {
            return Err(EngineError::Validation {
                field: "name".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        let holiday = Holiday::from(new);
        self.store.transaction(|tables| {
            tables.insert_holiday(holiday.clone());
            Ok(())
        })?;

        info!(
            holiday_id = %holiday.id,
            date = %holiday.date,
            name = %holiday.name,
            "Holiday created"
        );
        Ok(holiday)
    }

    /// Loads seed holidays, typically from configuration at startup.
    pub fn seed(&self, holidays: &[NewHoliday]) -> EngineResult<usize> {
        self.store.transaction(|tables| {
            for new in holidays {
                tables.insert_holiday(Holiday::from(new.clone()));
            }
            Ok(holidays.len())
        })
    }

    /// Deletes a holiday. Holidays cannot be edited, only removed.
    pub fn delete(&self, id: Uuid) -> EngineResult<Holiday> {
        let removed = self.store.transaction(|tables| tables.remove_holiday(id))?;
        info!(holiday_id = %id, date = %removed.date, "Holiday deleted");
        Ok(removed)
    }

    /// Holidays of one calendar year, ordered by date.
    pub fn list_for_year(&self, year: i32) -> EngineResult<Vec<Holiday>> {
        self.store.read(|tables| tables.holidays_in_year(year))
    }
}

/// Builds the calendar of every year `range` touches from `tables`.
pub(crate) fn calendar_for(tables: &Tables, range: &DateRange) -> HolidayCalendar {
    let holidays: Vec<Holiday> = range
        .years()
        .flat_map(|year| tables.holidays_in_year(year))
        .collect();
    HolidayCalendar::new(&holidays)
}
