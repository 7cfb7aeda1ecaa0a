//! Non-working day classification.
//!
//! The organization's weekend is every Sunday plus the 2nd and 4th Saturday
//! of each month. All other Saturdays are ordinary working days. Declared
//! holidays are non-working regardless of weekday.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::models::Holiday;

/// How a single calendar date is treated for leave purposes.
///
/// # Example
///
/// ```
/// use leave_engine::calculation::DayKind;
///
/// assert!(DayKind::Working.is_working());
/// assert!(!DayKind::Holiday.is_working());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayKind {
    /// An ordinary working day.
    Working,
    /// A Sunday.
    Sunday,
    /// The 2nd or 4th Saturday of the month.
    AlternateSaturday,
    /// A declared holiday. Takes precedence over the weekend kinds.
    Holiday,
}

impl DayKind {
    /// Returns true for working days.
    pub fn is_working(&self) -> bool {
        matches!(self, DayKind::Working)
    }

    /// Returns true for Sundays and 2nd/4th Saturdays.
    pub fn is_weekend(&self) -> bool {
        matches!(self, DayKind::Sunday | DayKind::AlternateSaturday)
    }
}

impl std::fmt::Display for DayKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DayKind::Working => write!(f, "Working"),
            DayKind::Sunday => write!(f, "Sunday"),
            DayKind::AlternateSaturday => write!(f, "Alternate Saturday"),
            DayKind::Holiday => write!(f, "Holiday"),
        }
    }
}

/// The set of declared holidays, indexed by date.
///
/// Built from whatever holiday records the caller has loaded, usually every
/// holiday in the years a leave range touches. When two holidays share a
/// date the first one supplied names the day.
///
/// # Example
///
/// ```
/// use leave_engine::calculation::HolidayCalendar;
/// use leave_engine::models::{Holiday, HolidayType, NewHoliday};
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2026, 8, 15).unwrap();
/// let calendar = HolidayCalendar::new(&[Holiday::from(NewHoliday {
///     name: "Independence Day".to_string(),
///     date,
///     holiday_type: HolidayType::National,
///     description: None,
///     is_recurring: true,
/// })]);
/// assert_eq!(calendar.holiday_name(date), Some("Independence Day"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidayCalendar {
    by_date: BTreeMap<NaiveDate, String>,
}

impl HolidayCalendar {
    /// Builds a calendar from holiday records.
    pub fn new<'a>(holidays: impl IntoIterator<Item = &'a Holiday>) -> Self {
        let mut by_date = BTreeMap::new();
        for holiday in holidays {
            by_date
                .entry(holiday.date)
                .or_insert_with(|| holiday.name.clone());
        }
        Self { by_date }
    }

    /// Returns true if `date` is a declared holiday.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.by_date.contains_key(&date)
    }

    /// Returns the holiday name for `date`, if any.
    pub fn holiday_name(&self, date: NaiveDate) -> Option<&str> {
        self.by_date.get(&date).map(String::as_str)
    }

    /// Number of distinct holiday dates.
    pub fn len(&self) -> usize {
        self.by_date.len()
    }

    /// Returns true if no holidays are declared.
    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty()
    }
}

/// Returns true if `date` is a Sunday.
pub fn is_sunday(date: NaiveDate) -> bool {
    date.weekday() == Weekday::Sun
}

/// Returns true if `date` is the 2nd or 4th Saturday of its month.
///
/// The week-of-month is `ceil(day / 7)`, so days 8-14 are the 2nd week and
/// days 22-28 the 4th.
///
/// # Example
///
/// ```
/// use leave_engine::calculation::is_second_or_fourth_saturday;
/// use chrono::NaiveDate;
///
/// // January 2026 Saturdays: 3, 10, 17, 24, 31
/// let sat = |day| NaiveDate::from_ymd_opt(2026, 1, day).unwrap();
/// assert!(!is_second_or_fourth_saturday(sat(3)));
/// assert!(is_second_or_fourth_saturday(sat(10)));
/// assert!(!is_second_or_fourth_saturday(sat(17)));
/// assert!(is_second_or_fourth_saturday(sat(24)));
/// assert!(!is_second_or_fourth_saturday(sat(31)));
/// ```
pub fn is_second_or_fourth_saturday(date: NaiveDate) -> bool {
    if date.weekday() != Weekday::Sat {
        return false;
    }
    let week_of_month = date.day().div_ceil(7);
    week_of_month == 2 || week_of_month == 4
}

/// Returns true if `date` matches a declared holiday exactly.
pub fn is_holiday(date: NaiveDate, calendar: &HolidayCalendar) -> bool {
    calendar.contains(date)
}

/// Classifies `date` as a working day, weekend day or holiday.
pub fn classify_day(date: NaiveDate, calendar: &HolidayCalendar) -> DayKind {
    if is_holiday(date, calendar) {
        DayKind::Holiday
    } else if is_sunday(date) {
        DayKind::Sunday
    } else if is_second_or_fourth_saturday(date) {
        DayKind::AlternateSaturday
    } else {
        DayKind::Working
    }
}
