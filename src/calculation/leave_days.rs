//! Leave day calculation.
//!
//! Determines how many days of a requested range are charged against the
//! leave balance. Working days are always charged. Weekends and holidays are
//! free unless sandwich leave applies, in which case a non-working run that
//! sits between two working days of the range is charged as well.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::DateRange;

use super::day_classification::{DayKind, HolidayCalendar, classify_day};

/// One date of a leave range and how it was treated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveDay {
    /// The calendar date.
    pub date: NaiveDate,
    /// Its classification.
    pub kind: DayKind,
    /// Whether the day counts against the balance.
    pub charged: bool,
    /// Holiday name when `kind` is [`DayKind::Holiday`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holiday_name: Option<String>,
}

/// The result of a leave day calculation.
///
/// `total_days == working_days + sandwich_days` always holds, and
/// `sandwich_days` is zero unless sandwich leave was requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveDayCount {
    /// Days charged against the balance.
    pub total_days: Decimal,
    /// Working days in the range.
    pub working_days: Decimal,
    /// Non-working days charged by the sandwich policy.
    pub sandwich_days: Decimal,
    /// Holidays falling in the range.
    pub holiday_count: Decimal,
    /// Per-date breakdown, in date order.
    pub days: Vec<LeaveDay>,
}

/// Calculates the chargeable days of a leave range.
///
/// # Arguments
///
/// * `range` - The requested dates (inclusive)
/// * `is_sandwich_leave` - Whether interior non-working days are charged
/// * `calendar` - Declared holidays covering the range
///
/// # Behavior
///
/// - Holidays take precedence over weekend classification
/// - Without sandwich leave, `total_days == working_days`
/// - With sandwich leave, a weekend or holiday is charged only when the range
///   contains a working day both before and after it. Non-working days at the
///   start or end of the range are never charged.
///
/// # Example
///
/// ```
/// use leave_engine::calculation::{HolidayCalendar, calculate_leave_days};
/// use leave_engine::models::DateRange;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// // Monday 2026-01-12 to Friday 2026-01-16
/// let range = DateRange::new(
///     NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 1, 16).unwrap(),
/// ).unwrap();
///
/// let count = calculate_leave_days(&range, false, &HolidayCalendar::default());
/// assert_eq!(count.total_days, Decimal::from(5));
/// assert_eq!(count.sandwich_days, Decimal::ZERO);
/// ```
pub fn calculate_leave_days(
    range: &DateRange,
    is_sandwich_leave: bool,
    calendar: &HolidayCalendar,
) -> LeaveDayCount {
    let kinds: Vec<(NaiveDate, DayKind)> = range
        .days()
        .map(|date| (date, classify_day(date, calendar)))
        .collect();

    let first_working = kinds.iter().position(|(_, kind)| kind.is_working());
    let last_working = kinds.iter().rposition(|(_, kind)| kind.is_working());

    let mut working_days = 0u32;
    let mut sandwich_days = 0u32;
    let mut holiday_count = 0u32;
    let mut days = Vec::with_capacity(kinds.len());

    for (index, (date, kind)) in kinds.into_iter().enumerate() {
        let charged = match kind {
            DayKind::Working => {
                working_days += 1;
                true
            }
            _ => {
                let sandwiched = is_sandwich_leave
                    && matches!(
                        (first_working, last_working),
                        (Some(first), Some(last)) if first < index && index < last
                    );
                if sandwiched {
                    sandwich_days += 1;
                }
                sandwiched
            }
        };

        if kind == DayKind::Holiday {
            holiday_count += 1;
        }

        days.push(LeaveDay {
            date,
            kind,
            charged,
            holiday_name: calendar.holiday_name(date).map(str::to_string),
        });
    }

    let working_days = Decimal::from(working_days);
    let sandwich_days = Decimal::from(sandwich_days);

    LeaveDayCount {
        total_days: working_days + sandwich_days,
        working_days,
        sandwich_days,
        holiday_count: Decimal::from(holiday_count),
        days,
    }
}

/// Returns true if a non-working day lies strictly inside the range.
///
/// Independent of the sandwich flag; used to hint that enabling sandwich
/// leave may change the total.
pub fn has_sandwich_days(range: &DateRange, calendar: &HolidayCalendar) -> bool {
    range
        .days()
        .filter(|date| *date != range.start() && *date != range.end())
        .any(|date| !classify_day(date, calendar).is_working())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Holiday, HolidayType, NewHoliday};
    use std::str::FromStr;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn range(start: &str, end: &str) -> DateRange {
        DateRange::new(make_date(start), make_date(end)).unwrap()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn calendar(dates: &[&str]) -> HolidayCalendar {
        let holidays: Vec<Holiday> = dates
            .iter()
            .map(|d| {
                Holiday::from(NewHoliday {
                    name: format!("Holiday {}", d),
                    date: make_date(d),
                    holiday_type: HolidayType::Company,
                    description: None,
                    is_recurring: false,
                })
            })
            .collect();
        HolidayCalendar::new(&holidays)
    }

    // ==========================================================================
    // Ordinary week
    // ==========================================================================
    #[test]
    fn test_monday_to_friday_without_holidays() {
        let result = calculate_leave_days(
            &range("2026-01-12", "2026-01-16"),
            false,
            &HolidayCalendar::default(),
        );
        assert_eq!(result.total_days, dec("5"));
        assert_eq!(result.working_days, dec("5"));
        assert_eq!(result.sandwich_days, dec("0"));
        assert_eq!(result.holiday_count, dec("0"));
        assert_eq!(result.days.len(), 5);
        assert!(result.days.iter().all(|d| d.charged));
    }

    // ==========================================================================
    // Single-day ranges
    // ==========================================================================
    #[test]
    fn test_single_working_day_charges_one() {
        let result = calculate_leave_days(
            &range("2026-01-14", "2026-01-14"),
            true,
            &HolidayCalendar::default(),
        );
        assert_eq!(result.total_days, dec("1"));
    }

    #[test]
    fn test_single_sunday_with_sandwich_charges_nothing() {
        let result = calculate_leave_days(
            &range("2026-01-18", "2026-01-18"),
            true,
            &HolidayCalendar::default(),
        );
        assert_eq!(result.total_days, dec("0"));
        assert_eq!(result.sandwich_days, dec("0"));
        assert!(!result.days[0].charged);
    }

    #[test]
    fn test_single_holiday_with_sandwich_charges_nothing() {
        let result = calculate_leave_days(
            &range("2026-01-26", "2026-01-26"),
            true,
            &calendar(&["2026-01-26"]),
        );
        assert_eq!(result.total_days, dec("0"));
        assert_eq!(result.holiday_count, dec("1"));
        assert_eq!(
            result.days[0].holiday_name.as_deref(),
            Some("Holiday 2026-01-26")
        );
    }

    // ==========================================================================
    // Sandwich leave
    // ==========================================================================
    #[test]
    fn test_friday_to_monday_over_third_saturday() {
        // 2026-01-17 is the 3rd Saturday, a working day. Only Sunday is
        // non-working and it sits between Saturday and Monday.
        let result = calculate_leave_days(
            &range("2026-01-16", "2026-01-19"),
            true,
            &HolidayCalendar::default(),
        );
        assert_eq!(result.working_days, dec("3"));
        assert_eq!(result.sandwich_days, dec("1"));
        assert_eq!(result.total_days, dec("4"));
        assert_eq!(result.days[2].kind, DayKind::Sunday);
        assert!(result.days[2].charged);
    }

    #[test]
    fn test_friday_to_monday_over_fourth_saturday() {
        // 2026-01-24 is the 4th Saturday: Saturday and Sunday form one run
        let sandwich = calculate_leave_days(
            &range("2026-01-23", "2026-01-26"),
            true,
            &HolidayCalendar::default(),
        );
        assert_eq!(sandwich.working_days, dec("2"));
        assert_eq!(sandwich.sandwich_days, dec("2"));
        assert_eq!(sandwich.total_days, dec("4"));

        let plain = calculate_leave_days(
            &range("2026-01-23", "2026-01-26"),
            false,
            &HolidayCalendar::default(),
        );
        assert_eq!(plain.total_days, dec("2"));
        assert_eq!(plain.sandwich_days, dec("0"));
    }

    #[test]
    fn test_weekend_at_range_start_is_never_charged() {
        // Saturday 2026-01-24 (4th) through Tuesday 2026-01-27
        let result = calculate_leave_days(
            &range("2026-01-24", "2026-01-27"),
            true,
            &HolidayCalendar::default(),
        );
        assert_eq!(result.working_days, dec("2"));
        assert_eq!(result.sandwich_days, dec("0"));
        assert_eq!(result.total_days, dec("2"));
    }

    #[test]
    fn test_weekend_at_range_end_is_never_charged() {
        // Thursday 2026-01-22 through Sunday 2026-01-25
        let result = calculate_leave_days(
            &range("2026-01-22", "2026-01-25"),
            true,
            &HolidayCalendar::default(),
        );
        assert_eq!(result.working_days, dec("2"));
        assert_eq!(result.sandwich_days, dec("0"));
    }

    #[test]
    fn test_holiday_adjacent_to_weekend_is_one_interior_run() {
        // Friday 2026-01-23 holiday, Sat 24 (4th) and Sun 25 weekend,
        // range Thursday 22 through Monday 26.
        let result = calculate_leave_days(
            &range("2026-01-22", "2026-01-26"),
            true,
            &calendar(&["2026-01-23"]),
        );
        assert_eq!(result.working_days, dec("2"));
        assert_eq!(result.holiday_count, dec("1"));
        assert_eq!(result.sandwich_days, dec("3"));
        assert_eq!(result.total_days, dec("5"));
    }

    #[test]
    fn test_holiday_on_monday_after_weekend_at_range_end() {
        // Friday 23 through Monday 26 where Monday is a holiday: the whole
        // non-working tail touches the range end, nothing is sandwiched.
        let result = calculate_leave_days(
            &range("2026-01-23", "2026-01-26"),
            true,
            &calendar(&["2026-01-26"]),
        );
        assert_eq!(result.working_days, dec("1"));
        assert_eq!(result.sandwich_days, dec("0"));
        assert_eq!(result.total_days, dec("1"));
    }

    #[test]
    fn test_multiple_interior_runs_all_charged() {
        // Friday 2026-02-06 through Monday 2026-02-16:
        // Sun 8, Sat 14 (2nd), Sun 15 are non-working and interior.
        let result = calculate_leave_days(
            &range("2026-02-06", "2026-02-16"),
            true,
            &HolidayCalendar::default(),
        );
        assert_eq!(result.sandwich_days, dec("3"));
        assert_eq!(result.working_days, dec("8"));
        assert_eq!(result.total_days, dec("11"));
    }

    #[test]
    fn test_range_with_no_working_days() {
        // Sat 24 (4th) + Sun 25 only
        let result = calculate_leave_days(
            &range("2026-01-24", "2026-01-25"),
            true,
            &HolidayCalendar::default(),
        );
        assert_eq!(result.total_days, dec("0"));
    }

    #[test]
    fn test_holiday_inside_range_without_sandwich_is_free() {
        let result = calculate_leave_days(
            &range("2026-01-26", "2026-01-30"),
            false,
            &calendar(&["2026-01-28"]),
        );
        assert_eq!(result.working_days, dec("4"));
        assert_eq!(result.holiday_count, dec("1"));
        assert_eq!(result.total_days, dec("4"));
    }

    // ==========================================================================
    // has_sandwich_days
    // ==========================================================================
    #[test]
    fn test_has_sandwich_days_for_interior_sunday() {
        assert!(has_sandwich_days(
            &range("2026-01-16", "2026-01-19"),
            &HolidayCalendar::default()
        ));
    }

    #[test]
    fn test_has_sandwich_days_ignores_boundaries() {
        // Sunday to Monday: the only non-working day is at the start
        assert!(!has_sandwich_days(
            &range("2026-01-18", "2026-01-19"),
            &HolidayCalendar::default()
        ));
        assert!(!has_sandwich_days(
            &range("2026-01-18", "2026-01-18"),
            &HolidayCalendar::default()
        ));
    }

    #[test]
    fn test_has_sandwich_days_detects_interior_holiday() {
        assert!(!has_sandwich_days(
            &range("2026-01-27", "2026-01-29"),
            &HolidayCalendar::default()
        ));
        assert!(has_sandwich_days(
            &range("2026-01-27", "2026-01-29"),
            &calendar(&["2026-01-28"])
        ));
    }

    #[test]
    fn test_leave_day_serialization_skips_missing_holiday_name() {
        let day = LeaveDay {
            date: make_date("2026-01-14"),
            kind: DayKind::Working,
            charged: true,
            holiday_name: None,
        };
        let json = serde_json::to_string(&day).unwrap();
        assert!(json.contains("\"kind\":\"working\""));
        assert!(!json.contains("holiday_name"));
    }
}

#[cfg(test)]
mod properties {
    use super::*;
    use crate::models::{Holiday, HolidayType, NewHoliday};
    use chrono::Duration;
    use proptest::prelude::*;

    fn arb_range() -> impl Strategy<Value = DateRange> {
        (0i64..1500, 0i64..60).prop_map(|(offset, len)| {
            let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
            let start = base + Duration::days(offset);
            DateRange::new(start, start + Duration::days(len)).unwrap()
        })
    }

    /// A range plus holidays scattered over it and a few days either side.
    fn arb_range_with_holidays() -> impl Strategy<Value = (DateRange, HolidayCalendar)> {
        arb_range().prop_flat_map(|range| {
            let span = i64::from(range.len()) + 4;
            proptest::collection::vec(-2i64..span, 0..8).prop_map(move |offsets| {
                let holidays: Vec<Holiday> = offsets
                    .into_iter()
                    .map(|offset| {
                        Holiday::from(NewHoliday {
                            name: format!("Holiday {}", offset),
                            date: range.start() + Duration::days(offset),
                            holiday_type: HolidayType::Company,
                            description: None,
                            is_recurring: false,
                        })
                    })
                    .collect();
                (range, HolidayCalendar::new(&holidays))
            })
        })
    }

    proptest! {
        #[test]
        fn without_sandwich_total_equals_working(
            (range, calendar) in arb_range_with_holidays()
        ) {
            let result = calculate_leave_days(&range, false, &calendar);
            prop_assert_eq!(result.total_days, result.working_days);
            prop_assert_eq!(result.sandwich_days, Decimal::ZERO);
        }

        #[test]
        fn total_is_working_plus_sandwich(
            (range, calendar) in arb_range_with_holidays(),
            sandwich in any::<bool>()
        ) {
            let result = calculate_leave_days(&range, sandwich, &calendar);
            prop_assert_eq!(result.total_days, result.working_days + result.sandwich_days);
            prop_assert!(result.total_days <= Decimal::from(range.len()));
            prop_assert_eq!(result.days.len() as u32, range.len());
        }

        #[test]
        fn boundary_days_are_charged_only_when_working(
            (range, calendar) in arb_range_with_holidays()
        ) {
            let result = calculate_leave_days(&range, true, &calendar);
            let first = result.days.first().unwrap();
            let last = result.days.last().unwrap();
            prop_assert_eq!(first.charged, first.kind.is_working());
            prop_assert_eq!(last.charged, last.kind.is_working());
        }

        #[test]
        fn holidays_are_counted_and_never_worked(
            (range, calendar) in arb_range_with_holidays(),
            sandwich in any::<bool>()
        ) {
            let result = calculate_leave_days(&range, sandwich, &calendar);
            let in_range = range.days().filter(|d| calendar.contains(*d)).count();
            prop_assert_eq!(result.holiday_count, Decimal::from(in_range));
            for day in &result.days {
                if calendar.contains(day.date) {
                    prop_assert_eq!(day.kind, DayKind::Holiday);
                    prop_assert!(day.holiday_name.is_some());
                }
            }
        }

        #[test]
        fn sandwich_never_lowers_total((range, calendar) in arb_range_with_holidays()) {
            let plain = calculate_leave_days(&range, false, &calendar);
            let sandwich = calculate_leave_days(&range, true, &calendar);
            prop_assert!(sandwich.total_days >= plain.total_days);
            prop_assert_eq!(sandwich.working_days, plain.working_days);
        }
    }
}
