//! Inclusive calendar date ranges.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{EngineError, EngineResult};

/// An inclusive range of calendar dates, `start..=end`.
///
/// Construction through [`DateRange::new`] guarantees `end >= start`.
///
/// # Example
///
/// ```
/// use leave_engine::models::DateRange;
/// use chrono::NaiveDate;
///
/// let range = DateRange::new(
///     NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 1, 16).unwrap(),
/// ).unwrap();
/// assert_eq!(range.len(), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Creates a range, rejecting one that ends before it starts.
    pub fn new(start: NaiveDate, end: NaiveDate) -> EngineResult<Self> {
        if end < start {
            return Err(EngineError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// A range covering a single day.
    pub fn single(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// First day of the range.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the range.
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of calendar days in the range, counting both ends.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> u32 {
        ((self.end - self.start).num_days() + 1) as u32
    }

    /// Returns true if `date` falls within the range (inclusive).
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Returns true if the two ranges share at least one day.
    ///
    /// `[a, b]` and `[c, d]` overlap iff `a <= d && c <= b`.
    ///
    /// # Example
    ///
    /// ```
    /// use leave_engine::models::DateRange;
    /// use chrono::NaiveDate;
    ///
    /// let d = |day| NaiveDate::from_ymd_opt(2026, 2, day).unwrap();
    /// let first = DateRange::new(d(2), d(6)).unwrap();
    /// assert!(first.overlaps(&DateRange::new(d(6), d(9)).unwrap()));
    /// assert!(!first.overlaps(&DateRange::new(d(7), d(9)).unwrap()));
    /// ```
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Iterates every date in the range in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take_while(move |d| *d <= self.end)
    }

    /// Calendar years touched by the range, oldest first.
    pub fn years(&self) -> std::ops::RangeInclusive<i32> {
        use chrono::Datelike;
        self.start.year()..=self.end.year()
    }
}
