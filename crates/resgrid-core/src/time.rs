//! Half-open time spans on the calendar.
//!
//! A [`TimeSpan`] is the `[start, end)` interval a reservation occupies.
//! Two spans that only touch at an endpoint do not overlap, so a table
//! booked 10:00-11:00 and 11:00-12:00 can share a calendar column.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a pair of instants cannot form a [`TimeSpan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TimeSpanError {
    #[error("span is empty: start and end are both {0}")]
    Empty(NaiveDateTime),

    #[error("span ends at {end} before it starts at {start}")]
    Inverted {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
}

/// A half-open interval `[start, end)` of local date-times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeSpan {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TimeSpan {
    /// Create a span without checking `end > start`.
    ///
    /// Layout engines accept unchecked spans; use [`TimeSpan::try_new`] at
    /// ingestion boundaries.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Create a span, rejecting empty and inverted intervals.
    ///
    /// # Errors
    ///
    /// Returns [`TimeSpanError::Empty`] when `start == end` and
    /// [`TimeSpanError::Inverted`] when `end < start`.
    pub fn try_new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, TimeSpanError> {
        if start == end {
            return Err(TimeSpanError::Empty(start));
        }
        if end < start {
            return Err(TimeSpanError::Inverted { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Calendar date of the span's start.
    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }

    /// Whether `end > start` holds.
    pub fn is_valid(&self) -> bool {
        self.end > self.start
    }

    /// Length of the span in whole minutes. Negative for inverted spans.
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Whether the two half-open spans share any instant.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use resgrid_core::time::TimeSpan;
    ///
    /// let day = NaiveDate::from_ymd_opt(2025, 3, 29).unwrap();
    /// let at = |h, m| day.and_hms_opt(h, m, 0).unwrap();
    ///
    /// let a = TimeSpan::new(at(10, 0), at(11, 0));
    /// let b = TimeSpan::new(at(10, 30), at(11, 30));
    /// let c = TimeSpan::new(at(11, 0), at(12, 0));
    ///
    /// assert!(a.overlaps(&b));
    /// assert!(!a.overlaps(&c));
    /// ```
    pub fn overlaps(&self, other: &TimeSpan) -> bool {
        !(self.start >= other.end || self.end <= other.start)
    }
}

impl fmt::Display for TimeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}-{}",
            self.start.format("%Y-%m-%d"),
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 29)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_try_new_rejects_empty_span() {
        let err = TimeSpan::try_new(at(10, 0), at(10, 0)).unwrap_err();
        assert_eq!(err, TimeSpanError::Empty(at(10, 0)));
    }

    #[test]
    fn test_try_new_rejects_inverted_span() {
        let err = TimeSpan::try_new(at(11, 0), at(10, 0)).unwrap_err();
        assert!(matches!(err, TimeSpanError::Inverted { .. }));
    }

    #[test]
    fn test_touching_spans_do_not_overlap() {
        let a = TimeSpan::new(at(10, 0), at(11, 0));
        let b = TimeSpan::new(at(11, 0), at(12, 0));
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn test_contained_span_overlaps() {
        let outer = TimeSpan::new(at(9, 0), at(13, 0));
        let inner = TimeSpan::new(at(10, 0), at(10, 15));
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn test_duration_minutes() {
        assert_eq!(TimeSpan::new(at(10, 15), at(11, 45)).duration_minutes(), 90);
        assert_eq!(TimeSpan::new(at(11, 0), at(10, 0)).duration_minutes(), -60);
    }

    #[test]
    fn test_display() {
        let span = TimeSpan::new(at(18, 30), at(20, 0));
        assert_eq!(span.to_string(), "2025-03-29 18:30-20:00");
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn span_strategy() -> impl Strategy<Value = TimeSpan> {
        (0u32..1380, 1u32..240).prop_map(|(start_min, len)| {
            let base = NaiveDate::from_ymd_opt(2025, 3, 29)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap();
            let start = base + chrono::Duration::minutes(i64::from(start_min));
            TimeSpan::new(start, start + chrono::Duration::minutes(i64::from(len)))
        })
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Overlap is symmetric.
    fn check_overlap_is_symmetric(a: TimeSpan, b: TimeSpan) -> Result<(), TestCaseError> {
        prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        Ok(())
    }

    /// A valid span always overlaps itself.
    fn check_span_overlaps_itself(a: TimeSpan) -> Result<(), TestCaseError> {
        prop_assert!(a.overlaps(&a), "{a} should overlap itself");
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn overlap_is_symmetric(a in span_strategy(), b in span_strategy()) {
            check_overlap_is_symmetric(a, b)?;
        }

        #[test]
        fn span_overlaps_itself(a in span_strategy()) {
            check_span_overlaps_itself(a)?;
        }
    }
}
