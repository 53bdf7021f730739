//! Day-granularity rental periods.
//!
//! A rental occupies whole calendar days: its start is floored to
//! `00:00:00.000` and its end is ceiled to `23:59:59.999` before any
//! comparison, so the time-of-day component callers pass in never decides a
//! conflict.

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::domain::types::local_datetime;

/// Floors a timestamp to the first millisecond of its calendar day.
pub fn start_of_day(at: NaiveDateTime) -> NaiveDateTime {
    at.date().and_time(NaiveTime::MIN)
}

/// Ceils a timestamp to the last millisecond of its calendar day.
pub fn end_of_day(at: NaiveDateTime) -> NaiveDateTime {
    NaiveTime::from_hms_milli_opt(23, 59, 59, 999).map_or(at, |last| at.date().and_time(last))
}

/// Returns `true` when the closed periods `[start_a, end_a]` and
/// `[start_b, end_b]` share at least one calendar day.
///
/// Reversed periods (`end < start`) are accepted and never panic; range
/// ordering is the caller's responsibility.
pub fn overlaps(
    start_a: NaiveDateTime,
    end_a: NaiveDateTime,
    start_b: NaiveDateTime,
    end_b: NaiveDateTime,
) -> bool {
    let (start_a, end_a) = (start_of_day(start_a), end_of_day(end_a));
    let (start_b, end_b) = (start_of_day(start_b), end_of_day(end_b));

    start_a <= end_b && start_b <= end_a
}

/// Pick-up and last-possession timestamps of a rental.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(with = "local_datetime")]
    pub start: NaiveDateTime,
    #[serde(with = "local_datetime")]
    pub end: NaiveDateTime,
}

impl DateRange {
    #[must_use]
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Whole-day range from `first` through `last` inclusive.
    #[must_use]
    pub fn days(first: NaiveDate, last: NaiveDate) -> Self {
        Self {
            start: first.and_time(NaiveTime::MIN),
            end: last.and_time(NaiveTime::MIN),
        }
    }

    /// The range widened to full-day boundaries.
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            start: start_of_day(self.start),
            end: end_of_day(self.end),
        }
    }

    pub fn overlaps(&self, other: &DateRange) -> bool {
        let (this, other) = (self.normalized(), other.normalized());
        this.start <= other.end && other.start <= this.end
    }

    /// `true` when the end day is not before the start day.
    ///
    /// Times of day are ignored: a same-day rental returning at 09:00 after a
    /// 16:00 pick-up is ordered.
    pub fn is_ordered(&self) -> bool {
        self.end.date() >= self.start.date()
    }

    /// Day the trailer comes back, one day after the last day of possession.
    pub fn return_date(&self) -> Option<NaiveDate> {
        self.end.date().checked_add_days(Days::new(1))
    }

    /// Number of calendar days the trailer is out, counting both ends.
    ///
    /// Reversed ranges yield zero.
    pub fn rental_days(&self) -> u32 {
        let span = (self.end.date() - self.start.date()).num_days() + 1;
        u32::try_from(span).unwrap_or(0)
    }
}
