//! DTOs shaped for availability checks.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::booking::{Booking, BookingStatus};
use crate::domain::period::DateRange;
use crate::domain::types::TrailerId;

/// Existing booking that blocks the requested dates.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConflictSummary {
    pub booking_id: Option<String>,
    pub first_day: NaiveDate,
    pub last_day: NaiveDate,
    pub status: BookingStatus,
}

impl From<&Booking> for ConflictSummary {
    fn from(booking: &Booking) -> Self {
        Self {
            booking_id: booking.id.as_ref().map(|id| id.to_string()),
            first_day: booking.start_date.date(),
            last_day: booking.end_date.date(),
            status: booking.status,
        }
    }
}

/// Outcome of an availability check for one trailer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityReport {
    pub trailer_id: TrailerId,
    pub period: DateRange,
    pub available: bool,
    pub conflicts: Vec<ConflictSummary>,
}
