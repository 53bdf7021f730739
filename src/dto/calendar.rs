//! DTOs shaped for calendar widgets.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::booking::{Booking, BookingStatus};

/// All-day calendar event for one booking.
///
/// `end` is exclusive: it is the return day, so a booking whose last day is
/// the 12th renders through the 12th.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEntry {
    pub booking_id: Option<String>,
    pub customer_id: Option<String>,
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
    pub status: BookingStatus,
}

impl From<&Booking> for CalendarEntry {
    fn from(booking: &Booking) -> Self {
        Self {
            booking_id: booking.id.as_ref().map(|id| id.to_string()),
            customer_id: booking.customer_id.as_ref().map(|id| id.to_string()),
            start: booking.start_date.date(),
            end: booking.period().return_date(),
            status: booking.status,
        }
    }
}
