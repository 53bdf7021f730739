//! DTOs shaped for the review step of the booking wizard.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::booking::ServiceType;

/// Everything the review step shows before the booking is submitted.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BookingReview {
    pub customer_name: String,
    pub trailer_name: String,
    pub pick_up_day: NaiveDate,
    pub last_day: NaiveDate,
    /// Day the trailer comes back, the day after the last rental day.
    pub return_day: Option<NaiveDate>,
    pub rental_days: u32,
    pub service_type: ServiceType,
    pub delivery_address: Option<String>,
    pub notes: Option<String>,
}
