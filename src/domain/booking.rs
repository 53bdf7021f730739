use std::fmt::Display;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::period::DateRange;
use crate::domain::types::{
    BookingId, CustomerId, DeliveryAddress, TrailerId, TypeConstraintError, local_datetime,
};

/// Booking record as held by the booking API.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Absent until the backend has persisted the booking.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<BookingId>,
    pub trailer_id: TrailerId,
    #[serde(default)]
    pub customer_id: Option<CustomerId>,
    #[serde(with = "local_datetime")]
    pub start_date: NaiveDateTime,
    /// Last day of possession; the trailer comes back the following day.
    #[serde(with = "local_datetime")]
    pub end_date: NaiveDateTime,
    pub status: BookingStatus,
    #[serde(default)]
    pub service_type: Option<ServiceType>,
    #[serde(default)]
    pub delivery_address: Option<DeliveryAddress>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Booking {
    #[must_use]
    pub fn new(
        trailer_id: TrailerId,
        start_date: NaiveDateTime,
        end_date: NaiveDateTime,
        status: BookingStatus,
    ) -> Self {
        Self {
            id: None,
            trailer_id,
            customer_id: None,
            start_date,
            end_date,
            status,
            service_type: None,
            delivery_address: None,
            notes: None,
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: BookingId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn with_customer(mut self, customer_id: CustomerId) -> Self {
        self.customer_id = Some(customer_id);
        self
    }

    pub fn period(&self) -> DateRange {
        DateRange::new(self.start_date, self.end_date)
    }

    /// Builds the persisted record for a validated submission.
    #[must_use]
    pub fn from_new(id: BookingId, new: &NewBooking) -> Self {
        Self {
            id: Some(id),
            trailer_id: new.trailer_id.clone(),
            customer_id: Some(new.customer_id.clone()),
            start_date: new.start_date,
            end_date: new.end_date,
            status: new.status,
            service_type: Some(new.service_type),
            delivery_address: new.delivery_address.clone(),
            notes: new.notes.clone(),
        }
    }
}

/// Fully validated booking ready to be written.
#[derive(Clone, Debug, PartialEq)]
pub struct NewBooking {
    pub customer_id: CustomerId,
    pub trailer_id: TrailerId,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub status: BookingStatus,
    pub service_type: ServiceType,
    pub delivery_address: Option<DeliveryAddress>,
    pub notes: Option<String>,
}

impl NewBooking {
    pub fn period(&self) -> DateRange {
        DateRange::new(self.start_date, self.end_date)
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookingStatus::Pending => write!(f, "pending"),
            BookingStatus::Confirmed => write!(f, "confirmed"),
            BookingStatus::Cancelled => write!(f, "cancelled"),
            BookingStatus::Completed => write!(f, "completed"),
        }
    }
}

impl FromStr for BookingStatus {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "cancelled" | "canceled" => Ok(BookingStatus::Cancelled),
            "completed" => Ok(BookingStatus::Completed),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown booking status `{other}`"
            ))),
        }
    }
}

/// How the trailer reaches the renter.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ServiceType {
    /// Renter picks up and returns the trailer.
    #[serde(rename = "self")]
    SelfService,
    /// Trailer is delivered to and collected from the renter's address.
    #[serde(rename = "full")]
    Full,
}

impl ServiceType {
    pub fn requires_delivery_address(self) -> bool {
        self == ServiceType::Full
    }
}

impl Display for ServiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceType::SelfService => write!(f, "self"),
            ServiceType::Full => write!(f, "full"),
        }
    }
}

impl FromStr for ServiceType {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "self" | "self-service" => Ok(ServiceType::SelfService),
            "full" | "full-service" => Ok(ServiceType::Full),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown service type `{other}`"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_api_booking() {
        let booking: Booking = serde_json::from_str(
            r#"{
                "_id": "b-1",
                "trailerId": "T1",
                "customerId": "c-1",
                "startDate": "2024-01-10",
                "endDate": "2024-01-12T17:00:00",
                "status": "confirmed",
                "serviceType": "full",
                "deliveryAddress": "12 Quarry Rd"
            }"#,
        )
        .expect("valid booking json");

        assert_eq!(booking.id.as_ref().map(|id| id.as_str()), Some("b-1"));
        assert_eq!(booking.status, BookingStatus::Confirmed);
        assert_eq!(booking.service_type, Some(ServiceType::Full));
        assert_eq!(booking.period().rental_days(), 3);
    }

    #[test]
    fn unsaved_booking_has_no_id_on_the_wire() {
        let booking = Booking::new(
            TrailerId::new("T1").unwrap(),
            "2024-01-10T00:00:00".parse().unwrap(),
            "2024-01-12T00:00:00".parse().unwrap(),
            BookingStatus::Pending,
        );

        let json = serde_json::to_value(&booking).expect("serializable booking");
        assert!(json.get("_id").is_none());
        assert_eq!(json["startDate"], "2024-01-10T00:00:00.000");
        assert_eq!(json["status"], "pending");
    }

    #[test]
    fn parses_status_and_service_type() {
        assert_eq!("Canceled".parse::<BookingStatus>(), Ok(BookingStatus::Cancelled));
        assert_eq!("self".parse::<ServiceType>(), Ok(ServiceType::SelfService));
        assert!("weekly".parse::<ServiceType>().is_err());
        assert!(ServiceType::Full.requires_delivery_address());
        assert!(!ServiceType::SelfService.requires_delivery_address());
    }
}
