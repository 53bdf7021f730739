#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use trailer_booking::domain::booking::{Booking, BookingStatus};
use trailer_booking::domain::customer::Customer;
use trailer_booking::domain::trailer::{Trailer, TrailerCategory};
use trailer_booking::domain::types::{BookingId, CustomerId, CustomerName, TrailerId, TrailerName};
use trailer_booking::models::snapshot::Snapshot;
use trailer_booking::repository::SnapshotRepository;

pub fn at(value: &str) -> NaiveDateTime {
    value.parse().expect("valid datetime")
}

pub fn day(value: &str) -> NaiveDateTime {
    at(&format!("{value}T00:00:00"))
}

pub fn date(value: &str) -> NaiveDate {
    value.parse().expect("valid date")
}

pub fn trailer_id(id: &str) -> TrailerId {
    TrailerId::new(id).expect("valid trailer id")
}

pub fn booking_id(id: &str) -> BookingId {
    BookingId::new(id).expect("valid booking id")
}

pub fn customer_id(id: &str) -> CustomerId {
    CustomerId::new(id).expect("valid customer id")
}

pub fn booking(id: &str, trailer: &str, start: &str, end: &str, status: BookingStatus) -> Booking {
    Booking::new(trailer_id(trailer), day(start), day(end), status)
        .with_id(booking_id(id))
        .with_customer(customer_id("c1"))
}

pub fn fleet() -> Vec<Trailer> {
    vec![
        Trailer::new(
            trailer_id("T1"),
            TrailerName::new("6x10 Utility").unwrap(),
            TrailerCategory::Utility,
        ),
        Trailer::new(
            trailer_id("T2"),
            TrailerName::new("7x16 Enclosed").unwrap(),
            TrailerCategory::Enclosed,
        ),
        Trailer::new(
            trailer_id("D1"),
            TrailerName::new("7x14 Dump").unwrap(),
            TrailerCategory::Dump,
        ),
    ]
}

/// Repository holding the fleet, two customers and a confirmed T1 booking
/// from Jan 10 to Jan 12.
pub fn repository() -> SnapshotRepository {
    SnapshotRepository::new(Snapshot {
        trailers: fleet(),
        customers: vec![
            Customer::new(customer_id("c1"), CustomerName::new("Jane Roe").unwrap()),
            Customer::new(customer_id("c2"), CustomerName::new("Sam Poe").unwrap()),
        ],
        bookings: vec![booking(
            "b1",
            "T1",
            "2024-01-10",
            "2024-01-12",
            BookingStatus::Confirmed,
        )],
    })
}
