//! File formats the booking snapshot is loaded from.
//!
//! The JSON snapshot mirrors the booking API responses (`_id`, camelCase
//! fields). The CSV export carries one booking per row with snake_case
//! headers.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::booking::{Booking, BookingStatus};
use crate::domain::customer::Customer;
use crate::domain::trailer::Trailer;
use crate::domain::types::{
    BookingId, CustomerId, TrailerId, TypeConstraintError, parse_local_datetime,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};

/// Point-in-time copy of the fleet, customer directory and bookings.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub trailers: Vec<Trailer>,
    #[serde(default)]
    pub customers: Vec<Customer>,
    #[serde(default)]
    pub bookings: Vec<Booking>,
}

impl Snapshot {
    pub fn from_reader<R: Read>(reader: R) -> RepositoryResult<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> RepositoryResult<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }
}

/// One row of the bookings CSV export.
#[derive(Debug, Deserialize)]
pub struct BookingCsvRecord {
    #[serde(default)]
    pub id: Option<String>,
    pub trailer_id: String,
    #[serde(default)]
    pub customer_id: Option<String>,
    pub start_date: String,
    pub end_date: String,
    pub status: String,
}

impl TryFrom<BookingCsvRecord> for Booking {
    type Error = TypeConstraintError;

    fn try_from(record: BookingCsvRecord) -> Result<Self, Self::Error> {
        let mut booking = Booking::new(
            TrailerId::new(record.trailer_id)?,
            parse_local_datetime(&record.start_date)?,
            parse_local_datetime(&record.end_date)?,
            record.status.parse::<BookingStatus>()?,
        );

        if let Some(id) = record.id.filter(|id| !id.trim().is_empty()) {
            booking = booking.with_id(BookingId::new(id)?);
        }
        if let Some(customer_id) = record.customer_id.filter(|id| !id.trim().is_empty()) {
            booking = booking.with_customer(CustomerId::new(customer_id)?);
        }

        Ok(booking)
    }
}

/// Parses a bookings CSV export, failing on the first malformed row.
pub fn read_bookings_csv<R: Read>(reader: R) -> RepositoryResult<Vec<Booking>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    rdr.deserialize::<BookingCsvRecord>()
        .enumerate()
        .map(|(index, record)| -> RepositoryResult<Booking> {
            let booking = Booking::try_from(record?).map_err(|err| {
                RepositoryError::ValidationError(format!("row {}: {err}", index + 1))
            })?;
            Ok(booking)
        })
        .collect()
}

pub fn read_bookings_csv_path(path: impl AsRef<Path>) -> RepositoryResult<Vec<Booking>> {
    let file = File::open(path)?;
    read_bookings_csv(BufReader::new(file))
}
