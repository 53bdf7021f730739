//! In-memory repository backed by a [`Snapshot`].
//!
//! Writes re-run the availability check while holding the write lock, so a
//! booking that passed client-side validation against a stale view is still
//! rejected if the trailer was taken in the meantime.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use uuid::Uuid;

use crate::domain::availability::is_trailer_available;
use crate::domain::booking::{Booking, NewBooking};
use crate::domain::customer::Customer;
use crate::domain::trailer::Trailer;
use crate::domain::types::{BookingId, CustomerId, TrailerId};
use crate::models::snapshot::Snapshot;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    BookingListQuery, BookingReader, BookingWriter, CustomerReader, TrailerReader,
};

#[derive(Debug)]
struct SnapshotState {
    trailers: Vec<Trailer>,
    customers: Vec<Customer>,
    bookings: Vec<Booking>,
}

#[derive(Clone, Debug)]
pub struct SnapshotRepository {
    state: Arc<RwLock<SnapshotState>>,
}

impl SnapshotRepository {
    pub fn new(snapshot: Snapshot) -> Self {
        let Snapshot {
            trailers,
            customers,
            bookings,
        } = snapshot;

        Self {
            state: Arc::new(RwLock::new(SnapshotState {
                trailers,
                customers,
                bookings,
            })),
        }
    }

    /// Adds bookings imported from another source, e.g. a CSV export.
    pub fn extend_bookings(&self, bookings: Vec<Booking>) -> RepositoryResult<usize> {
        let mut state = self.write()?;
        let count = bookings.len();
        state.bookings.extend(bookings);
        Ok(count)
    }

    fn read(&self) -> RepositoryResult<RwLockReadGuard<'_, SnapshotState>> {
        self.state
            .read()
            .map_err(|_| RepositoryError::Unexpected("snapshot lock poisoned".to_string()))
    }

    fn write(&self) -> RepositoryResult<RwLockWriteGuard<'_, SnapshotState>> {
        self.state
            .write()
            .map_err(|_| RepositoryError::Unexpected("snapshot lock poisoned".to_string()))
    }
}

fn ensure_available(
    bookings: &[Booking],
    booking: &NewBooking,
    current_booking_id: Option<&BookingId>,
) -> RepositoryResult<()> {
    let period = booking.period();
    if is_trailer_available(
        &booking.trailer_id,
        period.start,
        period.end,
        bookings,
        current_booking_id,
    ) {
        Ok(())
    } else {
        log::warn!(
            "Rejected write: trailer {} is already booked between {} and {}",
            booking.trailer_id,
            period.start,
            period.end
        );
        Err(RepositoryError::ConstraintViolation(format!(
            "trailer {} is already booked for the selected dates",
            booking.trailer_id
        )))
    }
}

impl BookingReader for SnapshotRepository {
    fn get_booking_by_id(&self, id: &BookingId) -> RepositoryResult<Option<Booking>> {
        let state = self.read()?;
        Ok(state
            .bookings
            .iter()
            .find(|booking| booking.id.as_ref() == Some(id))
            .cloned())
    }

    fn list_bookings(&self, query: BookingListQuery) -> RepositoryResult<Vec<Booking>> {
        let state = self.read()?;
        let mut bookings: Vec<Booking> = state
            .bookings
            .iter()
            .filter(|booking| query.matches(booking))
            .cloned()
            .collect();
        bookings.sort_by_key(|booking| booking.start_date);
        Ok(bookings)
    }
}

impl BookingWriter for SnapshotRepository {
    fn create_booking(&self, new_booking: &NewBooking) -> RepositoryResult<Booking> {
        let mut state = self.write()?;
        ensure_available(&state.bookings, new_booking, None)?;

        let id = BookingId::new(Uuid::new_v4().to_string())?;
        let booking = Booking::from_new(id, new_booking);
        state.bookings.push(booking.clone());

        log::info!(
            "Created booking {} for trailer {}",
            booking.id.as_ref().map_or("-", |id| id.as_str()),
            booking.trailer_id
        );
        Ok(booking)
    }

    fn update_booking(&self, id: &BookingId, updates: &NewBooking) -> RepositoryResult<Booking> {
        let mut state = self.write()?;
        ensure_available(&state.bookings, updates, Some(id))?;

        let slot = state
            .bookings
            .iter_mut()
            .find(|booking| booking.id.as_ref() == Some(id))
            .ok_or(RepositoryError::NotFound)?;
        *slot = Booking::from_new(id.clone(), updates);

        log::info!("Updated booking {id}");
        Ok(slot.clone())
    }
}

impl TrailerReader for SnapshotRepository {
    fn get_trailer_by_id(&self, id: &TrailerId) -> RepositoryResult<Option<Trailer>> {
        let state = self.read()?;
        Ok(state.trailers.iter().find(|trailer| &trailer.id == id).cloned())
    }

    fn list_trailers(&self) -> RepositoryResult<Vec<Trailer>> {
        Ok(self.read()?.trailers.clone())
    }
}

impl CustomerReader for SnapshotRepository {
    fn get_customer_by_id(&self, id: &CustomerId) -> RepositoryResult<Option<Customer>> {
        let state = self.read()?;
        Ok(state
            .customers
            .iter()
            .find(|customer| &customer.id == id)
            .cloned())
    }
}
