use crate::domain::{
    booking::{Booking, NewBooking},
    customer::Customer,
    period::DateRange,
    trailer::Trailer,
    types::{BookingId, CustomerId, TrailerId},
};
use crate::repository::errors::RepositoryResult;

pub mod errors;
pub mod memory;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;

pub use memory::SnapshotRepository;

#[derive(Debug, Clone, Default)]
pub struct BookingListQuery {
    pub trailer_id: Option<TrailerId>,
    pub window: Option<DateRange>,
}

impl BookingListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trailer(mut self, trailer_id: TrailerId) -> Self {
        self.trailer_id = Some(trailer_id);
        self
    }

    /// Restricts the listing to bookings touching any day of `window`.
    pub fn window(mut self, window: DateRange) -> Self {
        self.window = Some(window);
        self
    }

    pub fn matches(&self, booking: &Booking) -> bool {
        let trailer_matches = self
            .trailer_id
            .as_ref()
            .is_none_or(|trailer_id| &booking.trailer_id == trailer_id);
        let window_matches = self
            .window
            .as_ref()
            .is_none_or(|window| window.overlaps(&booking.period()));

        trailer_matches && window_matches
    }
}

pub trait BookingReader {
    fn get_booking_by_id(&self, id: &BookingId) -> RepositoryResult<Option<Booking>>;
    fn list_bookings(&self, query: BookingListQuery) -> RepositoryResult<Vec<Booking>>;
}

pub trait BookingWriter {
    fn create_booking(&self, new_booking: &NewBooking) -> RepositoryResult<Booking>;
    fn update_booking(&self, id: &BookingId, updates: &NewBooking) -> RepositoryResult<Booking>;
}

pub trait TrailerReader {
    fn get_trailer_by_id(&self, id: &TrailerId) -> RepositoryResult<Option<Trailer>>;
    fn list_trailers(&self) -> RepositoryResult<Vec<Trailer>>;
}

pub trait CustomerReader {
    fn get_customer_by_id(&self, id: &CustomerId) -> RepositoryResult<Option<Customer>>;
}
