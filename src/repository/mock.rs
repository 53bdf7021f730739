//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::booking::{Booking, NewBooking};
use crate::domain::customer::Customer;
use crate::domain::trailer::Trailer;
use crate::domain::types::{BookingId, CustomerId, TrailerId};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    BookingListQuery, BookingReader, BookingWriter, CustomerReader, TrailerReader,
};

mock! {
    pub Repository {}

    impl BookingReader for Repository {
        fn get_booking_by_id(&self, id: &BookingId) -> RepositoryResult<Option<Booking>>;
        fn list_bookings(&self, query: BookingListQuery) -> RepositoryResult<Vec<Booking>>;
    }

    impl BookingWriter for Repository {
        fn create_booking(&self, new_booking: &NewBooking) -> RepositoryResult<Booking>;
        fn update_booking(
            &self,
            id: &BookingId,
            updates: &NewBooking,
        ) -> RepositoryResult<Booking>;
    }

    impl TrailerReader for Repository {
        fn get_trailer_by_id(&self, id: &TrailerId) -> RepositoryResult<Option<Trailer>>;
        fn list_trailers(&self) -> RepositoryResult<Vec<Trailer>>;
    }

    impl CustomerReader for Repository {
        fn get_customer_by_id(&self, id: &CustomerId) -> RepositoryResult<Option<Customer>>;
    }
}
