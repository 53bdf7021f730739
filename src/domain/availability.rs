//! Trailer availability against a snapshot of existing bookings.
//!
//! Every booking of the trailer counts, whatever its status: a cancelled
//! booking still holds its original dates.

use chrono::NaiveDateTime;

use crate::domain::booking::Booking;
use crate::domain::period::overlaps;
use crate::domain::types::{BookingId, TrailerId};

/// `true` unless `booking` is the one being edited.
///
/// A booking without an id is never the edited one.
fn is_other_booking(booking: &Booking, current_booking_id: Option<&BookingId>) -> bool {
    match (booking.id.as_ref(), current_booking_id) {
        (Some(id), Some(current)) => id != current,
        _ => true,
    }
}

/// Bookings of `trailer_id` whose dates collide with `[start_date, end_date]`.
///
/// `current_booking_id` excludes the booking being edited so it does not
/// block its own new dates.
pub fn conflicting_bookings<'a>(
    trailer_id: &'a TrailerId,
    start_date: NaiveDateTime,
    end_date: NaiveDateTime,
    existing_bookings: &'a [Booking],
    current_booking_id: Option<&'a BookingId>,
) -> impl Iterator<Item = &'a Booking> + 'a {
    existing_bookings
        .iter()
        .filter(move |booking| &booking.trailer_id == trailer_id)
        .filter(move |booking| is_other_booking(booking, current_booking_id))
        .filter(move |booking| {
            overlaps(start_date, end_date, booking.start_date, booking.end_date)
        })
}

/// Returns `false` as soon as any other booking of the trailer overlaps the
/// requested dates.
pub fn is_trailer_available(
    trailer_id: &TrailerId,
    start_date: NaiveDateTime,
    end_date: NaiveDateTime,
    existing_bookings: &[Booking],
    current_booking_id: Option<&BookingId>,
) -> bool {
    conflicting_bookings(
        trailer_id,
        start_date,
        end_date,
        existing_bookings,
        current_booking_id,
    )
    .next()
    .is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::booking::BookingStatus;

    fn day(value: &str) -> NaiveDateTime {
        format!("{value}T00:00:00").parse().expect("valid day")
    }

    fn trailer(id: &str) -> TrailerId {
        TrailerId::new(id).expect("valid trailer id")
    }

    fn booking(id: &str, trailer_id: &str, start: &str, end: &str) -> Booking {
        Booking::new(trailer(trailer_id), day(start), day(end), BookingStatus::Confirmed)
            .with_id(BookingId::new(id).expect("valid booking id"))
    }

    #[test]
    fn available_without_bookings() {
        assert!(is_trailer_available(
            &trailer("T1"),
            day("2024-01-01"),
            day("2024-01-31"),
            &[],
            None,
        ));
    }

    #[test]
    fn other_trailers_never_block() {
        let bookings = [booking("b1", "T2", "2024-01-01", "2024-01-05")];
        assert!(is_trailer_available(
            &trailer("T1"),
            day("2024-01-01"),
            day("2024-01-05"),
            &bookings,
            None,
        ));
    }

    #[test]
    fn editing_excludes_own_booking() {
        let bookings = [booking("b1", "T1", "2024-01-01", "2024-01-05")];
        let own_id = BookingId::new("b1").unwrap();

        assert!(is_trailer_available(
            &trailer("T1"),
            day("2024-01-01"),
            day("2024-01-05"),
            &bookings,
            Some(&own_id),
        ));
        assert!(!is_trailer_available(
            &trailer("T1"),
            day("2024-01-01"),
            day("2024-01-05"),
            &bookings,
            None,
        ));
    }

    #[test]
    fn unsaved_bookings_always_count() {
        let unsaved = Booking::new(
            trailer("T1"),
            day("2024-01-03"),
            day("2024-01-04"),
            BookingStatus::Pending,
        );
        let editing = BookingId::new("b7").unwrap();

        assert!(!is_trailer_available(
            &trailer("T1"),
            day("2024-01-01"),
            day("2024-01-05"),
            std::slice::from_ref(&unsaved),
            Some(&editing),
        ));
        assert!(!is_trailer_available(
            &trailer("T1"),
            day("2024-01-01"),
            day("2024-01-05"),
            &[unsaved],
            None,
        ));
    }

    #[test]
    fn cancelled_bookings_still_block() {
        let mut cancelled = booking("b1", "T1", "2024-02-01", "2024-02-03");
        cancelled.status = BookingStatus::Cancelled;

        assert!(!is_trailer_available(
            &trailer("T1"),
            day("2024-02-02"),
            day("2024-02-02"),
            &[cancelled],
            None,
        ));
    }

    #[test]
    fn lists_every_conflict() {
        let bookings = [
            booking("b1", "T1", "2024-01-01", "2024-01-03"),
            booking("b2", "T1", "2024-01-04", "2024-01-04"),
            booking("b3", "T1", "2024-01-10", "2024-01-12"),
            booking("b4", "T2", "2024-01-02", "2024-01-02"),
        ];
        let trailer_id = trailer("T1");

        let ids: Vec<_> = conflicting_bookings(
            &trailer_id,
            day("2024-01-03"),
            day("2024-01-06"),
            &bookings,
            None,
        )
        .filter_map(|b| b.id.as_ref().map(|id| id.as_str()))
        .collect();

        assert_eq!(ids, vec!["b1", "b2"]);
    }
}
