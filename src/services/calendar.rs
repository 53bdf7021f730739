use crate::domain::period::DateRange;
use crate::domain::types::TrailerId;
use crate::dto::calendar::CalendarEntry;
use crate::repository::{BookingListQuery, BookingReader};
use crate::services::ServiceResult;

/// Bookings of one trailer touching any day of `window`, ordered by pick-up.
pub fn trailer_calendar<R>(
    repo: &R,
    trailer_id: &TrailerId,
    window: DateRange,
) -> ServiceResult<Vec<CalendarEntry>>
where
    R: BookingReader + ?Sized,
{
    let query = BookingListQuery::new()
        .trailer(trailer_id.clone())
        .window(window);

    let mut bookings = repo.list_bookings(query).map_err(|err| {
        log::error!("Failed to load calendar for trailer {trailer_id}: {err}");
        err
    })?;
    bookings.sort_by_key(|booking| booking.start_date);

    Ok(bookings.iter().map(CalendarEntry::from).collect())
}
