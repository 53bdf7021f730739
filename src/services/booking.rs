use crate::domain::availability::conflicting_bookings;
use crate::domain::booking::{Booking, BookingStatus, ServiceType};
use crate::domain::period::DateRange;
use crate::domain::trailer::Trailer;
use crate::domain::types::{BookingId, TrailerId};
use crate::dto::availability::{AvailabilityReport, ConflictSummary};
use crate::dto::booking::BookingReview;
use crate::forms::FormError;
use crate::forms::booking::BookingDraft;
use crate::forms::validation::{BookingContext, BookingErrors, validate_booking};
use crate::repository::{
    BookingListQuery, BookingReader, BookingWriter, CustomerReader, TrailerReader,
};
use crate::services::{ServiceError, ServiceResult};

/// Availability request for one trailer.
#[derive(Debug, Clone)]
pub struct AvailabilityQuery {
    pub trailer_id: TrailerId,
    pub period: DateRange,
    /// Booking being edited, ignored when looking for conflicts.
    pub current_booking_id: Option<BookingId>,
}

impl AvailabilityQuery {
    pub fn new(trailer_id: TrailerId, period: DateRange) -> Self {
        Self {
            trailer_id,
            period,
            current_booking_id: None,
        }
    }

    pub fn editing(mut self, booking_id: BookingId) -> Self {
        self.current_booking_id = Some(booking_id);
        self
    }
}

/// Checks whether the trailer is free and lists the bookings in the way.
pub fn check_availability<R>(
    repo: &R,
    query: &AvailabilityQuery,
) -> ServiceResult<AvailabilityReport>
where
    R: BookingReader + ?Sized,
{
    let bookings = repo
        .list_bookings(BookingListQuery::new().trailer(query.trailer_id.clone()))
        .map_err(|err| {
            log::error!("Failed to load bookings for trailer {}: {err}", query.trailer_id);
            err
        })?;

    let conflicts: Vec<ConflictSummary> = conflicting_bookings(
        &query.trailer_id,
        query.period.start,
        query.period.end,
        &bookings,
        query.current_booking_id.as_ref(),
    )
    .map(ConflictSummary::from)
    .collect();

    log::debug!(
        "Trailer {} between {} and {}: {} conflict(s)",
        query.trailer_id,
        query.period.start,
        query.period.end,
        conflicts.len()
    );

    Ok(AvailabilityReport {
        trailer_id: query.trailer_id.clone(),
        period: query.period,
        available: conflicts.is_empty(),
        conflicts,
    })
}

/// Fleet and bookings a draft is validated against.
#[derive(Debug, Default)]
pub struct ValidationData {
    pub trailers: Vec<Trailer>,
    pub bookings: Vec<Booking>,
}

impl ValidationData {
    pub fn context<'a>(&'a self, current_booking_id: Option<&'a BookingId>) -> BookingContext<'a> {
        BookingContext {
            trailers: &self.trailers,
            existing_bookings: &self.bookings,
            current_booking_id,
        }
    }
}

/// Loads the fleet and the selected trailer's bookings.
pub fn load_validation_data<R>(repo: &R, draft: &BookingDraft) -> ServiceResult<ValidationData>
where
    R: BookingReader + TrailerReader + ?Sized,
{
    let trailers = repo.list_trailers()?;
    let bookings = match &draft.trailer_id {
        Some(trailer_id) => {
            repo.list_bookings(BookingListQuery::new().trailer(trailer_id.clone()))?
        }
        None => Vec::new(),
    };

    Ok(ValidationData { trailers, bookings })
}

/// Runs the full validation gate against a fresh snapshot.
pub fn validate_draft<R>(
    repo: &R,
    draft: &BookingDraft,
    current_booking_id: Option<&BookingId>,
) -> ServiceResult<BookingErrors>
where
    R: BookingReader + TrailerReader + ?Sized,
{
    let data = load_validation_data(repo, draft)?;
    Ok(validate_booking(draft, &data.context(current_booking_id)))
}

/// Validates the draft and creates the booking, or updates it when editing.
///
/// New bookings start as pending; edits keep the stored status.
pub fn submit_booking<R>(
    repo: &R,
    draft: &BookingDraft,
    current_booking_id: Option<&BookingId>,
) -> ServiceResult<Booking>
where
    R: BookingReader + BookingWriter + TrailerReader + ?Sized,
{
    let errors = validate_draft(repo, draft, current_booking_id)?;
    if !errors.is_empty() {
        log::warn!("Rejected booking submission: {errors}");
        return Err(ServiceError::Validation(errors));
    }

    match current_booking_id {
        Some(id) => {
            let existing = repo.get_booking_by_id(id)?.ok_or(ServiceError::NotFound)?;
            let updates = draft.to_new_booking(existing.status)?;
            repo.update_booking(id, &updates).map_err(|err| {
                log::error!("Failed to update booking {id}: {err}");
                ServiceError::from(err)
            })
        }
        None => {
            let new_booking = draft.to_new_booking(BookingStatus::Pending)?;
            repo.create_booking(&new_booking).map_err(|err| {
                log::error!("Failed to create booking: {err}");
                ServiceError::from(err)
            })
        }
    }
}

/// Resolves names and derived dates shown on the review step.
pub fn load_review<R>(repo: &R, draft: &BookingDraft) -> ServiceResult<BookingReview>
where
    R: TrailerReader + CustomerReader + ?Sized,
{
    let customer_id = draft
        .customer_id
        .as_ref()
        .ok_or(FormError::MissingField("customer"))?;
    let trailer_id = draft
        .trailer_id
        .as_ref()
        .ok_or(FormError::MissingField("trailer"))?;
    let period = draft.period().ok_or(FormError::MissingField("rental period"))?;

    let customer = repo
        .get_customer_by_id(customer_id)?
        .ok_or(ServiceError::NotFound)?;
    let trailer = repo
        .get_trailer_by_id(trailer_id)?
        .ok_or(ServiceError::NotFound)?;

    Ok(BookingReview {
        customer_name: customer.name.into_inner(),
        trailer_name: trailer.name.clone().into_inner(),
        pick_up_day: period.start.date(),
        last_day: period.end.date(),
        return_day: period.return_date(),
        rental_days: period.rental_days(),
        service_type: trailer
            .forced_service_type()
            .or(draft.service_type)
            .unwrap_or(ServiceType::SelfService),
        delivery_address: draft.delivery_address.as_ref().map(|a| a.to_string()),
        notes: draft.notes.clone(),
    })
}
