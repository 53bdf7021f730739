//! Field-keyed validation of booking drafts.
//!
//! Every rule in scope runs; the resulting [`BookingErrors`] map is the only
//! pass/fail signal. An empty map means the draft may advance or be
//! submitted.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::Serialize;

use crate::domain::availability::is_trailer_available;
use crate::domain::booking::Booking;
use crate::domain::trailer::Trailer;
use crate::domain::types::{BookingId, TrailerId};
use crate::forms::booking::BookingDraft;

pub const CUSTOMER_REQUIRED: &str = "Please select a customer";
pub const TRAILER_REQUIRED: &str = "Please select a trailer";
pub const START_DATE_REQUIRED: &str = "Pick-up date is required";
pub const END_DATE_REQUIRED: &str = "Return date is required";
pub const END_BEFORE_START: &str = "Return date must be after pick-up date";
pub const TRAILER_UNAVAILABLE: &str = "This trailer is already booked for the selected dates";
pub const SERVICE_TYPE_REQUIRED: &str = "Please select a service type";
pub const DELIVERY_ADDRESS_REQUIRED: &str = "Delivery address is required for full service";

/// Keys of the validation error map, in rule order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BookingField {
    Customer,
    Trailer,
    StartDate,
    /// Must be present and fall on or after the start's calendar day; the
    /// time of day is not compared.
    EndDate,
    Availability,
    ServiceType,
    DeliveryAddress,
}

impl BookingField {
    pub const ALL: [BookingField; 7] = [
        BookingField::Customer,
        BookingField::Trailer,
        BookingField::StartDate,
        BookingField::EndDate,
        BookingField::Availability,
        BookingField::ServiceType,
        BookingField::DeliveryAddress,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BookingField::Customer => "customer",
            BookingField::Trailer => "trailer",
            BookingField::StartDate => "startDate",
            BookingField::EndDate => "endDate",
            BookingField::Availability => "availability",
            BookingField::ServiceType => "serviceType",
            BookingField::DeliveryAddress => "deliveryAddress",
        }
    }
}

impl Display for BookingField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mapping from field to human-readable error message.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BookingErrors(BTreeMap<BookingField, String>);

impl BookingErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: BookingField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: BookingField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: BookingField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = BookingField> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BookingField, &str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl Display for BookingErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// Reference data a draft is validated against.
#[derive(Clone, Copy, Debug)]
pub struct BookingContext<'a> {
    /// Fleet the selected trailer is looked up in.
    pub trailers: &'a [Trailer],
    /// Snapshot of bookings to check availability against.
    pub existing_bookings: &'a [Booking],
    /// Id of the booking being edited, excluded from the availability check.
    pub current_booking_id: Option<&'a BookingId>,
}

impl<'a> BookingContext<'a> {
    pub fn new(trailers: &'a [Trailer], existing_bookings: &'a [Booking]) -> Self {
        Self {
            trailers,
            existing_bookings,
            current_booking_id: None,
        }
    }

    pub fn editing(mut self, booking_id: &'a BookingId) -> Self {
        self.current_booking_id = Some(booking_id);
        self
    }

    pub fn trailer(&self, trailer_id: &TrailerId) -> Option<&'a Trailer> {
        self.trailers.iter().find(|trailer| &trailer.id == trailer_id)
    }
}

/// Runs every rule against the draft.
pub fn validate_booking(draft: &BookingDraft, context: &BookingContext<'_>) -> BookingErrors {
    validate_fields(draft, context, &BookingField::ALL)
}

/// Runs the rules whose field is in `scope`, collecting all errors.
pub fn validate_fields(
    draft: &BookingDraft,
    context: &BookingContext<'_>,
    scope: &[BookingField],
) -> BookingErrors {
    let in_scope = |field: BookingField| scope.contains(&field);
    let mut errors = BookingErrors::new();

    if in_scope(BookingField::Customer) && draft.customer_id.is_none() {
        errors.insert(BookingField::Customer, CUSTOMER_REQUIRED);
    }

    if in_scope(BookingField::Trailer) && draft.trailer_id.is_none() {
        errors.insert(BookingField::Trailer, TRAILER_REQUIRED);
    }

    if in_scope(BookingField::StartDate) && draft.start_date.is_none() {
        errors.insert(BookingField::StartDate, START_DATE_REQUIRED);
    }

    if in_scope(BookingField::EndDate) {
        match draft.period() {
            Some(period) if !period.is_ordered() => {
                errors.insert(BookingField::EndDate, END_BEFORE_START);
            }
            _ if draft.end_date.is_none() => {
                errors.insert(BookingField::EndDate, END_DATE_REQUIRED);
            }
            _ => {}
        }
    }

    if in_scope(BookingField::Availability) {
        if let (Some(trailer_id), Some(period)) = (draft.trailer_id.as_ref(), draft.period()) {
            let available = is_trailer_available(
                trailer_id,
                period.start,
                period.end,
                context.existing_bookings,
                context.current_booking_id,
            );
            if !available {
                errors.insert(BookingField::Availability, TRAILER_UNAVAILABLE);
            }
        }
    }

    let selected_trailer = draft
        .trailer_id
        .as_ref()
        .and_then(|trailer_id| context.trailer(trailer_id));

    if in_scope(BookingField::ServiceType)
        && selected_trailer.is_some_and(Trailer::offers_service_choice)
        && draft.service_type.is_none()
    {
        errors.insert(BookingField::ServiceType, SERVICE_TYPE_REQUIRED);
    }

    if in_scope(BookingField::DeliveryAddress)
        && draft
            .service_type
            .is_some_and(|service| service.requires_delivery_address())
        && draft.delivery_address.is_none()
    {
        errors.insert(BookingField::DeliveryAddress, DELIVERY_ADDRESS_REQUIRED);
    }

    errors
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;

    use super::*;
    use crate::domain::booking::{BookingStatus, ServiceType};
    use crate::domain::period::DateRange;
    use crate::domain::trailer::TrailerCategory;
    use crate::domain::types::{CustomerId, DeliveryAddress, TrailerName};

    fn day(value: &str) -> NaiveDateTime {
        format!("{value}T00:00:00").parse().expect("valid day")
    }

    fn trailer(id: &str, category: TrailerCategory) -> Trailer {
        Trailer::new(
            TrailerId::new(id).unwrap(),
            TrailerName::new(format!("Trailer {id}")).unwrap(),
            category,
        )
    }

    fn fleet() -> Vec<Trailer> {
        vec![
            trailer("T1", TrailerCategory::Utility),
            trailer("D1", TrailerCategory::Dump),
        ]
    }

    fn complete_draft(trailer_id: &str) -> BookingDraft {
        BookingDraft {
            customer_id: Some(CustomerId::new("c1").unwrap()),
            trailer_id: Some(TrailerId::new(trailer_id).unwrap()),
            start_date: Some(day("2024-01-13")),
            end_date: Some(day("2024-01-15")),
            service_type: Some(ServiceType::SelfService),
            ..BookingDraft::default()
        }
    }

    #[test]
    fn complete_draft_is_valid() {
        let trailers = fleet();
        let context = BookingContext::new(&trailers, &[]);

        assert!(validate_booking(&complete_draft("T1"), &context).is_empty());
    }

    #[test]
    fn missing_selection_reports_customer_and_trailer_only() {
        let trailers = fleet();
        let context = BookingContext::new(&trailers, &[]);
        let draft = BookingDraft {
            customer_id: None,
            trailer_id: None,
            ..complete_draft("T1")
        };

        let errors = validate_booking(&draft, &context);

        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            vec![BookingField::Customer, BookingField::Trailer]
        );
        assert_eq!(errors.get(BookingField::Customer), Some(CUSTOMER_REQUIRED));
    }

    #[test]
    fn empty_draft_collects_every_required_error() {
        let trailers = fleet();
        let context = BookingContext::new(&trailers, &[]);

        let errors = validate_booking(&BookingDraft::default(), &context);

        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            vec![
                BookingField::Customer,
                BookingField::Trailer,
                BookingField::StartDate,
                BookingField::EndDate,
            ]
        );
    }

    #[test]
    fn end_before_start_is_rejected() {
        let trailers = fleet();
        let context = BookingContext::new(&trailers, &[]);
        let draft = BookingDraft {
            start_date: Some(day("2024-01-15")),
            end_date: Some(day("2024-01-13")),
            ..complete_draft("T1")
        };

        let errors = validate_booking(&draft, &context);

        assert_eq!(errors.get(BookingField::EndDate), Some(END_BEFORE_START));
    }

    #[test]
    fn end_date_ordering_ignores_time_of_day() {
        let period = DateRange::new(
            "2024-03-01T16:00:00".parse().unwrap(),
            "2024-03-01T09:00:00".parse().unwrap(),
        );
        assert!(period.is_ordered());

        let previous_day = DateRange::new(
            "2024-03-01T09:00:00".parse().unwrap(),
            "2024-02-29T23:00:00".parse().unwrap(),
        );
        assert!(!previous_day.is_ordered());
    }

    #[test]
    fn same_day_rental_is_accepted_whatever_the_times() {
        let trailers = fleet();
        let context = BookingContext::new(&trailers, &[]);
        let draft = BookingDraft {
            start_date: Some("2024-01-15T16:00:00".parse().unwrap()),
            end_date: Some("2024-01-15T09:00:00".parse().unwrap()),
            ..complete_draft("T1")
        };

        assert!(validate_booking(&draft, &context).is_empty());
    }

    #[test]
    fn unavailable_trailer_is_reported() {
        let trailers = fleet();
        let bookings = vec![
            Booking::new(
                TrailerId::new("T1").unwrap(),
                day("2024-01-10"),
                day("2024-01-13"),
                BookingStatus::Confirmed,
            )
            .with_id(BookingId::new("b1").unwrap()),
        ];
        let context = BookingContext::new(&trailers, &bookings);

        let errors = validate_booking(&complete_draft("T1"), &context);
        assert_eq!(errors.get(BookingField::Availability), Some(TRAILER_UNAVAILABLE));

        let own_id = BookingId::new("b1").unwrap();
        let editing = context.editing(&own_id);
        assert!(validate_booking(&complete_draft("T1"), &editing).is_empty());
    }

    #[test]
    fn dump_trailer_requires_service_type() {
        let trailers = fleet();
        let context = BookingContext::new(&trailers, &[]);
        let draft = BookingDraft {
            service_type: None,
            ..complete_draft("D1")
        };

        let errors = validate_booking(&draft, &context);

        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            vec![BookingField::ServiceType]
        );
    }

    #[test]
    fn full_service_requires_delivery_address() {
        let trailers = fleet();
        let context = BookingContext::new(&trailers, &[]);
        let mut draft = BookingDraft {
            service_type: Some(ServiceType::Full),
            ..complete_draft("D1")
        };

        let errors = validate_booking(&draft, &context);
        assert_eq!(
            errors.get(BookingField::DeliveryAddress),
            Some(DELIVERY_ADDRESS_REQUIRED)
        );

        draft.delivery_address = Some(DeliveryAddress::new("12 Quarry Rd").unwrap());
        assert!(validate_booking(&draft, &context).is_empty());
    }

    #[test]
    fn scope_limits_rules() {
        let trailers = fleet();
        let context = BookingContext::new(&trailers, &[]);

        let errors = validate_fields(
            &BookingDraft::default(),
            &context,
            &[BookingField::StartDate, BookingField::EndDate],
        );

        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            vec![BookingField::StartDate, BookingField::EndDate]
        );
    }

    #[test]
    fn errors_serialize_as_field_keyed_map() {
        let mut errors = BookingErrors::new();
        errors.insert(BookingField::StartDate, START_DATE_REQUIRED);
        errors.insert(BookingField::Customer, CUSTOMER_REQUIRED);

        let json = serde_json::to_value(&errors).expect("serializable errors");

        assert_eq!(json["customer"], CUSTOMER_REQUIRED);
        assert_eq!(json["startDate"], START_DATE_REQUIRED);
        assert_eq!(
            errors.to_string(),
            format!("customer: {CUSTOMER_REQUIRED}; startDate: {START_DATE_REQUIRED}")
        );
    }
}
