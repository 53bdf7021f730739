use chrono::NaiveDateTime;
use serde::Deserialize;
use validator::Validate;

use crate::domain::booking::{Booking, BookingStatus, NewBooking, ServiceType};
use crate::domain::period::DateRange;
use crate::domain::types::{CustomerId, DeliveryAddress, TrailerId, parse_local_datetime};
use crate::forms::FormError;
use crate::forms::validation::BookingContext;

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Raw booking form payload; every field may still be blank.
pub struct BookingForm {
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub trailer_id: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub service_type: Option<String>,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub delivery_address: Option<String>,
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn parse_date(
    field: &'static str,
    value: Option<String>,
) -> Result<Option<NaiveDateTime>, FormError> {
    non_blank(value)
        .map(|raw| {
            parse_local_datetime(&raw).map_err(|_| FormError::InvalidDate { field, value: raw })
        })
        .transpose()
}

impl TryFrom<BookingForm> for BookingDraft {
    type Error = FormError;

    fn try_from(form: BookingForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let customer_id = non_blank(form.customer_id)
            .map(|id| CustomerId::new(id).map_err(|_| FormError::InvalidCustomerId))
            .transpose()?;
        let trailer_id = non_blank(form.trailer_id)
            .map(|id| TrailerId::new(id).map_err(|_| FormError::InvalidTrailerId))
            .transpose()?;
        let service_type = non_blank(form.service_type)
            .map(|s| s.parse::<ServiceType>().map_err(|_| FormError::InvalidServiceType))
            .transpose()?;

        // Markup-only addresses sanitize to nothing and count as not provided.
        let delivery_address =
            non_blank(form.delivery_address).and_then(|raw| DeliveryAddress::new(raw).ok());

        Ok(Self {
            customer_id,
            trailer_id,
            start_date: parse_date("start date", form.start_date)?,
            end_date: parse_date("end date", form.end_date)?,
            service_type,
            delivery_address,
            notes: non_blank(form.notes),
        })
    }
}

/// Partially filled booking carried through the wizard.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BookingDraft {
    pub customer_id: Option<CustomerId>,
    pub trailer_id: Option<TrailerId>,
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
    pub service_type: Option<ServiceType>,
    pub delivery_address: Option<DeliveryAddress>,
    pub notes: Option<String>,
}

/// Values submitted by a single wizard step.
#[derive(Clone, Debug, PartialEq)]
pub enum StepInput {
    CustomerTrailer {
        customer_id: Option<CustomerId>,
        trailer_id: Option<TrailerId>,
    },
    RentalPeriod {
        start_date: Option<NaiveDateTime>,
        end_date: Option<NaiveDateTime>,
    },
    Details {
        service_type: Option<ServiceType>,
        delivery_address: Option<DeliveryAddress>,
        notes: Option<String>,
    },
}

impl BookingDraft {
    /// Draft prefilled from a persisted booking for editing.
    pub fn from_booking(booking: &Booking) -> Self {
        Self {
            customer_id: booking.customer_id.clone(),
            trailer_id: Some(booking.trailer_id.clone()),
            start_date: Some(booking.start_date),
            end_date: Some(booking.end_date),
            service_type: booking.service_type,
            delivery_address: booking.delivery_address.clone(),
            notes: booking.notes.clone(),
        }
    }

    /// Both dates, when present.
    pub fn period(&self) -> Option<DateRange> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => Some(DateRange::new(start, end)),
            _ => None,
        }
    }

    /// Merges one step's values into the draft.
    ///
    /// Trailers without a service choice force self-service. Changing the
    /// trailer drops the previous service choice, and the delivery address is
    /// kept only for full service.
    pub fn apply(&mut self, input: StepInput, context: &BookingContext<'_>) {
        match input {
            StepInput::CustomerTrailer {
                customer_id,
                trailer_id,
            } => {
                if trailer_id != self.trailer_id {
                    self.service_type = None;
                }
                self.customer_id = customer_id;
                self.trailer_id = trailer_id;
            }
            StepInput::RentalPeriod {
                start_date,
                end_date,
            } => {
                self.start_date = start_date;
                self.end_date = end_date;
            }
            StepInput::Details {
                service_type,
                delivery_address,
                notes,
            } => {
                self.service_type = service_type;
                self.delivery_address = delivery_address;
                self.notes = notes;
            }
        }

        let forced = self
            .trailer_id
            .as_ref()
            .and_then(|trailer_id| context.trailer(trailer_id))
            .and_then(|trailer| trailer.forced_service_type());
        if forced.is_some() {
            self.service_type = forced;
        }
        if !self
            .service_type
            .is_some_and(ServiceType::requires_delivery_address)
        {
            self.delivery_address = None;
        }
    }

    /// Converts a draft that passed validation into a writable booking.
    pub fn to_new_booking(&self, status: BookingStatus) -> Result<NewBooking, FormError> {
        Ok(NewBooking {
            customer_id: self
                .customer_id
                .clone()
                .ok_or(FormError::MissingField("customer"))?,
            trailer_id: self
                .trailer_id
                .clone()
                .ok_or(FormError::MissingField("trailer"))?,
            start_date: self.start_date.ok_or(FormError::MissingField("start date"))?,
            end_date: self.end_date.ok_or(FormError::MissingField("end date"))?,
            status,
            service_type: self.service_type.unwrap_or(ServiceType::SelfService),
            delivery_address: self.delivery_address.clone(),
            notes: self.notes.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::trailer::{Trailer, TrailerCategory};
    use crate::domain::types::TrailerName;

    fn fleet() -> Vec<Trailer> {
        vec![
            Trailer::new(
                TrailerId::new("T1").unwrap(),
                TrailerName::new("6x10 Utility").unwrap(),
                TrailerCategory::Utility,
            ),
            Trailer::new(
                TrailerId::new("D1").unwrap(),
                TrailerName::new("7x14 Dump").unwrap(),
                TrailerCategory::Dump,
            ),
        ]
    }

    #[test]
    fn form_to_draft_treats_blanks_as_missing() {
        let form = BookingForm {
            customer_id: Some("  ".to_string()),
            trailer_id: Some(" D1 ".to_string()),
            start_date: Some("2024-01-10".to_string()),
            end_date: Some(String::new()),
            service_type: Some("full".to_string()),
            delivery_address: Some("<b></b>".to_string()),
            notes: None,
        };

        let draft = BookingDraft::try_from(form).expect("valid form");

        assert_eq!(draft.customer_id, None);
        assert_eq!(draft.trailer_id.as_ref().map(|id| id.as_str()), Some("D1"));
        assert!(draft.start_date.is_some());
        assert_eq!(draft.end_date, None);
        assert_eq!(draft.service_type, Some(ServiceType::Full));
        assert_eq!(draft.delivery_address, None);
    }

    #[test]
    fn form_rejects_unparseable_values() {
        let bad_date = BookingForm {
            start_date: Some("soon".to_string()),
            ..BookingForm::default()
        };
        assert!(matches!(
            BookingDraft::try_from(bad_date),
            Err(FormError::InvalidDate { field: "start date", .. })
        ));

        let bad_service = BookingForm {
            service_type: Some("premium".to_string()),
            ..BookingForm::default()
        };
        assert!(matches!(
            BookingDraft::try_from(bad_service),
            Err(FormError::InvalidServiceType)
        ));

        let long_notes = BookingForm {
            notes: Some("x".repeat(1001)),
            ..BookingForm::default()
        };
        assert!(matches!(
            BookingDraft::try_from(long_notes),
            Err(FormError::Validation(_))
        ));
    }

    #[test]
    fn apply_forces_self_service_for_non_dump_trailers() {
        let trailers = fleet();
        let context = BookingContext::new(&trailers, &[]);
        let mut draft = BookingDraft {
            service_type: Some(ServiceType::Full),
            ..BookingDraft::default()
        };

        draft.apply(
            StepInput::CustomerTrailer {
                customer_id: Some(CustomerId::new("c1").unwrap()),
                trailer_id: Some(TrailerId::new("T1").unwrap()),
            },
            &context,
        );
        assert_eq!(draft.service_type, Some(ServiceType::SelfService));

        draft.apply(
            StepInput::CustomerTrailer {
                customer_id: Some(CustomerId::new("c1").unwrap()),
                trailer_id: Some(TrailerId::new("D1").unwrap()),
            },
            &context,
        );
        draft.apply(
            StepInput::Details {
                service_type: Some(ServiceType::Full),
                delivery_address: Some(DeliveryAddress::new("12 Quarry Rd").unwrap()),
                notes: None,
            },
            &context,
        );
        assert_eq!(draft.service_type, Some(ServiceType::Full));
    }

    #[test]
    fn switching_to_dump_trailer_clears_forced_service() {
        let trailers = fleet();
        let context = BookingContext::new(&trailers, &[]);
        let mut draft = BookingDraft::default();

        draft.apply(
            StepInput::CustomerTrailer {
                customer_id: Some(CustomerId::new("c1").unwrap()),
                trailer_id: Some(TrailerId::new("T1").unwrap()),
            },
            &context,
        );
        assert_eq!(draft.service_type, Some(ServiceType::SelfService));

        draft.apply(
            StepInput::CustomerTrailer {
                customer_id: Some(CustomerId::new("c1").unwrap()),
                trailer_id: Some(TrailerId::new("D1").unwrap()),
            },
            &context,
        );
        assert_eq!(draft.service_type, None);
    }

    #[test]
    fn re_submitting_same_trailer_keeps_service_choice() {
        let trailers = fleet();
        let context = BookingContext::new(&trailers, &[]);
        let mut draft = BookingDraft {
            customer_id: Some(CustomerId::new("c1").unwrap()),
            trailer_id: Some(TrailerId::new("D1").unwrap()),
            service_type: Some(ServiceType::Full),
            delivery_address: Some(DeliveryAddress::new("12 Quarry Rd").unwrap()),
            ..BookingDraft::default()
        };

        draft.apply(
            StepInput::CustomerTrailer {
                customer_id: Some(CustomerId::new("c2").unwrap()),
                trailer_id: Some(TrailerId::new("D1").unwrap()),
            },
            &context,
        );

        assert_eq!(draft.service_type, Some(ServiceType::Full));
        assert!(draft.delivery_address.is_some());
    }

    #[test]
    fn address_is_dropped_when_service_is_not_full() {
        let trailers = fleet();
        let context = BookingContext::new(&trailers, &[]);
        let mut draft = BookingDraft {
            trailer_id: Some(TrailerId::new("D1").unwrap()),
            service_type: Some(ServiceType::Full),
            delivery_address: Some(DeliveryAddress::new("12 Quarry Rd").unwrap()),
            ..BookingDraft::default()
        };

        draft.apply(
            StepInput::CustomerTrailer {
                customer_id: None,
                trailer_id: Some(TrailerId::new("T1").unwrap()),
            },
            &context,
        );
        assert_eq!(draft.service_type, Some(ServiceType::SelfService));
        assert_eq!(draft.delivery_address, None);

        draft.apply(
            StepInput::Details {
                service_type: Some(ServiceType::SelfService),
                delivery_address: Some(DeliveryAddress::new("12 Quarry Rd").unwrap()),
                notes: None,
            },
            &context,
        );
        assert_eq!(draft.delivery_address, None);
    }

    #[test]
    fn incomplete_draft_cannot_become_a_booking() {
        let result = BookingDraft::default().to_new_booking(BookingStatus::Pending);
        assert!(matches!(result, Err(FormError::MissingField("customer"))));
    }
}
