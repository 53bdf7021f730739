//! Multi-step booking wizard.
//!
//! The wizard walks a [`BookingDraft`] through
//! `CustomerTrailer -> RentalPeriod -> Details -> Review -> Confirmation`.
//! Moving forward validates only the fields owned by the current step; the
//! review step runs the full gate through [`submit_booking`]. Moving back never
//! validates.

use std::fmt::{Display, Formatter};

use serde::Serialize;
use thiserror::Error;

use crate::domain::booking::Booking;
use crate::domain::types::BookingId;
use crate::dto::booking::BookingReview;
use crate::forms::booking::{BookingDraft, StepInput};
use crate::forms::validation::{BookingContext, BookingErrors, BookingField, validate_fields};
use crate::repository::{BookingReader, BookingWriter, CustomerReader, TrailerReader};
use crate::services::booking::{load_review, load_validation_data, submit_booking};
use crate::services::{ServiceError, ServiceResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum WizardStep {
    CustomerTrailer,
    RentalPeriod,
    Details,
    Review,
    Confirmation,
}

impl WizardStep {
    pub const ORDER: [WizardStep; 5] = [
        WizardStep::CustomerTrailer,
        WizardStep::RentalPeriod,
        WizardStep::Details,
        WizardStep::Review,
        WizardStep::Confirmation,
    ];

    /// Fields validated before leaving this step.
    pub fn fields(self) -> &'static [BookingField] {
        match self {
            WizardStep::CustomerTrailer => &[BookingField::Customer, BookingField::Trailer],
            WizardStep::RentalPeriod => &[
                BookingField::StartDate,
                BookingField::EndDate,
                BookingField::Availability,
            ],
            WizardStep::Details => &[BookingField::ServiceType, BookingField::DeliveryAddress],
            WizardStep::Review => &BookingField::ALL,
            WizardStep::Confirmation => &[],
        }
    }

    /// One-based position shown in the progress indicator.
    pub fn number(self) -> usize {
        self as usize + 1
    }

    pub fn next(self) -> Option<Self> {
        Self::ORDER.get(self.number()).copied()
    }

    pub fn previous(self) -> Option<Self> {
        (self as usize)
            .checked_sub(1)
            .and_then(|index| Self::ORDER.get(index).copied())
    }
}

impl Display for WizardStep {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            WizardStep::CustomerTrailer => "customer & trailer",
            WizardStep::RentalPeriod => "rental period",
            WizardStep::Details => "details",
            WizardStep::Review => "review",
            WizardStep::Confirmation => "confirmation",
        };
        f.write_str(name)
    }
}

/// Validates the fields owned by `step`.
pub fn validate_booking_step(
    step: WizardStep,
    draft: &BookingDraft,
    context: &BookingContext<'_>,
) -> BookingErrors {
    validate_fields(draft, context, step.fields())
}

#[derive(Debug, Error)]
pub enum WizardError {
    #[error("{step} step is incomplete: {errors}")]
    Invalid {
        step: WizardStep,
        errors: BookingErrors,
    },

    #[error("already at the first step")]
    AtFirstStep,

    #[error("booking has already been confirmed")]
    Finished,

    #[error("booking has not been confirmed yet")]
    NotFinished,

    #[error(transparent)]
    Service(#[from] ServiceError),
}

#[derive(Debug, Clone)]
pub struct BookingWizard {
    step: WizardStep,
    draft: BookingDraft,
    editing: Option<BookingId>,
    errors: BookingErrors,
    confirmed: Option<Booking>,
}

impl Default for BookingWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingWizard {
    pub fn new() -> Self {
        Self {
            step: WizardStep::CustomerTrailer,
            draft: BookingDraft::default(),
            editing: None,
            errors: BookingErrors::new(),
            confirmed: None,
        }
    }

    /// Starts a wizard prefilled with an existing booking.
    pub fn edit(booking: &Booking) -> Self {
        Self {
            draft: BookingDraft::from_booking(booking),
            editing: booking.id.clone(),
            ..Self::new()
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn editing(&self) -> Option<&BookingId> {
        self.editing.as_ref()
    }

    /// Errors from the last rejected attempt to move forward.
    pub fn errors(&self) -> &BookingErrors {
        &self.errors
    }

    pub fn is_finished(&self) -> bool {
        self.confirmed.is_some()
    }

    /// Merges a step's input into the draft.
    pub fn update<R>(&mut self, input: StepInput, repo: &R) -> Result<(), WizardError>
    where
        R: TrailerReader + ?Sized,
    {
        if self.step == WizardStep::Confirmation {
            return Err(WizardError::Finished);
        }

        let trailers = repo.list_trailers().map_err(ServiceError::from)?;
        self.draft.apply(input, &BookingContext::new(&trailers, &[]));
        Ok(())
    }

    /// Validates the current step and advances.
    ///
    /// Leaving the review step submits the booking.
    pub fn next<R>(&mut self, repo: &R) -> Result<WizardStep, WizardError>
    where
        R: BookingReader + BookingWriter + TrailerReader + ?Sized,
    {
        match self.step {
            WizardStep::Confirmation => Err(WizardError::Finished),
            WizardStep::Review => {
                match submit_booking(repo, &self.draft, self.editing.as_ref()) {
                    Ok(booking) => {
                        log::info!(
                            "Booking {} confirmed for trailer {}",
                            booking.id.as_ref().map(|id| id.as_str()).unwrap_or("-"),
                            booking.trailer_id
                        );
                        self.errors = BookingErrors::new();
                        self.confirmed = Some(booking);
                        self.step = WizardStep::Confirmation;
                        Ok(self.step)
                    }
                    Err(ServiceError::Validation(errors)) => Err(self.reject(errors)),
                    Err(err) => Err(err.into()),
                }
            }
            step => {
                let data = load_validation_data(repo, &self.draft)?;
                let errors =
                    validate_booking_step(step, &self.draft, &data.context(self.editing.as_ref()));
                if !errors.is_empty() {
                    return Err(self.reject(errors));
                }

                self.errors = BookingErrors::new();
                self.step = step.next().ok_or(WizardError::Finished)?;
                Ok(self.step)
            }
        }
    }

    /// Steps back without validating.
    pub fn previous(&mut self) -> Result<WizardStep, WizardError> {
        if self.step == WizardStep::Confirmation {
            return Err(WizardError::Finished);
        }

        self.step = self.step.previous().ok_or(WizardError::AtFirstStep)?;
        self.errors = BookingErrors::new();
        Ok(self.step)
    }

    /// Summary for the review step.
    pub fn review<R>(&self, repo: &R) -> ServiceResult<BookingReview>
    where
        R: TrailerReader + CustomerReader + ?Sized,
    {
        load_review(repo, &self.draft)
    }

    /// The stored booking once the wizard reached confirmation.
    pub fn done(self) -> Result<Booking, WizardError> {
        self.confirmed.ok_or(WizardError::NotFinished)
    }

    fn reject(&mut self, errors: BookingErrors) -> WizardError {
        log::warn!("Cannot leave {} step: {errors}", self.step);
        self.errors = errors.clone();
        WizardError::Invalid {
            step: self.step,
            errors,
        }
    }
}
