//! Form definitions backing the booking wizard.

use thiserror::Error;
use validator::ValidationErrors;

pub mod booking;
pub mod validation;

#[derive(Debug, Error)]
/// Errors that can occur when processing raw form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid customer id")]
    InvalidCustomerId,

    #[error("invalid trailer id")]
    InvalidTrailerId,

    #[error("invalid {field}: {value}")]
    InvalidDate { field: &'static str, value: String },

    #[error("invalid service type")]
    InvalidServiceType,

    #[error("missing {0}")]
    MissingField(&'static str),
}
