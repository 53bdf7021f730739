//! Value objects shared by bookings, trailers and customers.
//!
//! Every wrapper is trimmed and non-empty; emails, phones and addresses are
//! normalized as well. Deserialization goes through the same constructors.
use std::fmt::{Display, Formatter};
use std::ops::Deref;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime};
use phonenumber::{Mode, parse};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::ValidateEmail;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    #[error("invalid email address")]
    InvalidEmail,
    #[error("value cannot be empty")]
    EmptyString,
    /// Unknown status, service type or other enumerated value.
    #[error("invalid value: {0}")]
    InvalidValue(String),
    #[error("invalid phone number")]
    InvalidPhone,
    /// Timestamp was not a date, a naive datetime or an RFC 3339 datetime.
    #[error("invalid date: {0}")]
    InvalidDate(String),
}

fn trimmed(value: String) -> Result<String, TypeConstraintError> {
    let value = value.trim();
    if value.is_empty() {
        Err(TypeConstraintError::EmptyString)
    } else {
        Ok(value.to_string())
    }
}

fn normalize_email(value: String) -> Result<String, TypeConstraintError> {
    let email = trimmed(value)?.to_lowercase();
    if email.validate_email() {
        Ok(email)
    } else {
        Err(TypeConstraintError::InvalidEmail)
    }
}

/// Formats any parseable phone number as E.164, e.g. `+14155552671`.
pub fn normalize_phone_to_e164(value: &str) -> Result<String, TypeConstraintError> {
    let raw = trimmed(value.to_string())?;
    parse(None, &raw)
        .map(|number| number.format().mode(Mode::E164).to_string())
        .map_err(|_| TypeConstraintError::InvalidPhone)
}

fn normalize_phone(value: String) -> Result<String, TypeConstraintError> {
    normalize_phone_to_e164(&value)
}

fn sanitize_address(value: String) -> Result<String, TypeConstraintError> {
    trimmed(ammonia::clean(&value))
}

/// String newtypes that run `$normalize` on construction and deserialize.
macro_rules! constrained_string {
    ($(#[$meta:meta])* $name:ident => $normalize:path) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                $normalize(value.into()).map(Self)
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &str {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

constrained_string!(
    /// Booking id assigned by the backend on first save.
    BookingId => trimmed
);
constrained_string!(TrailerId => trimmed);
constrained_string!(CustomerId => trimmed);
constrained_string!(CustomerName => trimmed);
constrained_string!(
    /// Fleet label such as `7x14 Dump #3`.
    TrailerName => trimmed
);
constrained_string!(
    /// Lower-cased email address.
    CustomerEmail => normalize_email
);
constrained_string!(
    /// Phone number stored in E.164 form.
    PhoneNumber => normalize_phone
);
constrained_string!(
    /// Drop-off address for full-service rentals with any markup removed.
    DeliveryAddress => sanitize_address
);

/// Parses a timestamp into local wall-clock time.
///
/// Accepts `YYYY-MM-DD` (midnight), naive ISO datetimes with or without
/// seconds, and RFC 3339 values which are converted to the local time zone.
pub fn parse_local_datetime(value: &str) -> Result<NaiveDateTime, TypeConstraintError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TypeConstraintError::EmptyString);
    }

    if let Ok(zoned) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(zoned.with_timezone(&Local).naive_local());
    }
    if let Ok(naive) = trimmed.parse::<NaiveDateTime>() {
        return Ok(naive);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M") {
        return Ok(naive);
    }
    if let Ok(date) = trimmed.parse::<NaiveDate>() {
        return Ok(date.and_time(NaiveTime::MIN));
    }

    Err(TypeConstraintError::InvalidDate(trimmed.to_string()))
}

/// Serde adapter for local wall-clock timestamps.
pub mod local_datetime {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer, de};

    use super::parse_local_datetime;

    pub const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&value.format(FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_local_datetime(&raw).map_err(de::Error::custom)
    }
}
