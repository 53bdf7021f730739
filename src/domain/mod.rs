//! Domain aggregates exposed by the booking service layer.

pub mod availability;
pub mod booking;
pub mod customer;
pub mod period;
pub mod trailer;
pub mod types;
