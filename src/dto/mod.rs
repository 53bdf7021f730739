//! DTO modules that bridge services with the command line and UI layers.

pub mod availability;
pub mod booking;
pub mod calendar;
