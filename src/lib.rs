//! Trailer rental booking: availability checks and the booking wizard.

pub mod domain;
pub mod dto;
mod error_conversions;
pub mod forms;
pub mod models;
pub mod repository;
pub mod services;
