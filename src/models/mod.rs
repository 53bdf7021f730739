//! Configuration and on-disk snapshot formats.

pub mod config;
pub mod snapshot;
