//! Core types, traits, and utilities for bikeshare
//!
//! This crate provides the trip data model, error handling, source
//! configuration, filtering, and the report value types shared by the
//! loader crate and the statistics engine.

pub mod config;
pub mod error;
pub mod filters;
pub mod mode;
pub mod report_types;
pub mod source;
pub mod types;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types
pub use error::{BikeshareError, Result};
pub use filters::{FilterApplier, FilterSpec};
pub use types::{CityId, Dataset, DatasetView, RouteKey, Schema, TripDuration, TripRecord};
