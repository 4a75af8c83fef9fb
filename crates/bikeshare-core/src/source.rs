//! Trip source trait for data loaders
//!
//! This module defines the `TripSource` trait that loader crates implement.
//! It gives the statistics pipeline a uniform way to obtain a city's
//! dataset without knowing where or how it is stored.

use crate::error::Result;
use crate::types::{CityId, Dataset};

/// Trait for city trip loaders.
///
/// Implementations read every record for a city, drop (and count) the ones
/// that fail to parse, and release any handle before returning.
pub trait TripSource: Send + Sync {
    /// Load the full dataset for `city`.
    fn load(&self, city: CityId) -> Result<Dataset>;
}
