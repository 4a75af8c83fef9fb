//! Filtering module for trip records
//!
//! This module selects the subset of a city's trips matching an optional
//! calendar month and an optional day of week. Both predicates are derived
//! from the trip's start time and combine with logical AND.
//!
//! # Examples
//!
//! ```
//! use bikeshare_core::filters::{FilterApplier, FilterSpec};
//! use bikeshare_core::types::{CityId, Dataset, Schema};
//!
//! // February, Mondays only
//! let spec = FilterSpec::new(CityId::Chicago)
//!     .with_month(2)
//!     .with_day_of_week(0);
//!
//! let dataset = Dataset::new(CityId::Chicago, Schema::new(true, true), Vec::new());
//! let view = FilterApplier::apply(&dataset, &spec);
//! assert!(view.is_empty());
//! ```

use crate::types::{CityId, Dataset, DatasetView, TripRecord};
use serde::Serialize;
use std::fmt;
use tracing::debug;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// English name of a 1-based month number
pub fn month_name(month: u32) -> Option<&'static str> {
    month
        .checked_sub(1)
        .and_then(|idx| MONTH_NAMES.get(idx as usize))
        .copied()
}

/// English name of a Monday = 0 weekday number
pub fn weekday_name(day_of_week: u32) -> Option<&'static str> {
    WEEKDAY_NAMES.get(day_of_week as usize).copied()
}

/// City plus optional month / day-of-week selection
///
/// Ranges are validated where a `FilterSpec` is built (the CLI or the
/// interactive prompt): `month` in 1..=6, `day_of_week` in 0..=6 with
/// Monday = 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FilterSpec {
    pub city: CityId,
    /// Calendar month, January = 1
    pub month: Option<u32>,
    /// Weekday, Monday = 0 through Sunday = 6
    pub day_of_week: Option<u32>,
}

impl FilterSpec {
    /// Create a spec for a city with no month or day restriction
    pub fn new(city: CityId) -> Self {
        Self {
            city,
            month: None,
            day_of_week: None,
        }
    }

    /// Set the month filter
    pub fn with_month(mut self, month: u32) -> Self {
        self.month = Some(month);
        self
    }

    /// Set the day-of-week filter
    pub fn with_day_of_week(mut self, day_of_week: u32) -> Self {
        self.day_of_week = Some(day_of_week);
        self
    }

    /// Check if a trip passes the month and day predicates
    pub fn matches(&self, record: &TripRecord) -> bool {
        self.month.is_none_or(|month| record.month() == month)
            && self
                .day_of_week
                .is_none_or(|day| record.day_of_week() == day)
    }
}

impl fmt::Display for FilterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let month = self.month.and_then(month_name).unwrap_or("all");
        let day = self.day_of_week.and_then(weekday_name).unwrap_or("all");
        write!(f, "{}, month: {month}, day: {day}", self.city)
    }
}

/// Applies a [`FilterSpec`] to a loaded dataset
pub struct FilterApplier;

impl FilterApplier {
    /// Select the records matching `spec`, preserving source order
    ///
    /// The dataset is only borrowed; the returned view shares its records.
    pub fn apply<'a>(dataset: &'a Dataset, spec: &FilterSpec) -> DatasetView<'a> {
        if spec.city != dataset.city() {
            debug!(
                "Filter spec names {} but dataset is {}; applying month/day only",
                spec.city,
                dataset.city()
            );
        }

        let records: Vec<&TripRecord> = dataset
            .records()
            .iter()
            .filter(|record| spec.matches(record))
            .collect();

        debug!(
            "Filter ({}) kept {} of {} records",
            spec,
            records.len(),
            dataset.len()
        );

        DatasetView::new(dataset.city(), dataset.schema(), records)
    }
}
