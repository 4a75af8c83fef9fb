//! Report value types for bikeshare
//!
//! Pure data structures produced by the statistics calculators. These types
//! have no dependencies on the loader or the calculators themselves.

use crate::error::Result;
use crate::filters::{month_name, weekday_name};
use crate::types::{RouteKey, TripDuration};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// Most frequent travel times
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemporalStatsReport {
    /// Calendar month, January = 1
    pub popular_month: u32,
    /// Weekday, Monday = 0
    pub popular_day_of_week: u32,
    /// Start hour, 0-23
    pub popular_hour: u32,
}

impl TemporalStatsReport {
    pub fn popular_month_name(&self) -> &'static str {
        month_name(self.popular_month).unwrap_or("Unknown")
    }

    pub fn popular_day_name(&self) -> &'static str {
        weekday_name(self.popular_day_of_week).unwrap_or("Unknown")
    }
}

/// A start/end station pair
///
/// Compares and orders like its [`RouteKey`], by the rendered
/// `"<start> to <end>"` text.
#[derive(Debug, Clone, Serialize)]
pub struct Route {
    pub start_station: String,
    pub end_station: String,
}

impl Route {
    pub fn new(start_station: impl Into<String>, end_station: impl Into<String>) -> Self {
        Self {
            start_station: start_station.into(),
            end_station: end_station.into(),
        }
    }

    pub fn key(&self) -> RouteKey<'_> {
        RouteKey::new(&self.start_station, &self.end_station)
    }
}

impl From<RouteKey<'_>> for Route {
    fn from(key: RouteKey<'_>) -> Self {
        Self::new(key.start_station, key.end_station)
    }
}

impl PartialEq for Route {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Route {}

impl PartialOrd for Route {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Route {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.key(), f)
    }
}

/// Most popular stations and trip
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationStatsReport {
    pub popular_start_station: String,
    pub popular_end_station: String,
    pub popular_route: Route,
}

/// Total and average trip duration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationStatsReport {
    /// Number of trips summed
    pub trip_count: u64,
    /// Exact sum of trip durations
    #[serde(rename = "total_duration_seconds")]
    pub total_duration: TripDuration,
    /// Mean trip length in minutes, rounded to 3 decimals
    pub mean_duration_minutes: f64,
}

impl DurationStatsReport {
    pub fn total_duration_seconds(&self) -> f64 {
        self.total_duration.as_secs_f64()
    }
}

/// Earliest, most recent and most common birth year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BirthYearSummary {
    pub min: i32,
    pub max: i32,
    pub mode: i32,
}

/// Rider demographics
///
/// `gender_counts` and `birth_year_summary` are `None` when the city's
/// schema has no such column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserStatsReport {
    pub user_type_counts: BTreeMap<String, u64>,
    pub gender_counts: Option<BTreeMap<String, u64>>,
    pub birth_year_summary: Option<BirthYearSummary>,
}

/// Outcome of one calculator as seen by the presentation layer
///
/// Only [`BikeshareError::EmptyDataset`](crate::error::BikeshareError::EmptyDataset) maps to `NoData`; every other
/// error keeps propagating.
///
/// # Examples
/// ```
/// use bikeshare_core::error::BikeshareError;
/// use bikeshare_core::report_types::StatsOutcome;
///
/// let outcome = StatsOutcome::<u32>::from_result(Err(BikeshareError::EmptyDataset)).unwrap();
/// assert!(outcome.is_no_data());
///
/// let outcome = StatsOutcome::from_result(Ok(7)).unwrap();
/// assert_eq!(outcome.computed(), Some(&7));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "stats", rename_all = "snake_case")]
pub enum StatsOutcome<T> {
    Computed(T),
    NoData,
}

impl<T> StatsOutcome<T> {
    /// Fold a calculator result, turning an empty dataset into `NoData`
    pub fn from_result(result: Result<T>) -> Result<Self> {
        match result {
            Ok(report) => Ok(Self::Computed(report)),
            Err(e) if e.is_empty_dataset() => Ok(Self::NoData),
            Err(e) => Err(e),
        }
    }

    pub fn computed(&self) -> Option<&T> {
        match self {
            Self::Computed(report) => Some(report),
            Self::NoData => None,
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::NoData)
    }
}
