//! Core domain types for bikeshare
//!
//! This module contains the trip data model: strongly typed cities and
//! durations, the per-trip record with its derived temporal accessors, and
//! the dataset containers the filters and calculators work on.

use crate::error::{BikeshareError, Result};
use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Supported cities
///
/// Each city has its own source table. Chicago and New York City carry the
/// optional `Gender` and `Birth Year` columns, Washington does not.
///
/// # Examples
/// ```
/// use bikeshare_core::types::CityId;
/// use std::str::FromStr;
///
/// let city = CityId::from_str("New York").unwrap();
/// assert_eq!(city, CityId::NewYorkCity);
/// assert_eq!(city.to_string(), "New York City");
/// assert_eq!(city.default_file_name(), "new_york_city.csv");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CityId {
    Chicago,
    NewYorkCity,
    Washington,
}

impl CityId {
    /// All supported cities, in prompt order
    pub const ALL: [CityId; 3] = [CityId::Chicago, CityId::NewYorkCity, CityId::Washington];

    /// File name of the city's table inside the data directory
    pub fn default_file_name(&self) -> &'static str {
        match self {
            Self::Chicago => "chicago.csv",
            Self::NewYorkCity => "new_york_city.csv",
            Self::Washington => "washington.csv",
        }
    }

    /// Identifier used on the command line and in config overrides
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Chicago => "chicago",
            Self::NewYorkCity => "new_york_city",
            Self::Washington => "washington",
        }
    }
}

impl fmt::Display for CityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Chicago => write!(f, "Chicago"),
            Self::NewYorkCity => write!(f, "New York City"),
            Self::Washington => write!(f, "Washington"),
        }
    }
}

impl FromStr for CityId {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', '-'], " ");
        match normalized.as_str() {
            "chicago" => Ok(Self::Chicago),
            "new york" | "new york city" | "nyc" => Ok(Self::NewYorkCity),
            "washington" => Ok(Self::Washington),
            _ => Err(format!(
                "Invalid city: {s} (expected chicago, new york or washington)"
            )),
        }
    }
}

/// Trip duration with millisecond resolution
///
/// Source durations can be fractional seconds (`1551.024`). Holding them as
/// integer milliseconds keeps totals exact sums.
///
/// # Examples
/// ```
/// use bikeshare_core::types::TripDuration;
///
/// let duration = TripDuration::from_secs_f64(1551.024).unwrap();
/// assert_eq!(duration.as_millis(), 1_551_024);
/// assert!(TripDuration::from_secs_f64(-1.0).is_none());
/// assert!(TripDuration::from_secs_f64(1e30).is_none());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TripDuration(u64);

impl TripDuration {
    /// Create from whole milliseconds
    pub fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// Create from whole seconds
    pub fn from_secs(secs: u64) -> Self {
        Self(secs * 1000)
    }

    /// Create from fractional seconds, rounded to the nearest millisecond
    ///
    /// Returns `None` for negative or non-finite input, and for values too
    /// large to hold in `u64` milliseconds.
    pub fn from_secs_f64(secs: f64) -> Option<Self> {
        if !secs.is_finite() || secs < 0.0 {
            return None;
        }
        let millis = (secs * 1000.0).round();
        // u64::MAX as f64 rounds up to 2^64, which is itself out of range
        if millis >= u64::MAX as f64 {
            return None;
        }
        Some(Self(millis as u64))
    }

    /// Elapsed time between two timestamps, `None` if `end` precedes `start`
    pub fn between(start: &NaiveDateTime, end: &NaiveDateTime) -> Option<Self> {
        let millis = (*end - *start).num_milliseconds();
        u64::try_from(millis).ok().map(Self)
    }

    /// Whole milliseconds
    pub fn as_millis(&self) -> u64 {
        self.0
    }

    /// Seconds as a float
    pub fn as_secs_f64(&self) -> f64 {
        self.0 as f64 / 1000.0
    }
}

impl fmt::Display for TripDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.as_secs_f64())
    }
}

impl Serialize for TripDuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_secs_f64())
    }
}

/// One bike-share trip
///
/// Temporal attributes (`month`, `day_of_week`, `hour`) are derived from
/// `start_time` on demand and never stored.
///
/// # Examples
/// ```
/// use bikeshare_core::types::{TripDuration, TripRecord};
/// use chrono::NaiveDateTime;
///
/// let start = NaiveDateTime::parse_from_str("2017-03-06 08:15:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let end = NaiveDateTime::parse_from_str("2017-03-06 08:25:00", "%Y-%m-%d %H:%M:%S").unwrap();
///
/// let trip = TripRecord::new(start, end, "Clark St", "Lake St", "Subscriber")
///     .unwrap()
///     .with_gender("Female");
///
/// assert_eq!(trip.month(), 3);
/// assert_eq!(trip.day_of_week(), 0); // Monday
/// assert_eq!(trip.hour(), 8);
/// assert_eq!(trip.duration, TripDuration::from_secs(600));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripRecord {
    /// Trip start (local wall-clock time)
    pub start_time: NaiveDateTime,
    /// Trip end, never before `start_time`
    pub end_time: NaiveDateTime,
    /// Trip length, as provided by the source or derived from the timestamps
    #[serde(rename = "duration_seconds")]
    pub duration: TripDuration,
    pub start_station: String,
    pub end_station: String,
    pub user_type: String,
    /// Rider gender, `None` when the schema lacks it or the cell is blank
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    /// Rider birth year, `None` when the schema lacks it or the cell is blank
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_year: Option<i32>,
}

impl TripRecord {
    /// Create a trip whose duration is derived from its timestamps
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `end_time` precedes `start_time`.
    pub fn new(
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
        start_station: impl Into<String>,
        end_station: impl Into<String>,
        user_type: impl Into<String>,
    ) -> Result<Self> {
        let duration = TripDuration::between(&start_time, &end_time).ok_or_else(|| {
            BikeshareError::InvalidArgument(format!(
                "end time {end_time} precedes start time {start_time}"
            ))
        })?;

        Ok(Self {
            start_time,
            end_time,
            duration,
            start_station: start_station.into(),
            end_station: end_station.into(),
            user_type: user_type.into(),
            gender: None,
            birth_year: None,
        })
    }

    /// Replace the derived duration with the source-provided one
    pub fn with_duration(mut self, duration: TripDuration) -> Self {
        self.duration = duration;
        self
    }

    /// Set the rider gender
    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    /// Set the rider birth year
    pub fn with_birth_year(mut self, year: i32) -> Self {
        self.birth_year = Some(year);
        self
    }

    /// Calendar month of the start time, January = 1
    pub fn month(&self) -> u32 {
        self.start_time.month()
    }

    /// Weekday of the start time, Monday = 0 through Sunday = 6
    pub fn day_of_week(&self) -> u32 {
        self.start_time.weekday().num_days_from_monday()
    }

    /// Hour of the start time, 0-23
    pub fn hour(&self) -> u32 {
        self.start_time.hour()
    }

    /// Start/end pair used as the route key
    pub fn route_key(&self) -> RouteKey<'_> {
        RouteKey::new(&self.start_station, &self.end_station)
    }
}

const ROUTE_SEPARATOR: &str = " to ";

/// Borrowed start/end station pair
///
/// Compared and ordered as its rendered `"<start> to <end>"` text, so two
/// pairs that render identically count as the same route.
///
/// # Examples
/// ```
/// use bikeshare_core::types::RouteKey;
///
/// // "A B to C" sorts before "A to Z"
/// assert!(RouteKey::new("A B", "C") < RouteKey::new("A", "Z"));
/// assert_eq!(RouteKey::new("A to B", "C"), RouteKey::new("A", "B to C"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RouteKey<'a> {
    pub start_station: &'a str,
    pub end_station: &'a str,
}

impl<'a> RouteKey<'a> {
    pub fn new(start_station: &'a str, end_station: &'a str) -> Self {
        Self {
            start_station,
            end_station,
        }
    }

    fn rendered_bytes(self) -> impl Iterator<Item = u8> + 'a {
        self.start_station
            .bytes()
            .chain(ROUTE_SEPARATOR.bytes())
            .chain(self.end_station.bytes())
    }
}

impl PartialEq for RouteKey<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for RouteKey<'_> {}

impl PartialOrd for RouteKey<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RouteKey<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rendered_bytes().cmp(other.rendered_bytes())
    }
}

impl fmt::Display for RouteKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{ROUTE_SEPARATOR}{}", self.start_station, self.end_station)
    }
}

/// Optional-column presence for a city's source table
///
/// Determined once from the header at load time. Every record of a dataset
/// shares it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Schema {
    pub has_gender: bool,
    pub has_birth_year: bool,
}

impl Schema {
    pub fn new(has_gender: bool, has_birth_year: bool) -> Self {
        Self {
            has_gender,
            has_birth_year,
        }
    }
}

/// All trips loaded for one city
///
/// Immutable after loading. Filtering produces a [`DatasetView`] that
/// borrows from it.
#[derive(Debug, Clone)]
pub struct Dataset {
    city: CityId,
    schema: Schema,
    records: Vec<TripRecord>,
    dropped_records: usize,
}

impl Dataset {
    /// Create a dataset with no dropped records
    pub fn new(city: CityId, schema: Schema, records: Vec<TripRecord>) -> Self {
        Self {
            city,
            schema,
            records,
            dropped_records: 0,
        }
    }

    /// Record how many source rows were dropped while loading
    pub fn with_dropped_records(mut self, dropped: usize) -> Self {
        self.dropped_records = dropped;
        self
    }

    pub fn city(&self) -> CityId {
        self.city
    }

    pub fn schema(&self) -> Schema {
        self.schema
    }

    pub fn records(&self) -> &[TripRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of source rows that failed to parse
    pub fn dropped_records(&self) -> usize {
        self.dropped_records
    }

    /// Unfiltered view over every record
    pub fn view(&self) -> DatasetView<'_> {
        DatasetView::new(self.city, self.schema, self.records.iter().collect())
    }
}

/// Borrowed, ordered subset of a [`Dataset`]
///
/// This is what the calculators consume. Record order follows the source.
#[derive(Debug, Clone)]
pub struct DatasetView<'a> {
    city: CityId,
    schema: Schema,
    records: Vec<&'a TripRecord>,
}

impl<'a> DatasetView<'a> {
    pub fn new(city: CityId, schema: Schema, records: Vec<&'a TripRecord>) -> Self {
        Self {
            city,
            schema,
            records,
        }
    }

    pub fn city(&self) -> CityId {
        self.city
    }

    pub fn schema(&self) -> Schema {
        self.schema
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over the records in source order
    pub fn iter(&self) -> impl Iterator<Item = &'a TripRecord> + '_ {
        self.records.iter().copied()
    }

    /// Up to `count` records starting at `offset`
    ///
    /// Out-of-range offsets yield an empty slice; a window running past the
    /// end is truncated.
    ///
    /// # Examples
    /// ```
    /// use bikeshare_core::types::{CityId, Dataset, Schema};
    ///
    /// let dataset = Dataset::new(CityId::Washington, Schema::default(), Vec::new());
    /// assert!(dataset.view().slice(10, 5).is_empty());
    /// ```
    pub fn slice(&self, offset: usize, count: usize) -> &[&'a TripRecord] {
        let start = offset.min(self.records.len());
        let end = offset.saturating_add(count).min(self.records.len());
        &self.records[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{datetime, trip_at};

    #[test]
    fn test_city_parsing() {
        assert_eq!(CityId::from_str("chicago").unwrap(), CityId::Chicago);
        assert_eq!(CityId::from_str("Chicago").unwrap(), CityId::Chicago);
        assert_eq!(CityId::from_str("new york").unwrap(), CityId::NewYorkCity);
        assert_eq!(
            CityId::from_str("new_york_city").unwrap(),
            CityId::NewYorkCity
        );
        assert_eq!(CityId::from_str("NYC").unwrap(), CityId::NewYorkCity);
        assert_eq!(CityId::from_str(" Washington ").unwrap(), CityId::Washington);
        assert!(CityId::from_str("boston").is_err());
    }

    #[test]
    fn test_city_slug_round_trips() {
        for city in CityId::ALL {
            assert_eq!(CityId::from_str(city.slug()).unwrap(), city);
        }
    }

    #[test]
    fn test_duration_conversions() {
        assert_eq!(TripDuration::from_secs(60).as_millis(), 60_000);
        assert_eq!(TripDuration::from_secs_f64(0.0005).unwrap().as_millis(), 1);
        assert!(TripDuration::from_secs_f64(f64::NAN).is_none());
        assert_eq!(TripDuration::from_secs(90).to_string(), "90s");
    }

    #[test]
    fn test_duration_between() {
        let start = datetime("2017-01-01 10:00:00");
        let end = datetime("2017-01-01 10:01:30");
        assert_eq!(
            TripDuration::between(&start, &end),
            Some(TripDuration::from_secs(90))
        );
        assert_eq!(TripDuration::between(&end, &start), None);
    }

    #[test]
    fn test_trip_rejects_reversed_timestamps() {
        let result = TripRecord::new(
            datetime("2017-01-01 10:00:00"),
            datetime("2017-01-01 09:00:00"),
            "A",
            "B",
            "Customer",
        );
        assert!(matches!(result, Err(BikeshareError::InvalidArgument(_))));
    }

    #[test]
    fn test_derived_fields() {
        // 2017-06-25 was a Sunday
        let trip = trip_at("2017-06-25 23:59:59");
        assert_eq!(trip.month(), 6);
        assert_eq!(trip.day_of_week(), 6);
        assert_eq!(trip.hour(), 23);
    }

    #[test]
    fn test_route_key_orders_by_rendered_text() {
        // Tuple order would put "A" before "A B"; the rendered text does not
        let prefixed = RouteKey::new("A B", "C");
        let plain = RouteKey::new("A", "Z");
        assert!(prefixed < plain);
        assert_eq!(prefixed.to_string(), "A B to C");

        assert_eq!(RouteKey::new("A to B", "C"), RouteKey::new("A", "B to C"));
        assert_ne!(RouteKey::new("A", "B"), RouteKey::new("A", "C"));
    }

    #[test]
    fn test_view_slice_bounds() {
        let records = (0..7)
            .map(|i| trip_at(&format!("2017-01-0{} 08:00:00", i + 1)))
            .collect();
        let dataset = Dataset::new(CityId::Chicago, Schema::new(true, true), records);
        let view = dataset.view();

        assert_eq!(view.slice(0, 5).len(), 5);
        assert_eq!(view.slice(5, 5).len(), 2);
        assert_eq!(view.slice(5, 5)[0].start_time, datetime("2017-01-06 08:00:00"));
        assert!(view.slice(7, 5).is_empty());
        assert!(view.slice(usize::MAX, 5).is_empty());
    }

    #[test]
    fn test_dataset_dropped_records() {
        let dataset = Dataset::new(CityId::Washington, Schema::default(), Vec::new())
            .with_dropped_records(3);
        assert_eq!(dataset.dropped_records(), 3);
        assert!(dataset.is_empty());
        assert!(dataset.view().is_empty());
    }

    #[test]
    fn test_trip_serializes_duration_in_seconds() {
        let trip = trip_at("2017-01-01 08:00:00").with_duration(TripDuration::from_millis(1500));
        let json = serde_json::to_value(&trip).unwrap();
        assert_eq!(json["duration_seconds"], 1.5);
        assert!(json.get("gender").is_none());
    }
}
