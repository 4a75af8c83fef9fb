//! Common test utilities and helpers for bikeshare tests
//!
//! Builders for trip records and writers for on-disk CSV fixtures laid out
//! like the real city tables.

#![allow(dead_code)]

use bikeshare_core::config::SourceConfig;
use bikeshare_core::types::{CityId, TripDuration, TripRecord};
use chrono::{Duration, NaiveDateTime};
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Header of the Chicago and New York City tables
pub const FULL_HEADER: &str =
    ",Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year";

/// Header of the Washington table
pub const WASHINGTON_HEADER: &str =
    ",Start Time,End Time,Trip Duration,Start Station,End Station,User Type";

pub fn datetime(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
}

/// Builder for creating test TripRecord instances
pub struct TripBuilder {
    start_time: NaiveDateTime,
    duration_secs: i64,
    start_station: String,
    end_station: String,
    user_type: String,
    gender: Option<String>,
    birth_year: Option<i32>,
}

impl TripBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            start_time: datetime("2017-01-02 08:00:00"),
            duration_secs: 600,
            start_station: "Station A".to_string(),
            end_station: "Station B".to_string(),
            user_type: "Subscriber".to_string(),
            gender: None,
            birth_year: None,
        }
    }

    pub fn start(mut self, start: &str) -> Self {
        self.start_time = datetime(start);
        self
    }

    pub fn duration_secs(mut self, secs: i64) -> Self {
        self.duration_secs = secs;
        self
    }

    pub fn route(mut self, from: &str, to: &str) -> Self {
        self.start_station = from.to_string();
        self.end_station = to.to_string();
        self
    }

    pub fn user_type(mut self, user_type: &str) -> Self {
        self.user_type = user_type.to_string();
        self
    }

    pub fn gender(mut self, gender: &str) -> Self {
        self.gender = Some(gender.to_string());
        self
    }

    pub fn birth_year(mut self, year: i32) -> Self {
        self.birth_year = Some(year);
        self
    }

    pub fn build(self) -> TripRecord {
        let end_time = self.start_time + Duration::seconds(self.duration_secs);
        let mut record = TripRecord::new(
            self.start_time,
            end_time,
            self.start_station,
            self.end_station,
            self.user_type,
        )
        .unwrap();
        record.gender = self.gender;
        record.birth_year = self.birth_year;
        record
    }
}

impl Default for TripBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Render records as CSV rows in the source table layout
///
/// The Washington layout omits the gender and birth year columns.
pub fn to_csv(records: &[TripRecord], full_schema: bool) -> String {
    let mut csv = String::new();
    csv.push_str(if full_schema {
        FULL_HEADER
    } else {
        WASHINGTON_HEADER
    });
    csv.push('\n');

    for (index, record) in records.iter().enumerate() {
        write!(
            csv,
            "{},{},{},{},{},{},{}",
            index,
            record.start_time.format("%Y-%m-%d %H:%M:%S"),
            record.end_time.format("%Y-%m-%d %H:%M:%S"),
            format_duration(record.duration),
            quote(&record.start_station),
            quote(&record.end_station),
            record.user_type,
        )
        .unwrap();
        if full_schema {
            write!(
                csv,
                ",{},{}",
                record.gender.as_deref().unwrap_or(""),
                record
                    .birth_year
                    .map(|y| format!("{y}.0"))
                    .unwrap_or_default(),
            )
            .unwrap();
        }
        csv.push('\n');
    }

    csv
}

fn format_duration(duration: TripDuration) -> String {
    format!("{}", duration.as_secs_f64())
}

fn quote(field: &str) -> String {
    if field.contains(',') {
        format!("\"{field}\"")
    } else {
        field.to_string()
    }
}

/// A temporary data directory holding city tables
pub struct TestDataDir {
    pub dir: TempDir,
}

impl TestDataDir {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    /// Write raw CSV text as a city's default file
    pub fn write_raw(&self, city: CityId, contents: &str) -> PathBuf {
        let path = self.dir.path().join(city.default_file_name());
        fs::write(&path, contents).unwrap();
        path
    }

    /// Write records as a city's table, using Washington's layout for Washington
    pub fn write_city(&self, city: CityId, records: &[TripRecord]) -> PathBuf {
        let full_schema = city != CityId::Washington;
        self.write_raw(city, &to_csv(records, full_schema))
    }

    pub fn config(&self) -> SourceConfig {
        SourceConfig::with_data_dir(self.dir.path())
    }
}

impl Default for TestDataDir {
    fn default() -> Self {
        Self::new()
    }
}
