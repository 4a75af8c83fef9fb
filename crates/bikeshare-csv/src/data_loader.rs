//! Data loader for comma-delimited trip tables
//!
//! Each city's trips live in one CSV file with a header row. The loader
//! inspects the header once to locate the required columns and to decide
//! whether the optional `Gender` / `Birth Year` columns exist, then parses
//! every row into a [`TripRecord`].
//!
//! Rows that fail to parse are dropped, logged and counted on the returned
//! [`Dataset`]; only an unreadable source or a header missing a required
//! column aborts the load.
//!
//! # Examples
//!
//! ```no_run
//! use bikeshare_core::config::SourceConfig;
//! use bikeshare_core::source::TripSource;
//! use bikeshare_core::types::CityId;
//! use bikeshare_csv::CsvDataLoader;
//!
//! # fn example() -> bikeshare_core::Result<()> {
//! let loader = CsvDataLoader::new(SourceConfig::with_data_dir("data"));
//! let dataset = loader.load(CityId::Chicago)?;
//! println!("{} trips, {} dropped", dataset.len(), dataset.dropped_records());
//! # Ok(())
//! # }
//! ```

use bikeshare_core::config::SourceConfig;
use bikeshare_core::error::{BikeshareError, Result};
use bikeshare_core::source::TripSource;
use bikeshare_core::types::{CityId, Dataset, Schema, TripDuration, TripRecord};
use chrono::NaiveDateTime;
use csv::StringRecord;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

const START_TIME: &str = "Start Time";
const END_TIME: &str = "End Time";
const TRIP_DURATION: &str = "Trip Duration";
const START_STATION: &str = "Start Station";
const END_STATION: &str = "End Station";
const USER_TYPE: &str = "User Type";
const GENDER: &str = "Gender";
const BIRTH_YEAR: &str = "Birth Year";

/// Accepted timestamp layouts, tried in order
const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Provided and derived durations further apart than this are counted as
/// mismatches
const DURATION_MISMATCH_TOLERANCE_MS: u64 = 60_000;

/// A provided duration exceeding End Time - Start Time by more than this
/// is rejected
const DURATION_MAX_EXCESS_MS: u64 = 86_400_000;

/// CSV-backed trip source
pub struct CsvDataLoader {
    config: SourceConfig,
    show_progress: bool,
}

impl TripSource for CsvDataLoader {
    fn load(&self, city: CityId) -> Result<Dataset> {
        let path = self.config.path_for(city)?;
        self.load_path(city, &path)
    }
}

impl CsvDataLoader {
    /// Create a loader over the given city → path mapping
    pub fn new(config: SourceConfig) -> Self {
        Self {
            config,
            show_progress: false,
        }
    }

    /// Enable or disable the loading spinner
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Load a city's dataset from an explicit path
    ///
    /// The file is closed before this returns, on success and on error.
    pub fn load_path(&self, city: CityId, path: &Path) -> Result<Dataset> {
        info!("Loading {} trips from {}", city, path.display());
        let file = std::fs::File::open(path).map_err(|e| BikeshareError::DataLoad {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
        self.load_reader(city, file, path)
    }

    /// Load a city's dataset from any reader
    ///
    /// `source` is only used for error messages and logging.
    pub fn load_reader<R: Read>(&self, city: CityId, reader: R, source: &Path) -> Result<Dataset> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|e| BikeshareError::DataLoad {
                path: source.to_path_buf(),
                error: e.to_string(),
            })?
            .clone();
        let columns = ColumnIndex::from_headers(&headers, source)?;
        let schema = columns.schema();
        debug!(
            "{} schema: gender={}, birth_year={}",
            city, schema.has_gender, schema.has_birth_year
        );

        let progress = self.show_progress.then(|| {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {msg} [{elapsed_precise}] {pos} rows read")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            pb.set_message(format!("Loading {city} trips"));
            pb.enable_steady_tick(std::time::Duration::from_millis(100));
            pb
        });

        let mut records = Vec::new();
        let mut dropped = 0usize;
        let mut mismatches = 0usize;
        let mut record = StringRecord::new();

        loop {
            match csv_reader.read_record(&mut record) {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) if matches!(e.kind(), csv::ErrorKind::Io(_)) => {
                    if let Some(pb) = &progress {
                        pb.finish_and_clear();
                    }
                    return Err(BikeshareError::DataLoad {
                        path: source.to_path_buf(),
                        error: e.to_string(),
                    });
                }
                Err(e) => {
                    dropped += 1;
                    warn!("Dropping unreadable row in {}: {}", source.display(), e);
                    continue;
                }
            }

            if let Some(pb) = &progress {
                pb.inc(1);
            }

            let line = record.position().map(|p| p.line()).unwrap_or(0);
            match parse_record(&record, &columns, line) {
                Ok(parsed) => {
                    if parsed.duration_mismatch {
                        mismatches += 1;
                    }
                    records.push(parsed.trip);
                }
                Err(e) => {
                    dropped += 1;
                    warn!("Dropping row in {}: {}", source.display(), e);
                }
            }
        }

        if let Some(pb) = progress {
            pb.finish_and_clear();
        }

        if mismatches > 0 {
            debug!(
                "{} trips in {} have a Trip Duration differing from End Time - Start Time",
                mismatches,
                source.display()
            );
        }
        if dropped > 0 {
            warn!("Dropped {} malformed rows from {}", dropped, source.display());
        }
        info!("Loaded {} {} trips", records.len(), city);

        Ok(Dataset::new(city, schema, records).with_dropped_records(dropped))
    }
}

// ---------------------------------------------------------------------------
// Header introspection
// ---------------------------------------------------------------------------

/// Column positions resolved from the header row
#[derive(Debug)]
struct ColumnIndex {
    start_time: usize,
    end_time: usize,
    trip_duration: Option<usize>,
    start_station: usize,
    end_station: usize,
    user_type: usize,
    gender: Option<usize>,
    birth_year: Option<usize>,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord, source: &Path) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        let require = |name: &str| {
            find(name).ok_or_else(|| BikeshareError::MissingColumn {
                path: source.to_path_buf(),
                column: name.to_string(),
            })
        };

        Ok(Self {
            start_time: require(START_TIME)?,
            end_time: require(END_TIME)?,
            trip_duration: find(TRIP_DURATION),
            start_station: require(START_STATION)?,
            end_station: require(END_STATION)?,
            user_type: require(USER_TYPE)?,
            gender: find(GENDER),
            birth_year: find(BIRTH_YEAR),
        })
    }

    fn schema(&self) -> Schema {
        Schema::new(self.gender.is_some(), self.birth_year.is_some())
    }
}

// ---------------------------------------------------------------------------
// Row parsing
// ---------------------------------------------------------------------------

struct ParsedTrip {
    trip: TripRecord,
    duration_mismatch: bool,
}

fn field<'r>(record: &'r StringRecord, idx: usize, name: &str, line: u64) -> Result<&'r str> {
    record
        .get(idx)
        .ok_or_else(|| BikeshareError::parse(line, format!("missing '{name}' field")))
}

fn required_text<'r>(
    record: &'r StringRecord,
    idx: usize,
    name: &str,
    line: u64,
) -> Result<&'r str> {
    let value = field(record, idx, name, line)?;
    if value.is_empty() {
        return Err(BikeshareError::parse(line, format!("empty '{name}'")));
    }
    Ok(value)
}

/// Optional cell: a column that is absent, a short row and a blank cell all
/// read as `None`
fn optional_text(record: &StringRecord, idx: Option<usize>) -> Option<&str> {
    idx.and_then(|i| record.get(i)).filter(|v| !v.is_empty())
}

fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

fn timestamp(record: &StringRecord, idx: usize, name: &str, line: u64) -> Result<NaiveDateTime> {
    let value = required_text(record, idx, name, line)?;
    parse_timestamp(value)
        .ok_or_else(|| BikeshareError::parse(line, format!("invalid {name} '{value}'")))
}

/// Birth years appear as `1992` or `1992.0`
fn parse_birth_year(value: &str) -> Option<i32> {
    if let Ok(year) = value.parse::<i32>() {
        return Some(year);
    }
    value
        .parse::<f64>()
        .ok()
        .filter(|y| y.is_finite() && y.fract() == 0.0)
        .map(|y| y as i32)
}

fn parse_record(record: &StringRecord, columns: &ColumnIndex, line: u64) -> Result<ParsedTrip> {
    let start_time = timestamp(record, columns.start_time, START_TIME, line)?;
    let end_time = timestamp(record, columns.end_time, END_TIME, line)?;

    let trip = TripRecord::new(
        start_time,
        end_time,
        required_text(record, columns.start_station, START_STATION, line)?,
        required_text(record, columns.end_station, END_STATION, line)?,
        required_text(record, columns.user_type, USER_TYPE, line)?,
    )
    .map_err(|e| BikeshareError::parse(line, e.to_string()))?;

    let mut duration_mismatch = false;
    let mut trip = match optional_text(record, columns.trip_duration) {
        Some(value) => {
            let provided = value
                .parse::<f64>()
                .ok()
                .and_then(TripDuration::from_secs_f64)
                .ok_or_else(|| {
                    BikeshareError::parse(line, format!("invalid {TRIP_DURATION} '{value}'"))
                })?;
            let derived = trip.duration.as_millis();
            if provided.as_millis().saturating_sub(derived) > DURATION_MAX_EXCESS_MS {
                return Err(BikeshareError::parse(
                    line,
                    format!("{TRIP_DURATION} '{value}' exceeds the trip's timestamps"),
                ));
            }
            duration_mismatch =
                provided.as_millis().abs_diff(derived) > DURATION_MISMATCH_TOLERANCE_MS;
            trip.with_duration(provided)
        }
        None => trip,
    };

    if let Some(gender) = optional_text(record, columns.gender) {
        trip = trip.with_gender(gender);
    }

    if let Some(value) = optional_text(record, columns.birth_year) {
        let year = parse_birth_year(value).ok_or_else(|| {
            BikeshareError::parse(line, format!("invalid {BIRTH_YEAR} '{value}'"))
        })?;
        trip = trip.with_birth_year(year);
    }

    Ok(ParsedTrip {
        trip,
        duration_mismatch,
    })
}
