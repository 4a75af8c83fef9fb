//! Shared test utilities for unit tests
//!
//! Integration tests (in tests/) cannot access this module because it's
//! marked with #[cfg(test)]; they have their own builder in
//! tests/common/mod.rs.

use crate::types::TripRecord;
use chrono::{Duration, NaiveDateTime};

/// Parse a `YYYY-MM-DD HH:MM:SS` literal
pub fn datetime(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
}

/// A ten-minute subscriber trip from station A to station B
pub fn trip_at(start: &str) -> TripRecord {
    let start_time = datetime(start);
    TripRecord::new(
        start_time,
        start_time + Duration::minutes(10),
        "A",
        "B",
        "Subscriber",
    )
    .unwrap()
}
