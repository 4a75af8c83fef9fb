//! Total and average trip duration

use super::{StatsCalculator, ensure_not_empty};
use bikeshare_core::error::{BikeshareError, Result};
use bikeshare_core::report_types::DurationStatsReport;
use bikeshare_core::types::{DatasetView, TripDuration};

/// Exact total and rounded mean of trip durations
///
/// Durations are summed as integer milliseconds in a `u128`; a total that
/// does not fit back into a `u64` is an error rather than a wrapped value.
/// The mean is `total / count / 60` minutes, rounded half away from zero to
/// three decimals.
pub struct DurationStatsCalculator;

impl StatsCalculator for DurationStatsCalculator {
    type Report = DurationStatsReport;

    fn compute(&self, data: &DatasetView<'_>) -> Result<DurationStatsReport> {
        ensure_not_empty(data)?;

        let total_millis: u128 = data
            .iter()
            .map(|r| u128::from(r.duration.as_millis()))
            .sum();
        let trip_count = data.len() as u64;
        let mean_minutes = total_millis as f64 / trip_count as f64 / 60_000.0;
        let total_duration = u64::try_from(total_millis)
            .map(TripDuration::from_millis)
            .map_err(|_| {
                BikeshareError::InvalidArgument(format!(
                    "total trip duration of {total_millis} ms is out of range"
                ))
            })?;

        Ok(DurationStatsReport {
            trip_count,
            total_duration,
            mean_duration_minutes: round_to_millis(mean_minutes),
        })
    }
}

/// Round to three decimal places, halves away from zero
fn round_to_millis(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
