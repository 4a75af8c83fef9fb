//! Most popular stations and trip

use super::{StatsCalculator, ensure_not_empty};
use bikeshare_core::error::{BikeshareError, Result};
use bikeshare_core::mode::mode;
use bikeshare_core::report_types::{Route, StationStatsReport};
use bikeshare_core::types::DatasetView;

/// Mode of start station, end station and start/end pair
///
/// The route is counted as one combined key, not as two independent
/// station modes. Route ties go to the smallest rendered `"<start> to <end>"`.
pub struct StationStatsCalculator;

impl StatsCalculator for StationStatsCalculator {
    type Report = StationStatsReport;

    fn compute(&self, data: &DatasetView<'_>) -> Result<StationStatsReport> {
        ensure_not_empty(data)?;

        let popular_start_station = mode(data.iter().map(|r| r.start_station.as_str()))
            .ok_or(BikeshareError::EmptyDataset)?;
        let popular_end_station = mode(data.iter().map(|r| r.end_station.as_str()))
            .ok_or(BikeshareError::EmptyDataset)?;
        let popular_route =
            mode(data.iter().map(|r| r.route_key())).ok_or(BikeshareError::EmptyDataset)?;

        Ok(StationStatsReport {
            popular_start_station: popular_start_station.to_string(),
            popular_end_station: popular_end_station.to_string(),
            popular_route: Route::from(popular_route),
        })
    }
}
