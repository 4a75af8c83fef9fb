//! Most frequent times of travel

use super::{StatsCalculator, ensure_not_empty};
use bikeshare_core::error::{BikeshareError, Result};
use bikeshare_core::mode::mode;
use bikeshare_core::report_types::TemporalStatsReport;
use bikeshare_core::types::{DatasetView, TripRecord};

/// Mode of start month, start weekday and start hour
pub struct TemporalStatsCalculator;

impl StatsCalculator for TemporalStatsCalculator {
    type Report = TemporalStatsReport;

    fn compute(&self, data: &DatasetView<'_>) -> Result<TemporalStatsReport> {
        ensure_not_empty(data)?;

        let popular = |attribute: fn(&TripRecord) -> u32| {
            mode(data.iter().map(attribute)).ok_or(BikeshareError::EmptyDataset)
        };

        Ok(TemporalStatsReport {
            popular_month: popular(TripRecord::month)?,
            popular_day_of_week: popular(TripRecord::day_of_week)?,
            popular_hour: popular(TripRecord::hour)?,
        })
    }
}
