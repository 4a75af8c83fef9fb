//! Statistics calculators
//!
//! Four independent, read-only aggregators over a filtered
//! [`DatasetView`]. Each derives whatever per-trip attributes it needs from
//! the immutable records itself, so they can run in any order or
//! concurrently over the same view.
//!
//! Every calculator rejects an empty view with
//! [`BikeshareError::EmptyDataset`] instead of producing an undefined mode
//! or mean.
//!
//! # Examples
//!
//! ```
//! use bikeshare::stats::{StatsCalculator, TemporalStatsCalculator};
//! use bikeshare_core::types::{CityId, Dataset, Schema};
//! use bikeshare_core::BikeshareError;
//!
//! let dataset = Dataset::new(CityId::Washington, Schema::default(), Vec::new());
//! let result = TemporalStatsCalculator.compute(&dataset.view());
//! assert!(matches!(result, Err(BikeshareError::EmptyDataset)));
//! ```

mod duration;
mod station;
mod temporal;
mod user;

pub use duration::DurationStatsCalculator;
pub use station::StationStatsCalculator;
pub use temporal::TemporalStatsCalculator;
pub use user::UserStatsCalculator;

use bikeshare_core::error::{BikeshareError, Result};
use bikeshare_core::types::DatasetView;

/// A calculator producing one report from a dataset view
pub trait StatsCalculator: Send + Sync {
    type Report: Send;

    /// Aggregate the view
    ///
    /// # Errors
    ///
    /// Returns `EmptyDataset` when the view has no records.
    fn compute(&self, data: &DatasetView<'_>) -> Result<Self::Report>;
}

fn ensure_not_empty(data: &DatasetView<'_>) -> Result<()> {
    if data.is_empty() {
        Err(BikeshareError::EmptyDataset)
    } else {
        Ok(())
    }
}
