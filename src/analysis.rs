//! Analysis pipeline
//!
//! Wires a [`TripSource`] to the filter and the four calculators:
//! load a city's dataset, select the trips matching a [`FilterSpec`], then
//! compute every report over the same immutable view.
//!
//! The calculators share nothing mutable, so with `with_parallel(true)`
//! they run on rayon's thread pool instead of one after another.
//!
//! # Examples
//!
//! ```no_run
//! use bikeshare::analysis::Analyzer;
//! use bikeshare_core::config::SourceConfig;
//! use bikeshare_core::filters::FilterSpec;
//! use bikeshare_core::types::CityId;
//! use bikeshare_csv::CsvDataLoader;
//!
//! # fn example() -> bikeshare::Result<()> {
//! let analyzer = Analyzer::new(CsvDataLoader::new(SourceConfig::default()));
//! let report = analyzer.run(&FilterSpec::new(CityId::Chicago).with_month(3))?;
//! if let Some(durations) = report.durations.computed() {
//!     println!("Mean trip: {} minutes", durations.mean_duration_minutes);
//! }
//! # Ok(())
//! # }
//! ```

use crate::stats::{
    DurationStatsCalculator, StationStatsCalculator, StatsCalculator, TemporalStatsCalculator,
    UserStatsCalculator,
};
use bikeshare_core::error::Result;
use bikeshare_core::filters::{FilterApplier, FilterSpec};
use bikeshare_core::report_types::{
    DurationStatsReport, StationStatsReport, StatsOutcome, TemporalStatsReport, UserStatsReport,
};
use bikeshare_core::source::TripSource;
use bikeshare_core::types::{CityId, Dataset, DatasetView};
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Wall-clock time spent in each calculator, in milliseconds
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SectionTimings {
    pub temporal_ms: f64,
    pub stations_ms: f64,
    pub durations_ms: f64,
    pub users_ms: f64,
}

/// Everything one analysis run produces
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub filter: FilterSpec,
    /// Trips left after filtering
    pub record_count: usize,
    /// Source rows dropped while loading
    pub dropped_records: usize,
    pub temporal: StatsOutcome<TemporalStatsReport>,
    pub stations: StatsOutcome<StationStatsReport>,
    pub durations: StatsOutcome<DurationStatsReport>,
    pub users: StatsOutcome<UserStatsReport>,
    pub timings: SectionTimings,
}

impl AnalysisReport {
    /// Whether the filter left nothing to aggregate
    pub fn is_empty(&self) -> bool {
        self.record_count == 0
    }
}

/// Main analysis engine
pub struct Analyzer<S> {
    source: S,
    parallel: bool,
}

impl<S: TripSource> Analyzer<S> {
    /// Create a new Analyzer over a trip source
    pub fn new(source: S) -> Self {
        Self {
            source,
            parallel: false,
        }
    }

    /// Run the calculators concurrently
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Load the full dataset for a city
    pub fn load(&self, city: CityId) -> Result<Dataset> {
        self.source.load(city)
    }

    /// Load, filter and aggregate in one step
    pub fn run(&self, spec: &FilterSpec) -> Result<AnalysisReport> {
        let dataset = self.load(spec.city)?;
        self.analyze(&dataset, spec)
    }

    /// Filter an already loaded dataset and compute every report
    pub fn analyze(&self, dataset: &Dataset, spec: &FilterSpec) -> Result<AnalysisReport> {
        let view = FilterApplier::apply(dataset, spec);
        self.analyze_view(&view, spec, dataset.dropped_records())
    }

    /// Compute every report over a view already filtered by `spec`
    ///
    /// Lets callers that also page through the filtered trips reuse one view.
    pub fn analyze_view(
        &self,
        view: &DatasetView<'_>,
        spec: &FilterSpec,
        dropped_records: usize,
    ) -> Result<AnalysisReport> {
        info!("Analyzing {} trips ({})", view.len(), spec);

        let (temporal, stations, durations, users) = if self.parallel {
            debug!("Running calculators in parallel");
            let ((temporal, stations), (durations, users)) = rayon::join(
                || {
                    rayon::join(
                        || timed(&TemporalStatsCalculator, view),
                        || timed(&StationStatsCalculator, view),
                    )
                },
                || {
                    rayon::join(
                        || timed(&DurationStatsCalculator, view),
                        || timed(&UserStatsCalculator, view),
                    )
                },
            );
            (temporal, stations, durations, users)
        } else {
            (
                timed(&TemporalStatsCalculator, view),
                timed(&StationStatsCalculator, view),
                timed(&DurationStatsCalculator, view),
                timed(&UserStatsCalculator, view),
            )
        };

        let timings = SectionTimings {
            temporal_ms: as_millis_f64(temporal.1),
            stations_ms: as_millis_f64(stations.1),
            durations_ms: as_millis_f64(durations.1),
            users_ms: as_millis_f64(users.1),
        };

        Ok(AnalysisReport {
            filter: *spec,
            record_count: view.len(),
            dropped_records,
            temporal: StatsOutcome::from_result(temporal.0)?,
            stations: StatsOutcome::from_result(stations.0)?,
            durations: StatsOutcome::from_result(durations.0)?,
            users: StatsOutcome::from_result(users.0)?,
            timings,
        })
    }
}

fn timed<C: StatsCalculator>(
    calculator: &C,
    view: &DatasetView<'_>,
) -> (Result<C::Report>, Duration) {
    let start = Instant::now();
    let result = calculator.compute(view);
    (result, start.elapsed())
}

fn as_millis_f64(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}
