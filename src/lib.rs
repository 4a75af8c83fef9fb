//! bikeshare - Descriptive statistics over US bike share trip logs
//!
//! This library provides functionality to:
//! - Load a city's trip table through the `TripSource` seam (CSV in `bikeshare-csv`)
//! - Filter trips by calendar month and day of week
//! - Compute travel time, station, duration and rider statistics
//! - Render reports as tables or JSON, or walk through them interactively
//!
//! # Examples
//!
//! ```no_run
//! use bikeshare::analysis::Analyzer;
//! use bikeshare::output::get_formatter;
//! use bikeshare_core::config::SourceConfig;
//! use bikeshare_core::filters::FilterSpec;
//! use bikeshare_core::types::CityId;
//! use bikeshare_csv::CsvDataLoader;
//!
//! fn main() -> bikeshare::Result<()> {
//!     let loader = CsvDataLoader::new(SourceConfig::with_data_dir("data"));
//!     let analyzer = Analyzer::new(loader).with_parallel(true);
//!
//!     // Mondays in January
//!     let spec = FilterSpec::new(CityId::NewYorkCity)
//!         .with_month(1)
//!         .with_day_of_week(0);
//!     let report = analyzer.run(&spec)?;
//!
//!     println!("{}", get_formatter(false).format_report(&report)?);
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod cli;
pub mod interactive;
pub mod output;
pub mod stats;

// Re-export commonly used types
pub use bikeshare_core::error::{BikeshareError, Result};
pub use bikeshare_core::filters::FilterSpec;
pub use bikeshare_core::types::{CityId, Dataset, TripRecord};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
