//! CLI interface for bikeshare
//!
//! This module defines the command-line interface using clap. Running the
//! binary with no subcommand starts the interactive session.
//!
//! # Example
//!
//! ```bash
//! # Statistics for Chicago trips taken on Mondays in March
//! bikeshare stats --city chicago --month 3 --day 0
//!
//! # First five raw rows of the Washington table, as JSON
//! bikeshare raw --city washington --json
//!
//! # Read New York City from a custom location
//! bikeshare --source "nyc=/data/nyc-2017.csv" stats --city nyc
//! ```

use bikeshare_core::config::SourceConfig;
use bikeshare_core::error::Result;
use bikeshare_core::filters::FilterSpec;
use bikeshare_core::types::CityId;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Explore US bike share trip data
#[derive(Parser, Debug, Clone)]
#[command(name = "bikeshare")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Show informational output (default is quiet mode with only warnings and errors)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run the four statistics calculators in parallel
    #[arg(long, global = true)]
    pub parallel: bool,

    /// Directory holding chicago.csv, new_york_city.csv and washington.csv
    #[arg(long, env = "BIKESHARE_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Override one city's source file (CITY=PATH, repeatable)
    #[arg(long = "source", value_name = "CITY=PATH", global = true)]
    pub sources: Vec<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Build the city → source mapping from the global flags
    pub fn source_config(&self) -> Result<SourceConfig> {
        SourceConfig::from_cli(self.data_dir.as_deref(), &self.sources)
    }
}

/// City and optional month / day-of-week selection shared by subcommands
#[derive(Args, Debug, Clone)]
pub struct FilterArgs {
    /// City to analyze (chicago, new york city, washington)
    #[arg(long, short = 'c')]
    pub city: CityId,

    /// Month to keep, 1 (January) through 6 (June)
    #[arg(long, short = 'm', value_parser = clap::value_parser!(u32).range(1..=6))]
    pub month: Option<u32>,

    /// Day of week to keep, 0 (Monday) through 6 (Sunday)
    #[arg(long, short = 'd', value_parser = clap::value_parser!(u32).range(0..=6))]
    pub day: Option<u32>,
}

impl FilterArgs {
    pub fn to_spec(&self) -> FilterSpec {
        FilterSpec {
            city: self.city,
            month: self.month,
            day_of_week: self.day,
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show travel time, station, duration and rider statistics
    Stats {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Print raw trip rows of the filtered dataset
    Raw {
        #[command(flatten)]
        filter: FilterArgs,

        /// Index of the first row to print
        #[arg(long, default_value = "0")]
        offset: usize,

        /// Number of rows to print
        #[arg(long, short = 'n', default_value = "5")]
        count: usize,
    },

    /// Prompt for city and filters, then walk through the report
    Interactive,
}
