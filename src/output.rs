//! Output formatting module for bikeshare
//!
//! Two formatters share the [`OutputFormatter`] interface:
//! - Table format for human-readable terminal output
//! - JSON format for machine-readable output and piping into other tools
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
//! # fn example() -> bikeshare::Result<()> {
//! let analyzer = Analyzer::new(CsvDataLoader::new(SourceConfig::default()));
//! let report = analyzer.run(&FilterSpec::new(CityId::Washington))?;
//!
//! println!("{}", get_formatter(false).format_report(&report)?);
//! println!("{}", get_formatter(true).format_report(&report)?);
//! # Ok(())
//! # }
//! ```

use crate::analysis::AnalysisReport;
use bikeshare_core::error::Result;
use bikeshare_core::report_types::{
    DurationStatsReport, StationStatsReport, StatsOutcome, TemporalStatsReport, UserStatsReport,
};
use bikeshare_core::types::{CityId, TripDuration, TripRecord};
use colored::Colorize;
use prettytable::{Table, format, row};
use serde_json::json;
use std::collections::BTreeMap;

/// Shown in place of a section whose filter matched no trips
pub const NO_DATA_MESSAGE: &str = "No data for this filter combination";

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format the four statistics sections of one analysis run
    fn format_report(&self, report: &AnalysisReport) -> Result<String>;

    /// Format a page of raw trip rows; `offset` is the index of the first one
    fn format_trips(&self, trips: &[&TripRecord], offset: usize) -> Result<String>;
}

/// Table formatter for human-readable output
pub struct TableFormatter {
    /// Whether to print per-section calculation time
    pub show_timings: bool,
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl TableFormatter {
    pub fn new(show_timings: bool) -> Self {
        Self { show_timings }
    }

    /// Format a number with thousands separators
    fn format_number(n: u64) -> String {
        let s = n.to_string();
        let mut result = String::new();

        for (count, ch) in s.chars().rev().enumerate() {
            if count > 0 && count % 3 == 0 {
                result.push(',');
            }
            result.push(ch);
        }

        result.chars().rev().collect()
    }

    /// Whole seconds print without decimals, fractional ones with millisecond precision
    fn format_seconds(duration: TripDuration) -> String {
        let millis = duration.as_millis();
        if millis % 1000 == 0 {
            format!("{} seconds", Self::format_number(millis / 1000))
        } else {
            format!("{:.3} seconds", duration.as_secs_f64())
        }
    }

    fn two_column_table() -> Table {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        table.set_titles(row![b -> "Statistic", b -> "Value"]);
        table
    }

    fn section<T>(
        &self,
        output: &mut String,
        title: &str,
        outcome: &StatsOutcome<T>,
        elapsed_ms: f64,
        render: impl FnOnce(&T) -> String,
    ) {
        output.push_str(&format!("\n{}\n", title.bold().cyan()));
        match outcome {
            StatsOutcome::Computed(stats) => output.push_str(&render(stats)),
            StatsOutcome::NoData => output.push_str(&format!("{}\n", NO_DATA_MESSAGE.yellow())),
        }
        if self.show_timings {
            output.push_str(&format!("This took {:.6} seconds.\n", elapsed_ms / 1000.0));
        }
    }

    fn temporal_table(stats: &TemporalStatsReport) -> String {
        let mut table = Self::two_column_table();
        table.add_row(row!["Most popular month", stats.popular_month_name()]);
        table.add_row(row!["Most popular day of week", stats.popular_day_name()]);
        table.add_row(row!["Most popular start hour", r -> stats.popular_hour]);
        table.to_string()
    }

    fn station_table(stats: &StationStatsReport) -> String {
        let mut table = Self::two_column_table();
        table.add_row(row!["Most popular start station", stats.popular_start_station]);
        table.add_row(row!["Most popular end station", stats.popular_end_station]);
        table.add_row(row!["Most popular trip", stats.popular_route]);
        table.to_string()
    }

    fn duration_table(stats: &DurationStatsReport) -> String {
        let mut table = Self::two_column_table();
        table.add_row(row!["Trips", r -> Self::format_number(stats.trip_count)]);
        table.add_row(row![
            "Total travel time",
            r -> Self::format_seconds(stats.total_duration)
        ]);
        table.add_row(row![
            "Mean travel time",
            r -> format!("{} minutes", stats.mean_duration_minutes)
        ]);
        table.to_string()
    }

    fn counts_table(heading: &str, counts: &BTreeMap<String, u64>) -> Table {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        table.set_titles(row![b -> heading, b -> "Trips"]);
        for (value, count) in counts {
            table.add_row(row![value, r -> Self::format_number(*count)]);
        }
        table
    }

    fn user_tables(city: CityId, stats: &UserStatsReport) -> String {
        let mut output = Self::counts_table("User Type", &stats.user_type_counts).to_string();

        match &stats.gender_counts {
            Some(counts) => output.push_str(&Self::counts_table("Gender", counts).to_string()),
            None => output.push_str(&format!("Gender data is not available for {city}\n")),
        }

        match &stats.birth_year_summary {
            Some(years) => {
                let mut table = Self::two_column_table();
                table.add_row(row!["Earliest birth year", r -> years.min]);
                table.add_row(row!["Most recent birth year", r -> years.max]);
                table.add_row(row!["Most common birth year", r -> years.mode]);
                output.push_str(&table.to_string());
            }
            None => output.push_str(&format!("Birth year data is not available for {city}\n")),
        }

        output
    }
}

impl OutputFormatter for TableFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let mut output = String::new();
        output.push_str(&format!(
            "{} {}\n",
            "Bikeshare statistics:".bold(),
            report.filter
        ));
        output.push_str(&format!(
            "Trips analyzed: {}",
            Self::format_number(report.record_count as u64)
        ));
        if report.dropped_records > 0 {
            output.push_str(&format!(
                " ({} source rows dropped)",
                Self::format_number(report.dropped_records as u64)
            ));
        }
        output.push('\n');

        let timings = &report.timings;
        self.section(
            &mut output,
            "Most Frequent Times of Travel",
            &report.temporal,
            timings.temporal_ms,
            Self::temporal_table,
        );
        self.section(
            &mut output,
            "Most Popular Stations and Trip",
            &report.stations,
            timings.stations_ms,
            Self::station_table,
        );
        self.section(
            &mut output,
            "Trip Duration",
            &report.durations,
            timings.durations_ms,
            Self::duration_table,
        );
        self.section(
            &mut output,
            "User Stats",
            &report.users,
            timings.users_ms,
            |stats| Self::user_tables(report.filter.city, stats),
        );

        Ok(output)
    }

    fn format_trips(&self, trips: &[&TripRecord], offset: usize) -> Result<String> {
        if trips.is_empty() {
            return Ok("No more rows to display.\n".to_string());
        }

        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        table.set_titles(row![
            b -> "#",
            b -> "Start Time",
            b -> "End Time",
            b -> "Trip Duration",
            b -> "Start Station",
            b -> "End Station",
            b -> "User Type",
            b -> "Gender",
            b -> "Birth Year"
        ]);

        for (index, trip) in trips.iter().enumerate() {
            table.add_row(row![
                r -> offset + index,
                trip.start_time.format("%Y-%m-%d %H:%M:%S"),
                trip.end_time.format("%Y-%m-%d %H:%M:%S"),
                r -> trip.duration,
                trip.start_station,
                trip.end_station,
                trip.user_type,
                trip.gender.as_deref().unwrap_or("-"),
                r -> trip.birth_year.map_or_else(|| "-".to_string(), |y| y.to_string())
            ]);
        }

        Ok(table.to_string())
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }

    fn format_trips(&self, trips: &[&TripRecord], offset: usize) -> Result<String> {
        let output = json!({
            "offset": offset,
            "count": trips.len(),
            "trips": trips,
        });
        Ok(serde_json::to_string_pretty(&output)?)
    }
}

/// Get appropriate formatter based on JSON flag
pub fn get_formatter(json: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonFormatter)
    } else {
        Box::new(TableFormatter::default())
    }
}
