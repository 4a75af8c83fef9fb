//! Basic usage example for the bikeshare library
//!
//! Loads one city table from `BIKESHARE_DATA_DIR` (or the current
//! directory), prints each month's busiest start hour and then the full
//! report for March.

use bikeshare::{
    Result,
    analysis::Analyzer,
    output::{OutputFormatter, TableFormatter},
};
use bikeshare_core::config::SourceConfig;
use bikeshare_core::filters::{FilterSpec, month_name};
use bikeshare_core::types::CityId;
use bikeshare_csv::CsvDataLoader;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let data_dir = std::env::var("BIKESHARE_DATA_DIR").unwrap_or_else(|_| ".".to_string());
    let loader = CsvDataLoader::new(SourceConfig::with_data_dir(data_dir));
    let analyzer = Analyzer::new(loader).with_parallel(true);

    // Load once, filter many times
    let dataset = analyzer.load(CityId::Chicago)?;
    println!("Loaded {} Chicago trips", dataset.len());

    println!("\nBusiest start hour per month:");
    println!("=============================");
    for month in 1..=6 {
        let spec = FilterSpec::new(CityId::Chicago).with_month(month);
        let report = analyzer.analyze(&dataset, &spec)?;
        match report.temporal.computed() {
            Some(temporal) => println!(
                "{:<10} {:>2}:00 ({} trips)",
                month_name(month).unwrap_or("?"),
                temporal.popular_hour,
                report.record_count
            ),
            None => println!("{:<10} no trips", month_name(month).unwrap_or("?")),
        }
    }

    let march = analyzer.analyze(&dataset, &FilterSpec::new(CityId::Chicago).with_month(3))?;
    println!("{}", TableFormatter::default().format_report(&march)?);

    Ok(())
}
