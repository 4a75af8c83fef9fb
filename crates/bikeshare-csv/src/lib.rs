//! CSV trip source for bikeshare
//!
//! This crate implements the `TripSource` trait for comma-delimited city
//! tables, handling header introspection, timestamp parsing and
//! dropped-row accounting.

pub mod data_loader;

pub use data_loader::CsvDataLoader;
