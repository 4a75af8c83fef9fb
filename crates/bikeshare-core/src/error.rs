//! Error types for bikeshare
//!
//! This module defines the error types used throughout the bikeshare crates.
//! All errors are derived from `thiserror` for convenient error handling
//! and automatic `From` implementations.
//!
//! # Example
//!
//! ```
//! use bikeshare_core::error::{BikeshareError, Result};
//!
//! fn example_function() -> Result<()> {
//!     // This will automatically convert io::Error to BikeshareError
//!     let _file = std::fs::read_to_string("nonexistent.txt")?;
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for bikeshare operations
///
/// Fatal conditions (`DataLoad`, `MissingColumn`, `Io`) abort a run.
/// `Parse` is produced per record and absorbed by the loader, which counts
/// it. `EmptyDataset` is reported by each calculator for a filter
/// combination that matched nothing.
#[derive(Error, Debug)]
pub enum BikeshareError {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Source could not be opened or read
    #[error("Failed to load {path}: {error}")]
    DataLoad {
        /// The source that failed
        path: PathBuf,
        /// The error message
        error: String,
    },

    /// A required column is absent from the source header
    #[error("Missing required column '{column}' in {path}")]
    MissingColumn {
        /// The source that was read
        path: PathBuf,
        /// Name of the missing column
        column: String,
    },

    /// A single record could not be parsed
    #[error("Parse error at line {line}: {error}")]
    Parse {
        /// 1-based line number in the source
        line: u64,
        /// The error message
        error: String,
    },

    /// No records left to aggregate
    #[error("No data for this filter combination")]
    EmptyDataset,

    /// City has no configured source
    #[error("Unknown city: {0}")]
    UnknownCity(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl BikeshareError {
    /// Build a per-record parse error
    pub fn parse(line: u64, error: impl Into<String>) -> Self {
        Self::Parse {
            line,
            error: error.into(),
        }
    }

    /// Whether this error is the "nothing matched" outcome of a calculator
    pub fn is_empty_dataset(&self) -> bool {
        matches!(self, Self::EmptyDataset)
    }
}

/// Convenience type alias for Results in bikeshare
///
/// # Example
///
/// ```
/// use bikeshare_core::Result;
///
/// fn process_data() -> Result<String> {
///     Ok("Processed successfully".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, BikeshareError>;
