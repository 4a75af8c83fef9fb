//! Source configuration
//!
//! Maps each city to the location of its trip table. The mapping is built
//! once from CLI arguments and handed to the loader; nothing here is global.

use crate::error::{BikeshareError, Result};
use crate::types::CityId;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// City → source path mapping
///
/// Paths default to `<data_dir>/<city file name>`; individual cities can be
/// pointed elsewhere, or removed so that loading them is a configuration
/// error.
///
/// # Examples
/// ```
/// use bikeshare_core::config::SourceConfig;
/// use bikeshare_core::types::CityId;
/// use std::path::PathBuf;
///
/// let config = SourceConfig::from_cli(Some("data".as_ref()), &["washington=/tmp/dc.csv".to_string()]).unwrap();
/// assert_eq!(config.path_for(CityId::Chicago).unwrap(), PathBuf::from("data/chicago.csv"));
/// assert_eq!(config.path_for(CityId::Washington).unwrap(), PathBuf::from("/tmp/dc.csv"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    sources: BTreeMap<CityId, PathBuf>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self::with_data_dir(".")
    }
}

impl SourceConfig {
    /// Default file names for every city inside `data_dir`
    pub fn with_data_dir(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref();
        let sources = CityId::ALL
            .iter()
            .map(|city| (*city, data_dir.join(city.default_file_name())))
            .collect();
        Self { sources }
    }

    /// A mapping with no cities configured
    pub fn empty() -> Self {
        Self {
            sources: BTreeMap::new(),
        }
    }

    /// Create a configuration from CLI arguments
    ///
    /// `overrides` entries use `city=path` syntax and win over the data
    /// directory defaults.
    pub fn from_cli(data_dir: Option<&Path>, overrides: &[String]) -> Result<Self> {
        let mut config = match data_dir {
            Some(dir) => Self::with_data_dir(dir),
            None => Self::default(),
        };

        for entry in overrides {
            let (city, path) = parse_source_override(entry)?;
            debug!("Using {} for {}", path.display(), city);
            config = config.with_source(city, path);
        }

        Ok(config)
    }

    /// Point a city at a specific source
    pub fn with_source(mut self, city: CityId, path: impl Into<PathBuf>) -> Self {
        self.sources.insert(city, path.into());
        self
    }

    /// Source location for `city`
    ///
    /// # Errors
    ///
    /// Returns `UnknownCity` if the city has no configured source.
    pub fn path_for(&self, city: CityId) -> Result<PathBuf> {
        self.sources
            .get(&city)
            .cloned()
            .ok_or_else(|| BikeshareError::UnknownCity(city.to_string()))
    }
}

/// Parse a `city=path` override
pub fn parse_source_override(entry: &str) -> Result<(CityId, PathBuf)> {
    let (city, path) = entry.split_once('=').ok_or_else(|| {
        BikeshareError::Config(format!(
            "Invalid source override '{entry}', expected CITY=PATH"
        ))
    })?;

    let city = CityId::from_str(city).map_err(BikeshareError::Config)?;
    let path = path.trim();
    if path.is_empty() {
        return Err(BikeshareError::Config(format!(
            "Empty path in source override '{entry}'"
        )));
    }

    Ok((city, PathBuf::from(path)))
}
