//! Rider demographics

use super::{StatsCalculator, ensure_not_empty};
use bikeshare_core::error::Result;
use bikeshare_core::mode::{mode, value_counts};
use bikeshare_core::report_types::{BirthYearSummary, UserStatsReport};
use bikeshare_core::types::DatasetView;
use std::collections::BTreeMap;
use tracing::debug;

/// User type counts, plus gender counts and birth year extremes where the
/// city's schema carries them
///
/// Blank gender or birth year cells are skipped. A schema without the
/// column yields `None`, which is an expected outcome rather than an error.
pub struct UserStatsCalculator;

impl StatsCalculator for UserStatsCalculator {
    type Report = UserStatsReport;

    fn compute(&self, data: &DatasetView<'_>) -> Result<UserStatsReport> {
        ensure_not_empty(data)?;
        let schema = data.schema();

        let user_type_counts = owned_counts(data.iter().map(|r| r.user_type.as_str()));

        let gender_counts = schema
            .has_gender
            .then(|| owned_counts(data.iter().filter_map(|r| r.gender.as_deref())));

        let birth_year_summary = if schema.has_birth_year {
            let summary = summarize_birth_years(data);
            if summary.is_none() {
                debug!("No birth years recorded for {} in this selection", data.city());
            }
            summary
        } else {
            None
        };

        Ok(UserStatsReport {
            user_type_counts,
            gender_counts,
            birth_year_summary,
        })
    }
}

fn owned_counts<'a>(values: impl Iterator<Item = &'a str>) -> BTreeMap<String, u64> {
    value_counts(values)
        .into_iter()
        .map(|(value, count)| (value.to_string(), count))
        .collect()
}

fn summarize_birth_years(data: &DatasetView<'_>) -> Option<BirthYearSummary> {
    let years = || data.iter().filter_map(|r| r.birth_year);

    Some(BirthYearSummary {
        min: years().min()?,
        max: years().max()?,
        mode: mode(years())?,
    })
}
