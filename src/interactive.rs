//! Interactive terminal session
//!
//! Asks for a city and an optional month / day filter, prints the report,
//! pages through raw trips five at a time and offers a restart. Input and
//! output are generic so the whole dialogue can be driven from tests.
//! End of input at any prompt ends the session quietly.

use crate::analysis::Analyzer;
use crate::output::OutputFormatter;
use bikeshare_core::error::Result;
use bikeshare_core::filters::{FilterApplier, FilterSpec};
use bikeshare_core::source::TripSource;
use bikeshare_core::types::{CityId, DatasetView};
use std::io::{BufRead, Write};
use std::ops::RangeInclusive;
use tracing::debug;

/// Raw rows shown per page
pub const PAGE_SIZE: usize = 5;

const SEPARATOR: &str = "----------------------------------------";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FilterKind {
    Month,
    Day,
    Both,
    None,
}

impl FilterKind {
    /// Anything unrecognized falls back to no filter
    fn parse(answer: &str) -> Option<Self> {
        match answer.to_ascii_lowercase().as_str() {
            "month" => Some(Self::Month),
            "day" => Some(Self::Day),
            "both" => Some(Self::Both),
            "none" => Some(Self::None),
            _ => None,
        }
    }

    fn wants_month(self) -> bool {
        matches!(self, Self::Month | Self::Both)
    }

    fn wants_day(self) -> bool {
        matches!(self, Self::Day | Self::Both)
    }
}

/// One interactive dialogue over arbitrary input and output streams
pub struct InteractiveSession<'a, S, R, W> {
    analyzer: &'a Analyzer<S>,
    formatter: &'a dyn OutputFormatter,
    input: R,
    output: W,
}

impl<'a, S: TripSource, R: BufRead, W: Write> InteractiveSession<'a, S, R, W> {
    pub fn new(
        analyzer: &'a Analyzer<S>,
        formatter: &'a dyn OutputFormatter,
        input: R,
        output: W,
    ) -> Self {
        Self {
            analyzer,
            formatter,
            input,
            output,
        }
    }

    /// Run until the user declines a restart or input ends
    pub fn run(&mut self) -> Result<()> {
        writeln!(self.output, "Hello! Let's explore some US bikeshare data!")?;

        loop {
            let Some(spec) = self.prompt_filters()? else {
                break;
            };

            let dataset = self.analyzer.load(spec.city)?;
            let view = FilterApplier::apply(&dataset, &spec);
            let report = self
                .analyzer
                .analyze_view(&view, &spec, dataset.dropped_records())?;
            write!(self.output, "{}", self.formatter.format_report(&report)?)?;
            writeln!(self.output, "{SEPARATOR}")?;

            if !self.page_raw_trips(&view)? {
                break;
            }

            match self.prompt("\nWould you like to restart? Enter yes or no.")? {
                Some(answer) if answer.eq_ignore_ascii_case("yes") => continue,
                _ => break,
            }
        }

        self.output.flush()?;
        Ok(())
    }

    /// Print a prompt and read one trimmed answer, `None` at end of input
    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        writeln!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            debug!("Input closed at prompt");
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn prompt_filters(&mut self) -> Result<Option<FilterSpec>> {
        let Some(city) = self.prompt_city()? else {
            return Ok(None);
        };
        let mut spec = FilterSpec::new(city);

        let Some(answer) = self.prompt(
            "Would you like to filter the data by \"month\", \"day\", \"both\" or not at all?\n\
             Please type \"none\" for no time filter.",
        )?
        else {
            return Ok(None);
        };
        let kind = match FilterKind::parse(&answer) {
            Some(kind) => kind,
            None => {
                debug!("Unrecognized filter kind '{}'", answer);
                writeln!(
                    self.output,
                    "Your input does not match the possible filter options, so no filter will be applied."
                )?;
                FilterKind::None
            }
        };

        if kind.wants_month() {
            let Some(month) = self.prompt_number(
                "Which month between January and June would you like to select?\n\
                 - give the month as a number, i.e. January = 1, February = 2 etc.",
                "Please enter a number between 1 and 6.",
                1..=6,
            )?
            else {
                return Ok(None);
            };
            spec = spec.with_month(month);
        }

        if kind.wants_day() {
            let Some(day) = self.prompt_number(
                "Which day would you like to select?\n\
                 - give the day of the week as a number with Monday = 0, Sunday = 6.",
                "Please enter a number between 0 and 6.",
                0..=6,
            )?
            else {
                return Ok(None);
            };
            spec = spec.with_day_of_week(day);
        }

        writeln!(self.output, "{SEPARATOR}")?;
        Ok(Some(spec))
    }

    fn prompt_city(&mut self) -> Result<Option<CityId>> {
        let mut message =
            "Please enter the city for which you would like to see data\n - Chicago, Washington or New York";
        loop {
            let Some(answer) = self.prompt(message)? else {
                return Ok(None);
            };
            match answer.parse::<CityId>() {
                Ok(city) => return Ok(Some(city)),
                Err(_) => {
                    writeln!(self.output, "Please enter either Chicago, Washington or New York.")?;
                    message = "Please give the correct city name.";
                }
            }
        }
    }

    fn prompt_number(
        &mut self,
        message: &str,
        retry: &str,
        range: RangeInclusive<u32>,
    ) -> Result<Option<u32>> {
        let Some(mut answer) = self.prompt(message)? else {
            return Ok(None);
        };
        loop {
            match answer.parse::<u32>() {
                Ok(n) if range.contains(&n) => return Ok(Some(n)),
                _ => {
                    let Some(next) = self.prompt(retry)? else {
                        return Ok(None);
                    };
                    answer = next;
                }
            }
        }
    }

    /// Returns `false` if input ended while paging
    fn page_raw_trips(&mut self, view: &DatasetView<'_>) -> Result<bool> {
        let Some(mut answer) = self.prompt("Would you like to see individual trip data? (Y/N)")?
        else {
            return Ok(false);
        };

        let mut offset = 0;
        while answer.eq_ignore_ascii_case("y") {
            let page = view.slice(offset, PAGE_SIZE);
            write!(self.output, "{}", self.formatter.format_trips(page, offset)?)?;
            if page.len() < PAGE_SIZE {
                return Ok(true);
            }
            offset += PAGE_SIZE;

            answer = match self.prompt("Would you like to see more? (Y/N)")? {
                Some(answer) => answer,
                None => return Ok(false),
            };
        }

        writeln!(self.output, "Ok, no more individual trip data will be shown.")?;
        Ok(true)
    }
}
