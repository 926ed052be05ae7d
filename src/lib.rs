use crate::error::{Error, Result};
use crate::utils::*;
use chrono::prelude::*;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;
pub mod chart;
pub mod error;
pub mod fetch;
pub mod steps_plot;
pub mod utils;

// constants
pub const VERSION: Option<&'static str> = option_env!("CARGO_PKG_VERSION");
pub const DEFAULT_URL: &str = "https://raw.githubusercontent.com/mweers/mweers.github.io/master/steps.csv";
pub const DEFAULT_DATE_COLUMN: &str = "Date";
pub const DEFAULT_STEPS_COLUMN: &str = "Steps";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// One day of the step log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observation {
    pub date: NaiveDate,
    pub steps: u64,
}

/// Where the csv comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Url(String),
    File(PathBuf),
}

impl Default for DataSource {
    fn default() -> Self {
        DataSource::Url(DEFAULT_URL.to_string())
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DataSource::Url(url) => write!(f, "{}", url),
            DataSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Header names of the date and steps columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnNames {
    pub date: String,
    pub steps: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        ColumnNames {
            date: DEFAULT_DATE_COLUMN.to_string(),
            steps: DEFAULT_STEPS_COLUMN.to_string(),
        }
    }
}

/// Totals reported after loading.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub first: NaiveDate,
    pub last: NaiveDate,
    pub total: u64,
    pub mean: f64,
    pub min: u64,
    pub max: u64,
}

/// The main struct for the step series, kept in the order of the csv rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Series {
    pub date: Vec<NaiveDate>,
    pub steps: Vec<u64>,
}

impl Series {
    /// Initiate a new Series instance
    /// using the given capacity for the date and steps vectors
    pub fn new(capacity: usize) -> Series {
        Series {
            date: Vec::with_capacity(capacity),
            steps: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, obs: Observation) {
        self.date.push(obs.date);
        self.steps.push(obs.steps);
    }

    pub fn len(&self) -> usize {
        self.date.len()
    }

    pub fn is_empty(&self) -> bool {
        self.date.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Observation> + '_ {
        self.date
            .iter()
            .zip(self.steps.iter())
            .map(|(date, steps)| Observation {
                date: *date,
                steps: *steps,
            })
    }

    /// Parse a csv with a header row, locating the columns by name.
    /// Every row must carry a valid date and count, the first bad row stops the parsing.
    /// Rows are kept as they come: no sorting, no deduplication.
    pub fn from_csv_reader<R: Read>(rdr: R, columns: &ColumnNames) -> Result<Series> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(rdr);
        let headers = reader
            .headers()
            .map_err(|source| Error::Csv { line: 1, source })?
            .clone();
        // no header at all, an empty document
        if headers.is_empty() {
            debug!("empty csv, no header row");
            return Ok(Series::new(0));
        }
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| Error::MissingColumn {
                    column: name.to_string(),
                })
        };
        let date_idx = find(&columns.date)?;
        let steps_idx = find(&columns.steps)?;
        debug!(
            "found columns {:?} at {} and {:?} at {}",
            columns.date, date_idx, columns.steps, steps_idx
        );

        let mut series = Series::new(1000);
        for record in reader.records() {
            let record = record.map_err(|source| Error::Csv {
                line: source.position().map(|p| p.line()).unwrap_or(0),
                source,
            })?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            let date_str = record.get(date_idx).unwrap_or("");
            let steps_str = record.get(steps_idx).unwrap_or("");
            let date = parse_date(date_str).ok_or_else(|| Error::InvalidDate {
                line,
                value: date_str.to_string(),
            })?;
            let steps = parse_steps(steps_str).ok_or_else(|| Error::InvalidSteps {
                line,
                value: steps_str.to_string(),
            })?;
            series.push(Observation { date, steps });
        }
        Ok(series)
    }

    /// Initiate a Series from a local csv file.
    pub fn from_csv<P>(fin: P, columns: &ColumnNames) -> Result<Series>
    where
        P: AsRef<Path>,
    {
        let path = fin.as_ref();
        let file = File::open(path).map_err(|source| Error::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Series::from_csv_reader(file, columns)
    }

    /// A copy ordered by date, equal dates keep their relative order.
    pub fn sorted_by_date(&self) -> Series {
        let mut obs: Vec<Observation> = self.iter().collect();
        obs.sort_by_key(|o| o.date);
        let mut sorted = Series::new(obs.len());
        obs.into_iter().for_each(|o| sorted.push(o));
        sorted
    }

    pub fn is_ordered(&self) -> bool {
        self.date.windows(2).all(|w| w[0] <= w[1])
    }

    pub fn summary(&self) -> Option<Summary> {
        let (first, last) = min_and_max(self.date.iter())?;
        let (min, max) = min_and_max(self.steps.iter())?;
        let total: u64 = self.steps.iter().sum();
        Some(Summary {
            count: self.len(),
            first,
            last,
            total,
            mean: total as f64 / self.len() as f64,
            min,
            max,
        })
    }
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "date,steps")?;
        for obs in self.iter() {
            writeln!(f, "{},{}", obs.date.format("%Y-%m-%d"), obs.steps)?;
        }
        Ok(())
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} days from {} to {}, {} steps in total, {:.0} per day (min {}, max {})",
            self.count,
            self.first,
            self.last,
            format_thousands(self.total),
            self.mean,
            format_thousands(self.min),
            format_thousands(self.max)
        )
    }
}
