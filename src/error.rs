use std::path::PathBuf;
use thiserror::Error;

/// Coarse classification of the failures, one per pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Fetch,
    Parse,
    Render,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("could not fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("could not fetch {url}: server answered with status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("could not read csv file {path:?}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("missing column {column:?} in csv header")]
    MissingColumn { column: String },
    #[error("malformed csv at line {line}: {source}")]
    Csv {
        line: u64,
        #[source]
        source: csv::Error,
    },
    #[error("could not parse date {value:?} at line {line}")]
    InvalidDate { line: u64, value: String },
    #[error("could not parse steps {value:?} at line {line}, expected a non-negative integer")]
    InvalidSteps { line: u64, value: String },
    #[error("no observations to plot")]
    EmptySeries,
    #[error("could not write chart to {path:?}: {source}")]
    WriteArtifact {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Fetch { .. } | Error::Status { .. } | Error::ReadFile { .. } => ErrorKind::Fetch,
            Error::MissingColumn { .. }
            | Error::Csv { .. }
            | Error::InvalidDate { .. }
            | Error::InvalidSteps { .. } => ErrorKind::Parse,
            Error::EmptySeries | Error::WriteArtifact { .. } => ErrorKind::Render,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
