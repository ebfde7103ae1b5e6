use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScholarError {
    #[error("network request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("profile request to {url} returned {status}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("page structure not found: expected {region}")]
    StructureNotFound { region: &'static str },

    #[error("citation histogram contains no years")]
    EmptyHistogram,

    #[error("citation histogram is misaligned: {years} years but {counts} counts")]
    HistogramMismatch { years: usize, counts: usize },

    #[error("could not read a number from {region}: {text:?}")]
    InvalidNumber { region: &'static str, text: String },

    #[error("malformed summary: expected at least 5 statistics, found {found}")]
    MalformedSummary { found: usize },

    #[error("year {year} not found in the citation histogram")]
    YearNotFound { year: i32 },

    #[error("start year {start} must not be after end year {end}")]
    InvalidRange { start: i32, end: i32 },

    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("invalid selector {selector}: {reason}")]
    Selector { selector: String, reason: String },

    #[error("chart rendering failed: {0}")]
    Render(String),

    #[error("could not write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ScholarError>;
