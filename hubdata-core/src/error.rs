//! Structured error types for the acquisition and normalization pipeline.
//!
//! Fatal errors (configuration, network, parse, I/O) stop a run before export.
//! Row-level errors (`DateParse`, `Normalization`) are collected by the
//! normalizer as [`RowFailure`](crate::normalize::RowFailure)s instead.

use thiserror::Error;

/// Errors raised anywhere in the pipeline.
///
/// These are designed to be displayable directly in the CLI.
#[derive(Debug, Error)]
pub enum HubError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    DateParse(#[from] DateParseError),

    #[error("normalization error: {0}")]
    Normalization(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// A single week-range string could not be turned into calendar dates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateParseError {
    #[error("no leading year in week range '{0}'")]
    MissingYear(String),

    #[error("no start date in week range '{0}'")]
    MissingStart(String),

    #[error("no end date in week range '{0}'")]
    MissingEnd(String),

    #[error("invalid calendar date '{0}'")]
    InvalidDate(String),
}
