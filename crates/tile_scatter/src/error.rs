//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants cover
//! invalid configuration, malformed region tables, ragged map input, IO, and generic errors.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("region {index} ({x1}, {y1}, {x2}, {y2}) has inverted bounds")]
    InvalidRegion {
        index: usize,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
    },

    #[error("{context}: density {value} is outside [0, 1]")]
    InvalidDensity { context: String, value: f64 },

    #[error("line {line}: expected {expected} columns, found {found}")]
    RaggedRow {
        /// 1-based source line for text input, 1-based row index for [`crate::grid::Grid::from_rows`].
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::Other(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::Other(value.to_owned())
    }
}
