use crate::series::Symbol;
use std::io;
use thiserror::Error;

/// Every failure the codec can report.
#[derive(Debug, Error)]
pub enum Error {
    /// The series violates a structural or content invariant.
    #[error("invalid series: {0}")]
    InvalidSeries(#[from] SeriesError),

    /// The series could not be read or parsed before validation.
    #[error("failed to load series: {0}")]
    SeriesLoad(#[from] LoadError),

    /// The packed stream does not fit the series.
    #[error("inflate failure: {0}")]
    Inflate(#[from] InflateError),

    /// Escape references form a cycle or a chain deeper than the table.
    #[error("escape chain towards row {row} exceeds depth limit {limit}")]
    RecursionLimitExceeded { row: usize, limit: usize },

    /// No escape reference anywhere in the series leads to this row.
    #[error("row {row} is not reachable through any escape reference")]
    UnreachableRow { row: usize },

    /// Reading the text to compress or the stream to inflate failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Characters above U+00FF cannot ride the one-byte ascii escape.
    #[error("character {0:?} is not in the series and does not fit in one byte")]
    Unrepresentable(char),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeriesError {
    #[error("series has no rows")]
    Empty,

    #[error("row {row} has {len} symbols, expected 16")]
    RowLength { row: usize, len: usize },

    #[error("'{text}' at row {row}, position {position} is not a symbol")]
    Malformed {
        text: String,
        row: usize,
        position: usize,
    },

    #[error("character {character:?} at row {row}, position {position} is not printable")]
    NonPrintable {
        character: char,
        row: usize,
        position: usize,
    },

    #[error("symbol '{symbol}' at row {row}, position {position} already found")]
    Duplicate {
        symbol: Symbol,
        row: usize,
        position: usize,
    },

    #[error("escape to row {target} at row {row}, position {position} refers past the last of {rows} rows")]
    EscapeOutOfRange {
        target: usize,
        rows: usize,
        row: usize,
        position: usize,
    },

    #[error("series has no ascii escape")]
    MissingAsciiEscape,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("malformed series document: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("code {code} selects nothing in row {row} (byte {byte})")]
pub struct InflateError {
    pub byte: usize,
    pub row: usize,
    pub code: u8,
}

pub type Result<T> = std::result::Result<T, Error>;
