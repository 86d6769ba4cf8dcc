//! Error types for the data-loader crate.
//!
//! Every variant here is fatal at startup: the catalog is either loaded
//! completely or not at all.

use thiserror::Error;

/// Errors that can occur while loading the film dataset
///
/// The `#[derive(Error)]` macro from thiserror implements `std::error::Error`
/// and `Display` from the `#[error(...)]` attributes.
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The CSV reader rejected the file (bad quoting, ragged rows, bad UTF-8)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A column the loader maps onto `FilmRecord` is not in the header row
    #[error("Missing required column: {column}")]
    MissingColumn { column: String },

    /// A field in a data row couldn't be converted to its typed value
    ///
    /// `line` is the 1-based line in the source file (the header is line 1).
    #[error("Parse error at line {line}, column {field} ({value:?}): {reason}")]
    ParseError {
        line: u64,
        field: String,
        value: String,
        reason: String,
    },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
