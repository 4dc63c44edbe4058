//! I/O error types for janus-io.

use std::path::PathBuf;

/// Errors from file I/O, CSV parsing, and artifact serialization.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when the input file does not exist or is unreadable.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when the CSV parser encounters a malformed record.
    #[error("CSV parse error in {path} at byte offset {offset}")]
    CsvParse {
        /// Path to the CSV file.
        path: PathBuf,
        /// Byte offset where the error occurred.
        offset: u64,
        /// Underlying CSV error.
        source: csv::Error,
    },

    /// Returned when the CSV file contains a header but zero data rows.
    #[error("empty series (no data rows) in {path}")]
    EmptySeries {
        /// Path to the CSV file.
        path: PathBuf,
    },

    /// Returned when a row does not have exactly two columns.
    #[error("wrong column count in {path}: row {row_index} has {got} columns, expected 2")]
    WrongColumnCount {
        /// Path to the CSV file.
        path: PathBuf,
        /// Zero-based row index (excluding header).
        row_index: usize,
        /// Actual number of columns in this row.
        got: usize,
    },

    /// Returned when a cell value is not a finite float.
    #[error("invalid number in {path}: row {row_index}, column {column}, raw value \"{raw}\"")]
    InvalidNumber {
        /// Path to the CSV file.
        path: PathBuf,
        /// Zero-based row index (excluding header).
        row_index: usize,
        /// Column name (`timestamp` or the value column).
        column: &'static str,
        /// The raw string value that failed to parse.
        raw: String,
    },

    /// Series-level validation failure (empty, non-monotonic timestamps).
    #[error("invalid series in {path}: {source}")]
    InvalidSeries {
        /// Path to the CSV file.
        path: PathBuf,
        /// Underlying validation error.
        source: janus_resample::ResampleError,
    },

    /// Returned when the output directory cannot be created.
    #[error("cannot create output directory {path}")]
    OutputDirCreate {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when an artifact file cannot be written.
    #[error("cannot write file {path}")]
    WriteFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when a CSV artifact cannot be serialized.
    #[error("cannot write CSV {path}")]
    WriteCsv {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying CSV error.
        source: csv::Error,
    },
}
