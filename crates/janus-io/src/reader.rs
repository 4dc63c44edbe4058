//! CSV series reader with full input validation.

use std::path::{Path, PathBuf};

use janus_resample::SampledSeries;
use tracing::{debug, info, instrument};

use crate::IoError;

/// Reads a timestamped series from a two-column CSV file.
///
/// Expected CSV format:
/// - Header row required: `timestamp,<value-column>` (the value column may
///   carry any name)
/// - One `(timestamp, value)` pair per row, both finite floats
/// - Timestamps strictly increasing
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`IoError::FileNotFound`] | File doesn't exist or is unreadable |
/// | [`IoError::CsvParse`] | Malformed CSV record |
/// | [`IoError::EmptySeries`] | Zero data rows after header |
/// | [`IoError::WrongColumnCount`] | Row without exactly two columns |
/// | [`IoError::InvalidNumber`] | Cell is NaN, Inf, or unparseable |
/// | [`IoError::InvalidSeries`] | Timestamps out of order |
pub struct SeriesReader {
    path: PathBuf,
}

impl SeriesReader {
    /// Create a new reader for the given CSV file path.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Read and validate the CSV file, returning a [`SampledSeries`].
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn read(&self) -> Result<SampledSeries, IoError> {
        let file = std::fs::File::open(&self.path).map_err(|e| IoError::FileNotFound {
            path: self.path.clone(),
            source: e,
        })?;

        // flexible(true) lets our own WrongColumnCount check fire instead of
        // a low-level CsvParse error.
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);

        let header = rdr.headers().map_err(|e| IoError::CsvParse {
            path: self.path.clone(),
            offset: e.position().map_or(0, |p| p.byte()),
            source: e,
        })?;
        debug!(columns = header.len(), "read CSV header");

        let mut timestamps = Vec::new();
        let mut values = Vec::new();

        for (row_index, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| IoError::CsvParse {
                path: self.path.clone(),
                offset: e.position().map_or(0, |p| p.byte()),
                source: e,
            })?;

            if record.len() != 2 {
                return Err(IoError::WrongColumnCount {
                    path: self.path.clone(),
                    row_index,
                    got: record.len(),
                });
            }

            timestamps.push(self.parse_cell(&record, 0, "timestamp", row_index)?);
            values.push(self.parse_cell(&record, 1, "value", row_index)?);
        }

        if timestamps.is_empty() {
            return Err(IoError::EmptySeries {
                path: self.path.clone(),
            });
        }

        let series =
            SampledSeries::new(timestamps, values).map_err(|e| IoError::InvalidSeries {
                path: self.path.clone(),
                source: e,
            })?;

        info!(n_samples = series.len(), "series loaded");
        Ok(series)
    }

    fn parse_cell(
        &self,
        record: &csv::StringRecord,
        index: usize,
        column: &'static str,
        row_index: usize,
    ) -> Result<f64, IoError> {
        let raw = record.get(index).unwrap_or("");
        let value: f64 = raw.parse().map_err(|_| IoError::InvalidNumber {
            path: self.path.clone(),
            row_index,
            column,
            raw: raw.to_string(),
        })?;
        if !value.is_finite() {
            return Err(IoError::InvalidNumber {
                path: self.path.clone(),
                row_index,
                column,
                raw: raw.to_string(),
            });
        }
        Ok(value)
    }
}
