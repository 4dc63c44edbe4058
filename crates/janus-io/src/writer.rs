//! CSV and JSON artifact writer for alignment runs.

use std::fs;
use std::path::{Path, PathBuf};

use janus_align::AlignmentResult;
use janus_resample::{ResampledPair, SampledSeries};
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::{
    COMMAND_RESAMPLED_FILE, IoError, RESPONSE_RESAMPLED_FILE,
};

/// Writes series CSVs and alignment result JSON files.
///
/// Creates the output directory on construction if it does not exist.
/// Alignment artifacts are named `alignment_{method}.json`.
pub struct ResultWriter {
    output_dir: PathBuf,
}

impl ResultWriter {
    /// Create a new writer targeting the given directory.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::OutputDirCreate`] if the directory cannot be created.
    #[instrument(skip_all, fields(dir = %output_dir.display()))]
    pub fn new(output_dir: &Path) -> Result<Self, IoError> {
        fs::create_dir_all(output_dir).map_err(|e| IoError::OutputDirCreate {
            path: output_dir.to_path_buf(),
            source: e,
        })?;
        debug!("output directory ready");
        Ok(Self {
            output_dir: output_dir.to_path_buf(),
        })
    }

    /// Write a raw series to `{file_name}` with the given value column name.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::WriteCsv`] if the file cannot be written.
    #[instrument(skip_all, fields(file_name))]
    pub fn write_series(
        &self,
        file_name: &str,
        value_column: &str,
        series: &SampledSeries,
    ) -> Result<(), IoError> {
        let path = self.output_dir.join(file_name);
        write_csv(&path, value_column, series.timestamps(), series.values())?;
        info!(path = %path.display(), n = series.len(), "series written");
        Ok(())
    }

    /// Write both channels of a resampled pair to the standard file names.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::WriteCsv`] if either file cannot be written.
    #[instrument(skip_all, fields(n = pair.len()))]
    pub fn write_resampled(&self, pair: &ResampledPair) -> Result<(), IoError> {
        let command_path = self.output_dir.join(COMMAND_RESAMPLED_FILE);
        write_csv(&command_path, "command", pair.timestamps(), pair.command())?;

        let response_path = self.output_dir.join(RESPONSE_RESAMPLED_FILE);
        write_csv(&response_path, "response", pair.timestamps(), pair.response())?;

        info!(
            command = %command_path.display(),
            response = %response_path.display(),
            "resampled pair written"
        );
        Ok(())
    }

    /// Write an alignment result to `alignment_{method}.json`.
    ///
    /// `runtime_seconds` is measured by the orchestrator around the whole
    /// method invocation; the core never times itself.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::WriteFile`] if the file cannot be written.
    #[instrument(skip_all, fields(method = %result.method))]
    pub fn write_result(
        &self,
        result: &AlignmentResult,
        runtime_seconds: f64,
    ) -> Result<(), IoError> {
        let path = self
            .output_dir
            .join(format!("alignment_{}.json", result.method.name()));

        let path_pairs: Vec<(usize, usize)> = result
            .path
            .steps()
            .iter()
            .map(|s| (s.cmd, s.resp))
            .collect();

        let artifact = AlignmentArtifact {
            method: result.method.name(),
            global_shift: result.global_shift,
            jitter: result.jitter,
            path: path_pairs,
            score: result.score,
            runtime: runtime_seconds,
        };

        let json = serde_json::to_string_pretty(&artifact).expect("serialization cannot fail");
        fs::write(&path, &json).map_err(|e| IoError::WriteFile {
            path: path.clone(),
            source: e,
        })?;

        info!(path = %path.display(), "alignment result written");
        Ok(())
    }
}

fn write_csv(
    path: &Path,
    value_column: &str,
    timestamps: &[f64],
    values: &[f64],
) -> Result<(), IoError> {
    let mut wtr = csv::Writer::from_path(path).map_err(|e| IoError::WriteCsv {
        path: path.to_path_buf(),
        source: e,
    })?;

    let write = |wtr: &mut csv::Writer<fs::File>| -> Result<(), csv::Error> {
        wtr.write_record(["timestamp", value_column])?;
        for (t, v) in timestamps.iter().zip(values) {
            wtr.write_record([t.to_string(), v.to_string()])?;
        }
        wtr.flush()?;
        Ok(())
    };

    write(&mut wtr).map_err(|e| IoError::WriteCsv {
        path: path.to_path_buf(),
        source: e,
    })
}

// --- Shadow struct for JSON serialization ---

#[derive(Serialize)]
struct AlignmentArtifact<'a> {
    method: &'a str,
    global_shift: f64,
    jitter: f64,
    path: Vec<(usize, usize)>,
    score: f64,
    runtime: f64,
}
