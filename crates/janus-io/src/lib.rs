//! File I/O for the janus pipeline: CSV series exchange and JSON artifacts.

mod error;
mod reader;
mod writer;

pub use error::IoError;
pub use reader::SeriesReader;
pub use writer::ResultWriter;

/// File name of the raw command series.
pub const COMMAND_FILE: &str = "command.csv";
/// File name of the raw response series.
pub const RESPONSE_FILE: &str = "response.csv";
/// File name of the resampled command channel.
pub const COMMAND_RESAMPLED_FILE: &str = "command_resampled.csv";
/// File name of the resampled response channel.
pub const RESPONSE_RESAMPLED_FILE: &str = "response_resampled.csv";
