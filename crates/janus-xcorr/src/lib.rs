//! Cross-correlation shift estimators for equal-length signal pairs.
//!
//! Pure math library — zero I/O. Provides the Pearson correlation
//! coefficient, an exhaustive windowed cross-correlation over a bounded
//! shift range, and a full linear cross-correlation computed via FFT.

mod error;
mod full;
mod pearson;
mod windowed;

pub use error::XcorrError;
pub use full::{LagEstimate, full_cross_correlation};
pub use pearson::pearson;
pub use windowed::{DEGENERATE_CORRELATION, ShiftEstimate, windowed_cross_correlation};
