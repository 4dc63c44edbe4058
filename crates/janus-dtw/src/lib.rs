//! Dynamic time warping for command/response signal alignment.
//!
//! Pure math library — zero I/O. Provides an exact full-matrix DTW with
//! deterministic backtracking, a bounded-radius approximate DTW that
//! recursively coarsens the inputs, warping path types, and the
//! boundary-run path cleaner.

mod approx;
mod cost;
mod error;
mod exact;
mod path;
mod signal;
mod window;

pub use approx::ApproxDtw;
pub use cost::DtwCost;
pub use error::DtwError;
pub use exact::ExactDtw;
pub use path::{PathStep, WarpingPath};
pub use signal::{Signal, SignalView};
