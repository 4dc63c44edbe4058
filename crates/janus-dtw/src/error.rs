//! Error types for DTW computation.

/// Errors from DTW computation and signal validation.
#[derive(Debug, thiserror::Error)]
pub enum DtwError {
    /// Returned when an empty slice is provided as a signal.
    #[error("signal must be non-empty")]
    EmptySignal,

    /// Returned when a signal contains NaN, infinity, or negative infinity.
    #[error("signal contains non-finite value at index {index}")]
    NonFiniteValue {
        /// Position of the first non-finite value found.
        index: usize,
    },
}
