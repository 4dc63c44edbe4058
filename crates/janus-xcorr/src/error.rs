//! Error types for cross-correlation estimators.

/// Errors from cross-correlation precondition violations.
#[derive(Debug, thiserror::Error)]
pub enum XcorrError {
    /// Returned when the two signals have different lengths.
    #[error("signal length mismatch: expected {expected} samples, got {got}")]
    LengthMismatch {
        /// Length of the first (command) signal.
        expected: usize,
        /// Length of the second (response) signal.
        got: usize,
    },

    /// Returned when a signal is empty.
    #[error("signals must be non-empty")]
    EmptySignal,
}
