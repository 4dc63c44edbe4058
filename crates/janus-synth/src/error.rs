//! Error types for synthetic data generation.

/// Error type for all fallible operations in the janus-synth crate.
#[derive(Debug, thiserror::Error)]
pub enum SynthError {
    /// Returned when configuration is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Series construction error from a stage that produced no valid samples.
    #[error(transparent)]
    Series(#[from] janus_resample::ResampleError),
}
