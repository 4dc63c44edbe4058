//! Error types for the janus-resample crate.

/// Error type for all fallible operations in the janus-resample crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ResampleError {
    /// Returned when a series has no samples.
    #[error("series is empty")]
    EmptySeries,

    /// Returned when timestamp and value lengths don't match.
    #[error("{field}: expected {expected} elements, got {got}")]
    LengthMismatch {
        /// Name of the mismatched field.
        field: &'static str,
        /// Expected length.
        expected: usize,
        /// Actual length.
        got: usize,
    },

    /// Returned when input contains NaN or infinity.
    #[error("non-finite value in {field} at index {index}")]
    NonFiniteInput {
        /// Name of the field containing the non-finite value.
        field: &'static str,
        /// Position of the first non-finite value.
        index: usize,
    },

    /// Returned when timestamps are not strictly increasing.
    #[error("timestamps not strictly increasing at index {index}")]
    NonMonotonicTimestamps {
        /// Index of the first out-of-order timestamp.
        index: usize,
    },

    /// Returned when the two series' time ranges do not overlap.
    #[error("time ranges do not overlap: grid start {start} >= end {end}")]
    NoOverlap {
        /// Later of the two range starts.
        start: f64,
        /// Earlier of the two range ends.
        end: f64,
    },

    /// Returned when a series is too short for the requested interpolation.
    #[error("insufficient data for {method} interpolation: got {n} points, need at least {min}")]
    InsufficientData {
        /// The interpolation method.
        method: &'static str,
        /// Number of points available.
        n: usize,
        /// Minimum required.
        min: usize,
    },

    /// Returned when configuration is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_empty() {
        assert_eq!(ResampleError::EmptySeries.to_string(), "series is empty");
    }

    #[test]
    fn display_length_mismatch() {
        let e = ResampleError::LengthMismatch {
            field: "values",
            expected: 10,
            got: 9,
        };
        assert_eq!(e.to_string(), "values: expected 10 elements, got 9");
    }

    #[test]
    fn display_non_finite() {
        let e = ResampleError::NonFiniteInput {
            field: "timestamps",
            index: 3,
        };
        assert_eq!(e.to_string(), "non-finite value in timestamps at index 3");
    }

    #[test]
    fn display_no_overlap() {
        let e = ResampleError::NoOverlap {
            start: 5.0,
            end: 2.0,
        };
        assert_eq!(
            e.to_string(),
            "time ranges do not overlap: grid start 5 >= end 2"
        );
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<ResampleError>();
    }
}
