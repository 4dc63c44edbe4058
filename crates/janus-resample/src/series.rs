//! Validated timestamped series.

use crate::error::ResampleError;

/// An irregularly sampled series of `(timestamp, value)` pairs.
///
/// Guaranteed non-empty, all values finite, and timestamps strictly
/// increasing. Timestamps are seconds; values are whatever physical
/// quantity both signals observe.
#[derive(Debug, Clone, PartialEq)]
pub struct SampledSeries {
    timestamps: Vec<f64>,
    values: Vec<f64>,
}

impl SampledSeries {
    /// Create a new series, validating its structure.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`ResampleError::EmptySeries`] | No samples |
    /// | [`ResampleError::LengthMismatch`] | Timestamp and value counts differ |
    /// | [`ResampleError::NonFiniteInput`] | Any timestamp or value is NaN or infinite |
    /// | [`ResampleError::NonMonotonicTimestamps`] | Timestamps not strictly increasing |
    pub fn new(timestamps: Vec<f64>, values: Vec<f64>) -> Result<Self, ResampleError> {
        if timestamps.is_empty() {
            return Err(ResampleError::EmptySeries);
        }
        if values.len() != timestamps.len() {
            return Err(ResampleError::LengthMismatch {
                field: "values",
                expected: timestamps.len(),
                got: values.len(),
            });
        }
        if let Some(index) = timestamps.iter().position(|t| !t.is_finite()) {
            return Err(ResampleError::NonFiniteInput {
                field: "timestamps",
                index,
            });
        }
        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(ResampleError::NonFiniteInput {
                field: "values",
                index,
            });
        }
        if let Some(index) = timestamps.windows(2).position(|w| w[1] <= w[0]) {
            return Err(ResampleError::NonMonotonicTimestamps { index: index + 1 });
        }
        Ok(Self { timestamps, values })
    }

    /// Return the timestamps.
    #[must_use]
    pub fn timestamps(&self) -> &[f64] {
        &self.timestamps
    }

    /// Return the values.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Return the number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Return true if the series has no samples.
    ///
    /// Always `false` for instances constructed via [`SampledSeries::new`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// First timestamp.
    #[must_use]
    pub fn start(&self) -> f64 {
        self.timestamps[0]
    }

    /// Last timestamp.
    #[must_use]
    pub fn end(&self) -> f64 {
        self.timestamps[self.timestamps.len() - 1]
    }
}
