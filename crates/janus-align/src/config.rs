//! Configuration for the alignment engine.

use janus_resample::ResampleConfig;

use crate::error::AlignError;

/// Configuration for a single alignment run.
///
/// Use the builder methods to customise parameters.
///
/// # Example
///
/// ```
/// use janus_align::AlignConfig;
///
/// let config = AlignConfig::new().with_max_shift(50).with_dtw_radius(3);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AlignConfig {
    resample: ResampleConfig,
    max_shift: usize,
    dtw_radius: usize,
}

impl AlignConfig {
    /// Creates a new configuration with defaults.
    ///
    /// Defaults: `max_shift = 100` samples, `dtw_radius = 1`, resampling at
    /// 200 Hz with linear interpolation.
    #[must_use]
    pub fn new() -> Self {
        Self {
            resample: ResampleConfig::new(),
            max_shift: 100,
            dtw_radius: 1,
        }
    }

    /// Sets the resampling configuration.
    #[must_use]
    pub fn with_resample(mut self, resample: ResampleConfig) -> Self {
        self.resample = resample;
        self
    }

    /// Sets the windowed cross-correlation search bound, in samples.
    #[must_use]
    pub fn with_max_shift(mut self, max_shift: usize) -> Self {
        self.max_shift = max_shift;
        self
    }

    /// Sets the approximate-DTW corridor radius.
    #[must_use]
    pub fn with_dtw_radius(mut self, radius: usize) -> Self {
        self.dtw_radius = radius;
        self
    }

    /// Returns the resampling configuration.
    #[must_use]
    pub fn resample(&self) -> &ResampleConfig {
        &self.resample
    }

    /// Returns the windowed search bound in samples.
    #[must_use]
    pub fn max_shift(&self) -> usize {
        self.max_shift
    }

    /// Returns the approximate-DTW corridor radius.
    #[must_use]
    pub fn dtw_radius(&self) -> usize {
        self.dtw_radius
    }

    /// Validates this configuration.
    pub fn validate(&self) -> Result<(), AlignError> {
        self.resample.validate()?;
        Ok(())
    }
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self::new()
    }
}
