//! Configuration for shared-grid resampling.

use crate::error::ResampleError;
use crate::interpolate::InterpolationMethod;

/// Configuration for resampling a command/response pair onto a shared grid.
///
/// Use the builder methods to customise parameters.
///
/// # Example
///
/// ```
/// use janus_resample::{InterpolationMethod, ResampleConfig};
///
/// let config = ResampleConfig::new()
///     .with_target_freq_hz(500.0)
///     .with_interpolation(InterpolationMethod::Cubic);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ResampleConfig {
    target_freq_hz: f64,
    interpolation: InterpolationMethod,
}

impl ResampleConfig {
    /// Creates a new configuration with defaults.
    ///
    /// Defaults: `target_freq_hz = 200.0`, `interpolation = Linear`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            target_freq_hz: 200.0,
            interpolation: InterpolationMethod::Linear,
        }
    }

    /// Sets the shared grid frequency in Hz.
    #[must_use]
    pub fn with_target_freq_hz(mut self, freq: f64) -> Self {
        self.target_freq_hz = freq;
        self
    }

    /// Sets the interpolation method used for both series.
    #[must_use]
    pub fn with_interpolation(mut self, method: InterpolationMethod) -> Self {
        self.interpolation = method;
        self
    }

    /// Returns the shared grid frequency in Hz.
    #[must_use]
    pub fn target_freq_hz(&self) -> f64 {
        self.target_freq_hz
    }

    /// Returns the interpolation method.
    #[must_use]
    pub fn interpolation(&self) -> InterpolationMethod {
        self.interpolation
    }

    /// Validates this configuration.
    pub fn validate(&self) -> Result<(), ResampleError> {
        if !self.target_freq_hz.is_finite() || self.target_freq_hz <= 0.0 {
            return Err(ResampleError::InvalidConfig {
                reason: format!(
                    "target_freq_hz must be finite and positive, got {}",
                    self.target_freq_hz
                ),
            });
        }
        Ok(())
    }
}

impl Default for ResampleConfig {
    fn default() -> Self {
        Self::new()
    }
}
