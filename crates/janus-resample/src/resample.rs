//! Resampling of a command/response pair onto the shared grid.

use tracing::{debug, instrument};

use crate::config::ResampleConfig;
use crate::error::ResampleError;
use crate::grid::UniformGrid;
use crate::interpolate::interpolate;
use crate::series::SampledSeries;

/// A command/response pair resampled onto one shared uniform grid.
///
/// Both value channels have exactly `grid.len()` samples on identical
/// timestamps, so downstream matchers can index them interchangeably.
#[derive(Debug, Clone, PartialEq)]
pub struct ResampledPair {
    grid: UniformGrid,
    timestamps: Vec<f64>,
    command: Vec<f64>,
    response: Vec<f64>,
}

impl ResampledPair {
    /// Return the shared grid.
    #[must_use]
    pub fn grid(&self) -> UniformGrid {
        self.grid
    }

    /// Return the grid timestamps.
    #[must_use]
    pub fn timestamps(&self) -> &[f64] {
        &self.timestamps
    }

    /// Return the resampled command channel.
    #[must_use]
    pub fn command(&self) -> &[f64] {
        &self.command
    }

    /// Return the resampled response channel.
    #[must_use]
    pub fn response(&self) -> &[f64] {
        &self.response
    }

    /// Grid spacing in seconds.
    #[must_use]
    pub fn dt(&self) -> f64 {
        self.grid.dt()
    }

    /// Number of grid points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Return true if the pair has no samples.
    ///
    /// Always `false` for pairs produced by [`resample_pair`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }
}

/// Resample both series onto the shared grid spanning their overlap.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`ResampleError::InvalidConfig`] | The configuration fails validation |
/// | [`ResampleError::NoOverlap`] | The two time ranges share no span |
/// | [`ResampleError::InsufficientData`] | Cubic interpolation with too few points |
#[instrument(skip_all, fields(n_command = command.len(), n_response = response.len()))]
pub fn resample_pair(
    command: &SampledSeries,
    response: &SampledSeries,
    config: &ResampleConfig,
) -> Result<ResampledPair, ResampleError> {
    config.validate()?;

    let grid = UniformGrid::compute(command, response, config.target_freq_hz())?;
    let timestamps = grid.timestamps();
    debug!(
        start = grid.start(),
        dt = grid.dt(),
        len = grid.len(),
        "shared grid computed"
    );

    let command_values = interpolate(command, &timestamps, config.interpolation())?;
    let response_values = interpolate(response, &timestamps, config.interpolation())?;

    Ok(ResampledPair {
        grid,
        timestamps,
        command: command_values,
        response: response_values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpolate::InterpolationMethod;

    fn ramp(start: f64, step: f64, n: usize) -> SampledSeries {
        let ts: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();
        let vs: Vec<f64> = ts.iter().map(|&t| 2.0 * t).collect();
        SampledSeries::new(ts, vs).unwrap()
    }

    #[test]
    fn channels_share_the_grid() {
        let cmd = ramp(0.0, 0.1, 50);
        let resp = ramp(0.5, 0.02, 100);
        let pair = resample_pair(&cmd, &resp, &ResampleConfig::new()).unwrap();

        assert_eq!(pair.command().len(), pair.len());
        assert_eq!(pair.response().len(), pair.len());
        assert_eq!(pair.timestamps().len(), pair.len());
        assert!((pair.dt() - 0.005).abs() < 1e-12);
        assert!(pair.timestamps()[0] >= 0.5);
    }

    #[test]
    fn linear_ramp_resamples_exactly() {
        let cmd = ramp(0.0, 0.5, 10);
        let resp = ramp(0.0, 0.25, 20);
        let pair = resample_pair(
            &cmd,
            &resp,
            &ResampleConfig::new().with_target_freq_hz(10.0),
        )
        .unwrap();

        // Both channels sample v = 2t, so they agree everywhere on the grid.
        for (t, (&c, &r)) in pair
            .timestamps()
            .iter()
            .zip(pair.command().iter().zip(pair.response().iter()))
        {
            assert!((c - 2.0 * t).abs() < 1e-9);
            assert!((r - 2.0 * t).abs() < 1e-9);
        }
    }

    #[test]
    fn disjoint_ranges_fail() {
        let cmd = ramp(0.0, 0.1, 10);
        let resp = ramp(100.0, 0.1, 10);
        let result = resample_pair(&cmd, &resp, &ResampleConfig::new());
        assert!(matches!(result, Err(ResampleError::NoOverlap { .. })));
    }

    #[test]
    fn invalid_config_fails_before_work() {
        let cmd = ramp(0.0, 0.1, 10);
        let resp = ramp(0.0, 0.1, 10);
        let config = ResampleConfig::new().with_target_freq_hz(-1.0);
        let result = resample_pair(&cmd, &resp, &config);
        assert!(matches!(result, Err(ResampleError::InvalidConfig { .. })));
    }

    #[test]
    fn cubic_too_short_fails() {
        let cmd = SampledSeries::new(vec![0.0, 1.0, 2.0], vec![1.0, 2.0, 3.0]).unwrap();
        let resp = ramp(0.0, 0.1, 30);
        let config = ResampleConfig::new().with_interpolation(InterpolationMethod::Cubic);
        let result = resample_pair(&cmd, &resp, &config);
        assert!(matches!(
            result,
            Err(ResampleError::InsufficientData { .. })
        ));
    }

    #[test]
    fn previous_hold_matches_step_lookup() {
        let cmd = SampledSeries::new(vec![0.0, 1.0, 2.0, 3.0], vec![0.0, 10.0, 20.0, 30.0])
            .unwrap();
        let resp = ramp(0.0, 0.05, 60);
        let config = ResampleConfig::new()
            .with_target_freq_hz(4.0)
            .with_interpolation(InterpolationMethod::Previous);
        let pair = resample_pair(&cmd, &resp, &config).unwrap();

        for (&t, &c) in pair.timestamps().iter().zip(pair.command().iter()) {
            let expected = 10.0 * t.floor().clamp(0.0, 3.0);
            assert!((c - expected).abs() < 1e-9, "t={t} c={c}");
        }
    }
}
