//! Low-rate command generation.

use rand::Rng;
use rand_distr::{Distribution, Normal};
use tracing::{debug, instrument};

use janus_resample::SampledSeries;

use crate::config::CommandConfig;
use crate::error::SynthError;
use crate::strictly_increasing;

/// Generate the teleoperator's command series: a sine with linearly
/// decaying amplitude, sampled at irregular timestamps with skipped frames
/// and additive Gaussian noise.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`SynthError::InvalidConfig`] | Configuration fails validation |
/// | [`SynthError::Series`] | Every frame was skipped |
#[instrument(skip_all, fields(duration))]
pub fn generate_command(
    duration: f64,
    config: &CommandConfig,
    rng: &mut impl Rng,
) -> Result<SampledSeries, SynthError> {
    config.validate()?;
    if !duration.is_finite() || duration <= 0.0 {
        return Err(SynthError::InvalidConfig {
            reason: format!("duration must be finite and positive, got {duration}"),
        });
    }

    let num_points = (duration * config.nominal_freq_hz()) as usize;
    let jitter = normal(config.irregularity())?;
    let noise = normal(config.noise_std())?;

    // Nominal grid with per-sample timing jitter, restored to time order.
    let mut timestamps: Vec<f64> = (0..num_points)
        .map(|i| i as f64 * duration / num_points as f64 + jitter.sample(rng))
        .collect();
    timestamps.sort_by(f64::total_cmp);

    // Skipped frames.
    let kept: Vec<f64> = timestamps
        .into_iter()
        .filter(|_| rng.r#gen::<f64>() > config.skip_prob())
        .collect();

    // Linearly decaying amplitude sine plus noise.
    let omega = 2.0 * std::f64::consts::PI * config.angle_freq_hz();
    let values: Vec<f64> = kept
        .iter()
        .map(|&t| {
            let amplitude = config.amplitude() * (1.0 - t / (2.0 * duration));
            amplitude * (omega * t).sin() + noise.sample(rng)
        })
        .collect();

    let (ts, vs) = strictly_increasing(kept, values);
    debug!(n = ts.len(), "command series generated");
    Ok(SampledSeries::new(ts, vs)?)
}

pub(crate) fn normal(std_dev: f64) -> Result<Normal<f64>, SynthError> {
    Normal::new(0.0, std_dev).map_err(|_| SynthError::InvalidConfig {
        reason: format!("invalid Gaussian standard deviation: {std_dev}"),
    })
}
