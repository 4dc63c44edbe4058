//! Full synthetic pipeline: command -> network -> response -> faults.

use rand::Rng;
use tracing::{info, instrument};

use janus_resample::SampledSeries;

use crate::command::generate_command;
use crate::config::SynthConfig;
use crate::error::SynthError;
use crate::network::simulate_network;
use crate::response::simulate_response;

/// A generated command/response pair.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedData {
    /// The low-rate command series, as sent.
    pub command: SampledSeries,
    /// The high-rate response series, after transport and control.
    pub response: SampledSeries,
}

/// Run the full generation pipeline, reflecting the physical flow.
///
/// The command series is what the operator sent; the response series is
/// what the motor did after the network delayed, jittered, and dropped
/// packets. Fault injection (flip/negate) perturbs the finished response to
/// produce fixtures that should score poorly.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`SynthError::InvalidConfig`] | Configuration fails validation |
/// | [`SynthError::Series`] | A stage produced no valid samples |
#[instrument(skip_all, fields(duration = config.duration()))]
pub fn generate(config: &SynthConfig, rng: &mut impl Rng) -> Result<GeneratedData, SynthError> {
    config.validate()?;

    let command = generate_command(config.duration(), config.command(), rng)?;
    let received = simulate_network(&command, config.network(), rng)?;
    let mut response = simulate_response(&received, config.duration(), config.motor(), rng)?;

    let faults = config.faults();
    if faults.flip() {
        response = map_values(response, |values| {
            values.reverse();
        })?;
    }
    if faults.negate() {
        response = map_values(response, |values| {
            for v in values.iter_mut() {
                *v = -*v;
            }
        })?;
    }

    info!(
        n_command = command.len(),
        n_response = response.len(),
        flip = faults.flip(),
        negate = faults.negate(),
        "synthetic pair generated"
    );

    Ok(GeneratedData { command, response })
}

/// Rebuild a series with transformed values on unchanged timestamps.
fn map_values(
    series: SampledSeries,
    transform: impl FnOnce(&mut Vec<f64>),
) -> Result<SampledSeries, SynthError> {
    let timestamps = series.timestamps().to_vec();
    let mut values = series.values().to_vec();
    transform(&mut values);
    Ok(SampledSeries::new(timestamps, values)?)
}
