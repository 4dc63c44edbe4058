//! Network transport simulation: delay, jitter, loss, reordering.

use rand::Rng;
use rand_distr::Distribution;
use tracing::{debug, instrument};

use janus_resample::SampledSeries;

use crate::command::normal;
use crate::config::NetworkConfig;
use crate::error::SynthError;
use crate::strictly_increasing;

/// Simulate transport of the command series over a lossy network.
///
/// Each packet receives the mean delay, Gaussian jitter while inside the
/// jitter window, and the configured extra delay while inside the
/// extra-delay window; delays are clamped non-negative. Packets are lost
/// with `loss_prob`, then sorted by arrival time. A packet that arrives
/// after a later-sent packet has already been accepted is discarded, so the
/// receiver only ever sees commands in send order.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`SynthError::InvalidConfig`] | Configuration fails validation |
/// | [`SynthError::Series`] | Every packet was lost |
#[instrument(skip_all, fields(n = command.len()))]
pub fn simulate_network(
    command: &SampledSeries,
    config: &NetworkConfig,
    rng: &mut impl Rng,
) -> Result<SampledSeries, SynthError> {
    config.validate()?;

    let jitter = normal(config.jitter_std())?;
    let (jitter_start, jitter_end) = config.jitter_window();
    let (extra_start, extra_end) = config.extra_delay_window();

    struct Packet {
        send: f64,
        recv: f64,
        value: f64,
    }

    let mut packets: Vec<Packet> = command
        .timestamps()
        .iter()
        .zip(command.values())
        .filter_map(|(&send, &value)| {
            let mut delay = config.delay_mean();
            let j = jitter.sample(rng);
            if send >= jitter_start && send <= jitter_end {
                delay += j;
            }
            if send >= extra_start && send <= extra_end {
                delay += config.extra_delay_amount();
            }
            let delay = delay.max(0.0);

            if rng.r#gen::<f64>() <= config.loss_prob() {
                return None;
            }
            Some(Packet {
                send,
                recv: send + delay,
                value,
            })
        })
        .collect();

    packets.sort_by(|a, b| a.recv.total_cmp(&b.recv));

    // Drop packets overtaken in flight: once a later-sent packet has been
    // accepted, earlier-sent stragglers are stale.
    let mut timestamps = Vec::with_capacity(packets.len());
    let mut values = Vec::with_capacity(packets.len());
    let mut latest_send = f64::NEG_INFINITY;
    for packet in packets {
        if packet.send > latest_send {
            timestamps.push(packet.recv);
            values.push(packet.value);
            latest_send = packet.send;
        }
    }

    let n_dropped = command.len() - timestamps.len();
    debug!(n_received = timestamps.len(), n_dropped, "network transport simulated");

    let (ts, vs) = strictly_increasing(timestamps, values);
    Ok(SampledSeries::new(ts, vs)?)
}
