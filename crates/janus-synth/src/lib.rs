//! Synthetic data generation for alignment experiments.
//!
//! Reproduces the physical flow the aligner is built for: a teleoperator
//! emits low-rate commands with irregular timing, the network delays and
//! drops them, and a motor controller tracks whatever arrives at a fixed
//! high rate. Every stage takes an explicit RNG so fixtures are
//! reproducible from a seed.

mod command;
mod config;
mod error;
mod generate;
mod network;
mod response;

pub use command::generate_command;
pub use config::{
    CommandConfig, ControllerModel, Disturbance, FaultConfig, MotorConfig, NetworkConfig,
    SynthConfig,
};
pub use error::SynthError;
pub use generate::{GeneratedData, generate};
pub use network::simulate_network;
pub use response::simulate_response;

/// Drop samples that do not strictly advance the clock.
///
/// Jittered or delayed timestamps can collide after sorting; the series
/// types require strictly increasing time.
pub(crate) fn strictly_increasing(
    timestamps: Vec<f64>,
    values: Vec<f64>,
) -> (Vec<f64>, Vec<f64>) {
    let mut ts = Vec::with_capacity(timestamps.len());
    let mut vs = Vec::with_capacity(values.len());
    let mut last = f64::NEG_INFINITY;
    for (t, v) in timestamps.into_iter().zip(values) {
        if t > last {
            ts.push(t);
            vs.push(v);
            last = t;
        }
    }
    (ts, vs)
}
