//! High-rate response simulation.

use rand::Rng;
use rand_distr::{Distribution, Normal};
use tracing::{debug, instrument};

use janus_resample::SampledSeries;

use crate::command::normal;
use crate::config::{ControllerModel, Disturbance, MotorConfig};
use crate::error::SynthError;

/// Simulate the motor tracking received commands at a fixed sample rate.
///
/// At every response sample the latest received command (by arrival time)
/// is the tracking target; before the first arrival the target is zero.
/// The first-order-lag controller applies the configured physical
/// disturbances; the PD controller integrates velocity from proportional
/// and derivative error terms.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`SynthError::InvalidConfig`] | Configuration or duration is invalid |
#[instrument(skip_all, fields(duration, n_received = received.len()))]
pub fn simulate_response(
    received: &SampledSeries,
    duration: f64,
    config: &MotorConfig,
    rng: &mut impl Rng,
) -> Result<SampledSeries, SynthError> {
    config.validate()?;
    if !duration.is_finite() || duration <= 0.0 {
        return Err(SynthError::InvalidConfig {
            reason: format!("duration must be finite and positive, got {duration}"),
        });
    }

    let dt = 1.0 / config.sample_freq_hz();
    let n = (duration * config.sample_freq_hz()).ceil() as usize;
    let timestamps: Vec<f64> = (0..n).map(|k| k as f64 * dt).collect();

    let values = match config.controller() {
        ControllerModel::FirstOrderLag { time_constant } => first_order_lag(
            received,
            &timestamps,
            dt,
            time_constant,
            config.disturbances(),
            rng,
        )?,
        ControllerModel::PdController { kp, kd } => {
            pd_controller(received, &timestamps, dt, kp, kd)
        }
    };

    debug!(n, "response simulated");
    Ok(SampledSeries::new(timestamps, values)?)
}

fn first_order_lag(
    received: &SampledSeries,
    timestamps: &[f64],
    dt: f64,
    time_constant: f64,
    disturbances: &[Disturbance],
    rng: &mut impl Rng,
) -> Result<Vec<f64>, SynthError> {
    let alpha = 1.0 - (-dt / time_constant).exp();

    // Pre-build the overheat noise distributions so sampling stays cheap.
    let overheat_noise: Vec<Option<Normal<f64>>> = disturbances
        .iter()
        .map(|d| match d {
            Disturbance::Overheat { noise_std, .. } => normal(*noise_std).map(Some),
            _ => Ok(None),
        })
        .collect::<Result<_, _>>()?;

    let mut angle = 0.0;
    let mut cmd_idx = 0;
    let mut values = Vec::with_capacity(timestamps.len());

    for &t in timestamps {
        while cmd_idx < received.len() && received.timestamps()[cmd_idx] <= t {
            cmd_idx += 1;
        }
        let target = if cmd_idx > 0 {
            received.values()[cmd_idx - 1]
        } else {
            0.0
        };

        let mut alpha_eff = alpha;
        let mut noise = 0.0;
        for (disturbance, dist) in disturbances.iter().zip(&overheat_noise) {
            match disturbance {
                Disturbance::HeavyObject {
                    start_time,
                    end_time,
                    reduction_factor,
                } if (*start_time..=*end_time).contains(&t) => {
                    alpha_eff *= reduction_factor;
                }
                Disturbance::Overheat {
                    start_time,
                    end_time,
                    torque_reduction,
                    probability,
                    ..
                } if (*start_time..=*end_time).contains(&t) => {
                    alpha_eff *= torque_reduction;
                    if rng.r#gen::<f64>() < *probability
                        && let Some(dist) = dist
                    {
                        noise = dist.sample(rng);
                    }
                }
                _ => {}
            }
        }

        angle = (1.0 - alpha_eff) * angle + alpha_eff * target + noise;

        for disturbance in disturbances {
            if let Disturbance::WallContact {
                start_time,
                end_time,
                max_angle,
            } = disturbance
                && (*start_time..=*end_time).contains(&t)
            {
                angle = angle.min(*max_angle);
            }
        }

        values.push(angle);
    }

    Ok(values)
}

fn pd_controller(
    received: &SampledSeries,
    timestamps: &[f64],
    dt: f64,
    kp: f64,
    kd: f64,
) -> Vec<f64> {
    let mut angle = 0.0;
    let mut velocity = 0.0;
    let mut prev_error = 0.0;
    let mut cmd_idx = 0;
    let mut values = Vec::with_capacity(timestamps.len());

    for (k, &t) in timestamps.iter().enumerate() {
        while cmd_idx < received.len() && received.timestamps()[cmd_idx] <= t {
            cmd_idx += 1;
        }
        let target = if cmd_idx > 0 {
            received.values()[cmd_idx - 1]
        } else {
            0.0
        };

        let error = target - angle;
        let error_derivative = if k > 0 { (error - prev_error) / dt } else { 0.0 };
        prev_error = error;

        let acceleration = kp * error + kd * error_derivative;
        velocity += acceleration * dt;
        angle += velocity * dt;

        values.push(angle);
    }

    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn step_command(value: f64) -> SampledSeries {
        // A single command arriving at t = 0.1.
        SampledSeries::new(vec![0.1], vec![value]).unwrap()
    }

    fn motor() -> MotorConfig {
        MotorConfig::new().with_sample_freq_hz(100.0)
    }

    #[test]
    fn sample_count_matches_duration() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let response = simulate_response(&step_command(1.0), 2.0, &motor(), &mut rng).unwrap();
        assert_eq!(response.len(), 200);
        assert_eq!(response.timestamps()[0], 0.0);
    }

    #[test]
    fn first_order_lag_converges_to_step() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let response = simulate_response(&step_command(10.0), 2.0, &motor(), &mut rng).unwrap();

        // Zero until the command arrives, then rising toward 10.
        assert!(response.values()[5].abs() < 1e-12);
        let last = *response.values().last().unwrap();
        assert!((last - 10.0).abs() < 0.1, "final angle {last}");

        let mid = response.values()[response.len() / 2];
        assert!(mid > 0.0 && mid < 10.0 + 1e-9);
    }

    #[test]
    fn heavy_object_slows_response() {
        let slow_motor = motor().with_disturbance(Disturbance::HeavyObject {
            start_time: 0.0,
            end_time: 10.0,
            reduction_factor: 0.2,
        });
        let mut rng1 = ChaCha8Rng::seed_from_u64(0);
        let mut rng2 = ChaCha8Rng::seed_from_u64(0);
        let nominal = simulate_response(&step_command(10.0), 1.0, &motor(), &mut rng1).unwrap();
        let slowed = simulate_response(&step_command(10.0), 1.0, &slow_motor, &mut rng2).unwrap();

        // At every sample after the step, the loaded motor trails the nominal one.
        for (n, s) in nominal.values().iter().zip(slowed.values()).skip(20) {
            assert!(*s <= n + 1e-12);
        }
        assert!(slowed.values()[50] < nominal.values()[50]);
    }

    #[test]
    fn wall_clamps_angle() {
        let walled = motor().with_disturbance(Disturbance::WallContact {
            start_time: 0.0,
            end_time: 10.0,
            max_angle: 3.0,
        });
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let response = simulate_response(&step_command(10.0), 2.0, &walled, &mut rng).unwrap();
        for &v in response.values() {
            assert!(v <= 3.0 + 1e-12);
        }
    }

    #[test]
    fn pd_controller_tracks_step() {
        let pd = motor().with_controller(ControllerModel::PdController { kp: 20.0, kd: 4.0 });
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let response = simulate_response(&step_command(5.0), 4.0, &pd, &mut rng).unwrap();

        let last = *response.values().last().unwrap();
        assert!((last - 5.0).abs() < 0.5, "final angle {last}");
    }

    #[test]
    fn zero_target_before_first_arrival() {
        let late = SampledSeries::new(vec![1.5], vec![8.0]).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let response = simulate_response(&late, 2.0, &motor(), &mut rng).unwrap();
        for (&t, &v) in response.timestamps().iter().zip(response.values()) {
            if t < 1.5 {
                assert_eq!(v, 0.0);
            }
        }
    }
}
