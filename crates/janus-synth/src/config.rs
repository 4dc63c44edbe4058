//! Configuration builders for the synthetic data pipeline.

use crate::error::SynthError;

/// Configuration for the low-rate command generator.
///
/// Defaults: `nominal_freq_hz = 20.0`, `irregularity = 0.002`,
/// `skip_prob = 0.05`, `amplitude = 30.0`, `angle_freq_hz = 1.0`,
/// `noise_std = 0.5`.
#[derive(Debug, Clone, Copy)]
pub struct CommandConfig {
    nominal_freq_hz: f64,
    irregularity: f64,
    skip_prob: f64,
    amplitude: f64,
    angle_freq_hz: f64,
    noise_std: f64,
}

impl CommandConfig {
    /// Creates a new configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nominal_freq_hz: 20.0,
            irregularity: 0.002,
            skip_prob: 0.05,
            amplitude: 30.0,
            angle_freq_hz: 1.0,
            noise_std: 0.5,
        }
    }

    /// Sets the nominal command rate in Hz.
    #[must_use]
    pub fn with_nominal_freq_hz(mut self, freq: f64) -> Self {
        self.nominal_freq_hz = freq;
        self
    }

    /// Sets the timestamp jitter standard deviation in seconds.
    #[must_use]
    pub fn with_irregularity(mut self, irregularity: f64) -> Self {
        self.irregularity = irregularity;
        self
    }

    /// Sets the probability that a command frame is skipped.
    #[must_use]
    pub fn with_skip_prob(mut self, skip_prob: f64) -> Self {
        self.skip_prob = skip_prob;
        self
    }

    /// Sets the initial sine amplitude.
    #[must_use]
    pub fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude;
        self
    }

    /// Sets the commanded sine frequency in Hz.
    #[must_use]
    pub fn with_angle_freq_hz(mut self, freq: f64) -> Self {
        self.angle_freq_hz = freq;
        self
    }

    /// Sets the additive value-noise standard deviation.
    #[must_use]
    pub fn with_noise_std(mut self, noise_std: f64) -> Self {
        self.noise_std = noise_std;
        self
    }

    /// Returns the nominal command rate in Hz.
    #[must_use]
    pub fn nominal_freq_hz(&self) -> f64 {
        self.nominal_freq_hz
    }

    /// Returns the timestamp jitter standard deviation.
    #[must_use]
    pub fn irregularity(&self) -> f64 {
        self.irregularity
    }

    /// Returns the frame skip probability.
    #[must_use]
    pub fn skip_prob(&self) -> f64 {
        self.skip_prob
    }

    /// Returns the initial sine amplitude.
    #[must_use]
    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    /// Returns the commanded sine frequency in Hz.
    #[must_use]
    pub fn angle_freq_hz(&self) -> f64 {
        self.angle_freq_hz
    }

    /// Returns the value-noise standard deviation.
    #[must_use]
    pub fn noise_std(&self) -> f64 {
        self.noise_std
    }

    /// Validates this configuration.
    pub fn validate(&self) -> Result<(), SynthError> {
        if !self.nominal_freq_hz.is_finite() || self.nominal_freq_hz <= 0.0 {
            return Err(SynthError::InvalidConfig {
                reason: format!(
                    "nominal_freq_hz must be finite and positive, got {}",
                    self.nominal_freq_hz
                ),
            });
        }
        if !self.irregularity.is_finite() || self.irregularity < 0.0 {
            return Err(SynthError::InvalidConfig {
                reason: format!(
                    "irregularity must be finite and non-negative, got {}",
                    self.irregularity
                ),
            });
        }
        if !(0.0..1.0).contains(&self.skip_prob) {
            return Err(SynthError::InvalidConfig {
                reason: format!("skip_prob must be in [0, 1), got {}", self.skip_prob),
            });
        }
        if !self.angle_freq_hz.is_finite() || self.angle_freq_hz <= 0.0 {
            return Err(SynthError::InvalidConfig {
                reason: format!(
                    "angle_freq_hz must be finite and positive, got {}",
                    self.angle_freq_hz
                ),
            });
        }
        if !self.noise_std.is_finite() || self.noise_std < 0.0 {
            return Err(SynthError::InvalidConfig {
                reason: format!(
                    "noise_std must be finite and non-negative, got {}",
                    self.noise_std
                ),
            });
        }
        Ok(())
    }
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration for the network transport simulator.
///
/// Defaults: `delay_mean = 0.05`, `jitter_std = 0.01`, jitter active over
/// the whole run, no extra-delay window, `loss_prob = 0.02`.
#[derive(Debug, Clone, Copy)]
pub struct NetworkConfig {
    delay_mean: f64,
    jitter_std: f64,
    jitter_start_time: f64,
    jitter_end_time: f64,
    extra_delay_start_time: f64,
    extra_delay_end_time: f64,
    extra_delay_amount: f64,
    loss_prob: f64,
}

impl NetworkConfig {
    /// Creates a new configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            delay_mean: 0.05,
            jitter_std: 0.01,
            jitter_start_time: 0.0,
            jitter_end_time: f64::INFINITY,
            extra_delay_start_time: f64::INFINITY,
            extra_delay_end_time: f64::INFINITY,
            extra_delay_amount: 0.0,
            loss_prob: 0.02,
        }
    }

    /// Sets the mean transport delay in seconds.
    #[must_use]
    pub fn with_delay_mean(mut self, delay: f64) -> Self {
        self.delay_mean = delay;
        self
    }

    /// Sets the delay jitter standard deviation in seconds.
    #[must_use]
    pub fn with_jitter_std(mut self, jitter_std: f64) -> Self {
        self.jitter_std = jitter_std;
        self
    }

    /// Restricts jitter to packets sent inside `[start, end]`.
    #[must_use]
    pub fn with_jitter_window(mut self, start: f64, end: f64) -> Self {
        self.jitter_start_time = start;
        self.jitter_end_time = end;
        self
    }

    /// Adds a fixed extra delay to packets sent inside `[start, end]`.
    #[must_use]
    pub fn with_extra_delay(mut self, start: f64, end: f64, amount: f64) -> Self {
        self.extra_delay_start_time = start;
        self.extra_delay_end_time = end;
        self.extra_delay_amount = amount;
        self
    }

    /// Sets the packet loss probability.
    #[must_use]
    pub fn with_loss_prob(mut self, loss_prob: f64) -> Self {
        self.loss_prob = loss_prob;
        self
    }

    /// Returns the mean transport delay.
    #[must_use]
    pub fn delay_mean(&self) -> f64 {
        self.delay_mean
    }

    /// Returns the delay jitter standard deviation.
    #[must_use]
    pub fn jitter_std(&self) -> f64 {
        self.jitter_std
    }

    /// Returns the jitter window as `(start, end)`.
    #[must_use]
    pub fn jitter_window(&self) -> (f64, f64) {
        (self.jitter_start_time, self.jitter_end_time)
    }

    /// Returns the extra-delay window as `(start, end)`.
    #[must_use]
    pub fn extra_delay_window(&self) -> (f64, f64) {
        (self.extra_delay_start_time, self.extra_delay_end_time)
    }

    /// Returns the extra delay amount in seconds.
    #[must_use]
    pub fn extra_delay_amount(&self) -> f64 {
        self.extra_delay_amount
    }

    /// Returns the packet loss probability.
    #[must_use]
    pub fn loss_prob(&self) -> f64 {
        self.loss_prob
    }

    /// Validates this configuration.
    pub fn validate(&self) -> Result<(), SynthError> {
        if !self.delay_mean.is_finite() || self.delay_mean < 0.0 {
            return Err(SynthError::InvalidConfig {
                reason: format!(
                    "delay_mean must be finite and non-negative, got {}",
                    self.delay_mean
                ),
            });
        }
        if !self.jitter_std.is_finite() || self.jitter_std < 0.0 {
            return Err(SynthError::InvalidConfig {
                reason: format!(
                    "jitter_std must be finite and non-negative, got {}",
                    self.jitter_std
                ),
            });
        }
        if !(0.0..1.0).contains(&self.loss_prob) {
            return Err(SynthError::InvalidConfig {
                reason: format!("loss_prob must be in [0, 1), got {}", self.loss_prob),
            });
        }
        if !self.extra_delay_amount.is_finite() || self.extra_delay_amount < 0.0 {
            return Err(SynthError::InvalidConfig {
                reason: format!(
                    "extra_delay_amount must be finite and non-negative, got {}",
                    self.extra_delay_amount
                ),
            });
        }
        Ok(())
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Controller model used to track received commands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControllerModel {
    /// First-order lag: `alpha = 1 - exp(-dt / time_constant)`. Physical
    /// disturbances act on this model.
    FirstOrderLag {
        /// Motor time constant in seconds.
        time_constant: f64,
    },
    /// PD controller integrating velocity from proportional and derivative
    /// error terms.
    PdController {
        /// Proportional gain.
        kp: f64,
        /// Derivative gain.
        kd: f64,
    },
}

/// A physical disturbance applied during a time window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Disturbance {
    /// A heavy payload slows the response by scaling alpha down.
    HeavyObject {
        /// Window start in seconds.
        start_time: f64,
        /// Window end in seconds.
        end_time: f64,
        /// Multiplier applied to alpha, in `(0, 1]`.
        reduction_factor: f64,
    },
    /// Overheating reduces torque and occasionally injects noise.
    Overheat {
        /// Window start in seconds.
        start_time: f64,
        /// Window end in seconds.
        end_time: f64,
        /// Multiplier applied to alpha, in `(0, 1]`.
        torque_reduction: f64,
        /// Per-sample probability of erratic noise.
        probability: f64,
        /// Noise standard deviation when triggered.
        noise_std: f64,
    },
    /// A wall clamps the reachable angle.
    WallContact {
        /// Window start in seconds.
        start_time: f64,
        /// Window end in seconds.
        end_time: f64,
        /// Maximum reachable angle.
        max_angle: f64,
    },
}

/// Configuration for the high-rate response simulator.
///
/// Defaults: `sample_freq_hz = 200.0`, first-order lag with a 0.05 s time
/// constant, no disturbances.
#[derive(Debug, Clone)]
pub struct MotorConfig {
    sample_freq_hz: f64,
    controller: ControllerModel,
    disturbances: Vec<Disturbance>,
}

impl MotorConfig {
    /// Creates a new configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sample_freq_hz: 200.0,
            controller: ControllerModel::FirstOrderLag {
                time_constant: 0.05,
            },
            disturbances: Vec::new(),
        }
    }

    /// Sets the response sampling rate in Hz.
    #[must_use]
    pub fn with_sample_freq_hz(mut self, freq: f64) -> Self {
        self.sample_freq_hz = freq;
        self
    }

    /// Sets the controller model.
    #[must_use]
    pub fn with_controller(mut self, controller: ControllerModel) -> Self {
        self.controller = controller;
        self
    }

    /// Adds a physical disturbance.
    #[must_use]
    pub fn with_disturbance(mut self, disturbance: Disturbance) -> Self {
        self.disturbances.push(disturbance);
        self
    }

    /// Returns the response sampling rate in Hz.
    #[must_use]
    pub fn sample_freq_hz(&self) -> f64 {
        self.sample_freq_hz
    }

    /// Returns the controller model.
    #[must_use]
    pub fn controller(&self) -> ControllerModel {
        self.controller
    }

    /// Returns the configured disturbances.
    #[must_use]
    pub fn disturbances(&self) -> &[Disturbance] {
        &self.disturbances
    }

    /// Validates this configuration.
    pub fn validate(&self) -> Result<(), SynthError> {
        if !self.sample_freq_hz.is_finite() || self.sample_freq_hz <= 0.0 {
            return Err(SynthError::InvalidConfig {
                reason: format!(
                    "sample_freq_hz must be finite and positive, got {}",
                    self.sample_freq_hz
                ),
            });
        }
        match self.controller {
            ControllerModel::FirstOrderLag { time_constant } => {
                if !time_constant.is_finite() || time_constant <= 0.0 {
                    return Err(SynthError::InvalidConfig {
                        reason: format!(
                            "time_constant must be finite and positive, got {time_constant}"
                        ),
                    });
                }
            }
            ControllerModel::PdController { kp, kd } => {
                if !kp.is_finite() || !kd.is_finite() {
                    return Err(SynthError::InvalidConfig {
                        reason: format!("PD gains must be finite, got kp={kp}, kd={kd}"),
                    });
                }
            }
        }
        for d in &self.disturbances {
            if let Disturbance::Overheat { probability, noise_std, .. } = d {
                if !(0.0..=1.0).contains(probability) {
                    return Err(SynthError::InvalidConfig {
                        reason: format!("overheat probability must be in [0, 1], got {probability}"),
                    });
                }
                if !noise_std.is_finite() || *noise_std < 0.0 {
                    return Err(SynthError::InvalidConfig {
                        reason: format!(
                            "overheat noise_std must be finite and non-negative, got {noise_std}"
                        ),
                    });
                }
            }
        }
        Ok(())
    }
}

impl Default for MotorConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Fault injection applied to the finished response, for negative fixtures
/// that should score poorly.
#[derive(Debug, Clone, Copy, Default)]
pub struct FaultConfig {
    flip: bool,
    negate: bool,
}

impl FaultConfig {
    /// Creates a configuration with no faults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reverses the response values in time.
    #[must_use]
    pub fn with_flip(mut self, flip: bool) -> Self {
        self.flip = flip;
        self
    }

    /// Negates the response values.
    #[must_use]
    pub fn with_negate(mut self, negate: bool) -> Self {
        self.negate = negate;
        self
    }

    /// Returns whether the response is reversed in time.
    #[must_use]
    pub fn flip(&self) -> bool {
        self.flip
    }

    /// Returns whether the response is negated.
    #[must_use]
    pub fn negate(&self) -> bool {
        self.negate
    }
}

/// Top-level configuration for one synthetic run.
#[derive(Debug, Clone)]
pub struct SynthConfig {
    duration: f64,
    command: CommandConfig,
    network: NetworkConfig,
    motor: MotorConfig,
    faults: FaultConfig,
}

impl SynthConfig {
    /// Creates a new configuration with a 10 s duration and stage defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            duration: 10.0,
            command: CommandConfig::new(),
            network: NetworkConfig::new(),
            motor: MotorConfig::new(),
            faults: FaultConfig::new(),
        }
    }

    /// Sets the run duration in seconds.
    #[must_use]
    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }

    /// Sets the command generator configuration.
    #[must_use]
    pub fn with_command(mut self, command: CommandConfig) -> Self {
        self.command = command;
        self
    }

    /// Sets the network simulator configuration.
    #[must_use]
    pub fn with_network(mut self, network: NetworkConfig) -> Self {
        self.network = network;
        self
    }

    /// Sets the response simulator configuration.
    #[must_use]
    pub fn with_motor(mut self, motor: MotorConfig) -> Self {
        self.motor = motor;
        self
    }

    /// Sets the fault injection configuration.
    #[must_use]
    pub fn with_faults(mut self, faults: FaultConfig) -> Self {
        self.faults = faults;
        self
    }

    /// Returns the run duration in seconds.
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Returns the command generator configuration.
    #[must_use]
    pub fn command(&self) -> &CommandConfig {
        &self.command
    }

    /// Returns the network simulator configuration.
    #[must_use]
    pub fn network(&self) -> &NetworkConfig {
        &self.network
    }

    /// Returns the response simulator configuration.
    #[must_use]
    pub fn motor(&self) -> &MotorConfig {
        &self.motor
    }

    /// Returns the fault injection configuration.
    #[must_use]
    pub fn faults(&self) -> FaultConfig {
        self.faults
    }

    /// Validates this configuration and every stage.
    pub fn validate(&self) -> Result<(), SynthError> {
        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(SynthError::InvalidConfig {
                reason: format!("duration must be finite and positive, got {}", self.duration),
            });
        }
        self.command.validate()?;
        self.network.validate()?;
        self.motor.validate()?;
        Ok(())
    }
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self::new()
    }
}
