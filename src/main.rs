use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

use janus_align::{AlignConfig, AlignmentResult, Method, align_resampled};
use janus_io::{COMMAND_FILE, RESPONSE_FILE, ResultWriter, SeriesReader};
use janus_resample::{InterpolationMethod, ResampleConfig, resample_pair};
use janus_synth::{
    CommandConfig, ControllerModel, FaultConfig, MotorConfig, NetworkConfig, SynthConfig, generate,
};

#[derive(Parser)]
#[command(name = "janus")]
#[command(about = "Time alignment of asynchronously sampled command/response signals")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// RNG seed for reproducibility
    #[arg(long, default_value_t = 42, global = true)]
    seed: u64,

    /// Enable verbose (debug-level) logging
    #[arg(long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Number of threads for parallel computation (defaults to all cores)
    #[arg(long, global = true)]
    threads: Option<usize>,
}

/// Shared resampling and matcher tuning parameters.
#[derive(Args, Debug, Clone)]
struct TuningArgs {
    /// Shared grid frequency in Hz
    #[arg(long, default_value_t = 200.0)]
    target_freq_hz: f64,

    /// Interpolation method: "linear", "nearest", "previous", or "cubic"
    #[arg(long, default_value = "linear")]
    interpolation: String,

    /// Windowed cross-correlation search bound, in samples
    #[arg(long, default_value_t = 100)]
    max_shift: usize,

    /// Approximate-DTW corridor radius
    #[arg(long, default_value_t = 1)]
    dtw_radius: usize,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a synthetic command/response pair
    Generate {
        /// Output directory for the CSV files
        #[arg(long, default_value = "data")]
        output_dir: PathBuf,

        /// Run duration in seconds
        #[arg(long, default_value_t = 10.0)]
        duration: f64,

        /// Nominal command rate in Hz
        #[arg(long, default_value_t = 20.0)]
        command_freq_hz: f64,

        /// Response sampling rate in Hz
        #[arg(long, default_value_t = 200.0)]
        response_freq_hz: f64,

        /// Commanded sine frequency in Hz
        #[arg(long, default_value_t = 1.0)]
        angle_freq_hz: f64,

        /// Initial sine amplitude
        #[arg(long, default_value_t = 30.0)]
        amplitude: f64,

        /// Command value-noise standard deviation
        #[arg(long, default_value_t = 0.5)]
        noise_std: f64,

        /// Probability that a command frame is skipped
        #[arg(long, default_value_t = 0.05)]
        skip_prob: f64,

        /// Mean network delay in seconds
        #[arg(long, default_value_t = 0.05)]
        delay_mean: f64,

        /// Network jitter standard deviation in seconds
        #[arg(long, default_value_t = 0.01)]
        jitter_std: f64,

        /// Packet loss probability
        #[arg(long, default_value_t = 0.02)]
        loss_prob: f64,

        /// Motor time constant in seconds (first-order lag)
        #[arg(long, default_value_t = 0.05)]
        motor_time_constant: f64,

        /// Use a PD controller with the given proportional gain instead of
        /// the first-order lag
        #[arg(long)]
        pd_kp: Option<f64>,

        /// Derivative gain for the PD controller
        #[arg(long, default_value_t = 0.1)]
        pd_kd: f64,

        /// Reverse the response values in time (negative fixture)
        #[arg(long, default_value_t = false)]
        flip: bool,

        /// Negate the response values (negative fixture)
        #[arg(long, default_value_t = false)]
        negate: bool,
    },

    /// Align a command/response pair and write one artifact per method
    Align {
        /// Directory containing command.csv and response.csv
        #[arg(long, default_value = "data")]
        input_dir: PathBuf,

        /// Output directory for resampled CSVs and result JSON files
        #[arg(long, default_value = "data")]
        output_dir: PathBuf,

        /// Method to run: "dtw-exact", "dtw-approx", "cc-windowed", or
        /// "cc-full" (all four when omitted)
        #[arg(long)]
        method: Option<String>,

        #[command(flatten)]
        tuning: TuningArgs,
    },
}

// --- JSON stdout output structs ---

#[derive(Serialize)]
struct GenerateOutput {
    n_command: usize,
    n_response: usize,
    duration: f64,
    output_dir: String,
}

#[derive(Serialize)]
struct AlignOutput {
    n_samples: usize,
    target_freq_hz: f64,
    results: Vec<MethodSummary>,
}

#[derive(Serialize)]
struct MethodSummary {
    method: String,
    global_shift: f64,
    jitter: f64,
    score: f64,
    runtime: f64,
}

fn parse_interpolation(s: &str) -> Result<InterpolationMethod> {
    match s {
        "linear" => Ok(InterpolationMethod::Linear),
        "nearest" => Ok(InterpolationMethod::Nearest),
        "previous" => Ok(InterpolationMethod::Previous),
        "cubic" => Ok(InterpolationMethod::Cubic),
        other => anyhow::bail!(
            "unknown interpolation method: {other} (expected linear, nearest, previous, or cubic)"
        ),
    }
}

fn parse_methods(method: Option<&str>) -> Result<Vec<Method>> {
    match method {
        None => Ok(Method::ALL.to_vec()),
        Some(name) => {
            let parsed = name
                .parse::<Method>()
                .with_context(|| format!("cannot parse --method {name}"))?;
            Ok(vec![parsed])
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match (cli.verbose, cli.quiet) {
        (true, _) => "debug",
        (_, true) => "error",
        _ => "info",
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Configure Rayon thread pool
    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to configure thread pool")?;
        info!(threads, "thread pool configured");
    }

    match cli.command {
        Command::Generate {
            output_dir,
            duration,
            command_freq_hz,
            response_freq_hz,
            angle_freq_hz,
            amplitude,
            noise_std,
            skip_prob,
            delay_mean,
            jitter_std,
            loss_prob,
            motor_time_constant,
            pd_kp,
            pd_kd,
            flip,
            negate,
        } => {
            let controller = match pd_kp {
                Some(kp) => ControllerModel::PdController { kp, kd: pd_kd },
                None => ControllerModel::FirstOrderLag {
                    time_constant: motor_time_constant,
                },
            };

            let config = SynthConfig::new()
                .with_duration(duration)
                .with_command(
                    CommandConfig::new()
                        .with_nominal_freq_hz(command_freq_hz)
                        .with_angle_freq_hz(angle_freq_hz)
                        .with_amplitude(amplitude)
                        .with_noise_std(noise_std)
                        .with_skip_prob(skip_prob),
                )
                .with_network(
                    NetworkConfig::new()
                        .with_delay_mean(delay_mean)
                        .with_jitter_std(jitter_std)
                        .with_loss_prob(loss_prob),
                )
                .with_motor(
                    MotorConfig::new()
                        .with_sample_freq_hz(response_freq_hz)
                        .with_controller(controller),
                )
                .with_faults(FaultConfig::new().with_flip(flip).with_negate(negate));

            let mut rng = ChaCha8Rng::seed_from_u64(cli.seed);
            let data = generate(&config, &mut rng).context("data generation failed")?;
            info!(
                n_command = data.command.len(),
                n_response = data.response.len(),
                "synthetic pair generated"
            );

            let writer = ResultWriter::new(&output_dir)?;
            writer.write_series(COMMAND_FILE, "target_angle", &data.command)?;
            writer.write_series(RESPONSE_FILE, "motor_angle", &data.response)?;

            let output = GenerateOutput {
                n_command: data.command.len(),
                n_response: data.response.len(),
                duration,
                output_dir: output_dir.display().to_string(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        Command::Align {
            input_dir,
            output_dir,
            method,
            tuning,
        } => {
            let methods = parse_methods(method.as_deref())?;
            let interpolation = parse_interpolation(&tuning.interpolation)?;

            let config = AlignConfig::new()
                .with_max_shift(tuning.max_shift)
                .with_dtw_radius(tuning.dtw_radius)
                .with_resample(
                    ResampleConfig::new()
                        .with_target_freq_hz(tuning.target_freq_hz)
                        .with_interpolation(interpolation),
                );

            // Read and resample once; every method runs on the same grid.
            let command = SeriesReader::new(&input_dir.join(COMMAND_FILE))
                .read()
                .context("failed to read command CSV")?;
            let response = SeriesReader::new(&input_dir.join(RESPONSE_FILE))
                .read()
                .context("failed to read response CSV")?;

            let pair = resample_pair(&command, &response, config.resample())
                .context("resampling failed")?;
            info!(n = pair.len(), dt = pair.dt(), "pair resampled");

            let writer = ResultWriter::new(&output_dir)?;
            writer.write_resampled(&pair)?;

            // The methods are independent, so run them on the thread pool.
            let outcomes: Vec<(Method, Result<(AlignmentResult, f64)>)> = methods
                .par_iter()
                .map(|&m| {
                    let start = Instant::now();
                    let result = align_resampled(&pair, m, &config)
                        .with_context(|| format!("alignment failed for {m}"));
                    (m, result.map(|r| (r, start.elapsed().as_secs_f64())))
                })
                .collect();

            let mut results = Vec::with_capacity(outcomes.len());
            for (m, outcome) in outcomes {
                let (result, runtime) = outcome?;
                writer.write_result(&result, runtime)?;
                info!(
                    method = %m,
                    score = result.score,
                    shift = result.global_shift,
                    jitter = result.jitter,
                    runtime,
                    "method complete"
                );
                results.push(MethodSummary {
                    method: m.name().to_string(),
                    global_shift: result.global_shift,
                    jitter: result.jitter,
                    score: result.score,
                    runtime,
                });
            }

            let output = AlignOutput {
                n_samples: pair.len(),
                target_freq_hz: tuning.target_freq_hz,
                results,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
