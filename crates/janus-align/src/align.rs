//! Method dispatch and result derivation.

use janus_dtw::{ApproxDtw, ExactDtw, SignalView, WarpingPath};
use janus_resample::{ResampledPair, SampledSeries, resample_pair};
use janus_xcorr::{full_cross_correlation, pearson, windowed_cross_correlation};
use tracing::{debug, instrument};

use crate::config::AlignConfig;
use crate::error::AlignError;
use crate::method::Method;
use crate::result::AlignmentResult;

/// Align a raw command/response pair with the selected method.
///
/// Resamples both series onto the shared grid, then delegates to
/// [`align_resampled`]. Pure function of its inputs; no state persists
/// between calls.
///
/// # Errors
///
/// Structural failures (invalid configuration, non-overlapping time ranges,
/// matcher preconditions) propagate immediately; numeric degeneracies are
/// absorbed into sentinel scores instead.
#[instrument(skip_all, fields(method = %method))]
pub fn align(
    command: &SampledSeries,
    response: &SampledSeries,
    method: Method,
    config: &AlignConfig,
) -> Result<AlignmentResult, AlignError> {
    config.validate()?;
    let pair = resample_pair(command, response, config.resample())?;
    align_resampled(&pair, method, config)
}

/// Align an already-resampled pair with the selected method.
///
/// Lets the orchestrator resample once, persist the pair, and run several
/// methods over the same grid.
#[instrument(skip_all, fields(method = %method, n = pair.len()))]
pub fn align_resampled(
    pair: &ResampledPair,
    method: Method,
    config: &AlignConfig,
) -> Result<AlignmentResult, AlignError> {
    match method {
        Method::DtwExact => {
            let cmd = SignalView::new(pair.command())?;
            let resp = SignalView::new(pair.response())?;
            let (cost, path) = ExactDtw::new().align(cmd, resp);
            debug!(cost = cost.value(), path_len = path.len(), "exact DTW complete");
            Ok(assemble_from_path(method, path, pair))
        }
        Method::DtwApprox => {
            let cmd = SignalView::new(pair.command())?;
            let resp = SignalView::new(pair.response())?;
            let matcher = ApproxDtw::with_radius(config.dtw_radius());
            let (cost, path) = matcher.align(cmd, resp);
            debug!(cost = cost.value(), path_len = path.len(), "approximate DTW complete");
            Ok(assemble_from_path(method, path, pair))
        }
        Method::CcWindowed => {
            let est =
                windowed_cross_correlation(pair.command(), pair.response(), config.max_shift())?;
            debug!(shift_samples = est.shift_samples, corr = est.correlation, "windowed CC complete");
            let shift_seconds = est.shift_samples as f64 * pair.dt();
            Ok(assemble_from_shift(method, shift_seconds, est.correlation, pair))
        }
        Method::CcFull => {
            let est = full_cross_correlation(pair.command(), pair.response(), pair.dt())?;
            debug!(shift_seconds = est.shift_seconds, corr = est.correlation, "full CC complete");
            Ok(assemble_from_shift(method, est.shift_seconds, est.correlation, pair))
        }
    }
}

/// Derive shift, jitter, and score from a DTW warping path.
///
/// The path is boundary-trimmed first; the per-match time offsets
/// `t[resp] - t[cmd]` then give the global shift (mean) and jitter
/// (population standard deviation). The score is the Pearson correlation of
/// the matched values, 0.0 when fewer than 2 pairs remain or the
/// correlation is undefined.
fn assemble_from_path(method: Method, path: WarpingPath, pair: &ResampledPair) -> AlignmentResult {
    let cleaned = path.trim_boundary_runs();
    let ts = pair.timestamps();

    let offsets: Vec<f64> = cleaned
        .steps()
        .iter()
        .map(|s| ts[s.resp] - ts[s.cmd])
        .collect();

    let (global_shift, jitter) = if offsets.len() < 2 {
        (offsets.first().copied().unwrap_or(0.0), 0.0)
    } else {
        let n = offsets.len() as f64;
        let mean = offsets.iter().sum::<f64>() / n;
        let variance = offsets.iter().map(|d| (d - mean) * (d - mean)).sum::<f64>() / n;
        (mean, variance.sqrt())
    };

    let score = if cleaned.len() < 2 {
        0.0
    } else {
        let matched_cmd: Vec<f64> = cleaned.steps().iter().map(|s| pair.command()[s.cmd]).collect();
        let matched_resp: Vec<f64> = cleaned
            .steps()
            .iter()
            .map(|s| pair.response()[s.resp])
            .collect();
        pearson(&matched_cmd, &matched_resp).unwrap_or(0.0)
    };

    AlignmentResult {
        method,
        global_shift,
        jitter,
        path: cleaned,
        score,
    }
}

/// Derive a result from a single global shift.
///
/// Cross-correlation methods model no local variation, so jitter is zero
/// and the path is synthesized as the constant-offset correspondence
/// `{(i, i + shift_samples)}` for downstream consumers expecting one.
fn assemble_from_shift(
    method: Method,
    shift_seconds: f64,
    correlation: f64,
    pair: &ResampledPair,
) -> AlignmentResult {
    let shift_samples = (shift_seconds / pair.dt()).round() as i64;
    let m = pair.response().len() as i64;

    let pairs: Vec<(usize, usize)> = (0..pair.command().len() as i64)
        .filter_map(|i| {
            let j = i + shift_samples;
            (j >= 0 && j < m).then(|| (i as usize, j as usize))
        })
        .collect();

    AlignmentResult {
        method,
        global_shift: shift_seconds,
        jitter: 0.0,
        path: WarpingPath::from_pairs(pairs),
        score: correlation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use janus_resample::ResampleConfig;

    const FREQ: f64 = 200.0;
    const DT: f64 = 1.0 / FREQ;

    /// Uniformly sampled sine, optionally delayed in time.
    fn sine_series(n: usize, delay: f64) -> SampledSeries {
        let ts: Vec<f64> = (0..n).map(|i| i as f64 * DT).collect();
        let vs: Vec<f64> = ts
            .iter()
            .map(|&t| (2.0 * std::f64::consts::PI * 1.0 * (t - delay)).sin() * 10.0)
            .collect();
        SampledSeries::new(ts, vs).unwrap()
    }

    fn config() -> AlignConfig {
        AlignConfig::new().with_resample(ResampleConfig::new().with_target_freq_hz(FREQ))
    }

    #[test]
    fn windowed_cc_recovers_sample_shift() {
        let cmd = sine_series(600, 0.0);
        let resp = sine_series(600, 0.05); // 10 samples at 200 Hz
        let result = align(&cmd, &resp, Method::CcWindowed, &config()).unwrap();

        assert!((result.global_shift - 0.05).abs() < DT / 2.0);
        assert!(result.score > 0.99);
        assert_eq!(result.jitter, 0.0);
        assert!(!result.path.is_empty());
    }

    #[test]
    fn full_cc_recovers_shift_in_seconds() {
        let cmd = sine_series(600, 0.0);
        let resp = sine_series(600, 0.05);
        let result = align(&cmd, &resp, Method::CcFull, &config()).unwrap();

        assert!((result.global_shift - 0.05).abs() < DT / 2.0);
        assert!(result.score > 0.9);
        assert_eq!(result.jitter, 0.0);
    }

    #[test]
    fn synthesized_path_has_constant_offset() {
        let cmd = sine_series(400, 0.0);
        let resp = sine_series(400, 0.05);
        let pair = resample_pair(&cmd, &resp, config().resample()).unwrap();
        let result = align_resampled(&pair, Method::CcWindowed, &config()).unwrap();

        let expected = (result.global_shift / DT).round() as i64;
        for step in result.path.steps() {
            assert_eq!(step.resp as i64 - step.cmd as i64, expected);
        }
        // Pairs that would fall off the response are dropped.
        assert_eq!(
            result.path.len(),
            pair.len() - expected.unsigned_abs() as usize
        );
    }

    #[test]
    fn dtw_exact_identical_series_is_perfect() {
        let cmd = sine_series(300, 0.0);
        let result = align(&cmd, &cmd, Method::DtwExact, &config()).unwrap();

        assert!(result.global_shift.abs() < 1e-12);
        assert!(result.jitter.abs() < 1e-12);
        assert!((result.score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn dtw_exact_recovers_mean_shift() {
        let cmd = sine_series(600, 0.0);
        let resp = sine_series(600, 0.05);
        let result = align(&cmd, &resp, Method::DtwExact, &config()).unwrap();

        assert!((result.global_shift - 0.05).abs() < 0.02);
        assert!(result.score > 0.95);
        assert!(result.jitter >= 0.0);
    }

    #[test]
    fn dtw_approx_agrees_with_exact_on_clean_shift() {
        let cmd = sine_series(600, 0.0);
        let resp = sine_series(600, 0.05);
        let cfg = config().with_dtw_radius(12);
        let exact = align(&cmd, &resp, Method::DtwExact, &cfg).unwrap();
        let approx = align(&cmd, &resp, Method::DtwApprox, &cfg).unwrap();

        assert!((exact.global_shift - approx.global_shift).abs() < 0.01);
        assert!(approx.score > 0.95);
    }

    #[test]
    fn constant_response_scores_sentinel() {
        let cmd = sine_series(200, 0.0);
        let ts: Vec<f64> = (0..200).map(|i| i as f64 * DT).collect();
        let resp = SampledSeries::new(ts, vec![3.0; 200]).unwrap();

        let windowed = align(&cmd, &resp, Method::CcWindowed, &config()).unwrap();
        assert!((windowed.score + 1.0).abs() < 1e-12);

        let dtw = align(&cmd, &resp, Method::DtwExact, &config()).unwrap();
        assert_eq!(dtw.score, 0.0);
    }

    #[test]
    fn non_overlapping_input_fails() {
        let cmd = sine_series(100, 0.0);
        let ts: Vec<f64> = (0..100).map(|i| 1000.0 + i as f64 * DT).collect();
        let vs = vec![1.0; 100];
        let resp = SampledSeries::new(ts, vs).unwrap();

        let result = align(&cmd, &resp, Method::CcFull, &config());
        assert!(matches!(result, Err(AlignError::Resample(_))));
    }
}
