//! Exhaustive windowed cross-correlation over a bounded shift range.

use tracing::instrument;

use crate::error::XcorrError;
use crate::pearson::pearson;

/// Sentinel correlation assigned to a shift whose overlap is too short or
/// whose Pearson coefficient is undefined. Never selected unless every
/// candidate shift is degenerate.
pub const DEGENERATE_CORRELATION: f64 = -1.0;

/// Best shift found by the windowed search, in samples.
///
/// A positive shift means the response lags the command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShiftEstimate {
    /// Shift in samples, in `[-max_shift, max_shift]`.
    pub shift_samples: i64,
    /// Pearson correlation at the best shift.
    pub correlation: f64,
}

/// Exhaustive cross-correlation of two equal-length signals over every
/// integer shift in `[-max_shift, max_shift]`.
///
/// For each shift the overlapping slices are correlated with Pearson's
/// coefficient; zero shift correlates the full signals. Degenerate slices
/// (fewer than 2 samples, or an undefined coefficient) score
/// [`DEGENERATE_CORRELATION`]. Exact correlation ties resolve to the later
/// (larger) shift so an exactly-shifted copy reports its structural shift.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`XcorrError::EmptySignal`] | Either signal is empty |
/// | [`XcorrError::LengthMismatch`] | The signals have different lengths |
#[instrument(skip(cmd, resp), fields(n = cmd.len(), max_shift))]
pub fn windowed_cross_correlation(
    cmd: &[f64],
    resp: &[f64],
    max_shift: usize,
) -> Result<ShiftEstimate, XcorrError> {
    if cmd.is_empty() || resp.is_empty() {
        return Err(XcorrError::EmptySignal);
    }
    if cmd.len() != resp.len() {
        return Err(XcorrError::LengthMismatch {
            expected: cmd.len(),
            got: resp.len(),
        });
    }

    let n = cmd.len();
    let max = max_shift as i64;
    let mut best_shift = -max;
    let mut best_corr = f64::NEG_INFINITY;

    for shift in -max..=max {
        let corr = correlation_at_shift(cmd, resp, n, shift);
        if corr >= best_corr {
            best_corr = corr;
            best_shift = shift;
        }
    }

    Ok(ShiftEstimate {
        shift_samples: best_shift,
        correlation: best_corr,
    })
}

/// Pearson correlation of the overlap at one shift, or the sentinel.
fn correlation_at_shift(cmd: &[f64], resp: &[f64], n: usize, shift: i64) -> f64 {
    let (a, b): (&[f64], &[f64]) = if shift >= 0 {
        let s = shift as usize;
        if s >= n {
            return DEGENERATE_CORRELATION;
        }
        (&cmd[..n - s], &resp[s..])
    } else {
        let s = (-shift) as usize;
        if s >= n {
            return DEGENERATE_CORRELATION;
        }
        (&cmd[s..], &resp[..n - s])
    };

    if a.len() < 2 {
        return DEGENERATE_CORRELATION;
    }
    match pearson(a, b) {
        Some(r) if r.is_finite() => r,
        _ => DEGENERATE_CORRELATION,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_mismatch_rejected() {
        let a = [1.0, 2.0, 3.0, 4.0, 5.0];
        let b = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let result = windowed_cross_correlation(&a, &b, 2);
        assert!(matches!(
            result,
            Err(XcorrError::LengthMismatch {
                expected: 5,
                got: 6
            })
        ));
    }

    #[test]
    fn empty_rejected() {
        let result = windowed_cross_correlation(&[], &[], 2);
        assert!(matches!(result, Err(XcorrError::EmptySignal)));
    }

    #[test]
    fn concrete_shifted_ramp_case() {
        let a = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let b = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        let est = windowed_cross_correlation(&a, &b, 1).unwrap();
        assert_eq!(est.shift_samples, 1);
        assert!((est.correlation - 1.0).abs() < 1e-12);
    }

    #[test]
    fn recovers_negative_shift() {
        // resp leads cmd by 2 samples: resp[j] = cmd[j + 2] + noise-free peak.
        let cmd = [0.0, 0.0, 0.0, 1.0, 4.0, 1.0, 0.0, 0.0, 0.0, 0.0];
        let resp = [0.0, 1.0, 4.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        let est = windowed_cross_correlation(&cmd, &resp, 4).unwrap();
        assert_eq!(est.shift_samples, -2);
        assert!((est.correlation - 1.0).abs() < 1e-9);
    }

    #[test]
    fn recovers_positive_shift() {
        let cmd = [0.0, 1.0, 4.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        let resp = [0.0, 0.0, 0.0, 1.0, 4.0, 1.0, 0.0, 0.0, 0.0, 0.0];
        let est = windowed_cross_correlation(&cmd, &resp, 4).unwrap();
        assert_eq!(est.shift_samples, 2);
        assert!((est.correlation - 1.0).abs() < 1e-9);
    }

    #[test]
    fn zero_shift_uses_full_overlap() {
        let a = [1.0, 3.0, 2.0, 5.0, 4.0];
        let est = windowed_cross_correlation(&a, &a, 0).unwrap();
        assert_eq!(est.shift_samples, 0);
        assert!((est.correlation - 1.0).abs() < 1e-12);
    }

    #[test]
    fn constant_signal_all_degenerate() {
        let a = [2.0, 2.0, 2.0, 2.0];
        let b = [1.0, 2.0, 3.0, 4.0];
        let est = windowed_cross_correlation(&a, &b, 1).unwrap();
        assert!((est.correlation - DEGENERATE_CORRELATION).abs() < 1e-12);
    }

    #[test]
    fn oversized_shift_range_still_completes() {
        // max_shift beyond the signal length leaves no overlap at the
        // extremes; those shifts score the sentinel and are never selected.
        let cmd = [0.0, 1.0, 4.0, 1.0];
        let resp = [1.0, 4.0, 1.0, 0.0];
        let est = windowed_cross_correlation(&cmd, &resp, 10).unwrap();
        assert_eq!(est.shift_samples, -1);
        assert!(est.correlation > 0.99);
    }
}
