//! Full linear cross-correlation via FFT.

use rustfft::FftPlanner;
use rustfft::num_complex::Complex;
use tracing::instrument;

use crate::error::XcorrError;
use crate::windowed::DEGENERATE_CORRELATION;

/// Best lag found by the full cross-correlation, converted to seconds.
///
/// A positive shift means the response lags the command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LagEstimate {
    /// Time shift in seconds, `-best_lag * dt`.
    pub shift_seconds: f64,
    /// Peak-normalized correlation score. Normalized by
    /// `sqrt(sum(cmd^2) * sum(resp^2))`, which approximates a Pearson score
    /// but is not strictly bounded to `[-1, 1]` for non-centered signals.
    pub correlation: f64,
}

/// Full linear cross-correlation of two equal-length signals.
///
/// Computes `cc[lag] = sum_t cmd[t] * resp[t - lag]` for every lag in
/// `[-(n-1), n-1]` via FFT (zero-padded to the next power of two at least
/// `2n - 1`), picks the first maximal lag, and converts it to seconds with
/// the grid spacing `dt`.
///
/// Zero-energy input has no defined normalization; it is absorbed as a zero
/// shift with the [`DEGENERATE_CORRELATION`] sentinel score.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`XcorrError::EmptySignal`] | Either signal is empty |
/// | [`XcorrError::LengthMismatch`] | The signals have different lengths |
#[instrument(skip(cmd, resp), fields(n = cmd.len(), dt))]
pub fn full_cross_correlation(
    cmd: &[f64],
    resp: &[f64],
    dt: f64,
) -> Result<LagEstimate, XcorrError> {
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
    let energy = (cmd.iter().map(|x| x * x).sum::<f64>()
        * resp.iter().map(|x| x * x).sum::<f64>())
    .sqrt();
    if energy == 0.0 {
        return Ok(LagEstimate {
            shift_seconds: 0.0,
            correlation: DEGENERATE_CORRELATION,
        });
    }

    let npad = (2 * n - 1).next_power_of_two();
    let mut fa = to_padded_complex(cmd, npad);
    let mut fb = to_padded_complex(resp, npad);

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(npad);
    let ifft = planner.plan_fft_inverse(npad);

    fft.process(&mut fa);
    fft.process(&mut fb);

    // Correlation theorem: IFFT(FA * conj(FB))[k] = sum_t cmd[t + k] * resp[t].
    let mut product: Vec<Complex<f64>> = fa
        .iter()
        .zip(fb.iter())
        .map(|(&x, &y)| x * y.conj())
        .collect();
    ifft.process(&mut product);

    // rustfft leaves the inverse transform unnormalized.
    let scale = 1.0 / npad as f64;

    // Negative lags wrap to the top of the circular buffer; npad >= 2n - 1
    // keeps them alias-free. First maximum wins, scanning lags ascending.
    let mut best_lag = -(n as i64 - 1);
    let mut best_cc = f64::NEG_INFINITY;
    for lag in -(n as i64 - 1)..=(n as i64 - 1) {
        let idx = lag.rem_euclid(npad as i64) as usize;
        let value = product[idx].re * scale;
        if value > best_cc {
            best_cc = value;
            best_lag = lag;
        }
    }

    Ok(LagEstimate {
        shift_seconds: -(best_lag as f64) * dt,
        correlation: best_cc / energy,
    })
}

fn to_padded_complex(x: &[f64], npad: usize) -> Vec<Complex<f64>> {
    x.iter()
        .map(|&v| Complex::new(v, 0.0))
        .chain(std::iter::repeat_n(Complex::new(0.0, 0.0), npad - x.len()))
        .collect()
}
