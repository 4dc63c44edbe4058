//! 1-D interpolation of a sampled series onto arbitrary query timestamps.

use crate::error::ResampleError;
use crate::series::SampledSeries;

/// Interpolation method for resampling a value channel onto the grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InterpolationMethod {
    /// Piecewise-linear interpolation between neighboring samples.
    #[default]
    Linear,
    /// Value of the nearest sample in time.
    Nearest,
    /// Value of the most recent sample (zero-order hold).
    Previous,
    /// Natural cubic spline. Requires at least 4 source points.
    Cubic,
}

impl InterpolationMethod {
    /// Canonical lowercase name, as used in CLI flags and artifacts.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Nearest => "nearest",
            Self::Previous => "previous",
            Self::Cubic => "cubic",
        }
    }
}

impl std::fmt::Display for InterpolationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Interpolate a series' value channel at each query timestamp.
///
/// Queries outside the series' own time range extrapolate by constant
/// extension of the boundary values, so every grid point gets a defined
/// value even when one series starts earlier or ends later than the other.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`ResampleError::InsufficientData`] | Cubic requested with fewer than 4 points |
pub fn interpolate(
    series: &SampledSeries,
    queries: &[f64],
    method: InterpolationMethod,
) -> Result<Vec<f64>, ResampleError> {
    let ts = series.timestamps();
    let vs = series.values();
    let n = ts.len();

    // Spline second derivatives are only needed (and only defined) for cubic.
    let spline = match method {
        InterpolationMethod::Cubic => {
            if n < 4 {
                return Err(ResampleError::InsufficientData {
                    method: "cubic",
                    n,
                    min: 4,
                });
            }
            second_derivatives(ts, vs)
        }
        _ => Vec::new(),
    };

    let values = queries
        .iter()
        .map(|&t| {
            if t <= ts[0] {
                return vs[0];
            }
            if t >= ts[n - 1] {
                return vs[n - 1];
            }
            // First index with timestamp > t; the query lies in segment k.
            let k = ts.partition_point(|&x| x <= t) - 1;
            match method {
                InterpolationMethod::Linear => {
                    let w = (t - ts[k]) / (ts[k + 1] - ts[k]);
                    vs[k] + w * (vs[k + 1] - vs[k])
                }
                InterpolationMethod::Nearest => {
                    if t - ts[k] <= ts[k + 1] - t {
                        vs[k]
                    } else {
                        vs[k + 1]
                    }
                }
                InterpolationMethod::Previous => vs[k],
                InterpolationMethod::Cubic => eval_spline(ts, vs, &spline, k, t),
            }
        })
        .collect();

    Ok(values)
}

/// Second derivatives of the natural cubic spline through the knots.
///
/// Solves the standard tridiagonal system with the Thomas algorithm;
/// natural boundary conditions pin both end second derivatives to zero.
fn second_derivatives(ts: &[f64], vs: &[f64]) -> Vec<f64> {
    let n = ts.len();
    let mut m = vec![0.0; n];
    if n < 3 {
        return m;
    }

    // Forward sweep over the interior equations.
    let mut diag = vec![0.0; n];
    let mut rhs = vec![0.0; n];
    for i in 1..n - 1 {
        let h0 = ts[i] - ts[i - 1];
        let h1 = ts[i + 1] - ts[i];
        let d = 2.0 * (h0 + h1);
        let r = 6.0 * ((vs[i + 1] - vs[i]) / h1 - (vs[i] - vs[i - 1]) / h0);
        if i == 1 {
            diag[i] = d;
            rhs[i] = r;
        } else {
            let w = h0 / diag[i - 1];
            diag[i] = d - w * h0;
            rhs[i] = r - w * rhs[i - 1];
        }
    }

    // Back substitution; m[n - 1] is already zero from the natural boundary.
    for i in (1..n - 1).rev() {
        let h1 = ts[i + 1] - ts[i];
        m[i] = (rhs[i] - h1 * m[i + 1]) / diag[i];
    }

    m
}

fn eval_spline(ts: &[f64], vs: &[f64], m: &[f64], k: usize, t: f64) -> f64 {
    let h = ts[k + 1] - ts[k];
    let a = (ts[k + 1] - t) / h;
    let b = (t - ts[k]) / h;
    a * vs[k]
        + b * vs[k + 1]
        + ((a * a * a - a) * m[k] + (b * b * b - b) * m[k + 1]) * (h * h) / 6.0
}
