//! Exact DTW via the full dynamic-programming matrix.

use tracing::instrument;

use crate::cost::DtwCost;
use crate::path::{PathStep, WarpingPath};
use crate::signal::SignalView;

/// Exact DTW matcher.
///
/// Computes the full `(n+1) x (m+1)` cumulative cost matrix with L1 local
/// cost and reconstructs the optimal warping path by backtracking. O(n * m)
/// time and space; prefer [`ApproxDtw`] for large inputs.
///
/// [`ApproxDtw`]: crate::ApproxDtw
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExactDtw;

impl ExactDtw {
    /// Create an exact DTW matcher.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Compute the optimal alignment cost and warping path.
    ///
    /// The returned path starts at `(0, 0)`, ends at `(n-1, m-1)`, is
    /// non-decreasing in both coordinates, and every step advances at most
    /// one index per coordinate.
    #[must_use]
    #[instrument(skip(cmd, resp), fields(n = cmd.len(), m = resp.len()))]
    pub fn align(&self, cmd: SignalView<'_>, resp: SignalView<'_>) -> (DtwCost, WarpingPath) {
        let a = cmd.as_slice();
        let b = resp.as_slice();
        let n = a.len();
        let m = b.len();
        let width = m + 1;

        // Cumulative cost arena, row-major, sized once per call. The first
        // row and column are infinite except the origin, so every path is
        // anchored at the start of both signals.
        let mut cost = vec![f64::INFINITY; (n + 1) * width];
        cost[0] = 0.0;

        for i in 1..=n {
            for j in 1..=m {
                let local = (a[i - 1] - b[j - 1]).abs();
                let up = cost[(i - 1) * width + j];
                let left = cost[i * width + (j - 1)];
                let diag = cost[(i - 1) * width + (j - 1)];
                cost[i * width + j] = local + up.min(left).min(diag);
            }
        }

        let total = cost[n * width + m];

        // Backtrack from (n, m), emitting the matched pair before stepping.
        // Tie-break priority: diagonal, then up, then left.
        let mut steps = Vec::new();
        let mut i = n;
        let mut j = m;
        while i > 0 && j > 0 {
            steps.push(PathStep {
                cmd: i - 1,
                resp: j - 1,
            });
            let up = cost[(i - 1) * width + j];
            let left = cost[i * width + (j - 1)];
            let diag = cost[(i - 1) * width + (j - 1)];
            let min = diag.min(up).min(left);
            if min == diag {
                i -= 1;
                j -= 1;
            } else if min == up {
                i -= 1;
            } else {
                j -= 1;
            }
        }
        steps.reverse();

        (DtwCost::new(total), WarpingPath::new(steps))
    }
}
