//! Bounded-radius approximate DTW via recursive coarsening.

use tracing::instrument;

use crate::cost::DtwCost;
use crate::path::{PathStep, WarpingPath};
use crate::signal::SignalView;
use crate::window::SearchWindow;

/// Approximate DTW matcher.
///
/// Halves the resolution of both signals recursively, aligns the coarse
/// pair, projects the coarse path back onto the fine grid, expands it by
/// `radius` cells, and runs the DP only inside the resulting corridor.
/// Near-optimal cost in roughly O((n + m) * radius) time, with the same
/// path invariants as [`ExactDtw`].
///
/// [`ExactDtw`]: crate::ExactDtw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApproxDtw {
    radius: usize,
}

impl ApproxDtw {
    /// Create an approximate DTW matcher with the default radius of 1.
    #[must_use]
    pub fn new() -> Self {
        Self { radius: 1 }
    }

    /// Create an approximate DTW matcher with the given corridor radius.
    ///
    /// Larger radii trade speed for accuracy; a radius of at least
    /// `max(n, m)` makes the result exact.
    #[must_use]
    pub fn with_radius(radius: usize) -> Self {
        Self { radius }
    }

    /// Return the corridor radius.
    #[must_use]
    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Compute the approximate alignment cost and warping path.
    ///
    /// The returned path starts at `(0, 0)`, ends at `(n-1, m-1)`, is
    /// non-decreasing in both coordinates, and every step advances at most
    /// one index per coordinate.
    #[must_use]
    #[instrument(skip(cmd, resp), fields(n = cmd.len(), m = resp.len(), radius = self.radius))]
    pub fn align(&self, cmd: SignalView<'_>, resp: SignalView<'_>) -> (DtwCost, WarpingPath) {
        let (cost, steps) = self.align_slices(cmd.as_slice(), resp.as_slice());
        (DtwCost::new(cost), WarpingPath::new(steps))
    }

    fn align_slices(&self, a: &[f64], b: &[f64]) -> (f64, Vec<PathStep>) {
        // Below this size the full DP is cheaper than another level of
        // recursion.
        let min_size = self.radius + 2;
        if a.len() < min_size || b.len() < min_size {
            return dp_over_window(a, b, &SearchWindow::full(a.len(), b.len()));
        }

        let coarse_a = reduce_by_half(a);
        let coarse_b = reduce_by_half(b);
        let (_, coarse_path) = self.align_slices(&coarse_a, &coarse_b);

        let window = SearchWindow::from_projected_path(&coarse_path, a.len(), b.len(), self.radius);
        dp_over_window(a, b, &window)
    }
}

impl Default for ApproxDtw {
    fn default() -> Self {
        Self::new()
    }
}

/// Halve a signal's resolution by averaging adjacent sample pairs.
///
/// An odd trailing sample is dropped; the search window reconstruction
/// widens uncovered tail rows back out to the final column.
fn reduce_by_half(x: &[f64]) -> Vec<f64> {
    x.chunks_exact(2).map(|pair| (pair[0] + pair[1]) / 2.0).collect()
}

/// Windowed DP with direction bits for traceback.
///
/// Cell `(i, j)` maps to flat index `i * bw + (j - range(i).start)`, where
/// `bw` is the widest row range. Out-of-corridor predecessors read as
/// infinite. Direction selection prefers diagonal, then up, then left, so
/// the traceback tie-breaks identically to the exact matcher.
fn dp_over_window(a: &[f64], b: &[f64], window: &SearchWindow) -> (f64, Vec<PathStep>) {
    let n = a.len();
    let m = b.len();
    let bw = window.max_width();

    let mut cost = vec![f64::INFINITY; n * bw];
    // Direction bits: 0 = diagonal, 1 = up, 2 = left
    let mut dirs = vec![0u8; n * bw];

    for i in 0..n {
        let range = window.range(i);
        let prev_range = if i > 0 { window.range(i - 1) } else { 0..0 };

        for j in range.clone() {
            let local = (a[i] - b[j]).abs();
            let local_j = j - range.start;
            let idx = i * bw + local_j;

            if i == 0 && j == 0 {
                cost[idx] = local;
                dirs[idx] = 0;
                continue;
            }

            let diag = if i > 0 && j > 0 && j - 1 >= prev_range.start && j - 1 < prev_range.end {
                cost[(i - 1) * bw + (j - 1 - prev_range.start)]
            } else {
                f64::INFINITY
            };

            let up = if i > 0 && j >= prev_range.start && j < prev_range.end {
                cost[(i - 1) * bw + (j - prev_range.start)]
            } else {
                f64::INFINITY
            };

            let left = if j > range.start {
                cost[i * bw + local_j - 1]
            } else {
                f64::INFINITY
            };

            let (min_val, dir) = if diag <= up && diag <= left {
                (diag, 0u8)
            } else if up <= left {
                (up, 1u8)
            } else {
                (left, 2u8)
            };

            cost[idx] = local + min_val;
            dirs[idx] = dir;
        }
    }

    // Traceback from (n-1, m-1) to (0, 0).
    let mut steps = Vec::new();
    let mut i = n - 1;
    let mut j = m - 1;
    loop {
        steps.push(PathStep { cmd: i, resp: j });
        if i == 0 && j == 0 {
            break;
        }
        let range = window.range(i);
        let idx = i * bw + (j - range.start);
        match dirs[idx] {
            0 => {
                i -= 1;
                j -= 1;
            }
            1 => {
                i -= 1;
            }
            2 => {
                j -= 1;
            }
            _ => unreachable!("invalid direction byte"),
        }
    }
    steps.reverse();

    let final_range = window.range(n - 1);
    let total = cost[(n - 1) * bw + (m - 1 - final_range.start)];

    (total, steps)
}
