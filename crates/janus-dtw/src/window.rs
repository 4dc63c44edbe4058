//! Per-row search corridors for windowed DTW.

use std::ops::Range;

use crate::path::PathStep;

/// A per-row column corridor restricting which cost-matrix cells are
/// evaluated. Row `i` of the DP may only visit columns in `range(i)`.
///
/// Invariants: every range is non-empty, range starts and ends are
/// non-decreasing across rows, consecutive ranges overlap (so the DP always
/// has a reachable predecessor), row 0 starts at column 0, and the last row
/// ends at column `m`.
#[derive(Debug, Clone)]
pub(crate) struct SearchWindow {
    ranges: Vec<Range<usize>>,
}

impl SearchWindow {
    /// The unrestricted window: every row spans all `m` columns.
    pub(crate) fn full(n: usize, m: usize) -> Self {
        Self {
            ranges: vec![0..m; n],
        }
    }

    /// Build a corridor around a coarse warping path projected onto a grid
    /// twice its resolution, expanded by `radius` cells in every direction.
    ///
    /// Coarse cell `(i, j)` covers fine rows `2i..=2i+1` and fine columns
    /// `2j..=2j+1`. Rows past the projected coverage (odd-length tails)
    /// inherit the previous row's start and widen to the final column.
    pub(crate) fn from_projected_path(
        coarse: &[PathStep],
        n: usize,
        m: usize,
        radius: usize,
    ) -> Self {
        let r = radius as isize;
        let mut lo = vec![usize::MAX; n];
        let mut hi = vec![0usize; n];

        for step in coarse {
            let base_row = 2 * step.cmd as isize;
            let base_col = 2 * step.resp as isize;
            let row_first = (base_row - r).max(0) as usize;
            let row_last = ((base_row + 1 + r).min(n as isize - 1)) as usize;
            let col_lo = (base_col - r).max(0) as usize;
            let col_hi = ((base_col + 2 + r).min(m as isize)) as usize;
            for row in row_first..=row_last {
                lo[row] = lo[row].min(col_lo);
                hi[row] = hi[row].max(col_hi);
            }
        }

        for i in 0..n {
            if lo[i] == usize::MAX {
                lo[i] = if i > 0 { lo[i - 1] } else { 0 };
                hi[i] = m;
            }
        }
        lo[0] = 0;
        hi[n - 1] = m;

        // Monotone envelope: keeps starts/ends non-decreasing and every row
        // overlapping its predecessor.
        for i in 1..n {
            if lo[i] < lo[i - 1] {
                lo[i] = lo[i - 1];
            }
            if hi[i] < hi[i - 1] {
                hi[i] = hi[i - 1];
            }
            if lo[i] >= hi[i - 1] {
                lo[i] = hi[i - 1] - 1;
            }
        }

        Self {
            ranges: lo.into_iter().zip(hi).map(|(l, h)| l..h).collect(),
        }
    }

    /// Column range for a row.
    pub(crate) fn range(&self, row: usize) -> Range<usize> {
        self.ranges[row].clone()
    }

    /// Widest row range, used to size the flat DP buffers.
    pub(crate) fn max_width(&self) -> usize {
        self.ranges.iter().map(|r| r.len()).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn steps(pairs: &[(usize, usize)]) -> Vec<PathStep> {
        pairs
            .iter()
            .map(|&(cmd, resp)| PathStep { cmd, resp })
            .collect()
    }

    #[test]
    fn full_window_covers_everything() {
        let w = SearchWindow::full(3, 5);
        for row in 0..3 {
            assert_eq!(w.range(row), 0..5);
        }
        assert_eq!(w.max_width(), 5);
    }

    #[test]
    fn corners_always_included() {
        let coarse = steps(&[(0, 0), (1, 1), (2, 2)]);
        let w = SearchWindow::from_projected_path(&coarse, 6, 6, 1);
        assert_eq!(w.range(0).start, 0);
        assert_eq!(w.range(5).end, 6);
    }

    #[test]
    fn ranges_are_monotone_and_overlapping() {
        let coarse = steps(&[(0, 0), (1, 0), (2, 1), (3, 2), (3, 3)]);
        let w = SearchWindow::from_projected_path(&coarse, 8, 8, 1);
        for i in 1..8 {
            let prev = w.range(i - 1);
            let curr = w.range(i);
            assert!(curr.start >= prev.start);
            assert!(curr.end >= prev.end);
            assert!(curr.start < prev.end, "row {i} disconnected from row {}", i - 1);
        }
    }

    #[test]
    fn odd_length_tail_rows_covered() {
        // 7 fine rows project from 3 coarse rows; row 6 has no projection.
        let coarse = steps(&[(0, 0), (1, 1), (2, 2)]);
        let w = SearchWindow::from_projected_path(&coarse, 7, 7, 0);
        let last = w.range(6);
        assert!(!last.is_empty());
        assert_eq!(last.end, 7);
    }

    #[test]
    fn radius_widens_the_corridor() {
        let coarse = steps(&[(0, 0), (1, 1), (2, 2)]);
        let narrow = SearchWindow::from_projected_path(&coarse, 6, 6, 0);
        let wide = SearchWindow::from_projected_path(&coarse, 6, 6, 2);
        for row in 0..6 {
            assert!(wide.range(row).start <= narrow.range(row).start);
            assert!(wide.range(row).end >= narrow.range(row).end);
        }
    }
}
