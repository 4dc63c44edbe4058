//! Warping path types and boundary-run cleaning.

/// A single step in a warping path, mapping index `cmd` in the command
/// signal to index `resp` in the response signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathStep {
    /// Index in the command (low-rate) signal.
    pub cmd: usize,
    /// Index in the response (high-rate) signal.
    pub resp: usize,
}

/// An ordered sequence of warping steps from `(0, 0)` to `(n-1, m-1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct WarpingPath(Vec<PathStep>);

impl WarpingPath {
    /// Create a new warping path from a vector of steps.
    pub(crate) fn new(steps: Vec<PathStep>) -> Self {
        Self(steps)
    }

    /// Create a warping path from raw `(cmd, resp)` index pairs.
    ///
    /// Used by callers that synthesize a correspondence (constant-shift
    /// matchers) rather than computing one via DTW.
    #[must_use]
    pub fn from_pairs(pairs: Vec<(usize, usize)>) -> Self {
        Self(
            pairs
                .into_iter()
                .map(|(cmd, resp)| PathStep { cmd, resp })
                .collect(),
        )
    }

    /// Return the warping steps as a slice.
    #[must_use]
    pub fn steps(&self) -> &[PathStep] {
        &self.0
    }

    /// Return the number of steps in the path.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return true if the path contains no steps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Remove spurious one-to-many mappings at the two ends of the path.
    ///
    /// DTW's boundary constraint forces the path to start at `(0, 0)` and end
    /// at `(n-1, m-1)` even when the true alignment does not require matching
    /// the very first or last samples of the shorter signal to long runs of
    /// the longer one. This keeps only the last element of the leading run
    /// sharing the first `cmd` index and the first element of the trailing
    /// run sharing the last `resp` index.
    ///
    /// Idempotent: trimming an already-trimmed path returns it unchanged.
    /// An empty path trims to an empty path.
    #[must_use]
    pub fn trim_boundary_runs(&self) -> WarpingPath {
        let steps = &self.0;
        if steps.is_empty() {
            return WarpingPath(Vec::new());
        }

        // Last index of the leading run that shares the first cmd index.
        let first_cmd = steps[0].cmd;
        let mut k = 0;
        while k + 1 < steps.len() && steps[k + 1].cmd == first_cmd {
            k += 1;
        }

        // First index of the trailing run that shares the last resp index.
        let last_resp = steps[steps.len() - 1].resp;
        let mut m = steps.len() - 1;
        while m > 0 && steps[m - 1].resp == last_resp {
            m -= 1;
        }

        if k > m {
            return WarpingPath(Vec::new());
        }
        WarpingPath(steps[k..=m].to_vec())
    }
}

impl<'a> IntoIterator for &'a WarpingPath {
    type Item = &'a PathStep;
    type IntoIter = std::slice::Iter<'a, PathStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
