//! Result type produced by the alignment engine.

use janus_dtw::WarpingPath;

use crate::method::Method;

/// The outcome of aligning one command/response pair with one method.
///
/// Produced once per [`align`](crate::align) invocation and immutable
/// afterwards; consumed by the reporting collaborators.
#[derive(Debug, Clone)]
pub struct AlignmentResult {
    /// The strategy that produced this result.
    pub method: Method,
    /// Best-fit time shift in seconds. Positive means the response lags the
    /// command.
    pub global_shift: f64,
    /// Standard deviation of per-match time offsets, in seconds. Zero for
    /// cross-correlation methods, which model no local variation.
    pub jitter: f64,
    /// Index correspondence between the two resampled channels.
    pub path: WarpingPath,
    /// Matching quality score, nominally in `[-1, 1]`; sentinel values for
    /// degenerate input.
    pub score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_is_cloneable() {
        let r = AlignmentResult {
            method: Method::CcFull,
            global_shift: 0.5,
            jitter: 0.0,
            path: WarpingPath::from_pairs(vec![(0, 1)]),
            score: 0.9,
        };
        let c = r.clone();
        assert_eq!(c.method, Method::CcFull);
        assert_eq!(c.path.len(), 1);
    }
}
