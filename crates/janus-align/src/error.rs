//! Error types for the alignment engine.

/// Error type for all fallible operations in the janus-align crate.
#[derive(Debug, thiserror::Error)]
pub enum AlignError {
    /// Returned when a method name does not match any known strategy.
    #[error("unknown alignment method: {name} (expected dtw-exact, dtw-approx, cc-windowed, or cc-full)")]
    UnknownMethod {
        /// The unrecognized name.
        name: String,
    },

    /// Resampling or input validation error.
    #[error(transparent)]
    Resample(#[from] janus_resample::ResampleError),

    /// Signal validation error from the DTW matchers.
    #[error(transparent)]
    Dtw(#[from] janus_dtw::DtwError),

    /// Cross-correlation precondition error.
    #[error(transparent)]
    Xcorr(#[from] janus_xcorr::XcorrError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_unknown_method() {
        let e = AlignError::UnknownMethod {
            name: "cc_naive".to_string(),
        };
        assert!(e.to_string().contains("cc_naive"));
    }

    #[test]
    fn from_resample_error() {
        let re = janus_resample::ResampleError::EmptySeries;
        let ae: AlignError = re.into();
        assert!(matches!(ae, AlignError::Resample(_)));
    }

    #[test]
    fn from_xcorr_error() {
        let xe = janus_xcorr::XcorrError::EmptySignal;
        let ae: AlignError = xe.into();
        assert!(matches!(ae, AlignError::Xcorr(_)));
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<AlignError>();
    }
}
