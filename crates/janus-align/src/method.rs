//! Alignment method selection.

use std::str::FromStr;

use crate::error::AlignError;

/// The four interchangeable alignment strategies.
///
/// DTW-family methods produce a warping path and model local jitter;
/// cross-correlation methods produce a single global shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Exact DTW over the full cost matrix.
    DtwExact,
    /// Bounded-radius approximate DTW.
    DtwApprox,
    /// Exhaustive windowed cross-correlation.
    CcWindowed,
    /// Full cross-correlation via FFT.
    CcFull,
}

impl Method {
    /// All methods, in canonical order.
    pub const ALL: [Method; 4] = [
        Method::DtwApprox,
        Method::DtwExact,
        Method::CcWindowed,
        Method::CcFull,
    ];

    /// Canonical name, used in CLI flags and artifact file names.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::DtwExact => "dtw-exact",
            Self::DtwApprox => "dtw-approx",
            Self::CcWindowed => "cc-windowed",
            Self::CcFull => "cc-full",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Method {
    type Err = AlignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dtw-exact" => Ok(Self::DtwExact),
            "dtw-approx" => Ok(Self::DtwApprox),
            "cc-windowed" => Ok(Self::CcWindowed),
            "cc-full" => Ok(Self::CcFull),
            other => Err(AlignError::UnknownMethod {
                name: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_names() {
        for method in Method::ALL {
            let parsed: Method = method.name().parse().unwrap();
            assert_eq!(parsed, method);
        }
    }

    #[test]
    fn unknown_name_rejected() {
        let result: Result<Method, _> = "dtw_library".parse();
        assert!(matches!(
            result,
            Err(AlignError::UnknownMethod { ref name }) if name == "dtw_library"
        ));
    }

    #[test]
    fn display_matches_name() {
        assert_eq!(Method::CcFull.to_string(), "cc-full");
    }
}
