//! Alignment engine for command/response signal pairs.
//!
//! Dispatches on the requested [`Method`], runs the corresponding matcher,
//! and derives the global time shift, local jitter, correspondence path,
//! and matching score into a uniform [`AlignmentResult`].

mod align;
mod config;
mod error;
mod method;
mod result;

pub use align::{align, align_resampled};
pub use config::AlignConfig;
pub use error::AlignError;
pub use method::Method;
pub use result::AlignmentResult;
